use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::store::{AttemptSummary, EvaluationRecord, SessionRecord, iso_date, session_title};
use super::topics::TopicMap;
use crate::util::{mean, round2};

/// Mean score below which a topic is weak.
pub const BLIND_SPOT_SCORE: f64 = 60.0;

/// Answers needed before a weak topic counts as a blind spot.
pub const BLIND_SPOT_MIN_QUESTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicStat {
    pub topic: String,
    pub avg_score: f64,
    pub question_count: usize,
    pub sessions_appeared_in: usize,
    pub is_blind_spot: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub session_id: i64,
    pub title: String,
    pub score: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analytics {
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub total_questions_answered: usize,
    pub overall_avg_score: f64,
    pub topic_scores: Vec<TopicStat>,
    pub blind_spots: Vec<TopicStat>,
    pub trend: Vec<TrendPoint>,
}

impl Analytics {
    /// Valid empty state: nothing answered yet.
    pub fn empty(total_sessions: usize) -> Self {
        Self {
            total_sessions,
            completed_sessions: 0,
            total_questions_answered: 0,
            overall_avg_score: 0.0,
            topic_scores: Vec::new(),
            blind_spots: Vec::new(),
            trend: Vec::new(),
        }
    }
}

pub fn is_blind_spot(avg_score: f64, question_count: usize) -> bool {
    avg_score < BLIND_SPOT_SCORE && question_count >= BLIND_SPOT_MIN_QUESTIONS
}

/// Per-topic statistics, topics in order of first appearance. Every
/// evaluation counts, including repeated answers to the same question.
pub fn topic_stats(records: &[EvaluationRecord], topics: &TopicMap) -> Vec<TopicStat> {
    struct Acc<'a> {
        topic: &'a str,
        scores: Vec<f64>,
        sessions: HashSet<i64>,
    }

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut accs: Vec<Acc> = Vec::new();
    for record in records {
        let topic = topics.topic_of(&record.question_text);
        let slot = *index.entry(topic).or_insert_with(|| {
            accs.push(Acc {
                topic,
                scores: Vec::new(),
                sessions: HashSet::new(),
            });
            accs.len() - 1
        });
        accs[slot].scores.push(f64::from(record.score));
        accs[slot].sessions.insert(record.session_id);
    }

    accs.into_iter()
        .map(|acc| {
            let avg = round2(mean(&acc.scores));
            let count = acc.scores.len();
            TopicStat {
                topic: acc.topic.to_string(),
                avg_score: avg,
                question_count: count,
                sessions_appeared_in: acc.sessions.len(),
                // judged on the reported value so the flag always agrees with it
                is_blind_spot: is_blind_spot(avg, count),
            }
        })
        .collect()
}

/// One point per session from its most recent attempt, oldest date first.
/// Attempts with the same timestamp resolve to the higher attempt id.
pub fn trend(attempts: &[AttemptSummary], sessions: &[SessionRecord]) -> Vec<TrendPoint> {
    let mut order: Vec<i64> = Vec::new();
    let mut latest: HashMap<i64, &AttemptSummary> = HashMap::new();
    for attempt in attempts {
        match latest.get(&attempt.session_id) {
            None => {
                order.push(attempt.session_id);
                latest.insert(attempt.session_id, attempt);
            }
            Some(current) => {
                if (attempt.created_at, attempt.id) > (current.created_at, current.id) {
                    latest.insert(attempt.session_id, attempt);
                }
            }
        }
    }

    let mut points: Vec<TrendPoint> = order
        .into_iter()
        .map(|sid| {
            let attempt = latest[&sid];
            TrendPoint {
                session_id: sid,
                title: session_title(sessions, sid),
                score: round2(attempt.score),
                date: iso_date(attempt.created_at),
            }
        })
        .collect();
    points.sort_by(|a, b| a.date.cmp(&b.date));
    points
}

/// Assemble the full analytics view from classified evaluations.
pub fn aggregate(
    records: &[EvaluationRecord],
    topics: &TopicMap,
    attempts: &[AttemptSummary],
    sessions: &[SessionRecord],
) -> Analytics {
    if records.is_empty() {
        return Analytics::empty(sessions.len());
    }

    let topic_scores = topic_stats(records, topics);
    let blind_spots = topic_scores
        .iter()
        .filter(|t| t.is_blind_spot)
        .cloned()
        .collect();
    let all_scores: Vec<f64> = records.iter().map(|r| f64::from(r.score)).collect();
    let completed: HashSet<i64> = attempts.iter().map(|a| a.session_id).collect();

    Analytics {
        total_sessions: sessions.len(),
        completed_sessions: completed.len(),
        total_questions_answered: records.len(),
        overall_avg_score: round2(mean(&all_scores)),
        topic_scores,
        blind_spots,
        trend: trend(attempts, sessions),
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
