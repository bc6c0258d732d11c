//! Record builders and an in-memory store for analytics tests.

use super::store::{
    AttemptSummary, EvaluationRecord, EvaluationStore, QuestionId, SessionRecord, Verdict,
};
use super::topics::TopicMap;

/// Evaluation whose verdict follows the grading bands (70+ correct, 30+ partial).
pub fn eval(question: &str, session_id: i64, score: u32) -> EvaluationRecord {
    let verdict = if score >= 70 {
        Verdict::Correct
    } else if score >= 30 {
        Verdict::Partial
    } else {
        Verdict::Incorrect
    };
    EvaluationRecord {
        question_id: QuestionId::Text("q1".to_string()),
        quiz_id: session_id * 10,
        question_text: question.to_string(),
        session_id,
        session_title: format!("Session {session_id}"),
        score,
        verdict,
        feedback: format!("feedback on {question}"),
        answer_text: format!("answer to {question}"),
        date: "2024-05-01".to_string(),
    }
}

pub fn attempt(id: i64, session_id: i64, score: f64, created_at: &str) -> AttemptSummary {
    AttemptSummary {
        id,
        session_id,
        score,
        created_at: Some(created_at.parse().unwrap()),
    }
}

pub fn session(id: i64, title: &str) -> SessionRecord {
    SessionRecord {
        id,
        title: title.to_string(),
        transcript: format!("transcript of {title}"),
        created_at: None,
    }
}

pub fn topics(pairs: &[(&str, &str)]) -> TopicMap {
    pairs
        .iter()
        .map(|(q, t)| (q.to_string(), t.to_string()))
        .collect()
}

#[derive(Default)]
pub struct MemoryStore {
    pub evaluations: Vec<EvaluationRecord>,
    pub attempts: Vec<AttemptSummary>,
    pub sessions: Vec<SessionRecord>,
}

impl EvaluationStore for MemoryStore {
    fn evaluations(&self) -> Vec<EvaluationRecord> {
        self.evaluations.clone()
    }

    fn attempts(&self) -> Vec<AttemptSummary> {
        self.attempts.clone()
    }

    fn sessions(&self) -> Vec<SessionRecord> {
        self.sessions.clone()
    }
}
