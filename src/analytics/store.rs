//! Read-only access to recorded sessions, quizzes and graded attempts.
//!
//! The analyses only see the [`EvaluationStore`] trait. [`HistoryFile`]
//! reads a JSON export of the quiz database:
//!
//! ```json
//! {
//!   "sessions": [{"id": 1, "title": "...", "transcript": "...", "created_at": "..."}],
//!   "quizzes":  [{"id": 1, "session_id": 1, "questions": [{"id": "q1", "question": "..."}]}],
//!   "attempts": [{"id": 1, "session_id": 1, "quiz_id": 1, "score": 72.5,
//!                 "created_at": "2024-05-01T10:00:00Z",
//!                 "answers": [{"question_id": "q1", "answer_text": "..."}],
//!                 "evaluations": [{"question_id": "q1", "verdict": "partial",
//!                                  "score": 55, "feedback": "..."}]}]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Question ids are free-form in stored quizzes: `"q1"` or `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Partial,
    #[default]
    Incorrect,
}

impl Verdict {
    /// Partial and incorrect answers are the ones worth remediating.
    pub fn needs_review(self) -> bool {
        matches!(self, Verdict::Partial | Verdict::Incorrect)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Correct => "correct",
            Verdict::Partial => "partial",
            Verdict::Incorrect => "incorrect",
        }
    }
}

/// One graded answer, flattened with its question text and session.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRecord {
    #[allow(dead_code)]
    pub question_id: QuestionId,
    #[allow(dead_code)]
    pub quiz_id: i64,
    pub question_text: String,
    pub session_id: i64,
    #[allow(dead_code)]
    pub session_title: String,
    pub score: u32,
    pub verdict: Verdict,
    pub feedback: String,
    pub answer_text: String,
    /// `YYYY-MM-DD` of the owning attempt, empty if unknown.
    #[allow(dead_code)]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttemptSummary {
    pub id: i64,
    pub session_id: i64,
    pub score: f64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

pub trait EvaluationStore {
    fn evaluations(&self) -> Vec<EvaluationRecord>;
    fn attempts(&self) -> Vec<AttemptSummary>;
    fn sessions(&self) -> Vec<SessionRecord>;
}

pub fn session_title(sessions: &[SessionRecord], id: i64) -> String {
    sessions
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.title.clone())
        .unwrap_or_else(|| format!("Session {id}"))
}

pub fn iso_date(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.date_naive().format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Default, Deserialize)]
struct History {
    #[serde(default)]
    sessions: Vec<SessionRecord>,
    #[serde(default)]
    quizzes: Vec<QuizRow>,
    #[serde(default)]
    attempts: Vec<AttemptRow>,
}

#[derive(Debug, Deserialize)]
struct QuizRow {
    id: i64,
    #[serde(default)]
    questions: Vec<QuestionRow>,
}

#[derive(Debug, Deserialize)]
struct QuestionRow {
    id: QuestionId,
    #[serde(default)]
    question: String,
}

#[derive(Debug, Deserialize)]
struct AttemptRow {
    id: i64,
    session_id: i64,
    quiz_id: i64,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    answers: Vec<AnswerRow>,
    #[serde(default)]
    evaluations: Vec<EvaluationRow>,
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    question_id: QuestionId,
    #[serde(default)]
    answer_text: String,
}

#[derive(Debug, Deserialize)]
struct EvaluationRow {
    question_id: QuestionId,
    #[serde(default)]
    verdict: Verdict,
    #[serde(default)]
    score: u32,
    #[serde(default)]
    feedback: String,
}

/// JSON export of the quiz database.
#[derive(Debug, Default)]
pub struct HistoryFile {
    history: History,
}

impl HistoryFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Store {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(Self {
            history: serde_json::from_str(text)?,
        })
    }
}

impl EvaluationStore for HistoryFile {
    fn evaluations(&self) -> Vec<EvaluationRecord> {
        let h = &self.history;
        let questions: HashMap<(i64, &QuestionId), &str> = h
            .quizzes
            .iter()
            .flat_map(|quiz| {
                quiz.questions
                    .iter()
                    .map(move |q| ((quiz.id, &q.id), q.question.as_str()))
            })
            .collect();

        let mut records = Vec::new();
        for attempt in &h.attempts {
            let title = session_title(&h.sessions, attempt.session_id);
            let date = iso_date(attempt.created_at);
            for ev in &attempt.evaluations {
                let question_text = questions
                    .get(&(attempt.quiz_id, &ev.question_id))
                    .copied()
                    .unwrap_or_default();
                let answer_text = attempt
                    .answers
                    .iter()
                    .find(|a| a.question_id == ev.question_id)
                    .map(|a| a.answer_text.clone())
                    .unwrap_or_default();
                records.push(EvaluationRecord {
                    question_id: ev.question_id.clone(),
                    quiz_id: attempt.quiz_id,
                    question_text: question_text.to_string(),
                    session_id: attempt.session_id,
                    session_title: title.clone(),
                    score: ev.score,
                    verdict: ev.verdict,
                    feedback: ev.feedback.clone(),
                    answer_text,
                    date: date.clone(),
                });
            }
        }
        records
    }

    fn attempts(&self) -> Vec<AttemptSummary> {
        self.history
            .attempts
            .iter()
            .map(|a| AttemptSummary {
                id: a.id,
                session_id: a.session_id,
                score: a.score,
                created_at: a.created_at,
            })
            .collect()
    }

    fn sessions(&self) -> Vec<SessionRecord> {
        self.history.sessions.clone()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
