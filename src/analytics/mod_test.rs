use std::fs;

use super::*;
use crate::analytics::fixtures::{MemoryStore, attempt, eval, session};
use crate::gateway::OfflineGateway;
use crate::gateway::testing::ScriptedGateway;
use tempfile::TempDir;

const HISTORY: &str = r#"{
  "sessions": [{"id": 1, "title": "Auth rework", "transcript": "We moved to JWT."}],
  "quizzes": [{"id": 10, "session_id": 1, "questions": [
    {"id": "q1", "question": "Why JWT?"},
    {"id": "q2", "question": "Where is the secret stored?"}
  ]}],
  "attempts": [{"id": 100, "session_id": 1, "quiz_id": 10, "score": 45.0,
    "created_at": "2024-05-01T10:00:00Z",
    "answers": [{"question_id": "q1", "answer_text": "stateless"}],
    "evaluations": [
      {"question_id": "q1", "verdict": "partial", "score": 50, "feedback": "ok"},
      {"question_id": "q2", "verdict": "incorrect", "score": 40, "feedback": "no"}
    ]}]
}"#;

#[test]
fn empty_store_skips_classification() {
    let store = MemoryStore {
        sessions: vec![session(1, "A"), session(2, "B")],
        ..MemoryStore::default()
    };
    let gw = ScriptedGateway::new();
    let result = compute_analytics(&store, &gw);

    assert_eq!(result, Analytics::empty(2));
    assert!(gw.classify_calls.lock().unwrap().is_empty());
}

#[test]
fn classification_failure_still_aggregates() {
    let store = MemoryStore {
        evaluations: vec![eval("a", 1, 40), eval("b", 1, 50)],
        attempts: vec![attempt(1, 1, 45.0, "2024-05-01T10:00:00Z")],
        sessions: vec![session(1, "A")],
    };
    let result = compute_analytics(&store, &OfflineGateway);

    assert_eq!(result.topic_scores.len(), 1);
    assert_eq!(result.topic_scores[0].topic, "General Concepts");
    assert_eq!(result.topic_scores[0].avg_score, 45.0);
    assert_eq!(result.blind_spots.len(), 1);
    assert_eq!(result.completed_sessions, 1);
}

#[test]
fn history_file_end_to_end() {
    let store = HistoryFile::from_json(HISTORY).unwrap();
    let gw = ScriptedGateway::new().with_topics(&["Security", "Security"]);
    let result = compute_analytics(&store, &gw);

    assert_eq!(result.total_sessions, 1);
    assert_eq!(result.total_questions_answered, 2);
    assert_eq!(result.overall_avg_score, 45.0);
    assert_eq!(result.blind_spots[0].topic, "Security");
    assert_eq!(result.trend[0].title, "Auth rework");
    assert_eq!(result.trend[0].date, "2024-05-01");
}

#[test]
fn run_reads_history_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    fs::write(&path, HISTORY).unwrap();

    run(&path, true, &OfflineGateway).unwrap();
    run(&path, false, &OfflineGateway).unwrap();
}

#[test]
fn run_missing_history_fails() {
    let dir = TempDir::new().unwrap();
    let err = run(&dir.path().join("nope.json"), false, &OfflineGateway).unwrap_err();
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn run_catchup_surfaces_gateway_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    fs::write(&path, HISTORY).unwrap();

    // Offline: every question lands in the default topic, explain fails.
    let err = run_catchup(&path, "general concepts", false, &OfflineGateway).unwrap_err();
    assert!(err.to_string().contains("catch-up brief"));
}
