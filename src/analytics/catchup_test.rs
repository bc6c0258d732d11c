use super::*;
use crate::analytics::fixtures::{MemoryStore, attempt, eval, session};
use crate::gateway::testing::ScriptedGateway;

fn quiz_store() -> MemoryStore {
    MemoryStore {
        evaluations: vec![
            eval("Why rotate refresh tokens?", 2, 20),
            eval("How do mocks work?", 1, 40),
            eval("What is CSRF?", 1, 50),
            eval("What does bcrypt salt?", 3, 90),
        ],
        attempts: vec![
            attempt(1, 1, 45.0, "2024-05-01T10:00:00Z"),
            attempt(2, 2, 20.0, "2024-05-02T10:00:00Z"),
            attempt(3, 3, 90.0, "2024-05-03T10:00:00Z"),
        ],
        sessions: vec![session(1, "Auth rework"), session(2, "Token refresh")],
    }
}

#[test]
fn empty_store_returns_informational_brief() {
    let gw = ScriptedGateway::new();
    let brief = catch_up(&MemoryStore::default(), "Security", &gw).unwrap();
    assert!(brief.brief.starts_with("No quiz attempts found yet."));
    assert!(brief.brief.contains("Security catch-up"));
    assert!(brief.source_sessions.is_empty());
    assert!(gw.classify_calls.lock().unwrap().is_empty());
}

#[test]
fn no_wrong_answers_is_success_without_explain_call() {
    let store = MemoryStore {
        evaluations: vec![eval("What is CSRF?", 1, 95)],
        attempts: vec![attempt(1, 1, 95.0, "2024-05-01T10:00:00Z")],
        ..MemoryStore::default()
    };
    let gw = ScriptedGateway::new().with_topics(&["Security"]);
    let brief = catch_up(&store, "Security", &gw).unwrap();

    assert!(brief.brief.contains("no wrong or partial answers found for the topic 'Security'"));
    assert!(brief.source_sessions.is_empty());
    assert!(gw.explain_calls.lock().unwrap().is_empty());
}

#[test]
fn ungraded_attempts_are_not_reported_as_missing_attempts() {
    let store = MemoryStore {
        attempts: vec![attempt(1, 1, 0.0, "2024-05-01T10:00:00Z")],
        ..MemoryStore::default()
    };
    let gw = ScriptedGateway::new();
    let brief = catch_up(&store, "Security", &gw).unwrap();

    assert!(brief.brief.contains("no wrong or partial answers found"));
    assert!(!brief.brief.contains("No quiz attempts"));
    assert!(gw.classify_calls.lock().unwrap().is_empty(), "nothing to classify");
}

#[test]
fn brief_covers_missed_answers_for_topic() {
    let gw = ScriptedGateway::new()
        .with_topics(&["Security", "Testing", "Security", "Security"])
        .with_explanation("Revisit token rotation.");
    let brief = catch_up(&quiz_store(), "security", &gw).unwrap();

    assert_eq!(brief.topic, "security");
    assert_eq!(brief.brief, "Revisit token rotation.");
    assert_eq!(brief.source_sessions, vec![2, 1], "first-seen order");

    let calls = gw.explain_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let doc = &calls[0];
    assert!(doc.starts_with("Topic: security\n\nWRONG / PARTIAL ANSWERS:\n"));
    assert!(doc.contains("  Question: Why rotate refresh tokens?\n"));
    assert!(doc.contains("  User's answer: answer to Why rotate refresh tokens?\n"));
    assert!(doc.contains("  Verdict: incorrect (score 20/100)\n"));
    assert!(doc.contains("  Verdict: partial (score 50/100)\n"));
    assert!(doc.contains("--- Session 2: Token refresh ---\ntranscript of Token refresh"));
    assert!(!doc.contains("How do mocks work?"), "other topic excluded");
    assert!(!doc.contains("bcrypt"), "correct answers excluded");
}

#[test]
fn explain_failure_is_an_error_naming_the_topic() {
    let gw = ScriptedGateway::new().with_topics(&["Security", "Testing", "Security", "Security"]);
    let err = catch_up(&quiz_store(), "Security", &gw).unwrap_err();
    assert!(matches!(err, Error::Gateway { .. }));
    assert!(err.to_string().contains("\"Security\""));
}

#[test]
fn transcripts_are_truncated() {
    let mut long = session(1, "Long");
    long.transcript = "x".repeat(TRANSCRIPT_BUDGET_CHARS + 500);
    let record = eval("q", 1, 10);
    let doc = context_document("T", &[&record], &[1], &[long]);

    let body = doc.split("--- Session 1: Long ---\n").nth(1).unwrap();
    assert_eq!(body.trim_end().len(), TRANSCRIPT_BUDGET_CHARS);
}

#[test]
fn unknown_sessions_are_skipped_in_document() {
    let record = eval("q", 9, 10);
    let doc = context_document("T", &[&record], &[9], &[]);
    assert!(!doc.contains("--- Session"));
}
