use std::fmt::Write as _;

use serde::Serialize;

use super::store::{EvaluationRecord, EvaluationStore, SessionRecord};
use super::topics;
use crate::error::{Error, Result};
use crate::gateway::ReasoningGateway;
use crate::util::truncate_chars;

/// Characters of each session transcript included in the context document.
pub const TRANSCRIPT_BUDGET_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchupBrief {
    pub topic: String,
    pub brief: String,
    pub source_sessions: Vec<i64>,
}

impl CatchupBrief {
    fn informational(topic: &str, brief: String) -> Self {
        Self {
            topic: topic.to_string(),
            brief,
            source_sessions: Vec::new(),
        }
    }
}

/// Distinct session ids in first-seen order.
fn session_ids(records: &[&EvaluationRecord]) -> Vec<i64> {
    let mut ids = Vec::new();
    for record in records {
        if !ids.contains(&record.session_id) {
            ids.push(record.session_id);
        }
    }
    ids
}

/// Context document handed to the gateway: the missed answers followed by
/// the transcripts of the sessions they came from.
pub fn context_document(
    topic: &str,
    missed: &[&EvaluationRecord],
    session_ids: &[i64],
    sessions: &[SessionRecord],
) -> String {
    let mut doc = format!("Topic: {topic}\n\nWRONG / PARTIAL ANSWERS:\n");
    for record in missed {
        let _ = writeln!(doc, "  Question: {}", record.question_text);
        let _ = writeln!(doc, "  User's answer: {}", record.answer_text);
        let _ = writeln!(
            doc,
            "  Verdict: {} (score {}/100)",
            record.verdict.as_str(),
            record.score
        );
        let _ = writeln!(doc, "  Feedback: {}", record.feedback);
        doc.push('\n');
    }

    let _ = writeln!(
        doc,
        "RELEVANT SESSION TRANSCRIPTS (truncated to {TRANSCRIPT_BUDGET_CHARS} chars each):"
    );
    for sid in session_ids {
        if let Some(session) = sessions.iter().find(|s| s.id == *sid) {
            let _ = write!(
                doc,
                "\n--- Session {}: {} ---\n{}\n",
                session.id,
                session.title,
                truncate_chars(&session.transcript, TRANSCRIPT_BUDGET_CHARS)
            );
        }
    }
    doc
}

/// Build a remediation brief for `topic` from the partial and incorrect
/// answers classified under it.
///
/// Having nothing to remediate is a successful, informational result. A
/// gateway failure while writing the brief is an error.
pub fn catch_up(
    store: &dyn EvaluationStore,
    topic: &str,
    gateway: &dyn ReasoningGateway,
) -> Result<CatchupBrief> {
    if store.attempts().is_empty() {
        return Ok(CatchupBrief::informational(
            topic,
            format!(
                "No quiz attempts found yet. Complete some quizzes first, \
                 then come back for a {topic} catch-up."
            ),
        ));
    }

    let records = store.evaluations();
    let map = topics::classify(records.iter().map(|r| r.question_text.as_str()), gateway);
    let wanted = topic.to_lowercase();
    let missed: Vec<&EvaluationRecord> = records
        .iter()
        .filter(|r| r.verdict.needs_review())
        .filter(|r| map.topic_of(&r.question_text).to_lowercase() == wanted)
        .collect();

    if missed.is_empty() {
        tracing::info!("no answers to review for topic {topic:?}");
        return Ok(CatchupBrief::informational(
            topic,
            format!(
                "Great news: no wrong or partial answers found for the topic '{topic}'. \
                 Either you aced it or haven't been quizzed on it yet."
            ),
        ));
    }

    let sids = session_ids(&missed);
    tracing::info!(
        "building catch-up for {topic:?} from {} answers in {} sessions",
        missed.len(),
        sids.len()
    );
    let document = context_document(topic, &missed, &sids, &store.sessions());
    let brief = gateway.explain(&document).map_err(|source| Error::Gateway {
        context: format!("catch-up brief for topic {topic:?}"),
        source,
    })?;

    Ok(CatchupBrief {
        topic: topic.to_string(),
        brief,
        source_sessions: sids,
    })
}

#[cfg(test)]
#[path = "catchup_test.rs"]
mod tests;
