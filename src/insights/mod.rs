//! Session insights: project decisions, patterns, gotchas and proposed
//! rules extracted from one recorded session transcript.

mod report;

use std::error::Error as StdError;
use std::path::Path;

use serde::Serialize;

use crate::analytics::store::{EvaluationStore, HistoryFile, iso_date};
use crate::error::{Error, Result};
use crate::gateway::{ReasoningGateway, SessionInsights};
use report::{print_json, print_report};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub session_id: i64,
    pub title: String,
    /// `YYYY-MM-DD` of the session, empty if unknown.
    pub date: String,
    #[serde(flatten)]
    pub insights: SessionInsights,
}

/// Extract insights for `session_id`. Unlike topic classification there is
/// no fallback: an unavailable service or a malformed answer is an error
/// naming the session.
pub fn extract(
    store: &dyn EvaluationStore,
    session_id: i64,
    gateway: &dyn ReasoningGateway,
) -> Result<SessionReport> {
    let session = store
        .sessions()
        .into_iter()
        .find(|s| s.id == session_id)
        .ok_or(Error::UnknownSession(session_id))?;
    if session.transcript.trim().is_empty() {
        return Err(Error::EmptyTranscript(session_id));
    }

    tracing::info!(
        "extracting insights from session {session_id} ({} chars)",
        session.transcript.chars().count()
    );
    let insights = gateway
        .extract_insights(&session.title, &session.transcript)
        .map_err(|source| Error::Gateway {
            context: format!("insights for session {session_id} ({:?})", session.title),
            source,
        })?;
    tracing::info!(
        "extracted {} decisions, {} patterns, {} gotchas, {} proposed rules",
        insights.decisions.len(),
        insights.patterns.len(),
        insights.gotchas.len(),
        insights.proposed_rules.len()
    );

    Ok(SessionReport {
        session_id,
        date: iso_date(session.created_at),
        title: session.title,
        insights,
    })
}

pub fn run(
    history: &Path,
    session_id: i64,
    json: bool,
    gateway: &dyn ReasoningGateway,
) -> std::result::Result<(), Box<dyn StdError>> {
    let store = HistoryFile::load(history)?;
    let report = extract(&store, session_id, gateway)?;
    if json {
        print_json(&report)?;
    } else {
        print_report(&report);
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
