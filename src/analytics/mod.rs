//! Quiz analytics: per-topic mastery, blind spots, score trend and
//! topic catch-up briefs over a store of graded attempts.

mod aggregate;
mod catchup;
mod report;
pub mod store;
mod topics;

#[cfg(test)]
pub(crate) mod fixtures;

use std::error::Error;
use std::path::Path;

use crate::gateway::ReasoningGateway;
pub use aggregate::Analytics;
pub use catchup::{CatchupBrief, catch_up};
use report::{print_analytics, print_catchup};
use store::{EvaluationStore, HistoryFile};

/// Classify every answered question and aggregate the store.
/// An empty store skips classification entirely.
pub fn compute_analytics(store: &dyn EvaluationStore, gateway: &dyn ReasoningGateway) -> Analytics {
    let records = store.evaluations();
    let sessions = store.sessions();
    if records.is_empty() {
        tracing::info!("no graded answers yet");
        return Analytics::empty(sessions.len());
    }

    let map = topics::classify(records.iter().map(|r| r.question_text.as_str()), gateway);
    tracing::debug!("{} distinct questions labeled", map.len());
    let result = aggregate::aggregate(&records, &map, &store.attempts(), &sessions);
    tracing::info!(
        "analytics: {} answers across {} topics, {} blind spots",
        result.total_questions_answered,
        result.topic_scores.len(),
        result.blind_spots.len()
    );
    result
}

pub fn run(
    history: &Path,
    json: bool,
    gateway: &dyn ReasoningGateway,
) -> Result<(), Box<dyn Error>> {
    let store = HistoryFile::load(history)?;
    let result = compute_analytics(&store, gateway);
    if json {
        crate::report_helpers::print_json_stdout(&result)?;
    } else {
        print_analytics(&result);
    }
    Ok(())
}

pub fn run_catchup(
    history: &Path,
    topic: &str,
    json: bool,
    gateway: &dyn ReasoningGateway,
) -> Result<(), Box<dyn Error>> {
    let store = HistoryFile::load(history)?;
    let brief = catch_up(&store, topic, gateway)?;
    if json {
        crate::report_helpers::print_json_stdout(&brief)?;
    } else {
        print_catchup(&brief);
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
