//! Reasoning gateway: the boundary to the external text-reasoning service.
//!
//! Every analysis talks to the service through the [`ReasoningGateway`]
//! trait so that production ([`ClaudeGateway`]) and test doubles are swapped
//! by injection. Callers decide what a failure means: risk scoring falls
//! back per batch, topic classification falls back per call, explanations
//! surface the error.

mod claude;
mod client;
mod prompts;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GatewayConfig;

pub use claude::ClaudeGateway;

/// Environment variable holding the API key for [`ClaudeGateway`].
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Transport failure, timeout, non-success status, or no gateway configured.
    #[error("reasoning service unavailable: {0}")]
    Unavailable(String),

    /// The service answered but the payload did not have the expected shape.
    #[error("malformed response from reasoning service: {0}")]
    MalformedResponse(String),
}

/// One file of a risk batch as sent to the service.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFile {
    pub relative_path: String,
    pub content_snippet: String,
}

/// Risk verdict for the file at `index` within its batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RiskAssessment {
    pub index: usize,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub blast_radius: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoConnection {
    #[serde(default)]
    pub from_repo: String,
    #[serde(default)]
    pub to_repo: String,
    #[serde(default = "default_connection_type")]
    pub connection_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub evidence: String,
}

fn default_connection_type() -> String {
    "other".to_string()
}

/// Cross-repo connection analysis as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoAnalysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub connections: Vec<RepoConnection>,
    #[serde(default)]
    pub repo_briefs: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default)]
    pub decision: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub alternatives_rejected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gotcha {
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedRule {
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub section: String,
}

/// Project knowledge extracted from one session transcript. All four lists
/// are required in the service's answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInsights {
    pub decisions: Vec<Decision>,
    pub patterns: Vec<Pattern>,
    pub gotchas: Vec<Gotcha>,
    pub proposed_rules: Vec<ProposedRule>,
}

pub trait ReasoningGateway: Send + Sync {
    /// Score one batch of files. Items are aligned to batch-local indices.
    fn score_risk_batch(&self, files: &[BatchFile]) -> Result<Vec<RiskAssessment>, GatewayError>;

    /// Label each question with a short topic, same order as the input.
    /// The returned list may be shorter or longer than the input.
    fn classify_topics(&self, questions: &[String]) -> Result<Vec<String>, GatewayError>;

    /// Free-text explanation for a remediation context document.
    fn explain(&self, context: &str) -> Result<String, GatewayError>;

    /// Cross-repo connections for a document of per-repo file sections.
    fn analyze_connections(&self, document: &str) -> Result<RepoAnalysis, GatewayError>;

    /// Decisions, patterns, gotchas and proposed rules from a transcript.
    fn extract_insights(
        &self,
        session_title: &str,
        transcript: &str,
    ) -> Result<SessionInsights, GatewayError>;
}

/// Gateway used when no service is configured: every call is unavailable,
/// which drives callers onto their fallback paths.
pub struct OfflineGateway;

impl OfflineGateway {
    fn unavailable() -> GatewayError {
        GatewayError::Unavailable("offline mode (no reasoning service configured)".to_string())
    }
}

impl ReasoningGateway for OfflineGateway {
    fn score_risk_batch(&self, _files: &[BatchFile]) -> Result<Vec<RiskAssessment>, GatewayError> {
        Err(Self::unavailable())
    }

    fn classify_topics(&self, _questions: &[String]) -> Result<Vec<String>, GatewayError> {
        Err(Self::unavailable())
    }

    fn explain(&self, _context: &str) -> Result<String, GatewayError> {
        Err(Self::unavailable())
    }

    fn analyze_connections(&self, _document: &str) -> Result<RepoAnalysis, GatewayError> {
        Err(Self::unavailable())
    }

    fn extract_insights(
        &self,
        _session_title: &str,
        _transcript: &str,
    ) -> Result<SessionInsights, GatewayError> {
        Err(Self::unavailable())
    }
}

/// Build the gateway for a command. Falls back to [`OfflineGateway`] when
/// `offline` is requested or the API key is missing.
pub fn from_config(config: &GatewayConfig, offline: bool) -> Box<dyn ReasoningGateway> {
    if offline {
        tracing::info!("offline mode: risk scores use the metric formula");
        return Box::new(OfflineGateway);
    }
    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => match ClaudeGateway::new(key, config) {
            Ok(gateway) => Box::new(gateway),
            Err(err) => {
                tracing::warn!("cannot build HTTP client ({err}), running offline");
                Box::new(OfflineGateway)
            }
        },
        _ => {
            tracing::warn!("{API_KEY_VAR} not set, running offline");
            Box::new(OfflineGateway)
        }
    }
}

/// Strip markdown code fences if the model wrapped its JSON in them.
pub fn extract_json(text: &str) -> &str {
    let text = text.trim();
    let Some(open) = text.find("```") else {
        return text;
    };
    let after_fence = &text[open + 3..];
    let body = after_fence.strip_prefix("json").unwrap_or(after_fence);
    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => text,
    }
}

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
