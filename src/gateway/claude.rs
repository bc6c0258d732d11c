use std::time::Duration;

use serde::de::DeserializeOwned;

use super::client::{ApiRequest, Message, MessagesClient};
use super::{
    BatchFile, GatewayError, ReasoningGateway, RepoAnalysis, RiskAssessment, SessionInsights,
    extract_json, prompts,
};
use crate::config::GatewayConfig;

/// Characters of a raw response kept in debug logs.
const LOG_PREVIEW_CHARS: usize = 500;

/// [`ReasoningGateway`] backed by the Anthropic Messages API.
pub struct ClaudeGateway {
    client: MessagesClient,
    model: String,
    max_tokens: u32,
}

impl ClaudeGateway {
    pub fn new(api_key: String, config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = MessagesClient::new(
            api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn complete(&self, what: &str, system: &str, user: &str) -> Result<String, GatewayError> {
        tracing::info!(model = %self.model, "requesting {what}");
        let request = ApiRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages: vec![Message {
                role: "user",
                content: user,
            }],
        };
        let raw = self.client.send(&request)?.text();
        tracing::debug!(
            "{what} raw response: {}",
            raw.chars().take(LOG_PREVIEW_CHARS).collect::<String>()
        );
        Ok(raw)
    }
}

impl ReasoningGateway for ClaudeGateway {
    fn score_risk_batch(&self, files: &[BatchFile]) -> Result<Vec<RiskAssessment>, GatewayError> {
        let raw = self.complete(
            "risk assessment",
            prompts::RISK,
            &prompts::render_risk_batch(files),
        )?;
        parse_json(&raw)
    }

    fn classify_topics(&self, questions: &[String]) -> Result<Vec<String>, GatewayError> {
        let raw = self.complete(
            "topic classification",
            prompts::TOPICS,
            &prompts::render_questions(questions),
        )?;
        parse_json(&raw)
    }

    fn explain(&self, context: &str) -> Result<String, GatewayError> {
        let raw = self.complete("catch-up brief", prompts::CATCHUP, context)?;
        parse_text(&raw)
    }

    fn analyze_connections(&self, document: &str) -> Result<RepoAnalysis, GatewayError> {
        let raw = self.complete("multi-repo analysis", prompts::CONNECTIONS, document)?;
        parse_json(&raw)
    }

    fn extract_insights(
        &self,
        session_title: &str,
        transcript: &str,
    ) -> Result<SessionInsights, GatewayError> {
        let raw = self.complete(
            "session insights",
            prompts::INSIGHTS,
            &prompts::render_session(session_title, transcript),
        )?;
        parse_json(&raw)
    }
}

/// Parse a (possibly fenced) JSON answer into `T`. Any shape mismatch,
/// including an object where an array is expected, is a malformed response.
fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, GatewayError> {
    serde_json::from_str(extract_json(raw)).map_err(|e| GatewayError::MalformedResponse(e.to_string()))
}

fn parse_text(raw: &str) -> Result<String, GatewayError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(GatewayError::MalformedResponse("empty explanation".to_string()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
#[path = "claude_test.rs"]
mod tests;
