use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::GatewayError;

const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
pub struct ApiRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub system: &'a str,
    pub messages: Vec<Message<'a>>,
}

#[derive(Serialize, Debug)]
pub struct Message<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug)]
pub struct ApiResponse {
    pub content: Vec<ContentBlock>,
}

impl ApiResponse {
    /// Concatenate all text blocks of the response.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.content {
            if let ContentBlock::Text { text } = block {
                out.push_str(text);
            }
        }
        out
    }
}

/// Blocking Messages API client. Cheap to share across worker threads.
pub struct MessagesClient {
    http: reqwest::blocking::Client,
    url: String,
    api_key: String,
}

impl MessagesClient {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            url: format!("{}{MESSAGES_PATH}", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    pub fn send(&self, request: &ApiRequest<'_>) -> Result<ApiResponse, GatewayError> {
        let resp = self
            .http
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(GatewayError::Unavailable(format!("API error ({status}): {body}")));
        }

        resp.json::<ApiResponse>()
            .map_err(|e| GatewayError::MalformedResponse(format!("unexpected API envelope: {e}")))
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Unavailable(format!("request timed out: {err}"))
    } else {
        GatewayError::Unavailable(err.to_string())
    }
}
