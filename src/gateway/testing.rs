//! Scripted in-memory gateway for unit tests.

use std::net::TcpListener;
use std::sync::Mutex;
use std::thread;

use super::{
    BatchFile, GatewayError, ReasoningGateway, RepoAnalysis, RiskAssessment, SessionInsights,
};

type RiskFn = dyn Fn(&[BatchFile]) -> Result<Vec<RiskAssessment>, GatewayError> + Send + Sync;

pub struct ScriptedGateway {
    risk: Box<RiskFn>,
    topics: Option<Vec<String>>,
    explanation: Option<String>,
    connections: Option<RepoAnalysis>,
    insights: Option<Result<SessionInsights, String>>,
    pub classify_calls: Mutex<Vec<Vec<String>>>,
    pub explain_calls: Mutex<Vec<String>>,
    pub connection_calls: Mutex<Vec<String>>,
    pub insight_calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGateway {
    /// Every call fails until scripted otherwise.
    pub fn new() -> Self {
        Self {
            risk: Box::new(|_| Err(GatewayError::Unavailable("scripted".to_string()))),
            topics: None,
            explanation: None,
            connections: None,
            insights: None,
            classify_calls: Mutex::new(Vec::new()),
            explain_calls: Mutex::new(Vec::new()),
            connection_calls: Mutex::new(Vec::new()),
            insight_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_risk<F>(mut self, f: F) -> Self
    where
        F: Fn(&[BatchFile]) -> Result<Vec<RiskAssessment>, GatewayError> + Send + Sync + 'static,
    {
        self.risk = Box::new(f);
        self
    }

    pub fn with_topics(mut self, labels: &[&str]) -> Self {
        self.topics = Some(labels.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_explanation(mut self, text: &str) -> Self {
        self.explanation = Some(text.to_string());
        self
    }

    pub fn with_connections(mut self, analysis: RepoAnalysis) -> Self {
        self.connections = Some(analysis);
        self
    }

    pub fn with_insights(mut self, insights: SessionInsights) -> Self {
        self.insights = Some(Ok(insights));
        self
    }

    /// Insight extraction answers with a payload of the wrong shape.
    pub fn with_malformed_insights(mut self, reason: &str) -> Self {
        self.insights = Some(Err(reason.to_string()));
        self
    }
}

impl ReasoningGateway for ScriptedGateway {
    fn score_risk_batch(&self, files: &[BatchFile]) -> Result<Vec<RiskAssessment>, GatewayError> {
        (self.risk)(files)
    }

    fn classify_topics(&self, questions: &[String]) -> Result<Vec<String>, GatewayError> {
        self.classify_calls.lock().unwrap().push(questions.to_vec());
        self.topics
            .clone()
            .ok_or_else(|| GatewayError::MalformedResponse("expected a JSON array".to_string()))
    }

    fn explain(&self, context: &str) -> Result<String, GatewayError> {
        self.explain_calls.lock().unwrap().push(context.to_string());
        self.explanation
            .clone()
            .ok_or_else(|| GatewayError::Unavailable("scripted".to_string()))
    }

    fn analyze_connections(&self, document: &str) -> Result<RepoAnalysis, GatewayError> {
        self.connection_calls.lock().unwrap().push(document.to_string());
        self.connections
            .clone()
            .ok_or_else(|| GatewayError::Unavailable("scripted".to_string()))
    }

    fn extract_insights(
        &self,
        session_title: &str,
        transcript: &str,
    ) -> Result<SessionInsights, GatewayError> {
        self.insight_calls
            .lock()
            .unwrap()
            .push((session_title.to_string(), transcript.to_string()));
        match &self.insights {
            Some(Ok(insights)) => Ok(insights.clone()),
            Some(Err(reason)) => Err(GatewayError::MalformedResponse(reason.clone())),
            None => Err(GatewayError::Unavailable("scripted".to_string())),
        }
    }
}

/// Scripted risk item with a single factor.
pub fn assessment(index: usize, score: f64, factor: &str) -> RiskAssessment {
    RiskAssessment {
        index,
        risk_score: score,
        risk_factors: vec![factor.to_string()],
        blast_radius: format!("{factor} breaks callers"),
    }
}

/// Local HTTP endpoint that accepts connections and never answers.
/// Returns its base URL.
pub fn silent_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://{addr}")
}
