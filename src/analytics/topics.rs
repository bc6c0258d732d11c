use std::collections::{HashMap, HashSet};

use crate::gateway::ReasoningGateway;

/// Label for questions the classifier could not place.
pub const DEFAULT_TOPIC: &str = "General Concepts";

/// Question text → topic label.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TopicMap {
    labels: HashMap<String, String>,
}

impl TopicMap {
    pub fn topic_of(&self, question_text: &str) -> &str {
        self.labels
            .get(question_text)
            .map(String::as_str)
            .unwrap_or(DEFAULT_TOPIC)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

impl FromIterator<(String, String)> for TopicMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

/// Distinct texts in first-seen order.
pub fn unique_texts<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for text in texts {
        if seen.insert(text) {
            unique.push(text.to_string());
        }
    }
    unique
}

/// Classify question texts with a single gateway call.
///
/// Duplicates share one label. If the call fails or the answer is not a list
/// of strings, every question gets [`DEFAULT_TOPIC`]: a broken answer says
/// nothing about which labels line up with which questions. A short answer
/// is padded with the default, a long one is truncated.
pub fn classify<'a>(
    questions: impl IntoIterator<Item = &'a str>,
    gateway: &dyn ReasoningGateway,
) -> TopicMap {
    let unique = unique_texts(questions);
    if unique.is_empty() {
        return TopicMap::default();
    }

    tracing::info!("classifying {} unique questions", unique.len());
    let mut labels = match gateway.classify_topics(&unique) {
        Ok(labels) => labels,
        Err(err) => {
            tracing::error!("topic classification failed, using {DEFAULT_TOPIC:?}: {err}");
            Vec::new()
        }
    };
    labels.resize(unique.len(), DEFAULT_TOPIC.to_string());

    unique.into_iter().zip(labels).collect()
}

#[cfg(test)]
#[path = "topics_test.rs"]
mod tests;
