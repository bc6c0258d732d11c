use std::collections::HashSet;
use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;

use super::metrics::FileMetrics;
use crate::gateway::{BatchFile, ReasoningGateway, RiskAssessment};
use crate::util::{round2, truncate_chars};

/// Files per gateway request.
pub const BATCH_SIZE: usize = 10;

/// Characters of each file sent to the gateway.
pub const SNIPPET_CHARS: usize = 600;

/// A scanned file with its risk verdict.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub relative_path: String,
    pub language: String,
    pub line_count: usize,
    pub import_count: usize,
    pub reference_weight: usize,
    #[serde(skip)]
    pub content: String,
    pub risk_score: f64,
    pub risk_factors: Vec<String>,
    pub blast_radius: String,
    pub is_focus: bool,
}

/// Deterministic risk score used when the gateway gave no verdict:
/// `min(100, weight*10 + min(lines/5, 50))`.
pub fn fallback_score(reference_weight: usize, line_count: usize) -> f64 {
    let size_term = (line_count as f64 / 5.0).min(50.0);
    (reference_weight as f64 * 10.0 + size_term).min(100.0)
}

pub fn fallback_blast_radius(reference_weight: usize) -> String {
    if reference_weight > 0 {
        format!("Imported by {reference_weight} module(s)")
    } else {
        "No direct imports detected".to_string()
    }
}

/// Ask the gateway about one batch. The result is aligned to the batch:
/// `None` means "use the fallback" for that file. A failed request leaves
/// the whole batch on the fallback and is not retried.
fn assess_batch(
    batch_start: usize,
    batch: &[FileMetrics],
    gateway: &dyn ReasoningGateway,
) -> Vec<Option<RiskAssessment>> {
    let request: Vec<BatchFile> = batch
        .iter()
        .map(|f| BatchFile {
            relative_path: f.relative_path.clone(),
            content_snippet: truncate_chars(&f.content, SNIPPET_CHARS).to_string(),
        })
        .collect();

    let mut aligned: Vec<Option<RiskAssessment>> = vec![None; batch.len()];
    match gateway.score_risk_batch(&request) {
        Ok(items) => {
            for item in items {
                match aligned.get_mut(item.index) {
                    Some(slot) => *slot = Some(item),
                    None => tracing::warn!(
                        batch_start,
                        "ignoring risk item with out-of-range index {}",
                        item.index
                    ),
                }
            }
        }
        Err(err) => {
            tracing::warn!(
                batch_start,
                count = batch.len(),
                "risk assessment failed, using metric fallback: {err}"
            );
        }
    }
    aligned
}

/// Assess all batches, at most `workers` at a time. Results come back in
/// batch order regardless of completion order.
fn assess_all(
    files: &[FileMetrics],
    gateway: &dyn ReasoningGateway,
    workers: usize,
) -> Vec<Option<RiskAssessment>> {
    let run = || -> Vec<Vec<Option<RiskAssessment>>> {
        files
            .par_chunks(BATCH_SIZE)
            .enumerate()
            .map(|(b, chunk)| assess_batch(b * BATCH_SIZE, chunk, gateway))
            .collect()
    };

    let batches = match rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(err) => {
            tracing::warn!("cannot start worker pool ({err}), scoring sequentially");
            files
                .chunks(BATCH_SIZE)
                .enumerate()
                .map(|(b, chunk)| assess_batch(b * BATCH_SIZE, chunk, gateway))
                .collect()
        }
    };
    batches.into_iter().flatten().collect()
}

/// Score every file and rank by risk, highest first. Files keep their
/// relative order on equal scores.
pub fn score_files(
    files: Vec<FileMetrics>,
    weights: &[usize],
    focus: &HashSet<PathBuf>,
    gateway: &dyn ReasoningGateway,
    workers: usize,
) -> Vec<FileRecord> {
    let assessments = assess_all(&files, gateway, workers);

    let mut records: Vec<FileRecord> = files
        .into_iter()
        .zip(assessments)
        .zip(weights.iter().copied())
        .map(|((f, assessment), weight)| {
            let (score, factors, blast) = match assessment {
                Some(a) => (a.risk_score.clamp(0.0, 100.0), a.risk_factors, a.blast_radius),
                None => (
                    fallback_score(weight, f.line_count),
                    Vec::new(),
                    fallback_blast_radius(weight),
                ),
            };
            FileRecord {
                is_focus: focus.contains(&f.path),
                path: f.path,
                relative_path: f.relative_path,
                language: f.language,
                line_count: f.line_count,
                import_count: f.import_count,
                reference_weight: weight,
                content: f.content,
                risk_score: round2(score),
                risk_factors: factors,
                blast_radius: blast,
            }
        })
        .collect();

    records.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    records
}

#[cfg(test)]
#[path = "scorer_test.rs"]
mod tests;
