//! Comprehension-risk scan: discover files, extract metrics, estimate
//! reference weights, score risk in batches and rank.

pub(crate) mod metrics;
mod report;
pub(crate) mod scorer;
mod weight;

use std::collections::HashSet;
use std::error::Error;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{self, Result};
use crate::gateway::ReasoningGateway;
use crate::walk;
use report::{print_json, print_report};
pub use scorer::FileRecord;

/// Parameters of one scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extensions: Vec<String>,
    pub max_files: usize,
    /// Pinned absolute paths.
    pub focus: Vec<PathBuf>,
    pub workers: usize,
}

#[derive(Debug, Serialize)]
pub struct ScanResult {
    pub root: PathBuf,
    pub file_count: usize,
    /// Sorted by risk score, highest first.
    pub files: Vec<FileRecord>,
}

fn focus_set(paths: &[PathBuf]) -> HashSet<PathBuf> {
    paths
        .iter()
        .map(|p| p.canonicalize().unwrap_or_else(|_| p.clone()))
        .collect()
}

/// Scan `root` and rank its files by comprehension risk.
///
/// Fails only if `root` is not a directory. Unreadable files and gateway
/// failures degrade to metric-based scores.
pub fn scan_directory(
    root: &Path,
    options: &ScanOptions,
    gateway: &dyn ReasoningGateway,
) -> Result<ScanResult> {
    if !root.is_dir() {
        return Err(error::Error::InvalidDirectory(root.to_path_buf()));
    }
    let root = root
        .canonicalize()
        .map_err(|_| error::Error::InvalidDirectory(root.to_path_buf()))?;

    let discovered = walk::discover(&root, &options.extensions, options.max_files);
    if discovered.is_empty() {
        tracing::info!("no matching files in {}", root.display());
        return Ok(ScanResult {
            root,
            file_count: 0,
            files: Vec::new(),
        });
    }
    tracing::info!("discovered {} files to scan in {}", discovered.len(), root.display());

    let files = metrics::extract(&root, &discovered);
    let weights = weight::reference_weights(&files);
    let focus = focus_set(&options.focus);
    let ranked = scorer::score_files(files, &weights, &focus, gateway, options.workers);

    tracing::info!(
        "scan complete: {} files, highest risk={:.1}",
        ranked.len(),
        ranked.first().map(|f| f.risk_score).unwrap_or(0.0)
    );

    Ok(ScanResult {
        root,
        file_count: ranked.len(),
        files: ranked,
    })
}

pub fn run(
    path: &Path,
    json: bool,
    top: usize,
    options: &ScanOptions,
    gateway: &dyn ReasoningGateway,
) -> std::result::Result<(), Box<dyn Error>> {
    let mut result = scan_directory(path, options, gateway)?;
    result.files.truncate(top);

    if json {
        print_json(&result)?;
    } else {
        print_report(&result);
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
