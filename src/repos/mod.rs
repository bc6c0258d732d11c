//! Cross-repo connection analysis for a group of related repositories.
//!
//! A group is described by a TOML file:
//!
//! ```toml
//! name = "shop"
//! description = "storefront and its API"
//!
//! [[repos]]
//! name = "web"
//! path = "../web"
//! role = "frontend"
//! ```
//!
//! Relative repo paths are resolved against the group file's directory.

mod report;

use std::collections::{BTreeMap, HashSet};
use std::error::Error as StdError;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gateway::{ReasoningGateway, RepoConnection};
use crate::scan::{self, ScanOptions};
use crate::util::truncate_chars;
use report::{print_json, print_report};

/// Extensions scanned in every repo of a group.
pub const GROUP_EXTENSIONS: &[&str] = &[
    ".py", ".ts", ".tsx", ".js", ".go", ".rs", ".java", ".json", ".toml",
];
pub const GROUP_MAX_FILES: usize = 20;
/// Highest-risk files per repo included in the document.
pub const TOP_FILES_PER_REPO: usize = 5;
pub const SNIPPET_CHARS: usize = 400;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    pub path: PathBuf,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "other".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepoGroup {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub repos: Vec<RepoEntry>,
}

impl RepoGroup {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Store {
            path: path.to_path_buf(),
            source,
        })?;
        let mut group: RepoGroup = toml::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            for repo in &mut group.repos {
                if repo.path.is_relative() {
                    repo.path = base.join(&repo.path);
                }
            }
        }
        Ok(group)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAnalysis {
    pub group_name: String,
    pub summary: String,
    pub connections: Vec<RepoConnection>,
    pub repo_briefs: BTreeMap<String, String>,
}

fn header(repo: &RepoEntry) -> String {
    format!("=== Repo: {} (role: {}) ===", repo.name, repo.role)
}

/// Document section for one repo: its highest-risk files with snippets, or
/// a marker line when the repo cannot be scanned.
fn repo_section(repo: &RepoEntry, gateway: &dyn ReasoningGateway, workers: usize) -> String {
    if !repo.path.is_dir() {
        tracing::warn!(
            "repo {:?} path is not a directory, skipping: {}",
            repo.name,
            repo.path.display()
        );
        return format!("{}\n[Path not accessible: {}]\n", header(repo), repo.path.display());
    }

    let options = ScanOptions {
        extensions: GROUP_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        max_files: GROUP_MAX_FILES,
        focus: Vec::new(),
        workers,
    };
    let result = match scan::scan_directory(&repo.path, &options, gateway) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!("scan failed for repo {:?}: {err}", repo.name);
            return format!("{}\n[Scan failed: {err}]\n", header(repo));
        }
    };

    let mut section = format!(
        "=== Repo: {} (role: {}, path: {}) ===\n",
        repo.name,
        repo.role,
        repo.path.display()
    );
    for file in result.files.iter().take(TOP_FILES_PER_REPO) {
        let snippet = if file.content.is_empty() {
            "[unreadable]"
        } else {
            truncate_chars(&file.content, SNIPPET_CHARS)
        };
        let _ = write!(section, "--- {} ---\n{snippet}\n\n", file.relative_path);
    }
    section
}

/// Scan every repo of the group and ask the gateway how they connect.
///
/// Connections that name a repo outside the group are dropped.
pub fn analyze_group(
    group: &RepoGroup,
    gateway: &dyn ReasoningGateway,
    workers: usize,
) -> Result<GroupAnalysis> {
    if group.repos.is_empty() {
        return Err(Error::EmptyRepoGroup(group.name.clone()));
    }
    tracing::info!(
        "analyzing repo group {:?} ({} repos)",
        group.name,
        group.repos.len()
    );

    let sections: Vec<String> = group
        .repos
        .iter()
        .map(|repo| repo_section(repo, gateway, workers))
        .collect();
    let document = sections.join("\n\n");

    let analysis = gateway
        .analyze_connections(&document)
        .map_err(|source| Error::Gateway {
            context: format!("connection analysis for repo group {:?}", group.name),
            source,
        })?;

    let known: HashSet<&str> = group.repos.iter().map(|r| r.name.as_str()).collect();
    let connections = analysis
        .connections
        .into_iter()
        .filter(|c| {
            let valid = known.contains(c.from_repo.as_str()) && known.contains(c.to_repo.as_str());
            if !valid {
                tracing::warn!(
                    "dropping connection {:?} -> {:?}: unknown repo",
                    c.from_repo,
                    c.to_repo
                );
            }
            valid
        })
        .collect();

    Ok(GroupAnalysis {
        group_name: group.name.clone(),
        summary: analysis.summary,
        connections,
        repo_briefs: analysis.repo_briefs.into_iter().collect(),
    })
}

pub fn run(
    group_file: &Path,
    json: bool,
    gateway: &dyn ReasoningGateway,
    workers: usize,
) -> std::result::Result<(), Box<dyn StdError>> {
    let group = RepoGroup::load(group_file)?;
    let analysis = analyze_group(&group, gateway, workers)?;
    if json {
        print_json(&analysis)?;
    } else {
        print_report(&analysis);
    }
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
