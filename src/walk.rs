use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Directory names never descended into: dependency caches, build output,
/// version-control metadata.
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".venv",
    "__pycache__",
    ".git",
    "dist",
    "build",
    ".next",
];

/// A candidate file found by [`discover`].
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Normalize an extension list to lowercase without the leading dot, so
/// `".PY"`, `"py"` and `".py"` all match `foo.py`.
pub fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Check whether `path` has one of the (normalized) extensions.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// Build a directory walker that prunes [`SKIP_DIRS`] before descending.
///
/// Ignore files are not consulted and hidden files are visited; entries are
/// yielded in file-name order so discovery order is reproducible.
pub fn walk(path: &Path) -> ignore::Walk {
    WalkBuilder::new(path)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
                && SKIP_DIRS.contains(&name)
            {
                return false;
            }
            true
        })
        .build()
}

/// Collect every file under `root` whose extension is allowed.
///
/// When more than `max_files` match, the largest `max_files` are kept
/// (stable: equal sizes keep discovery order). No match is an empty list.
pub fn discover(root: &Path, extensions: &[String], max_files: usize) -> Vec<DiscoveredFile> {
    let extensions = normalize_extensions(extensions);
    let mut found = Vec::new();

    for entry in walk(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("{err}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if !has_extension(path, &extensions) {
            continue;
        }
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        found.push(DiscoveredFile {
            path: path.to_path_buf(),
            size,
        });
    }

    if found.len() > max_files {
        found.sort_by(|a, b| b.size.cmp(&a.size));
        found.truncate(max_files);
    }
    found
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
