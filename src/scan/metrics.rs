use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::util::is_binary_reader;
use crate::walk::DiscoveredFile;

/// Upper bound on bytes read per file.
pub const MAX_READ_BYTES: u64 = 1024 * 1024;

/// Trimmed line prefixes counted as import/reference statements.
const IMPORT_PREFIXES: &[&str] = &["import ", "from ", "require(", "use "];

const EXT_TO_LANGUAGE: &[(&str, &str)] = &[
    ("py", "python"),
    ("ts", "typescript"),
    ("tsx", "typescript"),
    ("js", "javascript"),
    ("go", "go"),
    ("rs", "rust"),
    ("java", "java"),
];

/// Structural metrics of one discovered file.
#[derive(Debug, Clone)]
pub struct FileMetrics {
    pub path: PathBuf,
    pub relative_path: String,
    pub language: String,
    pub line_count: usize,
    pub import_count: usize,
    pub content: String,
    /// File name without its last extension.
    pub stem: String,
}

/// Language tag from the extension; unknown extensions map to themselves,
/// no extension maps to `"unknown"`.
pub fn language_for(path: &Path) -> String {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return "unknown".to_string();
    };
    let ext = ext.to_ascii_lowercase();
    EXT_TO_LANGUAGE
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, lang)| lang.to_string())
        .unwrap_or(ext)
}

pub fn count_imports<'a>(lines: impl Iterator<Item = &'a str>) -> usize {
    lines
        .filter(|line| {
            let trimmed = line.trim_start();
            IMPORT_PREFIXES.iter().any(|p| trimmed.starts_with(p))
        })
        .count()
}

/// Read at most [`MAX_READ_BYTES`] of a text file. A multi-byte character
/// cut by the bound is dropped; binary or otherwise invalid UTF-8 is an error.
pub fn read_content(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    if is_binary_reader(&mut file)? {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "binary file"));
    }
    let mut bytes = Vec::new();
    file.take(MAX_READ_BYTES).read_to_end(&mut bytes)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(err) => {
            let utf8 = err.utf8_error();
            let hit_bound = err.as_bytes().len() as u64 == MAX_READ_BYTES;
            if hit_bound && utf8.error_len().is_none() {
                let valid = utf8.valid_up_to();
                let mut bytes = err.into_bytes();
                bytes.truncate(valid);
                // valid_up_to guarantees the prefix is well-formed
                String::from_utf8(bytes)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            } else {
                Err(io::Error::new(io::ErrorKind::InvalidData, utf8))
            }
        }
    }
}

/// Compute metrics for every discovered file. An unreadable file is kept
/// with empty content and zero metrics rather than failing the scan.
pub fn extract(root: &Path, files: &[DiscoveredFile]) -> Vec<FileMetrics> {
    files
        .iter()
        .map(|f| {
            let content = match read_content(&f.path) {
                Ok(c) => c,
                Err(err) => {
                    tracing::warn!("{}: {err}", f.path.display());
                    String::new()
                }
            };
            let relative_path = f
                .path
                .strip_prefix(root)
                .unwrap_or(&f.path)
                .to_string_lossy()
                .into_owned();
            let stem = f
                .path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            FileMetrics {
                path: f.path.clone(),
                relative_path,
                language: language_for(&f.path),
                line_count: content.lines().count(),
                import_count: count_imports(content.lines()),
                content,
                stem,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "metrics_test.rs"]
mod tests;
