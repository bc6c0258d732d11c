use super::metrics::FileMetrics;

/// For each file, the number of *other* files whose content contains its
/// stem as a literal substring.
///
/// This is a crude "referenced-by" proxy, not an import resolver: a stem that
/// is also a common word matches everywhere, and the relation is asymmetric.
/// The metric fallback in the scorer is calibrated on this scale.
pub fn reference_weights(files: &[FileMetrics]) -> Vec<usize> {
    files
        .iter()
        .enumerate()
        .map(|(idx, file)| {
            if file.stem.is_empty() {
                return 0;
            }
            files
                .iter()
                .enumerate()
                .filter(|(other_idx, other)| *other_idx != idx && other.content.contains(&file.stem))
                .count()
        })
        .collect()
}

#[cfg(test)]
#[path = "weight_test.rs"]
mod tests;
