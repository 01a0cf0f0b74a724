//! Select b-value indices lying within a range.

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::core::loaders::load_first_row;

/// Indices of values with `min <= value <= max`, ascending.
///
/// NaN values never match.
pub fn indices_in_range(values: &[f64], min: f64, max: f64) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|&(_, &value)| value >= min && value <= max)
        .map(|(idx, _)| idx)
        .collect()
}

/// Join indices into a single line.
pub fn format_indices(indices: &[usize], separator: &str) -> String {
    indices
        .iter()
        .map(|idx| idx.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Read the first line of `path` and find the values within `[min, max]`.
///
/// # Arguments
///
/// * `path` - File whose first line lists the values (e.g. a bval file)
/// * `min` - Inclusive lower bound
/// * `max` - Inclusive upper bound
///
/// # Returns
///
/// Zero-based positions of matching values, ascending.
pub fn find_indices_in_range(path: &Path, min: f64, max: f64) -> Result<Vec<usize>> {
    if min > max {
        warn!("Lower bound {} exceeds upper bound {}; nothing can match", min, max);
    }

    let values = load_first_row(path)
        .with_context(|| format!("Failed to read values from: {}", path.display()))?;

    let indices = indices_in_range(&values, min, max);
    debug!(
        "{} of {} values in [{}, {}]",
        indices.len(),
        values.len(),
        min,
        max
    );

    Ok(indices)
}
