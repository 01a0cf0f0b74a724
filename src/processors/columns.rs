//! Copy selected whitespace-separated columns between files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use thiserror::Error;

use crate::config::ColumnConfig;
use crate::core::loaders::load_column_file;
use crate::core::writers::write_joined_rows;

/// Errors that can occur while selecting columns.
#[derive(Debug, Error)]
pub enum ColumnError {
    #[error("No column indices given")]
    NoIndices,

    #[error("{path}:{line}: column index {index} out of range for line with {found} fields")]
    IndexOutOfRange {
        path: PathBuf,
        line: usize,
        index: usize,
        found: usize,
    },
}

/// Pick `indices` from one line's fields.
///
/// Indices may repeat and appear in any order. Returns the first index that
/// is out of range on failure.
pub fn select_fields<'a, S: AsRef<str>>(
    fields: &'a [S],
    indices: &[usize],
) -> std::result::Result<Vec<&'a str>, usize> {
    indices
        .iter()
        .map(|&idx| fields.get(idx).map(|field| field.as_ref()).ok_or(idx))
        .collect()
}

/// Copy the columns at `indices` from `input` into `output`.
///
/// Every input line produces one output line holding the selected fields
/// joined by the configured separator. All lines are selected before the
/// output is opened, so a line that is too short aborts the run without
/// touching `output`.
///
/// # Arguments
///
/// * `input` - Whitespace-delimited input file
/// * `output` - File to overwrite with the selected columns
/// * `indices` - Zero-based column indices, in output order
/// * `config` - Column copier configuration
///
/// # Returns
///
/// The number of lines written.
pub fn copy_columns(
    input: &Path,
    output: &Path,
    indices: &[usize],
    config: &ColumnConfig,
) -> Result<usize> {
    if indices.is_empty() {
        return Err(ColumnError::NoIndices.into());
    }

    let columns = load_column_file(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    debug!("Read {} lines from {}", columns.len(), input.display());

    let mut selected = Vec::with_capacity(columns.len());
    for (line_idx, fields) in columns.lines.iter().enumerate() {
        let row = select_fields(fields, indices).map_err(|index| ColumnError::IndexOutOfRange {
            path: input.to_path_buf(),
            line: line_idx + 1,
            index,
            found: fields.len(),
        })?;
        selected.push(row);
    }

    write_joined_rows(output, &selected, &config.separator)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;

    info!(
        "Copied columns {:?} of {} lines -> {}",
        indices,
        selected.len(),
        output.display()
    );

    Ok(selected.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_input(dir: &Path, lines: &[&str]) -> PathBuf {
        let path = dir.join("input.txt");
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn test_select_fields_reorders() {
        let fields = ["a", "b", "c"];
        assert_eq!(select_fields(&fields, &[1, 0]), Ok(vec!["b", "a"]));
        assert_eq!(select_fields(&fields, &[2, 2, 0]), Ok(vec!["c", "c", "a"]));
    }

    #[test]
    fn test_select_fields_out_of_range() {
        let fields = ["a", "b"];
        assert_eq!(select_fields(&fields, &[0, 5, 7]), Err(5));
    }

    #[test]
    fn test_copy_columns() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_input(temp_dir.path(), &["a b c", "d   e f", "1\t2\t3"]);
        let output = temp_dir.path().join("output.txt");

        let written = copy_columns(&input, &output, &[1, 0], &ColumnConfig::default()).unwrap();

        assert_eq!(written, 3);
        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content, "b a\ne d\n2 1\n");
    }

    #[test]
    fn test_copy_columns_preserves_line_count() {
        let temp_dir = TempDir::new().unwrap();
        let lines: Vec<String> = (0..50).map(|i| format!("{} {} {}", i, i * 2, i * 3)).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let input = create_input(temp_dir.path(), &refs);
        let output = temp_dir.path().join("output.txt");

        copy_columns(&input, &output, &[2], &ColumnConfig::default()).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let out_lines: Vec<&str> = content.lines().collect();
        assert_eq!(out_lines.len(), 50);
        assert_eq!(out_lines[10], "30");
    }

    #[test]
    fn test_copy_columns_custom_separator() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_input(temp_dir.path(), &["a b c"]);
        let output = temp_dir.path().join("output.txt");
        let config = ColumnConfig {
            separator: "\t".to_string(),
        };

        copy_columns(&input, &output, &[2, 0], &config).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "c\ta\n");
    }

    #[test]
    fn test_copy_columns_index_out_of_range() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_input(temp_dir.path(), &["a b c", "d e"]);
        let output = temp_dir.path().join("output.txt");

        let err = copy_columns(&input, &output, &[0, 2], &ColumnConfig::default()).unwrap_err();

        match err.downcast_ref::<ColumnError>() {
            Some(ColumnError::IndexOutOfRange {
                line, index, found, ..
            }) => {
                assert_eq!(*line, 2);
                assert_eq!(*index, 2);
                assert_eq!(*found, 2);
            }
            other => panic!("Expected IndexOutOfRange, got {:?}", other),
        }
        // No partial output
        assert!(!output.exists());
    }

    #[test]
    fn test_copy_columns_blank_line_fails() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_input(temp_dir.path(), &["a b", ""]);
        let output = temp_dir.path().join("output.txt");

        let result = copy_columns(&input, &output, &[0], &ColumnConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_copy_columns_no_indices() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_input(temp_dir.path(), &["a b"]);
        let output = temp_dir.path().join("output.txt");

        let err = copy_columns(&input, &output, &[], &ColumnConfig::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<ColumnError>(), Some(ColumnError::NoIndices)));
    }

    #[test]
    fn test_copy_columns_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("missing.txt");
        let output = temp_dir.path().join("output.txt");

        let result = copy_columns(&input, &output, &[0], &ColumnConfig::default());
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_copy_columns_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_input(temp_dir.path(), &["0.1 0.2 0.3", "1.1 1.2 1.3"]);
        let output = temp_dir.path().join("output.txt");

        copy_columns(&input, &output, &[2, 1], &ColumnConfig::default()).unwrap();
        let first = fs::read(&output).unwrap();
        copy_columns(&input, &output, &[2, 1], &ColumnConfig::default()).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }
}
