//! Data writers for delimited text and CSV tables.
//!
//! This module provides functions for writing:
//! - Rows of text fields joined by a separator (one row per line)
//! - Diffusion tables as comma-separated values

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use super::table::DiffTable;

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write data to file.
    #[error("failed to write to file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error.
    #[error("CSV write error for '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Creates a buffered writer for the given path.
fn create_buffered_writer(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

/// Render a float the way numeric tables are conventionally printed.
///
/// Uses the shortest representation that round-trips, always with a
/// decimal point or exponent (`1.0`, `0.25`, `1e-05`, `1e+16`). NaN is
/// rendered as an empty field.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }

    // Debug formatting switches to exponent form outside [1e-4, 1e16)
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

/// Write rows of fields, one row per line, joined by `separator`.
///
/// Every line, including the last, is terminated by `\n`. The file is
/// overwritten in full.
///
/// # Errors
///
/// Returns an error if:
/// - Parent directories cannot be created
/// - File cannot be created or written to
///
/// # Example
///
/// ```no_run
/// use dwi_tools::core::writers::write_joined_rows;
/// use std::path::Path;
///
/// let rows = vec![vec!["b", "a"], vec!["e", "d"]];
/// write_joined_rows(Path::new("out.txt"), &rows, " ").unwrap();
/// ```
pub fn write_joined_rows<S: AsRef<str>>(path: &Path, rows: &[Vec<S>], separator: &str) -> Result<()> {
    ensure_parent_dirs(path)?;
    let mut writer = create_buffered_writer(path)?;

    let path_str = path.display().to_string();

    for row in rows {
        let fields: Vec<&str> = row.iter().map(|field| field.as_ref()).collect();
        writeln!(writer, "{}", fields.join(separator)).map_err(|e| WriteError::WriteFile {
            path: path_str.clone(),
            source: e,
        })?;
    }

    writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}

/// Write a diffusion table to CSV.
///
/// The header row holds the index label followed by the column names.
/// Each following row starts with a measure label; missing cells are
/// written as empty fields.
///
/// # Errors
///
/// Returns an error if:
/// - Parent directories cannot be created
/// - File cannot be created or written to
pub fn write_diff_table(path: &Path, table: &DiffTable) -> Result<()> {
    ensure_parent_dirs(path)?;

    let buf_writer = create_buffered_writer(path)?;
    let mut csv_writer = csv::Writer::from_writer(buf_writer);

    let path_str = path.display().to_string();

    // Write header
    let mut header = Vec::with_capacity(table.num_columns() + 1);
    header.push(table.index_label.as_str());
    header.extend(table.column_names());
    csv_writer
        .write_record(&header)
        .map_err(|e| WriteError::CsvError {
            path: path_str.clone(),
            source: e,
        })?;

    // Write data rows
    for &label in table.rows() {
        let mut record = Vec::with_capacity(table.num_columns() + 1);
        record.push(label.to_string());
        record.extend(
            table
                .columns()
                .iter()
                .map(|column| column.get(label).map(format_value).unwrap_or_default()),
        );

        csv_writer
            .write_record(&record)
            .map_err(|e| WriteError::CsvError {
                path: path_str.clone(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}
