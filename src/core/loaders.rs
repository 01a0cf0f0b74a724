//! Data loaders for whitespace-delimited text files.
//!
//! This module provides readers for:
//! - Column files (every line split into string fields)
//! - Measurement vector files (one number per non-blank line)
//! - First-row value files such as bval lists

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during file loading.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: invalid number '{token}'")]
    ParseError {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{path}:{line}: expected a single value, found {found} fields")]
    NotSingleColumn {
        path: PathBuf,
        line: usize,
        found: usize,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Lines of a whitespace-delimited file, split into fields.
#[derive(Debug, Clone, Default)]
pub struct ColumnFile {
    /// Fields of each line, in file order. Blank lines are kept as empty rows.
    pub lines: Vec<Vec<String>>,
}

impl ColumnFile {
    /// Returns the number of lines.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| LoaderError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(BufReader::new(file))
}

fn parse_value(path: &Path, line: usize, token: &str) -> Result<f64> {
    token.parse().map_err(|_| LoaderError::ParseError {
        path: path.to_path_buf(),
        line,
        token: token.to_string(),
    })
}

/// Load every line of a whitespace-delimited file as string fields.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn load_column_file<P: AsRef<Path>>(path: P) -> Result<ColumnFile> {
    let path = path.as_ref();
    let reader = open(path)?;

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| LoaderError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        lines.push(line.split_whitespace().map(str::to_string).collect());
    }

    Ok(ColumnFile { lines })
}

/// Load a single-column numeric file.
///
/// Blank lines are skipped. Every other line must hold exactly one value.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a line has more than one
/// field, or a value is not a valid number.
pub fn load_measure_vector<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let reader = open(path)?;

    let mut values = Vec::with_capacity(8);
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| LoaderError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let fields: Vec<&str> = line.split_whitespace().collect();

        match fields.as_slice() {
            [] => continue,
            [token] => values.push(parse_value(path, idx + 1, token)?),
            _ => {
                return Err(LoaderError::NotSingleColumn {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    found: fields.len(),
                })
            }
        }
    }

    Ok(values)
}

/// Load the values on the first line of a file.
///
/// Later lines are never read. An empty file yields no values.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a token on the first line
/// is not a valid number.
pub fn load_first_row<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let mut reader = open(path)?;

    let mut first = String::new();
    reader.read_line(&mut first).map_err(|e| LoaderError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    first
        .split_whitespace()
        .map(|token| parse_value(path, 1, token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_column_file() -> Result<()> {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "a b  c").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "\td\te").unwrap();
        file.flush().unwrap();

        let columns = load_column_file(file.path())?;
        assert_eq!(columns.len(), 3);
        assert_eq!(columns.lines[0], ["a", "b", "c"]);
        assert!(columns.lines[1].is_empty());
        assert_eq!(columns.lines[2], ["d", "e"]);

        Ok(())
    }

    #[test]
    fn test_load_column_file_missing() {
        let result = load_column_file("/nonexistent/dir/file.txt");
        assert!(matches!(result, Err(LoaderError::Io { .. })));
    }

    #[test]
    fn test_load_measure_vector() -> Result<()> {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0.0012").unwrap();
        writeln!(file, "  0.45").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "7e-4").unwrap();
        file.flush().unwrap();

        let values = load_measure_vector(file.path())?;
        assert_eq!(values, vec![0.0012, 0.45, 7e-4]);

        Ok(())
    }

    #[test]
    fn test_load_measure_vector_rejects_extra_columns() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0").unwrap();
        writeln!(file, "2.0 3.0").unwrap();
        file.flush().unwrap();

        match load_measure_vector(file.path()) {
            Err(LoaderError::NotSingleColumn { line, found, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(found, 2);
            }
            other => panic!("Expected NotSingleColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_load_measure_vector_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.0").unwrap();
        writeln!(file, "abc").unwrap();
        file.flush().unwrap();

        match load_measure_vector(file.path()) {
            Err(LoaderError::ParseError { line, token, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
            }
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_first_row_ignores_later_lines() -> Result<()> {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0 1000 2000").unwrap();
        writeln!(file, "not numbers at all").unwrap();
        file.flush().unwrap();

        let values = load_first_row(file.path())?;
        assert_eq!(values, vec![0.0, 1000.0, 2000.0]);

        Ok(())
    }

    #[test]
    fn test_load_first_row_empty_file() -> Result<()> {
        let file = NamedTempFile::new().unwrap();
        let values = load_first_row(file.path())?;
        assert!(values.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_first_row_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0 1x00").unwrap();
        file.flush().unwrap();

        let err = load_first_row(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid number '1x00'"));
    }
}
