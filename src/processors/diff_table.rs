//! Restructure per-subject diffusion measure files into a CSV table.
//!
//! Each subject has one measurement vector file per derived metric, named
//! `<subjid>_<metric>_diffvalues.txt`. The vectors are labelled with
//! diffusion measure names, joined on those labels and written as
//! `<subjid>_diffvalues.csv` with one column per metric.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;
use thiserror::Error;

use crate::config::TableConfig;
use crate::core::loaders::load_measure_vector;
use crate::core::measures::LabelError;
use crate::core::table::DiffTable;
use crate::core::writers::write_diff_table;

/// Errors that can occur while building a diffusion table.
#[derive(Debug, Error)]
pub enum DiffTableError {
    #[error("No files matching '{subjid}*{suffix}' found in {workdir}")]
    NoMeasureFiles {
        workdir: PathBuf,
        subjid: String,
        suffix: String,
    },

    #[error("Cannot derive metric name from '{file}': no '{subjid}_' in filename")]
    MetricName { file: String, subjid: String },

    #[error("{path}: {source}")]
    UnexpectedMeasureCount {
        path: PathBuf,
        #[source]
        source: LabelError,
    },
}

/// Extracts metric names from measurement filenames.
///
/// The filename is cut at the first metric terminator, and the metric is the
/// text between the first `<subjid>_` and the next one (or the end).
#[derive(Debug, Clone)]
pub struct MetricPattern {
    pattern: Regex,
    terminator: String,
}

impl MetricPattern {
    pub fn new(subjid: &str, config: &TableConfig) -> Result<Self> {
        let prefix = regex::escape(&format!("{}_", subjid));
        let pattern = Regex::new(&format!("{}(.*?)(?:{}|$)", prefix, prefix))
            .with_context(|| format!("Invalid subject ID pattern: {}", subjid))?;

        Ok(Self {
            pattern,
            terminator: config.metric_terminator.clone(),
        })
    }

    /// Metric name for `file_name`, or `None` if the subject prefix is absent.
    pub fn extract(&self, file_name: &str) -> Option<String> {
        let stem = match file_name.find(self.terminator.as_str()) {
            Some(end) if !self.terminator.is_empty() => &file_name[..end],
            _ => file_name,
        };

        self.pattern
            .captures(stem)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Find measurement files for a subject.
///
/// Matches regular files in `workdir` whose name starts with `subjid` and
/// ends with the configured input suffix.
///
/// # Returns
///
/// Matching paths sorted by filename.
///
/// # Errors
///
/// Returns an error if `workdir` cannot be read.
pub fn find_measure_files(workdir: &Path, subjid: &str, config: &TableConfig) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(workdir)
        .with_context(|| format!("Failed to read working directory: {}", workdir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(subjid) && name.ends_with(&config.input_suffix))
                .unwrap_or(false)
        })
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Build the combined table for one subject.
///
/// Files are processed in sorted-filename order, which becomes the column
/// order. Any file that fails to parse, has an unrecognised name, or has an
/// unexpected number of values aborts the build.
///
/// # Arguments
///
/// * `workdir` - Directory holding the measurement vector files
/// * `subjid` - Subject identifier used as filename prefix
/// * `config` - Table builder configuration
pub fn build_diff_table(workdir: &Path, subjid: &str, config: &TableConfig) -> Result<DiffTable> {
    let files = find_measure_files(workdir, subjid, config)?;

    if files.is_empty() {
        return Err(DiffTableError::NoMeasureFiles {
            workdir: workdir.to_path_buf(),
            subjid: subjid.to_string(),
            suffix: config.input_suffix.clone(),
        }
        .into());
    }

    info!("Found {} measure files for {}", files.len(), subjid);

    let metric_pattern = MetricPattern::new(subjid, config)?;
    let mut table = DiffTable::new(config.index_label.as_str());

    for path in &files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let metric = metric_pattern
            .extract(&file_name)
            .ok_or_else(|| DiffTableError::MetricName {
                file: file_name.clone(),
                subjid: subjid.to_string(),
            })?;

        let values = load_measure_vector(path)
            .with_context(|| format!("Failed to read measure file: {}", path.display()))?;

        let labels = config
            .label_policy
            .labels_for(values.len())
            .map_err(|source| DiffTableError::UnexpectedMeasureCount {
                path: path.clone(),
                source,
            })?;

        debug!("{}: metric '{}' with {} values", file_name, metric, values.len());
        table.push_column(metric, labels, &values);
    }

    Ok(table)
}

/// Output table path for a subject.
pub fn output_path(outdir: &Path, subjid: &str, config: &TableConfig) -> PathBuf {
    outdir.join(format!("{}{}", subjid, config.output_suffix))
}

/// Build a subject's table and write it to `outdir`.
///
/// Nothing is written unless every input file is valid.
///
/// # Returns
///
/// The written table path and the table itself.
pub fn convert_subject(
    workdir: &Path,
    outdir: &Path,
    subjid: &str,
    config: &TableConfig,
) -> Result<(PathBuf, DiffTable)> {
    let table = build_diff_table(workdir, subjid, config)?;

    let path = output_path(outdir, subjid, config);
    write_diff_table(&path, &table)
        .with_context(|| format!("Failed to write table: {}", path.display()))?;

    info!(
        "Wrote {} rows x {} columns -> {}",
        table.num_rows(),
        table.num_columns(),
        path.display()
    );

    Ok((path, table))
}
