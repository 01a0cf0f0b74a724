//! Configuration types for the diffusion text utilities.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::measures::LabelPolicy;

/// Configuration for the column copier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Separator placed between selected fields
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    " ".to_string()
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

/// Configuration for the diffusion-table builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Filename suffix of measurement vector files
    #[serde(default = "default_input_suffix")]
    pub input_suffix: String,

    /// Marker ending the metric name within a filename
    #[serde(default = "default_metric_terminator")]
    pub metric_terminator: String,

    /// Suffix appended to the subject ID to name the output table
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Header of the measure-label column
    #[serde(default = "default_index_label")]
    pub index_label: String,

    /// How row labels are chosen from each vector's length
    #[serde(default)]
    pub label_policy: LabelPolicy,
}

fn default_input_suffix() -> String {
    "diffvalues.txt".to_string()
}

fn default_metric_terminator() -> String {
    "_diffvalues".to_string()
}

fn default_output_suffix() -> String {
    "_diffvalues.csv".to_string()
}

fn default_index_label() -> String {
    "diff".to_string()
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            input_suffix: default_input_suffix(),
            metric_terminator: default_metric_terminator(),
            output_suffix: default_output_suffix(),
            index_label: default_index_label(),
            label_policy: LabelPolicy::default(),
        }
    }
}

/// Configuration for the range-index finder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeConfig {
    /// Separator placed between printed indices
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

/// Main configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub columns: ColumnConfig,

    #[serde(default)]
    pub table: TableConfig,

    #[serde(default)]
    pub range: RangeConfig,
}

impl ToolsConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: ToolsConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
