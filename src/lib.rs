//! Command-line utilities for diffusion-imaging text files.
//!
//! This crate provides tools for:
//! - Copying selected whitespace-separated columns between files
//! - Combining per-subject diffusion measure vectors into a CSV table
//! - Finding b-value indices that fall within a range
//!
//! # Example
//!
//! ```no_run
//! use dwi_tools::processors::bval_range::{find_indices_in_range, format_indices};
//! use std::path::Path;
//!
//! let indices = find_indices_in_range(Path::new("dwi.bval"), 900.0, 1100.0).unwrap();
//! println!("{}", format_indices(&indices, " "));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;

pub use config::{ColumnConfig, RangeConfig, TableConfig, ToolsConfig};
pub use core::measures::{DiffMeasure, LabelPolicy};
pub use core::table::DiffTable;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
