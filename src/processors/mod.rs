//! Data processing modules.

pub mod bval_range;
pub mod columns;
pub mod diff_table;

// Re-export key types for convenience
pub use bval_range::{find_indices_in_range, format_indices, indices_in_range};
pub use columns::{copy_columns, select_fields, ColumnError};
pub use diff_table::{
    build_diff_table, convert_subject, find_measure_files, output_path, DiffTableError,
    MetricPattern,
};
