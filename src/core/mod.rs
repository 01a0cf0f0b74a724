//! Core data types and I/O operations.

pub mod loaders;
pub mod measures;
pub mod table;
pub mod writers;

pub use loaders::{ColumnFile, LoaderError};
pub use measures::{DiffMeasure, LabelError, LabelPolicy};
pub use table::DiffTable;
pub use writers::{write_diff_table, write_joined_rows, WriteError};
