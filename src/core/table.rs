//! Combined per-subject diffusion table.

use std::collections::HashMap;

use super::measures::DiffMeasure;

/// One input file's values keyed by measure label.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Metric name derived from the source filename.
    pub name: String,
    values: HashMap<DiffMeasure, f64>,
}

impl TableColumn {
    /// Value for `label`, if this column has one.
    #[inline]
    pub fn get(&self, label: DiffMeasure) -> Option<f64> {
        self.values.get(&label).copied()
    }
}

/// Table with measure labels as rows and metric names as columns.
///
/// Columns are outer-joined on label: rows are the union of every column's
/// labels in first-seen order, and a column lacking a label has a missing
/// cell there.
#[derive(Debug, Clone)]
pub struct DiffTable {
    /// Header of the label column.
    pub index_label: String,
    rows: Vec<DiffMeasure>,
    columns: Vec<TableColumn>,
}

impl DiffTable {
    /// Creates an empty table.
    pub fn new(index_label: impl Into<String>) -> Self {
        Self {
            index_label: index_label.into(),
            rows: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Appends a column, pairing `labels[i]` with `values[i]`.
    ///
    /// Extra entries in the longer slice are ignored; callers choose
    /// `labels` from the length of `values`.
    pub fn push_column(&mut self, name: impl Into<String>, labels: &[DiffMeasure], values: &[f64]) {
        for label in labels {
            if !self.rows.contains(label) {
                self.rows.push(*label);
            }
        }

        let values = labels.iter().copied().zip(values.iter().copied()).collect();
        self.columns.push(TableColumn {
            name: name.into(),
            values,
        });
    }

    /// Row labels in output order.
    pub fn rows(&self) -> &[DiffMeasure] {
        &self.rows
    }

    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cell at (`row`, first column named `column`).
    pub fn get(&self, row: DiffMeasure, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .and_then(|c| c.get(row))
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::measures::{DTI_MEASURES, FULL_MEASURES};

    #[test]
    fn test_push_columns_shared_labels() {
        let mut table = DiffTable::new("diff");
        table.push_column("AD", &DTI_MEASURES, &[1.0, 2.0, 3.0, 4.0]);
        table.push_column("FA", &DTI_MEASURES, &[5.0, 6.0, 7.0, 8.0]);

        assert_eq!(table.num_rows(), 4);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.column_names(), vec!["AD", "FA"]);
        assert_eq!(table.get(DiffMeasure::Ad, "AD"), Some(1.0));
        assert_eq!(table.get(DiffMeasure::Rd, "FA"), Some(8.0));
    }

    #[test]
    fn test_outer_join_mixed_label_sets() {
        let mut table = DiffTable::new("diff");
        table.push_column("short", &DTI_MEASURES, &[1.0, 2.0, 3.0, 4.0]);
        table.push_column("long", &FULL_MEASURES, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

        assert_eq!(table.rows(), &FULL_MEASURES);
        assert_eq!(table.get(DiffMeasure::Fw, "short"), None);
        assert_eq!(table.get(DiffMeasure::Fw, "long"), Some(7.0));
    }

    #[test]
    fn test_empty_table() {
        let table = DiffTable::new("diff");
        assert!(table.is_empty());
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.get(DiffMeasure::Ad, "AD"), None);
    }
}
