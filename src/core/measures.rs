//! Diffusion measure names and row-label inference.
//!
//! A measurement vector file carries one value per diffusion measure but no
//! labels. The label set is recovered from the number of rows: DTI-only
//! acquisitions produce 4 values, multi-shell acquisitions add the NODDI
//! and free-water measures for 7.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A scalar diffusion metric sampled at a region of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiffMeasure {
    /// Axial diffusivity
    Ad,
    /// Fractional anisotropy
    Fa,
    /// Mean diffusivity
    Md,
    /// Radial diffusivity
    Rd,
    /// Orientation dispersion
    Od,
    /// Neurite density
    Nd,
    /// Free water fraction
    Fw,
}

impl DiffMeasure {
    /// Label used in table rows.
    pub fn as_str(self) -> &'static str {
        match self {
            DiffMeasure::Ad => "AD",
            DiffMeasure::Fa => "FA",
            DiffMeasure::Md => "MD",
            DiffMeasure::Rd => "RD",
            DiffMeasure::Od => "OD",
            DiffMeasure::Nd => "ND",
            DiffMeasure::Fw => "FW",
        }
    }
}

impl fmt::Display for DiffMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tensor-only label set.
pub const DTI_MEASURES: [DiffMeasure; 4] = [
    DiffMeasure::Ad,
    DiffMeasure::Fa,
    DiffMeasure::Md,
    DiffMeasure::Rd,
];

/// Tensor plus NODDI and free-water label set.
pub const FULL_MEASURES: [DiffMeasure; 7] = [
    DiffMeasure::Ad,
    DiffMeasure::Fa,
    DiffMeasure::Md,
    DiffMeasure::Rd,
    DiffMeasure::Od,
    DiffMeasure::Nd,
    DiffMeasure::Fw,
];

/// Raised when a vector's length matches no known label set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unexpected number of diff measures: found {count}, expected {expected}")]
pub struct LabelError {
    pub count: usize,
    pub expected: &'static str,
}

/// How row labels are chosen for a measurement vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPolicy {
    /// Pick the 4- or 7-entry set from the row count.
    #[default]
    Infer,
    /// Always use the 7-entry set.
    Fixed,
}

impl LabelPolicy {
    /// Map an observed row count to its label set.
    pub fn labels_for(self, count: usize) -> Result<&'static [DiffMeasure], LabelError> {
        match (self, count) {
            (_, 7) => Ok(&FULL_MEASURES),
            (LabelPolicy::Infer, 4) => Ok(&DTI_MEASURES),
            (LabelPolicy::Infer, _) => Err(LabelError {
                count,
                expected: "4 or 7",
            }),
            (LabelPolicy::Fixed, _) => Err(LabelError {
                count,
                expected: "7",
            }),
        }
    }
}
