//! Preprocessing stages applied before the ensemble sees a row.
//!
//! Mirrors the training pipeline: mean imputation for missing values, then
//! standard scaling. Both stages carry their fitted statistics in the bundle
//! and transform rows in place.

use serde::{Deserialize, Serialize};

/// Replaces NaN entries with the per-feature fill value fitted at training
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imputer {
    pub fill: Vec<f64>,
}

impl Imputer {
    pub fn transform(&self, row: &mut [f64]) {
        for (value, fill) in row.iter_mut().zip(&self.fill) {
            if value.is_nan() {
                *value = *fill;
            }
        }
    }
}

/// Standardizes each feature to zero mean and unit variance.
///
/// A feature with zero spread is only centered, matching the convention of
/// the training pipeline for constant columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Scaler {
    pub fn transform(&self, row: &mut [f64]) {
        for ((value, mean), std) in row.iter_mut().zip(&self.mean).zip(&self.std) {
            let scale = if *std > 0.0 { *std } else { 1.0 };
            *value = (*value - mean) / scale;
        }
    }
}
