//! Client feature rows and reindexing against an artifact's feature order.

use std::collections::HashMap;

/// Value substituted for schema features absent from a row.
pub const REINDEX_FILL: f64 = 0.0;

/// One client's input record: a feature-name → numeric-value mapping.
///
/// A row may carry any subset or superset of an artifact's trained features;
/// [`FeatureRow::reindex`] produces the aligned vector the estimator expects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    values: HashMap<String, f64>,
}

impl FeatureRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a feature value, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Align the row to `feature_names` order.
    ///
    /// Names in `feature_names` absent from the row are filled with
    /// [`REINDEX_FILL`]; row entries not named there are dropped. The result
    /// always has exactly `feature_names.len()` entries, so downstream
    /// scoring never sees a misaligned vector.
    pub fn reindex(&self, feature_names: &[String]) -> Vec<f64> {
        feature_names
            .iter()
            .map(|name| self.get(name).unwrap_or(REINDEX_FILL))
            .collect()
    }
}

impl FromIterator<(String, f64)> for FeatureRow {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, f64); N]> for FeatureRow {
    fn from(pairs: [(&str, f64); N]) -> Self {
        pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }
}
