//! Serving feature schema for client records.
//!
//! The scoring boundary requires a fixed, named set of client features. The
//! schema is versioned so that training and serving agree on an explicit
//! contract instead of implicit column-order coupling; artifacts trained on a
//! divergent feature set are reported, not silently accepted.

use std::collections::HashSet;

/// Version of the serving feature schema below.
pub const SERVING_SCHEMA_VERSION: u32 = 1;

/// Client features the scoring boundary requires, in boundary order.
pub const REQUIRED_FEATURES: [&str; 15] = [
    "EXT_SOURCE_1",
    "EXT_SOURCE_2",
    "EXT_SOURCE_3",
    "AMT_GOODS_PRICE",
    "AMT_ANNUITY",
    "AMT_CREDIT",
    "DAYS_BIRTH",
    "DAYS_EMPLOYED",
    "DAYS_LAST_PHONE_CHANGE",
    "NAME_FAMILY_STATUS_Married",
    "REGION_RATING_CLIENT",
    "REGION_RATING_CLIENT_W_CITY",
    "FLAG_DOCUMENT_3",
    "DAYS_ID_PUBLISH",
    "OCCUPATION_TYPE_Laborers",
];

/// Divergence between the serving schema and an artifact's feature set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    /// Schema features the artifact was not trained on (will be fed 0.0).
    pub missing: Vec<String>,
    /// Artifact features the serving schema never supplies (will default to 0.0).
    pub extra: Vec<String>,
}

impl SchemaReport {
    /// True when the artifact's feature set matches the serving schema exactly.
    pub fn is_exact(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compare an artifact's trained feature set against the serving schema.
///
/// Order is not compared: reindexing aligns values to the artifact's own
/// order at inference time. Only set membership matters here.
pub fn compare(artifact_features: &[String]) -> SchemaReport {
    let trained: HashSet<&str> = artifact_features.iter().map(String::as_str).collect();
    let required: HashSet<&str> = REQUIRED_FEATURES.iter().copied().collect();

    let missing = REQUIRED_FEATURES
        .iter()
        .filter(|name| !trained.contains(**name))
        .map(|name| name.to_string())
        .collect();

    let extra = artifact_features
        .iter()
        .filter(|name| !required.contains(name.as_str()))
        .cloned()
        .collect();

    SchemaReport { missing, extra }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_reports_clean() {
        let report = compare(&owned(&REQUIRED_FEATURES));
        assert!(report.is_exact());
        assert!(report.missing.is_empty());
        assert!(report.extra.is_empty());
    }

    #[test]
    fn order_is_irrelevant() {
        let mut shuffled = owned(&REQUIRED_FEATURES);
        shuffled.reverse();
        assert!(compare(&shuffled).is_exact());
    }

    #[test]
    fn missing_and_extra_are_reported() {
        let trained = owned(&["EXT_SOURCE_1", "EXT_SOURCE_2", "AMT_INCOME_TOTAL"]);
        let report = compare(&trained);

        assert!(!report.is_exact());
        assert_eq!(report.extra, vec!["AMT_INCOME_TOTAL".to_string()]);
        assert!(report.missing.contains(&"EXT_SOURCE_3".to_string()));
        assert!(report.missing.contains(&"AMT_CREDIT".to_string()));
        assert_eq!(report.missing.len(), REQUIRED_FEATURES.len() - 2);
    }

    #[test]
    fn schema_has_fifteen_distinct_features() {
        let unique: HashSet<&str> = REQUIRED_FEATURES.iter().copied().collect();
        assert_eq!(unique.len(), 15);
    }
}
