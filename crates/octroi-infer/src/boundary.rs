//! Typed records exchanged with the transport boundary.
//!
//! The transport layer (HTTP, queue, CLI) owns deserialization: a client
//! record that fails to parse is a client error and never reaches the
//! service. Every field is required; there are no boundary defaults.

use serde::{Deserialize, Serialize};

use octroi_core::{Decision, Factor, FeatureRow, Prediction};

/// One credit application as posted by the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    // External bureau scores, conventionally 0–1.
    #[serde(rename = "EXT_SOURCE_1")]
    pub ext_source_1: f64,
    #[serde(rename = "EXT_SOURCE_2")]
    pub ext_source_2: f64,
    #[serde(rename = "EXT_SOURCE_3")]
    pub ext_source_3: f64,

    // Financing amounts, currency units.
    #[serde(rename = "AMT_GOODS_PRICE")]
    pub amt_goods_price: f64,
    #[serde(rename = "AMT_ANNUITY")]
    pub amt_annuity: f64,
    #[serde(rename = "AMT_CREDIT")]
    pub amt_credit: f64,

    // Client history, negative day counts relative to the application date.
    #[serde(rename = "DAYS_BIRTH")]
    pub days_birth: f64,
    #[serde(rename = "DAYS_EMPLOYED")]
    pub days_employed: f64,
    #[serde(rename = "DAYS_LAST_PHONE_CHANGE")]
    pub days_last_phone_change: f64,

    #[serde(rename = "NAME_FAMILY_STATUS_Married")]
    pub family_status_married: i64,

    // Regional ratings, small integer-valued.
    #[serde(rename = "REGION_RATING_CLIENT")]
    pub region_rating_client: f64,
    #[serde(rename = "REGION_RATING_CLIENT_W_CITY")]
    pub region_rating_client_w_city: f64,

    #[serde(rename = "FLAG_DOCUMENT_3")]
    pub flag_document_3: i64,
    #[serde(rename = "DAYS_ID_PUBLISH")]
    pub days_id_publish: f64,
    #[serde(rename = "OCCUPATION_TYPE_Laborers")]
    pub occupation_laborers: i64,
}

impl ClientRecord {
    /// Flatten to the name → value mapping the inference service consumes.
    pub fn to_row(&self) -> FeatureRow {
        FeatureRow::from([
            ("EXT_SOURCE_1", self.ext_source_1),
            ("EXT_SOURCE_2", self.ext_source_2),
            ("EXT_SOURCE_3", self.ext_source_3),
            ("AMT_GOODS_PRICE", self.amt_goods_price),
            ("AMT_ANNUITY", self.amt_annuity),
            ("AMT_CREDIT", self.amt_credit),
            ("DAYS_BIRTH", self.days_birth),
            ("DAYS_EMPLOYED", self.days_employed),
            ("DAYS_LAST_PHONE_CHANGE", self.days_last_phone_change),
            (
                "NAME_FAMILY_STATUS_Married",
                self.family_status_married as f64,
            ),
            ("REGION_RATING_CLIENT", self.region_rating_client),
            (
                "REGION_RATING_CLIENT_W_CITY",
                self.region_rating_client_w_city,
            ),
            ("FLAG_DOCUMENT_3", self.flag_document_3 as f64),
            ("DAYS_ID_PUBLISH", self.days_id_publish),
            ("OCCUPATION_TYPE_Laborers", self.occupation_laborers as f64),
        ])
    }
}

/// One ranked factor as emitted over the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorEntry {
    pub feature: String,
    pub impact: f64,
}

impl From<Factor> for FactorEntry {
    fn from(factor: Factor) -> Self {
        Self {
            feature: factor.feature,
            impact: factor.impact,
        }
    }
}

/// Boundary response: probability, decision, ranked factors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub probabilite_defaut: f64,
    pub decision: Decision,
    pub facteurs_principaux: Vec<FactorEntry>,
}

impl From<Prediction> for ScoreResponse {
    fn from(prediction: Prediction) -> Self {
        Self {
            probabilite_defaut: prediction.probability,
            decision: prediction.decision,
            facteurs_principaux: prediction
                .top_factors
                .into_iter()
                .map(FactorEntry::from)
                .collect(),
        }
    }
}
