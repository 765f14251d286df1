//! Decision rule and prediction result types.

use serde::{Deserialize, Serialize};

/// Probability cutoff separating the two decision outcomes.
///
/// Strictly above the threshold means refusal; the boundary value itself
/// grants the credit.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Outcome of a credit application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "ACCORDÉ")]
    Granted,
    #[serde(rename = "REFUSÉ")]
    Refused,
}

impl Decision {
    /// Apply the fixed threshold: `probability > 0.5` refuses, else grants.
    pub fn from_probability(probability: f64) -> Self {
        if probability > DECISION_THRESHOLD {
            Self::Refused
        } else {
            Self::Granted
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "ACCORDÉ",
            Self::Refused => "REFUSÉ",
        }
    }
}

/// One ranked attribution entry: a feature and its signed impact.
///
/// Negative impact pushes toward a lower default probability, positive toward
/// a higher one.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    pub feature: String,
    pub impact: f64,
}

/// Result of scoring one client.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Probability mass assigned to the default class, in `[0, 1]`.
    pub probability: f64,
    pub decision: Decision,
    /// At most five factors, sorted by descending absolute impact.
    pub top_factors: Vec<Factor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn above_threshold_refuses() {
        assert_eq!(Decision::from_probability(0.7), Decision::Refused);
        assert_eq!(Decision::from_probability(0.51), Decision::Refused);
    }

    #[test]
    fn below_threshold_grants() {
        assert_eq!(Decision::from_probability(0.3), Decision::Granted);
        assert_eq!(Decision::from_probability(0.0), Decision::Granted);
    }

    #[test]
    fn exact_threshold_grants() {
        assert_eq!(Decision::from_probability(0.5), Decision::Granted);
    }

    #[test]
    fn serializes_to_french_labels() {
        assert_eq!(
            serde_json::to_string(&Decision::Granted).unwrap(),
            "\"ACCORDÉ\""
        );
        assert_eq!(
            serde_json::to_string(&Decision::Refused).unwrap(),
            "\"REFUSÉ\""
        );
    }

    #[test]
    fn round_trips_through_json() {
        let parsed: Decision = serde_json::from_str("\"REFUSÉ\"").unwrap();
        assert_eq!(parsed, Decision::Refused);
        assert_eq!(parsed.as_str(), "REFUSÉ");
    }
}
