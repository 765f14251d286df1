//! Scoring one client: reindex → score → decide → explain → rank.
//!
//! Each call is a pure, read-only transformation over the injected artifact.
//! Scoring failures propagate; attribution failures never do. They degrade
//! the response to an empty factor list and leave a warning in the logs.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::warn;

use octroi_core::{Decision, Factor, FeatureRow, Prediction};
use octroi_explain::{Explain, PathExplainer};
use octroi_model::{Artifact, ScoreError, ScoreModel};

/// Number of attribution factors returned with each prediction.
pub const TOP_FACTOR_COUNT: usize = 5;

/// Request-scoped entry point over a loaded model.
///
/// Holds the estimator and its bound explainer behind shared references;
/// every `predict` call is independent, so one service instance safely serves
/// arbitrarily many concurrent callers.
pub struct InferenceService {
    model: Arc<dyn ScoreModel>,
    explainer: Arc<dyn Explain>,
}

impl InferenceService {
    /// Wire a service to a loaded artifact, binding a path explainer to it.
    pub fn from_artifact(artifact: Arc<Artifact>) -> Self {
        let explainer = PathExplainer::new(artifact.clone());
        Self {
            model: artifact,
            explainer: Arc::new(explainer),
        }
    }

    /// Assemble a service from explicit scoring and attribution backends.
    pub fn new(model: Arc<dyn ScoreModel>, explainer: Arc<dyn Explain>) -> Self {
        Self { model, explainer }
    }

    /// Score one client row.
    ///
    /// The row may carry any subset or superset of the model's features;
    /// alignment fills missing features with zero and drops unknown ones.
    pub fn predict(&self, row: &FeatureRow) -> Result<Prediction, ScoreError> {
        let aligned = row.reindex(self.model.feature_names());

        let probability = self.model.predict_proba(&aligned)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ScoreError::ProbabilityOutOfRange(probability));
        }

        let decision = Decision::from_probability(probability);

        let top_factors = match self.explainer.attributions(&aligned) {
            Ok(impacts) => rank_factors(self.model.feature_names(), &impacts),
            Err(err) => {
                warn!(error = %err, "attribution unavailable, returning empty factor list");
                Vec::new()
            }
        };

        Ok(Prediction {
            probability,
            decision,
            top_factors,
        })
    }
}

/// Keep the largest absolute impacts, descending. The sort is stable, so
/// tied magnitudes keep the model's feature order.
fn rank_factors(names: &[String], impacts: &[f64]) -> Vec<Factor> {
    let mut factors: Vec<Factor> = names
        .iter()
        .zip(impacts)
        .map(|(feature, &impact)| Factor {
            feature: feature.clone(),
            impact,
        })
        .collect();

    factors.sort_by(|a, b| {
        b.impact
            .abs()
            .partial_cmp(&a.impact.abs())
            .unwrap_or(Ordering::Equal)
    });
    factors.truncate(TOP_FACTOR_COUNT);
    factors
}
