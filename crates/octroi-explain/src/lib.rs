//! Per-prediction feature attribution.
//!
//! Attribution answers "which features pushed this client's score where it
//! landed": one signed contribution per trained feature, in raw-margin space,
//! positive pushing toward default. The estimator is treated as a tree
//! ensemble and explained by decision-path attribution: at every split a row
//! takes, the change in expected value between the node and the chosen child
//! is credited to the split feature, accumulated across all trees.
//!
//! Attribution is best-effort by contract. Callers surface failures as an
//! empty factor list, never as a failed prediction.

use std::sync::Arc;

use thiserror::Error;

use octroi_model::{Artifact, Node, ScoreError};

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("row has {got} values, explainer expects {expected}")]
    FeatureCountMismatch { expected: usize, got: usize },
    #[error("row could not be preprocessed: {0}")]
    Preprocess(#[from] ScoreError),
}

/// Black-box attribution over one aligned row.
///
/// The returned vector has one signed contribution per trained feature, in
/// the artifact's feature order.
pub trait Explain: Send + Sync {
    fn attributions(&self, row: &[f64]) -> Result<Vec<f64>, ExplainError>;
}

/// Decision-path attribution bound to a loaded artifact.
///
/// Constructed once at startup next to the artifact and reused for every
/// request; it holds no per-call state.
pub struct PathExplainer {
    artifact: Arc<Artifact>,
}

impl PathExplainer {
    pub fn new(artifact: Arc<Artifact>) -> Self {
        Self { artifact }
    }
}

impl Explain for PathExplainer {
    fn attributions(&self, row: &[f64]) -> Result<Vec<f64>, ExplainError> {
        let count = self.artifact.feature_count();
        if row.len() != count {
            return Err(ExplainError::FeatureCountMismatch {
                expected: count,
                got: row.len(),
            });
        }

        // Attribute in the same preprocessed space the ensemble scores in, so
        // contributions telescope exactly to the raw margin.
        let transformed = self.artifact.transform(row)?;

        let ensemble = &self.artifact.ensemble;
        let mut contributions = vec![0.0; count];
        for tree in &ensemble.trees {
            let path = tree.decision_path(&transformed);
            for step in path.windows(2) {
                let (node, next) = (step[0], step[1]);
                if let Node::Split { feature, value, .. } = &tree.nodes[node] {
                    contributions[*feature] +=
                        ensemble.learning_rate * (tree.nodes[next].value() - value);
                }
            }
        }

        Ok(contributions)
    }
}
