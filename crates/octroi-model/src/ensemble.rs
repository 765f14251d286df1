//! Gradient-boosted decision tree ensemble over preprocessed feature vectors.
//!
//! The additive model is `base_score + learning_rate * Σ tree(x)` in
//! raw-margin (log-odds) space; the sigmoid maps it to a probability. Split
//! nodes carry the expected value of the subtree below them so that
//! decision-path attribution can credit each split to its feature.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural defect in a serialized ensemble.
#[derive(Debug, Error, PartialEq)]
pub enum EnsembleError {
    #[error("ensemble has no trees")]
    Empty,
    #[error("tree {tree} has no nodes")]
    EmptyTree { tree: usize },
    #[error("tree {tree} node {node}: child index {child} must point forward within the tree")]
    BadChild { tree: usize, node: usize, child: usize },
    #[error("tree {tree} node {node}: feature index {feature} out of range for {count} features")]
    BadFeature {
        tree: usize,
        node: usize,
        feature: usize,
        count: usize,
    },
    #[error("tree {tree} node {node}: threshold is not finite")]
    BadThreshold { tree: usize, node: usize },
    #[error("learning rate must be finite and positive, got {0}")]
    BadLearningRate(f64),
    #[error("base score must be finite, got {0}")]
    BadBaseScore(f64),
}

/// One node of a decision tree.
///
/// `value` is the raw-margin expectation at the node: the leaf weight for
/// leaves, the cover-weighted mean of the subtree for splits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        value: f64,
    },
}

impl Node {
    /// Expected raw value at this node.
    pub fn value(&self) -> f64 {
        match self {
            Self::Leaf { value } | Self::Split { value, .. } => *value,
        }
    }
}

/// A single regression tree, nodes stored in preorder with the root at 0.
///
/// Children always point forward (validated at load), so traversal is a
/// bounded walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Value at the leaf reached by `row`. Split rule: `row[feature] <=
    /// threshold` goes left.
    pub fn leaf_value(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Indices of the nodes visited from root to leaf for `row`.
    pub fn decision_path(&self, row: &[f64]) -> Vec<usize> {
        let mut path = Vec::new();
        let mut idx = 0;
        loop {
            path.push(idx);
            match &self.nodes[idx] {
                Node::Leaf { .. } => return path,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    idx = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    fn validate(&self, tree: usize, feature_count: usize) -> Result<(), EnsembleError> {
        if self.nodes.is_empty() {
            return Err(EnsembleError::EmptyTree { tree });
        }
        for (node, n) in self.nodes.iter().enumerate() {
            if let Node::Split {
                feature,
                threshold,
                left,
                right,
                ..
            } = n
            {
                if *feature >= feature_count {
                    return Err(EnsembleError::BadFeature {
                        tree,
                        node,
                        feature: *feature,
                        count: feature_count,
                    });
                }
                if !threshold.is_finite() {
                    return Err(EnsembleError::BadThreshold { tree, node });
                }
                for child in [*left, *right] {
                    if child <= node || child >= self.nodes.len() {
                        return Err(EnsembleError::BadChild { tree, node, child });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Binary gradient-boosted classifier in raw-margin space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoostedTrees {
    pub trees: Vec<Tree>,
    pub learning_rate: f64,
    /// Raw-margin prior (log-odds of the default class at initialization).
    pub base_score: f64,
}

impl GradientBoostedTrees {
    /// Raw additive margin before the sigmoid.
    pub fn raw_score(&self, row: &[f64]) -> f64 {
        let boost: f64 = self.trees.iter().map(|t| t.leaf_value(row)).sum();
        self.base_score + self.learning_rate * boost
    }

    /// Probability of the default class for one preprocessed row.
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        sigmoid(self.raw_score(row))
    }

    /// Check the ensemble against the bundle's declared feature count.
    pub fn validate(&self, feature_count: usize) -> Result<(), EnsembleError> {
        if self.trees.is_empty() {
            return Err(EnsembleError::Empty);
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(EnsembleError::BadLearningRate(self.learning_rate));
        }
        if !self.base_score.is_finite() {
            return Err(EnsembleError::BadBaseScore(self.base_score));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, feature_count)?;
        }
        Ok(())
    }
}

fn sigmoid(raw: f64) -> f64 {
    1.0 / (1.0 + (-raw).exp())
}
