//! Loading, validating, and scoring a serialized model bundle.
//!
//! The bundle is a versioned JSON document on local disk: ordered feature
//! names, fitted preprocessing statistics, and the boosted ensemble. Loading
//! happens once at process start and any failure there is fatal; after that
//! the artifact is immutable and safe to share across requests.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use octroi_core::schema;

use crate::ensemble::{EnsembleError, GradientBoostedTrees};
use crate::preprocess::{Imputer, Scaler};

/// Bundle format this build can load.
pub const BUNDLE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("cannot read model bundle {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("model bundle is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported bundle format version {found}, this build reads version {BUNDLE_FORMAT_VERSION}")]
    UnsupportedVersion { found: u32 },
    #[error("invalid ensemble: {0}")]
    Ensemble(#[from] EnsembleError),
    #[error("inconsistent bundle shape: {0}")]
    Shape(String),
}

/// Scoring failure on a single row. Propagated to the caller as a server
/// error; not expected once reindexing has aligned the row.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("row has {got} values, model expects {expected}")]
    FeatureCountMismatch { expected: usize, got: usize },
    #[error("non-finite value for feature {name:?} after imputation")]
    NonFinite { name: String },
    #[error("model produced probability {0}, outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}

/// A fitted estimator exposing default-class probability scoring.
///
/// Implemented by [`Artifact`]; test doubles stand in for it wherever a
/// pinned probability is needed.
pub trait ScoreModel: Send + Sync {
    /// Trained input features, in the order `predict_proba` expects.
    fn feature_names(&self) -> &[String];

    /// Probability of the default class for one aligned row.
    fn predict_proba(&self, row: &[f64]) -> Result<f64, ScoreError>;
}

/// The serialized model bundle: preprocessing, classifier, and the feature
/// order captured at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub format_version: u32,
    /// When the training run produced this bundle.
    pub created_at: DateTime<Utc>,
    pub feature_names: Vec<String>,
    pub imputer: Imputer,
    pub scaler: Scaler,
    pub ensemble: GradientBoostedTrees,
}

impl Artifact {
    /// Deserialize and validate a bundle from disk.
    ///
    /// A bundle trained on a feature set that diverges from the serving
    /// schema still loads (reindexing keeps rows aligned to the bundle's own
    /// order), but the divergence is logged rather than silently accepted.
    pub fn load(path: &Path) -> Result<Self, ArtifactLoadError> {
        let file = File::open(path).map_err(|source| ArtifactLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Artifact = serde_json::from_reader(BufReader::new(file))?;
        artifact.validate()?;

        let report = schema::compare(&artifact.feature_names);
        if report.is_exact() {
            info!(
                path = %path.display(),
                features = artifact.feature_names.len(),
                trees = artifact.ensemble.trees.len(),
                "loaded model bundle"
            );
        } else {
            warn!(
                path = %path.display(),
                missing = ?report.missing,
                extra = ?report.extra,
                "model bundle feature set diverges from serving schema v{}",
                schema::SERVING_SCHEMA_VERSION
            );
        }

        Ok(artifact)
    }

    /// Structural checks over the whole bundle.
    pub fn validate(&self) -> Result<(), ArtifactLoadError> {
        if self.format_version != BUNDLE_FORMAT_VERSION {
            return Err(ArtifactLoadError::UnsupportedVersion {
                found: self.format_version,
            });
        }

        let count = self.feature_names.len();
        if count == 0 {
            return Err(ArtifactLoadError::Shape("no feature names".into()));
        }
        let mut seen = std::collections::HashSet::new();
        for name in &self.feature_names {
            if !seen.insert(name.as_str()) {
                return Err(ArtifactLoadError::Shape(format!(
                    "duplicate feature name {name:?}"
                )));
            }
        }

        for (stage, len) in [
            ("imputer fill", self.imputer.fill.len()),
            ("scaler mean", self.scaler.mean.len()),
            ("scaler std", self.scaler.std.len()),
        ] {
            if len != count {
                return Err(ArtifactLoadError::Shape(format!(
                    "{stage} has {len} values, bundle declares {count} features"
                )));
            }
        }
        if self.imputer.fill.iter().any(|v| !v.is_finite())
            || self.scaler.mean.iter().any(|v| !v.is_finite())
        {
            return Err(ArtifactLoadError::Shape(
                "non-finite preprocessing statistic".into(),
            ));
        }
        if self.scaler.std.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ArtifactLoadError::Shape(
                "scaler std must be finite and non-negative".into(),
            ));
        }

        self.ensemble.validate(count)?;
        Ok(())
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    /// Apply imputation and scaling to an aligned row.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ScoreError> {
        if row.len() != self.feature_names.len() {
            return Err(ScoreError::FeatureCountMismatch {
                expected: self.feature_names.len(),
                got: row.len(),
            });
        }
        let mut values = row.to_vec();
        self.imputer.transform(&mut values);
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ScoreError::NonFinite {
                name: self.feature_names[i].clone(),
            });
        }
        self.scaler.transform(&mut values);
        Ok(values)
    }
}

impl ScoreModel for Artifact {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_proba(&self, row: &[f64]) -> Result<f64, ScoreError> {
        let transformed = self.transform(row)?;
        Ok(self.ensemble.predict_proba(&transformed))
    }
}
