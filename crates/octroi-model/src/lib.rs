//! Model bundle: the serialized estimator octroi serves.
//!
//! A bundle is `imputation → scaling → gradient-boosted trees` plus the
//! ordered feature names it was trained on. Loaded once at startup, validated
//! structurally, then shared read-only across all requests.

pub mod artifact;
pub mod ensemble;
pub mod preprocess;

pub use artifact::{Artifact, ArtifactLoadError, BUNDLE_FORMAT_VERSION, ScoreError, ScoreModel};
pub use ensemble::{EnsembleError, GradientBoostedTrees, Node, Tree};
pub use preprocess::{Imputer, Scaler};
