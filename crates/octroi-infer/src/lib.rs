//! The inference layer: one `predict` operation over an immutable artifact,
//! plus the typed records exchanged with the transport boundary.

pub mod boundary;
pub mod service;

pub use boundary::{ClientRecord, FactorEntry, ScoreResponse};
pub use service::{InferenceService, TOP_FACTOR_COUNT};
