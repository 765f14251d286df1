pub mod decision;
pub mod row;
pub mod schema;

pub use decision::{DECISION_THRESHOLD, Decision, Factor, Prediction};
pub use row::FeatureRow;
pub use schema::{SERVING_SCHEMA_VERSION, SchemaReport};
