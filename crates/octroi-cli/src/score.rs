//! Score one client record against a model bundle.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::{fs, io};

use anyhow::Context;

use octroi_infer::{ClientRecord, InferenceService, ScoreResponse};
use octroi_model::Artifact;

pub fn run(model_path: &Path, input: Option<&Path>) -> anyhow::Result<()> {
    // Load failure is fatal: nothing is served without a valid bundle.
    let artifact = Arc::new(Artifact::load(model_path).context("loading model bundle")?);

    let raw = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading client record {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading client record from stdin")?;
            buf
        }
    };

    // Schema validation happens here, before inference; a malformed record is
    // a client error, not a scoring failure.
    let record: ClientRecord =
        serde_json::from_str(&raw).context("client record does not match the request schema")?;

    let service = InferenceService::from_artifact(artifact);
    let prediction = service.predict(&record.to_row())?;
    let response = ScoreResponse::from(prediction);

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
