//! Print bundle metadata and the serving-schema compatibility report.

use std::path::Path;

use anyhow::Context;

use octroi_core::schema;
use octroi_model::Artifact;

pub fn run(model_path: &Path) -> anyhow::Result<()> {
    let artifact = Artifact::load(model_path).context("loading model bundle")?;

    println!("bundle: {}", model_path.display());
    println!("  format version: {}", artifact.format_version);
    println!("  created at:     {}", artifact.created_at);
    println!("  features:       {}", artifact.feature_count());
    println!("  trees:          {}", artifact.ensemble.trees.len());
    println!("  learning rate:  {}", artifact.ensemble.learning_rate);
    println!("  base score:     {}", artifact.ensemble.base_score);

    let report = schema::compare(&artifact.feature_names);
    if report.is_exact() {
        println!(
            "  schema:         matches serving schema v{}",
            schema::SERVING_SCHEMA_VERSION
        );
    } else {
        // Divergence is reported, never guessed around: missing features are
        // fed 0.0 at inference time, extra ones are dropped.
        println!(
            "  schema:         DIVERGES from serving schema v{}",
            schema::SERVING_SCHEMA_VERSION
        );
        for name in &report.missing {
            println!("    not trained on: {name}");
        }
        for name in &report.extra {
            println!("    never supplied: {name}");
        }
    }

    println!("  feature order:");
    for name in &artifact.feature_names {
        println!("    {name}");
    }

    Ok(())
}
