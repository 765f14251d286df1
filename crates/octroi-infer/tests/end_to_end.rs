//! Full-path test: bundle on disk → loader → inference service → boundary JSON.

use std::fs;
use std::sync::Arc;

use chrono::Utc;

use octroi_core::schema::REQUIRED_FEATURES;
use octroi_core::{DECISION_THRESHOLD, Decision, FeatureRow};
use octroi_infer::{ClientRecord, InferenceService, ScoreResponse, TOP_FACTOR_COUNT};
use octroi_model::{
    Artifact, ArtifactLoadError, BUNDLE_FORMAT_VERSION, GradientBoostedTrees, Imputer, Node,
    Scaler, Tree,
};

const EXT_SOURCE_2: usize = 1;
const AMT_CREDIT: usize = 5;

/// A small but real bundle over the full serving schema: two trees, one on an
/// external bureau score, one on the credit amount.
fn serving_bundle() -> Artifact {
    let n = REQUIRED_FEATURES.len();

    let mut mean = vec![0.0; n];
    let mut std = vec![1.0; n];
    mean[AMT_CREDIT] = 500_000.0;
    std[AMT_CREDIT] = 200_000.0;

    let split = |feature: usize, threshold: f64, left: f64, right: f64| Tree {
        nodes: vec![
            Node::Split {
                feature,
                threshold,
                left: 1,
                right: 2,
                value: 0.15,
            },
            Node::Leaf { value: left },
            Node::Leaf { value: right },
        ],
    };

    Artifact {
        format_version: BUNDLE_FORMAT_VERSION,
        created_at: Utc::now(),
        feature_names: REQUIRED_FEATURES.iter().map(|s| s.to_string()).collect(),
        imputer: Imputer { fill: vec![0.0; n] },
        scaler: Scaler { mean, std },
        ensemble: GradientBoostedTrees {
            // Weak external score raises risk; large credit raises risk.
            trees: vec![
                split(EXT_SOURCE_2, 0.55, 1.2, -0.8),
                split(AMT_CREDIT, 0.4, -0.5, 0.9),
            ],
            learning_rate: 0.6,
            base_score: 0.0,
        },
    }
}

fn example_record() -> ClientRecord {
    serde_json::from_str(
        r#"{
            "EXT_SOURCE_1": 0.5,
            "EXT_SOURCE_2": 0.6,
            "EXT_SOURCE_3": 0.4,
            "AMT_GOODS_PRICE": 500000.0,
            "AMT_ANNUITY": 25000.0,
            "AMT_CREDIT": 600000.0,
            "DAYS_BIRTH": -12000.0,
            "DAYS_EMPLOYED": -2000.0,
            "DAYS_LAST_PHONE_CHANGE": -1000.0,
            "NAME_FAMILY_STATUS_Married": 1,
            "REGION_RATING_CLIENT": 2.0,
            "REGION_RATING_CLIENT_W_CITY": 2.0,
            "FLAG_DOCUMENT_3": 1,
            "DAYS_ID_PUBLISH": -3000.0,
            "OCCUPATION_TYPE_Laborers": 0
        }"#,
    )
    .unwrap()
}

fn loaded_service(dir: &tempfile::TempDir) -> InferenceService {
    let path = dir.path().join("credit_scoring_model.json");
    fs::write(&path, serde_json::to_string(&serving_bundle()).unwrap()).unwrap();
    let artifact = Arc::new(Artifact::load(&path).unwrap());
    InferenceService::from_artifact(artifact)
}

#[test]
fn disk_to_boundary_response() {
    let dir = tempfile::tempdir().unwrap();
    let service = loaded_service(&dir);

    let prediction = service.predict(&example_record().to_row()).unwrap();

    assert!((0.0..=1.0).contains(&prediction.probability));
    let expect_refusal = prediction.probability > DECISION_THRESHOLD;
    assert_eq!(
        prediction.decision,
        if expect_refusal {
            Decision::Refused
        } else {
            Decision::Granted
        }
    );

    assert!(prediction.top_factors.len() <= TOP_FACTOR_COUNT);
    let magnitudes: Vec<f64> = prediction.top_factors.iter().map(|f| f.impact.abs()).collect();
    assert!(magnitudes.windows(2).all(|w| w[0] >= w[1]));

    // Only the two split features can carry weight in this bundle.
    assert!(["EXT_SOURCE_2", "AMT_CREDIT"]
        .contains(&prediction.top_factors[0].feature.as_str()));

    let response = ScoreResponse::from(prediction);
    let value = serde_json::to_value(&response).unwrap();
    assert!(value["probabilite_defaut"].is_number());
    assert!(matches!(
        value["decision"].as_str(),
        Some("ACCORDÉ") | Some("REFUSÉ")
    ));
    assert!(value["facteurs_principaux"].is_array());
}

#[test]
fn unknown_extra_fields_change_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let service = loaded_service(&dir);

    let plain = example_record().to_row();
    let mut noisy = plain.clone();
    noisy.set("AMT_INCOME_TOTAL", 250_000.0);
    noisy.set("CNT_CHILDREN", 2.0);

    let a = service.predict(&plain).unwrap();
    let b = service.predict(&noisy).unwrap();

    assert_eq!(a.probability, b.probability);
    assert_eq!(a.decision, b.decision);
    assert_eq!(a.top_factors, b.top_factors);
}

#[test]
fn missing_known_field_defaults_to_zero() {
    let dir = tempfile::tempdir().unwrap();
    let service = loaded_service(&dir);

    let mut explicit = FeatureRow::new();
    for name in REQUIRED_FEATURES {
        explicit.set(name, 0.0);
    }
    explicit.set("EXT_SOURCE_2", 0.6);

    // Same row with every zero field simply absent.
    let mut sparse = FeatureRow::new();
    sparse.set("EXT_SOURCE_2", 0.6);

    let a = service.predict(&explicit).unwrap();
    let b = service.predict(&sparse).unwrap();
    assert_eq!(a.probability, b.probability);
    assert_eq!(a.top_factors, b.top_factors);

    // And reproducible across calls.
    assert_eq!(service.predict(&sparse).unwrap().probability, b.probability);
}

#[test]
fn external_score_drives_the_decision_direction() {
    let dir = tempfile::tempdir().unwrap();
    let service = loaded_service(&dir);

    let mut weak = example_record();
    weak.ext_source_2 = 0.1;
    let mut strong = example_record();
    strong.ext_source_2 = 0.95;

    let weak_p = service.predict(&weak.to_row()).unwrap().probability;
    let strong_p = service.predict(&strong.to_row()).unwrap().probability;
    assert!(weak_p > strong_p);
}

#[test]
fn corrupt_bundle_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    fs::write(&path, "{\"format_version\": 1").unwrap();
    assert!(matches!(
        Artifact::load(&path).unwrap_err(),
        ArtifactLoadError::Json(_)
    ));
}
