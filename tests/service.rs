use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use ozone_predictor::{
    artifact::{Artifact, JsonFormat, ModelFormat, Node, Tree},
    classify, AirQualityBand, FeatureRecord, LoadError, PredictionError, Predictor,
    PredictorConfig, PredictorService, ServiceState, FEATURE_NAMES,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_model() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("rf_ozone_model.json")
}

fn default_record() -> FeatureRecord {
    FeatureRecord::new(200.0, 7.0, 77.0, 7).unwrap()
}

fn config_for(model_path: PathBuf) -> PredictorConfig {
    PredictorConfig {
        model_path,
        ..PredictorConfig::default()
    }
}

/// Fails on every other call.
struct Flaky {
    calls: AtomicUsize,
}

impl Predictor for Flaky {
    fn predict(&self, record: &FeatureRecord) -> Result<f32, PredictionError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            return Err(PredictionError::Model("internal failure".into()));
        }

        Ok(record.temperature())
    }
}

#[test]
fn missing_artifact_disables_the_service() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rf_ozone_model.json");

    let state = ServiceState::start(&config_for(path.clone()));

    assert!(state.service().is_none());
    match state.load_error() {
        Some(LoadError::ModelNotFound { path: got }) => assert_eq!(got, &path),
        other => panic!("expected ModelNotFound, got {other:?}"),
    }
    assert!(state
        .load_error()
        .unwrap()
        .to_string()
        .starts_with("Model file not found at"));
}

#[test]
fn corrupt_artifact_disables_the_service() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rf_ozone_model.json");
    fs::write(&path, b"\x80\x04\x95 not a model").unwrap();

    let state = ServiceState::start(&config_for(path));

    assert!(state.service().is_none());
    assert!(matches!(
        state.load_error(),
        Some(LoadError::ModelLoad { .. })
    ));
    assert!(state
        .load_error()
        .unwrap()
        .to_string()
        .starts_with("Error loading model: invalid artifact:"));
}

#[test]
fn structurally_invalid_artifact_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let artifact = Artifact::RandomForest {
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        trees: vec![Tree {
            nodes: vec![Node::Split {
                feature: 0,
                threshold: 1.0,
                left: 1,
                right: 2,
            }],
        }],
    };
    fs::write(&path, serde_json::to_vec(&artifact).unwrap()).unwrap();

    match PredictorService::load(&path, &JsonFormat) {
        Err(LoadError::ModelLoad { reason, .. }) => {
            assert!(reason.contains("invalid child index"), "{reason}")
        }
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("expected a load error"),
    }
}

#[test]
fn directory_instead_of_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        PredictorService::load(dir.path(), &JsonFormat),
        Err(LoadError::ModelLoad { .. })
    ));
}

#[test]
fn sample_model_end_to_end() {
    init_logs();
    let state = ServiceState::start(&config_for(sample_model()));
    let service = state.service().expect("sample model should load");

    let result = service.evaluate(&default_record()).unwrap();

    assert!((result.value - 36.325).abs() < 1e-3, "got {}", result.value);
    assert_eq!(result.band, classify(result.value));
    assert_eq!(result.band, AirQualityBand::Good);

    let formatted = result.formatted_value();
    let (whole, decimals) = formatted.split_once('.').unwrap();
    assert!(whole.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(decimals.len(), 2);
}

#[test]
fn hot_still_day_reads_higher() {
    let service = PredictorService::load(sample_model(), &JsonFormat).unwrap();
    let record = FeatureRecord::new(250.0, 4.0, 92.0, 8).unwrap();

    let result = service.evaluate(&record).unwrap();

    assert!((result.value - 89.975).abs() < 1e-3, "got {}", result.value);
    assert_eq!(result.band, AirQualityBand::Moderate);
}

#[test]
fn prediction_failure_is_recoverable() {
    init_logs();
    let service = PredictorService::from_predictor(
        Flaky {
            calls: AtomicUsize::new(0),
        },
        "flaky",
    );
    let record = default_record();

    assert_eq!(
        service.evaluate(&record),
        Err(PredictionError::Model("internal failure".into()))
    );

    let result = service.evaluate(&record).unwrap();
    assert_eq!(result.value, 77.0);
    assert_eq!(result.band, AirQualityBand::Moderate);
}

#[test]
fn custom_format_plugs_into_the_service() {
    struct Fixed;

    struct FixedFormat;

    impl Predictor for Fixed {
        fn predict(&self, _record: &FeatureRecord) -> Result<f32, PredictionError> {
            Ok(120.0)
        }
    }

    impl ModelFormat for FixedFormat {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn decode(&self, bytes: &[u8]) -> Result<Box<dyn Predictor>, String> {
            match bytes {
                b"fixed" => Ok(Box::new(Fixed)),
                _ => Err("not a fixed model".into()),
            }
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.bin");
    fs::write(&path, b"fixed").unwrap();

    let state = ServiceState::start_with(&config_for(path), &FixedFormat);
    let result = state.service().unwrap().evaluate(&default_record()).unwrap();

    assert_eq!(result.band, AirQualityBand::Poor);
    assert_eq!(result.to_string(), "Predicted Ozone (ppb): 120.00");
}
