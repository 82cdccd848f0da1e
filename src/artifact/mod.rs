//! Decoders that turn a stored model artifact into a [`Predictor`].

mod forest;
mod sequential;

use log::debug;
use serde::{Deserialize, Serialize};

pub use forest::{Node, RandomForest, Tree};
pub use sequential::{ActFn, Dense, DenseSpec, Sequential};

use crate::{features::FEATURE_NAMES, predictor::Predictor};

/// A pluggable artifact decoder.
pub trait ModelFormat {
    /// A short name used in log lines.
    fn name(&self) -> &'static str;

    /// Decodes the raw artifact bytes into a ready-to-use model.
    ///
    /// # Errors
    /// Returns a human-readable string if the bytes don't hold a valid model.
    fn decode(&self, bytes: &[u8]) -> Result<Box<dyn Predictor>, String>;
}

/// The stored form of a trained model, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Artifact {
    RandomForest {
        feature_names: Vec<String>,
        trees: Vec<Tree>,
    },
    Sequential {
        feature_names: Vec<String>,
        layers: Vec<DenseSpec>,
    },
}

impl Artifact {
    /// Validates the artifact and builds the model it describes.
    ///
    /// # Errors
    /// Returns a human-readable string if the artifact was fitted on other columns or is
    /// structurally invalid.
    pub fn into_predictor(self) -> Result<Box<dyn Predictor>, String> {
        match self {
            Self::RandomForest {
                feature_names,
                trees,
            } => {
                check_feature_names(&feature_names)?;
                let forest = RandomForest::new(feature_names.len(), trees)?;
                debug!("decoded random forest with {} tree(s)", forest.num_trees());
                Ok(Box::new(forest))
            }
            Self::Sequential {
                feature_names,
                layers,
            } => {
                check_feature_names(&feature_names)?;
                let nlayers = layers.len();
                let net = Sequential::new(feature_names.len(), layers)?;
                debug!("decoded sequential network with {nlayers} layer(s)");
                Ok(Box::new(net))
            }
        }
    }
}

fn check_feature_names(names: &[String]) -> Result<(), String> {
    if names.iter().map(String::as_str).ne(FEATURE_NAMES) {
        return Err(format!(
            "model was fitted on columns {names:?}, expected {FEATURE_NAMES:?}"
        ));
    }

    Ok(())
}

/// Reads artifacts written as JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl ModelFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> Result<Box<dyn Predictor>, String> {
        let artifact: Artifact =
            serde_json::from_slice(bytes).map_err(|e| format!("invalid artifact: {e}"))?;

        artifact.into_predictor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureRecord;

    fn names() -> Vec<String> {
        FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn decodes_tagged_random_forest() {
        let json = r#"{
            "kind": "random_forest",
            "feature_names": ["Solar.R", "Wind", "Temp", "Month"],
            "trees": [
                {"nodes": [{"feature": 2, "threshold": 80.0, "left": 1, "right": 2},
                           {"value": 30.0}, {"value": 90.0}]}
            ]
        }"#;

        let model = JsonFormat.decode(json.as_bytes()).unwrap();
        let record = FeatureRecord::new(200.0, 7.0, 77.0, 7).unwrap();
        assert_eq!(model.predict(&record), Ok(30.0));
    }

    #[test]
    fn decodes_tagged_sequential() {
        let json = r#"{
            "kind": "sequential",
            "feature_names": ["Solar.R", "Wind", "Temp", "Month"],
            "layers": [
                {"dim": [4, 1], "params": [0.0, 0.0, 1.0, 0.0, -10.0]}
            ]
        }"#;

        let model = JsonFormat.decode(json.as_bytes()).unwrap();
        let record = FeatureRecord::new(200.0, 7.0, 77.0, 7).unwrap();
        assert_eq!(model.predict(&record), Ok(67.0));
    }

    #[test]
    fn rejects_other_columns() {
        let artifact = Artifact::RandomForest {
            feature_names: vec!["Wind".into(), "Temp".into()],
            trees: vec![Tree {
                nodes: vec![Node::Leaf { value: 1.0 }],
            }],
        };

        let err = artifact.into_predictor().err().unwrap();
        assert!(err.contains("fitted on columns"), "{err}");
    }

    #[test]
    fn rejects_unknown_kind_and_garbage() {
        assert!(JsonFormat.decode(br#"{"kind": "svm", "feature_names": []}"#).is_err());
        assert!(JsonFormat.decode(b"\x80\x04\x95joblib").is_err());
        assert!(JsonFormat.decode(b"").is_err());
    }

    #[test]
    fn artifact_survives_a_json_round_trip() {
        let artifact = Artifact::Sequential {
            feature_names: names(),
            layers: vec![DenseSpec {
                dim: (4, 1),
                act_fn: Some(ActFn::Sigmoid { amp: 150.0 }),
                params: vec![0.0; 5],
            }],
        };

        let bytes = serde_json::to_vec(&artifact).unwrap();
        let back: Artifact = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, artifact);
    }
}
