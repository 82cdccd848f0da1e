use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{error::PredictionError, features::FeatureRecord, predictor::Predictor};

/// Activation applied element-wise after a dense layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActFn {
    Sigmoid { amp: f32 },
}

impl ActFn {
    pub fn f(&self, z: f32) -> f32 {
        match *self {
            Self::Sigmoid { amp } => amp / (1. + (-z).exp()),
        }
    }
}

/// A dense layer as stored in an artifact: `params` holds the `dim.0 * dim.1` row-major weights
/// followed by the `dim.1` biases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseSpec {
    pub dim: (usize, usize),
    #[serde(default)]
    pub act_fn: Option<ActFn>,
    pub params: Vec<f32>,
}

/// A fully connected layer with its parameters laid out as matrices.
#[derive(Debug, Clone)]
pub struct Dense {
    act_fn: Option<ActFn>,
    weights: Array2<f32>,
    biases: Array1<f32>,
}

impl Dense {
    /// Builds a layer out of its stored form.
    ///
    /// # Errors
    /// Returns a human-readable string if the parameter count doesn't match the dimensions.
    fn from_spec(spec: DenseSpec) -> Result<Self, String> {
        let (n, m) = spec.dim;
        if n == 0 || m == 0 {
            return Err(format!("dim ({n}, {m}) must be non-zero"));
        }

        let size = (n + 1) * m;
        if spec.params.len() != size {
            return Err(format!(
                "expected {size} params for dim ({n}, {m}), got {}",
                spec.params.len()
            ));
        }

        if spec.params.iter().any(|p| !p.is_finite()) {
            return Err("params must be finite".into());
        }

        let mut params = spec.params;
        let biases = params.split_off(n * m);
        let weights = Array2::from_shape_vec((n, m), params).map_err(|e| e.to_string())?;

        Ok(Self {
            act_fn: spec.act_fn,
            weights,
            biases: Array1::from_vec(biases),
        })
    }

    pub fn dim(&self) -> (usize, usize) {
        self.weights.dim()
    }

    pub fn forward(&self, x: ArrayView2<f32>) -> Array2<f32> {
        let mut z = x.dot(&self.weights) + &self.biases;

        if let Some(act_fn) = self.act_fn {
            z.mapv_inplace(|v| act_fn.f(v));
        }

        z
    }
}

/// A sequential network: the input flows forward through every layer in order.
#[derive(Debug, Clone)]
pub struct Sequential {
    layers: Vec<Dense>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `n_features` - The width of the input rows.
    /// * `layers` - The stored layers, input layer first.
    ///
    /// # Errors
    /// Returns a human-readable string if the layers don't chain from `n_features` inputs down to
    /// a single output.
    pub fn new(n_features: usize, layers: Vec<DenseSpec>) -> Result<Self, String> {
        if layers.is_empty() {
            return Err("network must have at least one layer".into());
        }

        let mut expected_in = n_features;
        let mut built = Vec::with_capacity(layers.len());

        for (i, spec) in layers.into_iter().enumerate() {
            let layer = Dense::from_spec(spec).map_err(|e| format!("layer {i}: {e}"))?;
            let (n, m) = layer.dim();
            if n != expected_in {
                return Err(format!(
                    "layer {i}: expected {expected_in} inputs, got {n}"
                ));
            }

            expected_in = m;
            built.push(layer);
        }

        if expected_in != 1 {
            return Err(format!(
                "the last layer must have a single output, got {expected_in}"
            ));
        }

        Ok(Self { layers: built })
    }

    /// Makes a forward pass for a single dense row.
    ///
    /// # Errors
    /// Returns a `PredictionError` if the row width doesn't match the input layer.
    pub fn predict_row(&self, row: &[f32]) -> Result<f32, PredictionError> {
        let n_in = self.layers.first().map_or(0, |l| l.dim().0);
        let mismatch = || PredictionError::SizeMismatch {
            what: "row",
            got: row.len(),
            expected: n_in,
        };

        if row.len() != n_in {
            return Err(mismatch());
        }

        let x = ArrayView2::from_shape((1, n_in), row).map_err(|_| mismatch())?;

        let mut y = x.to_owned();
        for layer in &self.layers {
            y = layer.forward(y.view());
        }

        y.iter()
            .next()
            .copied()
            .ok_or_else(|| PredictionError::Model("network produced no output".into()))
    }
}

impl Predictor for Sequential {
    fn predict(&self, record: &FeatureRecord) -> Result<f32, PredictionError> {
        self.predict_row(&record.to_row())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(weights: [f32; 4], bias: f32) -> DenseSpec {
        let mut params = weights.to_vec();
        params.push(bias);
        DenseSpec {
            dim: (4, 1),
            act_fn: None,
            params,
        }
    }

    #[test]
    fn single_linear_layer_is_a_dot_product() {
        let net = Sequential::new(4, vec![linear([0.1, -2.0, 1.5, 0.0], -50.0)]).unwrap();

        let got = net.predict_row(&[200.0, 7.0, 77.0, 7.0]).unwrap();
        // 20 - 14 + 115.5 - 50
        assert!((got - 71.5).abs() < 1e-3, "got {got}");
    }

    #[test]
    fn hidden_sigmoid_layer_feeds_the_output() {
        let hidden = DenseSpec {
            dim: (4, 2),
            act_fn: Some(ActFn::Sigmoid { amp: 1.0 }),
            // Zero weights and biases: every hidden unit outputs sigmoid(0) = 0.5.
            params: vec![0.0; 10],
        };
        let output = DenseSpec {
            dim: (2, 1),
            act_fn: None,
            params: vec![40.0, 60.0, 1.0],
        };
        let net = Sequential::new(4, vec![hidden, output]).unwrap();

        let got = net.predict_row(&[1.0, 2.0, 3.0, 5.0]).unwrap();
        assert!((got - 51.0).abs() < 1e-4, "got {got}");
    }

    #[test]
    fn sigmoid_amplitude_scales_output() {
        let act = ActFn::Sigmoid { amp: 4.0 };
        assert!((act.f(0.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn layers_must_chain() {
        let first = DenseSpec {
            dim: (4, 3),
            act_fn: None,
            params: vec![0.0; 15],
        };
        let second = DenseSpec {
            dim: (2, 1),
            act_fn: None,
            params: vec![0.0; 3],
        };

        let err = Sequential::new(4, vec![first, second]).unwrap_err();
        assert!(err.contains("layer 1"), "{err}");
    }

    #[test]
    fn param_count_and_output_width_are_checked() {
        let short = DenseSpec {
            dim: (4, 1),
            act_fn: None,
            params: vec![0.0; 4],
        };
        assert!(Sequential::new(4, vec![short]).is_err());

        let wide = DenseSpec {
            dim: (4, 2),
            act_fn: None,
            params: vec![0.0; 10],
        };
        assert!(Sequential::new(4, vec![wide]).is_err());
        assert!(Sequential::new(4, vec![]).is_err());
    }

    #[test]
    fn wrong_row_width_is_a_prediction_error() {
        let net = Sequential::new(4, vec![linear([1.0; 4], 0.0)]).unwrap();

        assert_eq!(
            net.predict_row(&[1.0, 2.0, 3.0]),
            Err(PredictionError::SizeMismatch {
                what: "row",
                got: 3,
                expected: 4
            })
        );
        assert_eq!(
            net.predict_row(&[1.0, 2.0, 3.0, 4.0, 1000.0]),
            Err(PredictionError::SizeMismatch {
                what: "row",
                got: 5,
                expected: 4
            })
        );
    }
}
