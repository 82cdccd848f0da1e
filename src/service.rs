use std::{
    fmt::{self, Display},
    fs, io,
    path::{Path, PathBuf},
};

use log::{error, info, warn};

use crate::{
    artifact::{JsonFormat, ModelFormat},
    band::{classify, AirQualityBand},
    config::PredictorConfig,
    error::{LoadError, PredictionError},
    features::FeatureRecord,
    predictor::Predictor,
};

/// The outcome of a single predict-classify cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub value: f32,
    pub band: AirQualityBand,
}

impl PredictionResult {
    /// The predicted value rounded to two decimals.
    pub fn formatted_value(&self) -> String {
        format!("{:.2}", self.value)
    }
}

impl Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Predicted Ozone (ppb): {:.2}", self.value)
    }
}

/// Owns a loaded model for the lifetime of the process and answers prediction requests.
///
/// A `PredictorService` can't exist without a model, so every `PredictionResult` comes from one.
pub struct PredictorService {
    model: Box<dyn Predictor>,
    source: PathBuf,
}

impl PredictorService {
    /// Loads the artifact at `path` with the given format.
    ///
    /// # Arguments
    /// * `path` - Where the artifact lives.
    /// * `format` - The decoder for the artifact's bytes.
    ///
    /// # Errors
    /// Returns `LoadError::ModelNotFound` if there is no file at `path`, or
    /// `LoadError::ModelLoad` if it can't be read or decoded.
    pub fn load<P, F>(path: P, format: &F) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
        F: ModelFormat + ?Sized,
    {
        let path = path.as_ref();
        info!("loading {} model from {}", format.name(), path.display());

        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::ModelNotFound {
                path: path.to_path_buf(),
            },
            _ => LoadError::ModelLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        let model = format.decode(&bytes).map_err(|reason| LoadError::ModelLoad {
            path: path.to_path_buf(),
            reason,
        })?;

        info!("model loaded ({} bytes)", bytes.len());
        Ok(Self {
            model,
            source: path.to_path_buf(),
        })
    }

    /// Wraps an already built model.
    pub fn from_predictor<P>(model: P, source: impl Into<PathBuf>) -> Self
    where
        P: Predictor + 'static,
    {
        Self {
            model: Box::new(model),
            source: source.into(),
        }
    }

    /// Where the model came from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Runs the model over a single record.
    ///
    /// # Errors
    /// Returns a `PredictionError` if the model fails or yields a non-finite value. The service
    /// remains usable afterwards.
    pub fn predict(&self, record: &FeatureRecord) -> Result<f32, PredictionError> {
        let value = self.model.predict(record).inspect_err(|e| warn!("{e}"))?;

        if !value.is_finite() {
            let e = PredictionError::NonFinite { value };
            warn!("{e}");
            return Err(e);
        }

        Ok(value)
    }

    /// Predicts and classifies a single record.
    ///
    /// # Errors
    /// Returns a `PredictionError` under the same conditions as [`PredictorService::predict`].
    pub fn evaluate(&self, record: &FeatureRecord) -> Result<PredictionResult, PredictionError> {
        let value = self.predict(record)?;
        let band = classify(value);
        info!(
            "prediction for {:?}: {value:.2} ppb ({})",
            record.to_row(),
            band.label()
        );

        Ok(PredictionResult { value, band })
    }
}

/// What the process ends up with after trying to bring the service up.
pub enum ServiceState {
    Ready(PredictorService),
    /// Loading failed, no predictions are offered for the rest of the process.
    Disabled(LoadError),
}

impl ServiceState {
    /// Loads the configured artifact as JSON. Never fails: a load error disables the service.
    pub fn start(config: &PredictorConfig) -> Self {
        Self::start_with(config, &JsonFormat)
    }

    /// Same as [`ServiceState::start`], decoding with the given format.
    pub fn start_with<F>(config: &PredictorConfig, format: &F) -> Self
    where
        F: ModelFormat + ?Sized,
    {
        match PredictorService::load(&config.model_path, format) {
            Ok(service) => Self::Ready(service),
            Err(e) => {
                error!(
                    "{e} ({}), predictions are disabled",
                    config.model_path.display()
                );
                Self::Disabled(e)
            }
        }
    }

    pub fn service(&self) -> Option<&PredictorService> {
        match self {
            Self::Ready(service) => Some(service),
            Self::Disabled(_) => None,
        }
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        match self {
            Self::Ready(_) => None,
            Self::Disabled(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f32);

    impl Predictor for Constant {
        fn predict(&self, _record: &FeatureRecord) -> Result<f32, PredictionError> {
            Ok(self.0)
        }
    }

    fn record() -> FeatureRecord {
        FeatureRecord::new(200.0, 7.0, 77.0, 7).unwrap()
    }

    #[test]
    fn evaluate_classifies_the_prediction() {
        let service = PredictorService::from_predictor(Constant(42.0), "mem");
        let result = service.evaluate(&record()).unwrap();

        assert_eq!(result.band, AirQualityBand::Good);
        assert_eq!(result.formatted_value(), "42.00");
        assert_eq!(result.to_string(), "Predicted Ozone (ppb): 42.00");
    }

    #[test]
    fn non_finite_output_is_a_prediction_error() {
        let service = PredictorService::from_predictor(Constant(f32::NAN), "mem");
        assert!(matches!(
            service.predict(&record()),
            Err(PredictionError::NonFinite { .. })
        ));
    }

    #[test]
    fn formatted_value_rounds_to_two_decimals() {
        let result = PredictionResult {
            value: 99.996,
            band: classify(99.996),
        };

        assert_eq!(result.formatted_value(), "100.00");
        assert_eq!(result.band, AirQualityBand::Moderate);
    }
}
