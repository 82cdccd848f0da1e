pub mod artifact;
pub mod band;
pub mod config;
pub mod error;
pub mod features;
mod predictor;
mod service;

pub use band::{classify, AirQualityBand, Severity};
pub use config::{FormDefaults, PredictorConfig};
pub use error::{ConfigError, LoadError, PredictionError, ValidationError};
pub use features::{FeatureRecord, Month, FEATURE_NAMES};
pub use predictor::Predictor;
pub use service::{PredictionResult, PredictorService, ServiceState};
