use crate::{error::PredictionError, features::FeatureRecord};

/// Anything able to turn a feature record into an ozone estimate.
///
/// Implementations are read-only once built, so a single instance can be shared across threads.
pub trait Predictor: Send + Sync {
    /// Estimates the ozone concentration (ppb) for the given record.
    ///
    /// # Errors
    /// Returns a `PredictionError` if the model rejects the input or fails internally.
    fn predict(&self, record: &FeatureRecord) -> Result<f32, PredictionError>;
}
