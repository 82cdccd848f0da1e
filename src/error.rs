use std::{
    error::Error,
    fmt::{self, Display},
    io,
    path::PathBuf,
};

/// Errors raised while bringing the predictor service up. Either one leaves the service disabled.
#[derive(Debug)]
pub enum LoadError {
    /// There is no artifact at the configured path.
    ModelNotFound { path: PathBuf },
    /// The artifact exists but could not be read or decoded into a model.
    ModelLoad { path: PathBuf, reason: String },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelNotFound { path } => {
                write!(f, "Model file not found at {}", path.display())
            }
            Self::ModelLoad { reason, .. } => write!(f, "Error loading model: {reason}"),
        }
    }
}

impl Error for LoadError {}

/// A single inference call failed. The service stays usable after any of these.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionError {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    NonFinite {
        value: f32,
    },
    Model(String),
}

impl Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SizeMismatch {
                what,
                got,
                expected,
            } => format!("size mismatch in {what}, got {got} and expected {expected}"),
            Self::NonFinite { value } => {
                format!("the model produced a non-finite value ({value})")
            }
            Self::Model(msg) => msg.clone(),
        };

        write!(f, "Error making prediction: {s}")
    }
}

impl Error for PredictionError {}

/// A feature record could not be built from the given values.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Negative { field: &'static str, value: f32 },
    NonFinite { field: &'static str },
    Month { got: u8 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::NonFinite { field } => write!(f, "{field} must be a finite number"),
            Self::Month { got } => write!(f, "month must be one of 5, 6, 7, 8 or 9, got {got}"),
        }
    }
}

impl Error for ValidationError {}

/// The configuration file exists but can't be used.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid(ValidationError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read '{}': {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "invalid config '{}': {source}", path.display())
            }
            Self::Invalid(e) => write!(f, "invalid form defaults: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<ValidationError> for ConfigError {
    fn from(e: ValidationError) -> Self {
        Self::Invalid(e)
    }
}
