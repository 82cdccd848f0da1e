use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, ValidationError},
    features::{FeatureRecord, Month},
};

/// Where the trained model is read from unless configured otherwise.
pub const DEFAULT_MODEL_PATH: &str = "rf_ozone_model.json";
/// The configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "predictor.json";

/// Initial values shown by the input form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub solar_radiation: f32,
    pub wind_speed: f32,
    pub temperature: f32,
    pub month: Month,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            solar_radiation: 200.0,
            wind_speed: 7.0,
            temperature: 77.0,
            month: Month::July,
        }
    }
}

impl FormDefaults {
    /// Builds the record the form starts with.
    ///
    /// # Errors
    /// Returns a `ValidationError` if any default is out of range.
    pub fn record(&self) -> Result<FeatureRecord, ValidationError> {
        FeatureRecord::new(
            self.solar_radiation,
            self.wind_speed,
            self.temperature,
            self.month.number(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub model_path: PathBuf,
    pub form: FormDefaults,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            form: FormDefaults::default(),
        }
    }
}

impl PredictorConfig {
    /// Loads the configuration at `path`, falling back to the defaults when there is no file.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the file exists but can't be read, parsed, or holds out of range
    /// form defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.form.record()?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }
}
