use anyhow::Result;
use log::warn;
use ozone_predictor::{config::DEFAULT_CONFIG_PATH, PredictorConfig, ServiceState};

mod app;
mod state;
mod ui;

fn main() -> Result<()> {
    env_logger::init();

    let (config, config_error) = match PredictorConfig::load_or_default(DEFAULT_CONFIG_PATH) {
        Ok(config) => (config, None),
        Err(e) => {
            warn!("{e}, falling back to defaults");
            (PredictorConfig::default(), Some(e))
        }
    };

    let services = ServiceState::start(&config);
    app::run::run(&services, &config, config_error)
}
