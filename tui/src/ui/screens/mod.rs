pub mod form;
pub mod unavailable;

use crossterm::event::KeyCode;
use ozone_predictor::{PredictorConfig, PredictorService, ServiceState};
use ratatui::Frame;

use crate::state::form::FormState;

pub enum Action {
    None,
    Quit,
}

pub enum Screen {
    Form(FormState),
    Unavailable(unavailable::UnavailableState),
}

impl Screen {
    /// Picks the first screen: the form when the model loaded, the error screen otherwise.
    pub fn start(services: &ServiceState, config: &PredictorConfig, notice: Option<String>) -> Self {
        match services.load_error() {
            None => {
                let mut state = FormState::new(&config.form);
                state.notice = notice;
                Screen::Form(state)
            }
            Some(e) => Screen::Unavailable(unavailable::UnavailableState::new(e, notice)),
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        match self {
            Screen::Form(s) => form::draw(f, s),
            Screen::Unavailable(s) => unavailable::draw(f, s),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, service: Option<&PredictorService>) -> Action {
        match self {
            Screen::Form(s) => form::handle_key(s, key, service),
            Screen::Unavailable(_) => unavailable::handle_key(key),
        }
    }
}
