use crossterm::event::KeyCode;
use log::error;
use ozone_predictor::PredictorService;
use ratatui::{widgets::Block, Frame};

use super::Action;
use crate::state::form::{Field, FormState, Outcome};
use crate::ui::{layout, theme::Theme, widgets};

const HINTS: &[(&str, &str)] = &[
    ("↑↓ / tab", "field"),
    ("←→ / + -", "adjust"),
    ("0-9 .", "type"),
    ("enter / p", "predict"),
    ("q / esc", "quit"),
];

pub fn handle_key(
    state: &mut FormState,
    key: KeyCode,
    service: Option<&PredictorService>,
) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => state.focus_prev(),
        KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => state.focus_next(),
        KeyCode::Left | KeyCode::Char('-') => state.decrement(),
        KeyCode::Right | KeyCode::Char('+') => state.increment(),
        KeyCode::Backspace => state.backspace(),
        KeyCode::Char('p') => submit(state, service),
        KeyCode::Enter if state.focus == Field::Predict => submit(state, service),
        KeyCode::Enter => state.focus_next(),
        KeyCode::Char(c) => state.type_char(c),
        _ => {}
    }

    Action::None
}

fn submit(state: &mut FormState, service: Option<&PredictorService>) {
    match service {
        Some(service) => state.submit(service),
        None => {
            error!("prediction requested without a loaded model");
            state.outcome = Some(Outcome::Failed("Predictions are disabled".into()));
        }
    }
}

pub fn draw(f: &mut Frame, state: &FormState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let areas = layout::form(area);
    f.render_widget(widgets::header(), areas.header);
    f.render_widget(widgets::inputs(state), areas.inputs);
    f.render_widget(widgets::input_table(state), areas.table);
    f.render_widget(widgets::result(state), areas.result);
    f.render_widget(widgets::hints(HINTS), areas.hints);
}
