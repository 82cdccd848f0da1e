use crossterm::event::KeyCode;
use ozone_predictor::LoadError;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::Action;
use crate::ui::{layout::centered_rect, theme::Theme, widgets};

/// Shown for the whole session when the model could not be loaded.
pub struct UnavailableState {
    pub reason: String,
    pub notice: Option<String>,
}

impl UnavailableState {
    pub fn new(error: &LoadError, notice: Option<String>) -> Self {
        Self {
            reason: error.to_string(),
            notice,
        }
    }
}

pub fn handle_key(key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => Action::Quit,
        _ => Action::None,
    }
}

pub fn draw(f: &mut Frame, state: &UnavailableState) {
    let area = f.size();
    f.render_widget(Block::default().style(Theme::base()), area);

    let outer = centered_rect(60, 60, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(1), // subtitle
            Constraint::Length(1), // spacer
            Constraint::Min(4),    // reason box
            Constraint::Length(1), // spacer
            Constraint::Length(1), // hints
        ])
        .split(outer);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Model Unavailable",
            Theme::error().add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    f.render_widget(
        Paragraph::new(Span::styled(
            "Predictions are disabled for this session.",
            Theme::muted(),
        )),
        chunks[1],
    );

    let mut lines = vec![Line::from(state.reason.as_str())];
    if let Some(notice) = &state.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(notice.as_str(), Theme::warn())));
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::error())
                    .title(" Reason ")
                    .title_style(Theme::error()),
            )
            .style(Theme::text())
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        chunks[3],
    );

    f.render_widget(widgets::hints(&[("q / esc", "quit")]), chunks[5]);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn rendered(state: &UnavailableState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.get(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn carries_the_load_error_message() {
        let state = UnavailableState::new(
            &LoadError::ModelNotFound {
                path: PathBuf::from("rf_ozone_model.json"),
            },
            None,
        );

        assert_eq!(state.reason, "Model file not found at rf_ozone_model.json");
        assert!(matches!(handle_key(KeyCode::Char('q')), Action::Quit));
        assert!(matches!(handle_key(KeyCode::Char('p')), Action::None));
    }

    #[test]
    fn renders_reason_and_notice() {
        let state = UnavailableState::new(
            &LoadError::ModelNotFound {
                path: PathBuf::from("rf_ozone_model.json"),
            },
            Some("using built-in form defaults".into()),
        );

        let screen = rendered(&state);

        assert!(screen.contains("Model Unavailable"), "{screen}");
        assert!(
            screen.contains("Model file not found at rf_ozone_model.json"),
            "{screen}"
        );
        assert!(screen.contains("using built-in form defaults"), "{screen}");
    }

    #[test]
    fn notice_is_optional() {
        let state = UnavailableState::new(
            &LoadError::ModelLoad {
                path: PathBuf::from("rf_ozone_model.json"),
                reason: "invalid artifact".into(),
            },
            None,
        );

        let screen = rendered(&state);

        assert!(screen.contains("Error loading model: invalid artifact"), "{screen}");
        assert!(!screen.contains("defaults"), "{screen}");
    }
}
