use ozone_predictor::FEATURE_NAMES;
use ratatui::{
    layout::{Alignment, Constraint},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use crate::state::form::{Field, FormState, Outcome, Spinner};
use crate::ui::theme::Theme;

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(format!(" {title} "))
        .title_style(Theme::title())
}

pub fn header<'a>() -> Paragraph<'a> {
    let lines = vec![
        Line::from(Span::styled(
            "Ozone Level Predictor (AirQuality Dataset)",
            Theme::title(),
        )),
        Line::from(Span::styled(
            "Enter feature values to predict Ozone concentration (ppb).",
            Theme::dim(),
        )),
    ];

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Theme::border()))
        .alignment(Alignment::Center)
}

pub fn inputs(form: &FormState) -> Paragraph<'_> {
    let mut lines = Vec::new();

    for (field, spinner) in [
        (Field::SolarRadiation, &form.solar_radiation),
        (Field::WindSpeed, &form.wind_speed),
        (Field::Temperature, &form.temperature),
    ] {
        lines.push(Line::from(Span::styled(spinner.label, Theme::dim())));
        lines.push(spinner_line(spinner, form.focus == field));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled("Month", Theme::dim())));
    lines.push(Line::from(Span::styled(
        format!(" ◀ {} ▶ ", form.month),
        focus_style(form.focus == Field::Month),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "[ Predict Ozone ]",
        focus_style(form.focus == Field::Predict),
    )));

    Paragraph::new(lines).block(panel("Input Features"))
}

fn spinner_line(spinner: &Spinner, focused: bool) -> Line<'_> {
    let mut spans = vec![Span::styled(
        format!(" - {} + ", spinner.display()),
        focus_style(focused),
    )];

    if spinner.is_editing() {
        spans.push(Span::styled("█", Theme::accent_cyan()));
    }

    Line::from(spans)
}

fn focus_style(focused: bool) -> ratatui::style::Style {
    if focused {
        Theme::focused()
    } else {
        Theme::text()
    }
}

pub fn input_table(form: &FormState) -> Table<'_> {
    let values = [
        form.solar_radiation.display(),
        form.wind_speed.display(),
        form.temperature.display(),
        form.month.to_string(),
    ];

    let rows = FEATURE_NAMES.iter().zip(values).map(|(name, value)| {
        Row::new(vec![
            Cell::from(*name).style(Theme::dim()),
            Cell::from(value).style(Theme::text()),
        ])
    });

    Table::new(rows, [Constraint::Length(10), Constraint::Min(8)])
        .header(Row::new(vec!["Feature", "Value"]).style(Theme::title()))
        .block(panel("Input Values"))
}

pub fn result(form: &FormState) -> Paragraph<'_> {
    let mut lines = match &form.outcome {
        None => vec![Line::from(Span::styled(
            "Press enter on Predict Ozone to run the model.",
            Theme::muted(),
        ))],
        Some(Outcome::Predicted(result)) => vec![
            Line::from(Span::styled(result.to_string(), Theme::success())),
            Line::from(""),
            Line::from(Span::styled(
                result.band.to_string(),
                Theme::severity(result.band.severity()),
            )),
        ],
        Some(Outcome::Failed(msg)) => {
            vec![Line::from(Span::styled(msg.as_str(), Theme::error()))]
        }
    };

    if let Some(notice) = &form.notice {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(notice.as_str(), Theme::warn())));
    }

    Paragraph::new(lines)
        .block(panel("Prediction"))
        .wrap(Wrap { trim: true })
}

pub fn hints<'a>(hints: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let spans = hints
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, Theme::dim()),
                Span::styled(format!("  {action}    "), Theme::muted()),
            ]
        })
        .collect::<Vec<_>>();

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
