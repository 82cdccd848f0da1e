use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The regions of the predictor form.
pub struct FormAreas {
    pub header: Rect,
    pub inputs: Rect,
    pub table: Rect,
    pub result: Rect,
    pub hints: Rect,
}

/// Computes the form layout: a header on top, the controls on the left, the input table and the
/// result on the right, and a hint line at the bottom.
pub fn form(area: Rect) -> FormAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(1),
        ])
        .split(area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(4)])
        .split(cols[1]);

    FormAreas {
        header: rows[0],
        inputs: cols[0],
        table: right[0],
        result: right[1],
        hints: rows[2],
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
