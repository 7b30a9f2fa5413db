use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

pub mod chart_view;
pub mod series_list;
pub mod status_line;
pub mod threshold_field;

/// Fixed panel layout: the series selector on the left, threshold
/// field and chart stacked on the right, one status row at the bottom.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(1)])
        .split(chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(main[1]);

    series_list::draw(f, main[0], app);
    threshold_field::draw(f, right[0], app);
    chart_view::draw(f, right[1], app);
    status_line::draw(f, chunks[1], app);
}
