use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Bottom row: controller errors in red, transient notices otherwise,
/// key help when there is nothing to report.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
    let (message, style) = match (app.controller.status(), app.notice.as_deref()) {
        (Some(status), _) => (status.to_string(), Style::default().fg(Color::Red)),
        (None, Some(notice)) => (notice.to_string(), Style::default().fg(Color::DarkGray)),
        (None, None) => (
            "up/down: move  enter: select  t: threshold  r: refresh  q: quit".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    f.render_widget(Paragraph::new(format!(" {} ", message)).style(style), area);
}
