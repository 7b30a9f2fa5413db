use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// The numeric threshold field: shows the effective threshold for the
/// selected series, or the edit buffer while the operator is typing.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.controller.selected() {
        Some(descriptor) => format!(" Set Threshold for {} ", descriptor.display_name),
        None => " Threshold ".to_string(),
    };
    let (content, style) = if app.editing {
        (
            format!("{}_", app.threshold_input),
            Style::default().fg(Color::Yellow),
        )
    } else {
        let shown = app
            .controller
            .threshold_shown()
            .map(|value| value.to_string())
            .unwrap_or_default();
        (shown, Style::default().fg(Color::Cyan))
    };
    let field = Paragraph::new(content)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(field, area);
}
