use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

/// The catalog selector. The reversed row is the cursor; the starred
/// row is the series whose chart is showing.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
    let selected_id = app.controller.selected().map(|d| d.series_id.as_str());
    let items: Vec<ListItem> = app
        .controller
        .catalog()
        .iter()
        .enumerate()
        .map(|(i, descriptor)| {
            let marker = if Some(descriptor.series_id.as_str()) == selected_id {
                "* "
            } else {
                "  "
            };
            let mut item = ListItem::new(format!("{}{}", marker, descriptor.display_name));
            if i == app.selector_index {
                item = item.style(Style::default().add_modifier(Modifier::REVERSED));
            }
            item
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Series "));
    f.render_widget(list, area);
}
