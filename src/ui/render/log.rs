use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

/// Render the newest log entries that fit the panel.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    let rows = size.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .logs()
        .tail(rows)
        .into_iter()
        .map(|entry| {
            let style = if entry.contains(" ERROR ") {
                Style::default().fg(theme.error.to_color())
            } else if entry.contains(" WARN ") {
                Style::default().fg(theme.warning.to_color())
            } else {
                styling::muted_text_style(theme)
            };
            ListItem::new(Line::from(Span::styled(entry, style)))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), size);
}
