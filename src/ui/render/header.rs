use super::Frame;
use crate::board::PrioritySelector;
use crate::state::{NotificationLevel, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the banner, board statistics and active filter.
///
pub fn header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let stats = state.board().stats();
    let mut left = vec![
        Span::styled(" TASKBOARD ", styling::banner_style(theme)),
        Span::styled(
            format!(
                " {} total, {} pending, {} completed",
                stats.total, stats.pending, stats.done
            ),
            styling::normal_text_style(theme),
        ),
    ];
    if state.board().has_unsaved_changes() {
        left.push(Span::styled(
            "  [unsaved]",
            Style::default()
                .fg(theme.error.to_color())
                .add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(left)), chunks[0]);

    let right = match state.notification() {
        Some(notification) => {
            let color = match notification.level {
                NotificationLevel::Info => theme.success,
                NotificationLevel::Error => theme.error,
            };
            Line::from(Span::styled(
                notification.message.clone(),
                Style::default().fg(color.to_color()),
            ))
        }
        None => filter_summary(state),
    };
    frame.render_widget(
        Paragraph::new(right).alignment(Alignment::Right),
        chunks[1],
    );
}

fn filter_summary(state: &State) -> Line<'static> {
    let theme = state.theme();
    let selection = state.selection();
    if !selection.is_active() && !state.is_search_mode() {
        return Line::from("");
    }

    let mut spans = vec![];
    if !selection.search.is_empty() || state.is_search_mode() {
        let cursor = if state.is_search_mode() { "_" } else { "" };
        spans.push(Span::styled(
            format!("search: {}{} ", selection.search, cursor),
            Style::default().fg(theme.info.to_color()),
        ));
    }
    if selection.priority != PrioritySelector::All {
        spans.push(Span::styled(
            format!("priority: {} ", selection.priority),
            Style::default().fg(theme.warning.to_color()),
        ));
    }
    Line::from(spans)
}
