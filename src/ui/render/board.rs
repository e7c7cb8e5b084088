use super::Frame;
use crate::board::{Lane, Task};
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Render the three lanes side by side.
///
pub fn board(frame: &mut Frame, size: Rect, state: &State) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(size);

    for (lane, area) in Lane::ALL.into_iter().zip(chunks.iter()) {
        let tasks = lane_tasks(state, lane);
        render_lane(frame, *area, state, lane, &tasks);
    }
}

/// Tasks shown in a lane. While dragging this is the hovered layout rather
/// than the stored order.
///
fn lane_tasks(state: &State, lane: Lane) -> Vec<&Task> {
    match state.drag() {
        Some(drag) => drag
            .layout()
            .lane(lane)
            .iter()
            .filter_map(|id| state.board().get(id))
            .collect(),
        None => state.view().visible.lane(lane).to_vec(),
    }
}

fn render_lane(frame: &mut Frame, size: Rect, state: &State, lane: Lane, tasks: &[&Task]) {
    let theme = state.theme();
    let is_current = state.current_lane() == lane;
    let title = Line::from(vec![
        Span::styled(format!(" {} ", lane.label()), styling::lane_title_style(theme, lane)),
        Span::styled(
            format!("({}) ", tasks.len()),
            styling::muted_text_style(theme),
        ),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if is_current {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        });

    if tasks.is_empty() {
        let text = if state.selection().is_active() {
            "No matching tasks"
        } else {
            "No tasks"
        };
        let empty = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .style(styling::muted_text_style(theme));
        frame.render_widget(empty, size);
        return;
    }

    let dragged = state.drag().map(|d| d.task_id());
    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| card(state, task, dragged == Some(task.id.as_str())))
        .collect();

    let highlight = if state.drag().is_some() {
        Style::default()
    } else {
        styling::current_card_style(theme)
    };
    let list = List::new(items).block(block).highlight_style(highlight);

    let mut list_state = ListState::default();
    if is_current {
        list_state.select(Some(state.cursor()));
    }
    frame.render_stateful_widget(list, size, &mut list_state);
}

fn card<'a>(state: &State, task: &'a Task, dragged: bool) -> ListItem<'a> {
    let theme = state.theme();
    let title_style = if dragged {
        styling::dragged_card_style(theme)
    } else {
        styling::normal_text_style(theme)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("[{}] ", task.priority.as_str().to_uppercase()),
            styling::priority_style(theme, task.priority),
        ),
        Span::styled(task.title.as_str(), title_style),
    ])];

    if let Some(description) = task.description.as_deref().and_then(|d| d.lines().next()) {
        lines.push(Line::from(Span::styled(
            format!("  {}", description),
            styling::muted_text_style(theme),
        )));
    }

    let mut meta = vec![Span::styled(
        format!("  {}", task.id),
        styling::muted_text_style(theme),
    )];
    for tag in &task.tags {
        meta.push(Span::styled(
            format!(" #{}", tag),
            Style::default().fg(theme.accent.to_color()),
        ));
    }
    if let Some(due) = &task.due {
        meta.push(Span::styled(
            format!(" due {}", due),
            Style::default().fg(theme.warning.to_color()),
        ));
    }
    lines.push(Line::from(meta));
    lines.push(Line::from(""));

    ListItem::new(lines)
}
