use super::modal::centered_rect;
use super::Frame;
use crate::state::{FormField, State, TaskForm, View};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Render the create/edit task form as a modal over the board.
///
pub fn form(frame: &mut Frame, size: Rect, form: &TaskForm, state: &State) {
    let theme = state.theme();
    let popup_area = centered_rect(70, 80, size);
    frame.render_widget(Clear, popup_area);

    let title = match (state.current_view(), form.editing()) {
        (View::EditTask, Some(id)) => format!(" Edit {} ", id),
        _ => " New Task ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, styling::active_block_title_style()))
        .border_style(styling::active_block_border_style(theme));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    line_field(frame, chunks[0], state, form, FormField::Title, form.title());

    let mut description = form.description().clone();
    description.set_block(field_block(state, form, FormField::Description));
    description.set_cursor_line_style(Style::default());
    if form.field() != FormField::Description {
        description.set_cursor_style(Style::default());
    }
    frame.render_widget(description.widget(), chunks[1]);

    line_field(
        frame,
        chunks[2],
        state,
        form,
        FormField::Priority,
        &format!("< {} >", form.priority()),
    );
    line_field(frame, chunks[3], state, form, FormField::Tags, form.tags());
    line_field(frame, chunks[4], state, form, FormField::Due, form.due());

    if let Some(error) = form.error() {
        let message = Paragraph::new(Line::from(Span::styled(
            format!(" {}", error),
            Style::default()
                .fg(theme.error.to_color())
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(message, chunks[5]);
    }
}

fn field_block<'a>(state: &State, form: &TaskForm, field: FormField) -> Block<'a> {
    let theme = state.theme();
    let focused = form.field() == field;
    Block::default()
        .borders(Borders::ALL)
        .title(field.label())
        .border_style(if focused {
            styling::active_block_border_style(theme)
        } else {
            styling::normal_block_border_style(theme)
        })
}

fn line_field(
    frame: &mut Frame,
    size: Rect,
    state: &State,
    form: &TaskForm,
    field: FormField,
    value: &str,
) {
    let cursor = if form.field() == field && field != FormField::Priority {
        "_"
    } else {
        ""
    };
    let text = Paragraph::new(Line::from(vec![
        Span::styled(value.to_string(), styling::normal_text_style(state.theme())),
        Span::raw(cursor),
    ]))
    .block(field_block(state, form, field));
    frame.render_widget(text, size);
}
