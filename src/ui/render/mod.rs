mod board;
mod footer;
mod form;
mod header;
mod log;
mod modal;

use super::*;
use crate::state::State;
use ratatui::layout::{Constraint, Direction, Layout};

/// Render the whole screen: header, lanes, optional log panel and footer,
/// with the form or confirmation dialog on top.
///
pub fn render(frame: &mut Frame, state: &State) {
    let size = frame.size();
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(6)];
    if state.is_log_open() {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    header::header(frame, chunks[0], state);
    board::board(frame, chunks[1], state);
    if state.is_log_open() {
        log::log(frame, chunks[2], state);
    }
    footer::footer(frame, chunks[chunks.len() - 1], state);

    if let Some(form) = state.form() {
        form::form(frame, size, form, state);
    }
    if let Some(pending) = state.pending_confirmation() {
        modal::confirmation(frame, size, pending, state);
    }
}
