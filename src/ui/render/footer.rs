use super::Frame;
use crate::config::hotkeys::{build_footer_text, HotkeyAction, Mode};
use crate::state::State;
use crate::ui::theme::ColorSpec;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Format the controls line for the current input mode.
///
fn controls_text(mode: Mode, state: &State) -> String {
    let hotkeys = state.hotkeys().for_mode(mode);
    match mode {
        Mode::Board => build_footer_text(
            hotkeys,
            &[
                (
                    HotkeyAction::NavigateNext,
                    "tasks",
                    Some(HotkeyAction::NavigatePrev),
                ),
                (
                    HotkeyAction::NavigateLeft,
                    "lanes",
                    Some(HotkeyAction::NavigateRight),
                ),
                (HotkeyAction::CreateTask, "new", None),
                (HotkeyAction::EditTask, "edit", None),
                (HotkeyAction::DeleteTask, "delete", None),
                (HotkeyAction::MoveTask, "move", None),
                (HotkeyAction::EnterSearch, "search", None),
                (HotkeyAction::CyclePriority, "priority", None),
                (HotkeyAction::ResetFilter, "reset", None),
                (HotkeyAction::ClearCompleted, "clear done", None),
                (HotkeyAction::CycleTheme, "theme", None),
                (HotkeyAction::ToggleLog, "log", None),
                (HotkeyAction::Quit, "quit", None),
            ],
        ),
        Mode::Search => format!(
            " Type to search,{}",
            build_footer_text(
                hotkeys,
                &[
                    (HotkeyAction::SearchModeExit, "apply", None),
                    (HotkeyAction::Cancel, "clear", None),
                ]
            )
        ),
        Mode::Drag => build_footer_text(
            hotkeys,
            &[
                (
                    HotkeyAction::NavigateNext,
                    "position",
                    Some(HotkeyAction::NavigatePrev),
                ),
                (
                    HotkeyAction::NavigateLeft,
                    "lane",
                    Some(HotkeyAction::NavigateRight),
                ),
                (HotkeyAction::DropTask, "drop", None),
                (HotkeyAction::Cancel, "cancel", None),
            ],
        ),
        Mode::Confirmation => build_footer_text(
            hotkeys,
            &[
                (HotkeyAction::Confirm, "confirm", None),
                (HotkeyAction::Cancel, "cancel", None),
            ],
        ),
        Mode::TaskForm => build_footer_text(
            hotkeys,
            &[
                (
                    HotkeyAction::NextField,
                    "fields",
                    Some(HotkeyAction::PrevField),
                ),
                (HotkeyAction::SubmitForm, "save", None),
                (HotkeyAction::Cancel, "cancel", None),
            ],
        ),
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.theme();
    let mode = state.mode();
    let (label, color): (&str, ColorSpec) = match mode {
        Mode::Board => ("BOARD", theme.primary),
        Mode::Search => ("SEARCH", theme.footer_search),
        Mode::Drag => ("MOVE", theme.footer_drag),
        Mode::Confirmation => ("CONFIRM", theme.footer_confirm),
        Mode::TaskForm => ("FORM", theme.footer_form),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(theme.footer_normal.to_color())
                .bg(color.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            controls_text(mode, state),
            Style::default().fg(theme.text_muted.to_color()),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fixtures::seeded_board;
    use crate::config::Config;
    use crate::logger::LogBuffer;

    #[test]
    fn test_controls_follow_mode() {
        let (board, _slot) = seeded_board();
        let mut state = State::new(board, Config::new(), LogBuffer::new());
        assert!(controls_text(Mode::Board, &state).contains("m: move"));

        state.start_drag();
        let text = controls_text(state.mode(), &state);
        assert!(text.contains("Enter: drop"));
        assert!(text.contains("h/l: lane"));
    }
}
