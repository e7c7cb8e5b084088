use crate::config::hotkeys::{get_action_for_mode, HotkeyAction, Mode};
use crate::drag::DragSession;
use crate::state::{FormField, State};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            loop {
                match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if tx_clone.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Failed to read terminal event: {}", e);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        error!("Failed to poll terminal events: {}", e);
                        break;
                    }
                }
                if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(state, key)),
            Event::Tick => {
                state.tick();
                Ok(true)
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

/// Apply one key press to the state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }

    let mode = state.mode();
    let action = get_action_for_mode(&key, mode, state.hotkeys());
    trace!("Key {:?} in {:?} mode maps to {:?}", key.code, mode, action);

    match mode {
        Mode::Board => match action {
            Some(HotkeyAction::Quit) => {
                debug!("Processing exit terminal event '{:?}'...", key);
                return false;
            }
            Some(action) => board_action(state, action),
            None => match key.code {
                KeyCode::Down => {
                    state.next_task();
                }
                KeyCode::Up => {
                    state.previous_task();
                }
                KeyCode::Left => {
                    state.previous_lane();
                }
                KeyCode::Right => {
                    state.next_lane();
                }
                KeyCode::Enter => {
                    state.open_edit_form();
                }
                _ => {}
            },
        },
        Mode::Search => match action {
            Some(HotkeyAction::SearchModeExit) => {
                state.exit_search_mode();
            }
            Some(HotkeyAction::Cancel) => {
                state.cancel_search();
            }
            _ => match key.code {
                KeyCode::Char(c) => {
                    state.add_search_char(c);
                }
                KeyCode::Backspace => {
                    state.remove_search_char();
                }
                _ => {}
            },
        },
        Mode::Drag => {
            let step: Option<fn(&mut DragSession)> = match (action, key.code) {
                (Some(HotkeyAction::NavigateNext), _) | (None, KeyCode::Down) => {
                    Some(DragSession::move_down)
                }
                (Some(HotkeyAction::NavigatePrev), _) | (None, KeyCode::Up) => {
                    Some(DragSession::move_up)
                }
                (Some(HotkeyAction::NavigateLeft), _) | (None, KeyCode::Left) => {
                    Some(DragSession::move_left)
                }
                (Some(HotkeyAction::NavigateRight), _) | (None, KeyCode::Right) => {
                    Some(DragSession::move_right)
                }
                _ => None,
            };
            match (step, action) {
                (Some(step), _) => {
                    state.move_drag(step);
                }
                (None, Some(HotkeyAction::DropTask)) => {
                    state.drop_task();
                }
                (None, Some(HotkeyAction::Cancel)) => {
                    state.cancel_drag();
                }
                _ => {}
            }
        }
        Mode::Confirmation => match (action, key.code) {
            (Some(HotkeyAction::Confirm), _) | (None, KeyCode::Char('y')) => {
                state.confirm_pending();
            }
            (Some(HotkeyAction::Cancel), _) | (None, KeyCode::Char('n')) => {
                state.cancel_pending();
            }
            _ => {}
        },
        Mode::TaskForm => form_key(state, action, key),
    }
    true
}

fn board_action(state: &mut State, action: HotkeyAction) {
    match action {
        HotkeyAction::NavigateNext => {
            state.next_task();
        }
        HotkeyAction::NavigatePrev => {
            state.previous_task();
        }
        HotkeyAction::NavigateLeft => {
            state.previous_lane();
        }
        HotkeyAction::NavigateRight => {
            state.next_lane();
        }
        HotkeyAction::CreateTask => {
            state.open_create_form();
        }
        HotkeyAction::EditTask => {
            state.open_edit_form();
        }
        HotkeyAction::DeleteTask => {
            state.request_delete();
        }
        HotkeyAction::ClearCompleted => {
            state.request_clear_completed();
        }
        HotkeyAction::MoveTask => {
            state.start_drag();
        }
        HotkeyAction::EnterSearch => {
            state.enter_search_mode();
        }
        HotkeyAction::CyclePriority => {
            state.cycle_priority_filter();
        }
        HotkeyAction::ResetFilter => {
            state.reset_filter();
        }
        HotkeyAction::CycleTheme => {
            state.cycle_theme();
        }
        HotkeyAction::ToggleLog => {
            state.toggle_log();
        }
        _ => {}
    }
}

fn form_key(state: &mut State, action: Option<HotkeyAction>, key: KeyEvent) {
    let on_description = state
        .form()
        .map(|f| f.field() == FormField::Description)
        .unwrap_or(false);
    match action {
        Some(HotkeyAction::SubmitForm) => {
            state.submit_form();
        }
        Some(HotkeyAction::Cancel) => {
            state.close_form();
        }
        Some(HotkeyAction::NextField) => {
            if let Some(form) = state.form_mut() {
                form.next_field();
            }
        }
        Some(HotkeyAction::PrevField) => {
            if let Some(form) = state.form_mut() {
                form.previous_field();
            }
        }
        // Enter submits from single line fields and breaks lines in the
        // description.
        _ if key.code == KeyCode::Enter && !on_description => {
            state.submit_form();
        }
        _ => {
            if let Some(form) = state.form_mut() {
                form.input(key);
            }
        }
    }
}
