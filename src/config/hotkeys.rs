//! Hotkey configuration management.
//!
//! This module defines the hotkey system for the board, including action
//! types, key bindings written as plain strings (`"j"`, `"ctrl+s"`, `"enter"`),
//! and the default bindings per input mode.

use super::ConfigError;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Represents all possible actions that can be bound to hotkeys.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    // Board navigation
    NavigateNext,
    NavigatePrev,
    NavigateLeft,
    NavigateRight,

    // Board commands
    CreateTask,
    EditTask,
    DeleteTask,
    ClearCompleted,
    MoveTask,
    EnterSearch,
    CyclePriority,
    ResetFilter,
    CycleTheme,
    ToggleLog,
    Quit,

    // Modes
    SearchModeExit,
    DropTask,
    NextField,
    PrevField,
    SubmitForm,
    Confirm,
    Cancel,
}

/// Represents a key combination (KeyCode + modifiers).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hotkey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Hotkey {
    pub fn key(c: char) -> Self {
        Hotkey {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::empty(),
        }
    }

    pub fn code(code: KeyCode) -> Self {
        Hotkey {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }

    pub fn ctrl(c: char) -> Self {
        Hotkey {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

impl FromStr for Hotkey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidHotkey(s.to_string());
        // A lone "+" is the plus key, not a separator.
        let (prefix, key) = match s.strip_suffix("++") {
            Some(rest) => (rest, "+"),
            None if s == "+" => ("", "+"),
            None => match s.rsplit_once('+') {
                Some((prefix, key)) => (prefix, key),
                None => ("", s),
            },
        };

        let mut modifiers = KeyModifiers::empty();
        for part in prefix.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(invalid()),
            };
        }

        let mut chars = key.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyCode::Char(c),
            _ => match key.to_lowercase().as_str() {
                "enter" => KeyCode::Enter,
                "esc" | "escape" => KeyCode::Esc,
                "tab" => KeyCode::Tab,
                "backtab" => KeyCode::BackTab,
                "backspace" => KeyCode::Backspace,
                "delete" | "del" => KeyCode::Delete,
                "space" => KeyCode::Char(' '),
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                "home" => KeyCode::Home,
                "end" => KeyCode::End,
                _ => return Err(invalid()),
            },
        };

        Ok(Hotkey { code, modifiers })
    }
}

impl TryFrom<String> for Hotkey {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hotkey> for String {
    fn from(hotkey: Hotkey) -> Self {
        hotkey.to_string()
    }
}

/// Configuration form of the hotkey, e.g. `ctrl+s`.
///
impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (KeyModifiers::CONTROL, "ctrl+"),
            (KeyModifiers::ALT, "alt+"),
            (KeyModifiers::SHIFT, "shift+"),
        ] {
            if self.modifiers.contains(flag) {
                f.write_str(name)?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::BackTab => f.write_str("backtab"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Delete => f.write_str("delete"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
            _ => f.write_str("unknown"),
        }
    }
}

/// Input modes that have their own hotkey tables.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Board,
    Search,
    Drag,
    Confirmation,
    TaskForm,
}

/// Maps hotkey actions to their key bindings for each input mode.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewHotkeys {
    pub board: HashMap<HotkeyAction, Hotkey>,
    pub search_mode: HashMap<HotkeyAction, Hotkey>,
    pub drag_mode: HashMap<HotkeyAction, Hotkey>,
    pub confirmation: HashMap<HotkeyAction, Hotkey>,
    pub task_form: HashMap<HotkeyAction, Hotkey>,
}

impl Default for ViewHotkeys {
    fn default() -> Self {
        default_hotkeys()
    }
}

impl ViewHotkeys {
    pub fn for_mode(&self, mode: Mode) -> &HashMap<HotkeyAction, Hotkey> {
        match mode {
            Mode::Board => &self.board,
            Mode::Search => &self.search_mode,
            Mode::Drag => &self.drag_mode,
            Mode::Confirmation => &self.confirmation,
            Mode::TaskForm => &self.task_form,
        }
    }

    /// Fill every action missing from a partial configuration with its
    /// default binding.
    ///
    pub fn with_defaults(mut self) -> Self {
        let defaults = default_hotkeys();
        for (table, default_table) in [
            (&mut self.board, defaults.board),
            (&mut self.search_mode, defaults.search_mode),
            (&mut self.drag_mode, defaults.drag_mode),
            (&mut self.confirmation, defaults.confirmation),
            (&mut self.task_form, defaults.task_form),
        ] {
            for (action, hotkey) in default_table {
                table.entry(action).or_insert(hotkey);
            }
        }
        self
    }
}

/// Returns default hotkey mappings for all modes.
///
pub fn default_hotkeys() -> ViewHotkeys {
    let board = HashMap::from([
        (HotkeyAction::NavigateNext, Hotkey::key('j')),
        (HotkeyAction::NavigatePrev, Hotkey::key('k')),
        (HotkeyAction::NavigateLeft, Hotkey::key('h')),
        (HotkeyAction::NavigateRight, Hotkey::key('l')),
        (HotkeyAction::CreateTask, Hotkey::key('n')),
        (HotkeyAction::EditTask, Hotkey::key('e')),
        (HotkeyAction::DeleteTask, Hotkey::key('d')),
        (HotkeyAction::ClearCompleted, Hotkey::key('C')),
        (HotkeyAction::MoveTask, Hotkey::key('m')),
        (HotkeyAction::EnterSearch, Hotkey::key('/')),
        (HotkeyAction::CyclePriority, Hotkey::key('p')),
        (HotkeyAction::ResetFilter, Hotkey::key('x')),
        (HotkeyAction::CycleTheme, Hotkey::key('t')),
        (HotkeyAction::ToggleLog, Hotkey::key('v')),
        (HotkeyAction::Quit, Hotkey::key('q')),
    ]);

    let search_mode = HashMap::from([
        (HotkeyAction::SearchModeExit, Hotkey::code(KeyCode::Enter)),
        (HotkeyAction::Cancel, Hotkey::code(KeyCode::Esc)),
    ]);

    let drag_mode = HashMap::from([
        (HotkeyAction::NavigateNext, Hotkey::key('j')),
        (HotkeyAction::NavigatePrev, Hotkey::key('k')),
        (HotkeyAction::NavigateLeft, Hotkey::key('h')),
        (HotkeyAction::NavigateRight, Hotkey::key('l')),
        (HotkeyAction::DropTask, Hotkey::code(KeyCode::Enter)),
        (HotkeyAction::Cancel, Hotkey::code(KeyCode::Esc)),
    ]);

    let confirmation = HashMap::from([
        (HotkeyAction::Confirm, Hotkey::code(KeyCode::Enter)),
        (HotkeyAction::Cancel, Hotkey::code(KeyCode::Esc)),
    ]);

    let task_form = HashMap::from([
        (HotkeyAction::NextField, Hotkey::code(KeyCode::Tab)),
        (HotkeyAction::PrevField, Hotkey::code(KeyCode::BackTab)),
        (HotkeyAction::SubmitForm, Hotkey::ctrl('s')),
        (HotkeyAction::Cancel, Hotkey::code(KeyCode::Esc)),
    ]);

    ViewHotkeys {
        board,
        search_mode,
        drag_mode,
        confirmation,
        task_form,
    }
}

/// Checks if a KeyEvent matches a Hotkey. Shift is ignored for character
/// keys since the character already carries the case.
///
pub fn matches_hotkey(event: &KeyEvent, hotkey: &Hotkey) -> bool {
    if event.code != hotkey.code {
        return false;
    }
    match event.code {
        KeyCode::Char(_) => {
            event.modifiers.difference(KeyModifiers::SHIFT)
                == hotkey.modifiers.difference(KeyModifiers::SHIFT)
        }
        _ => event.modifiers == hotkey.modifiers,
    }
}

/// Gets the action for a KeyEvent in a specific mode.
///
pub fn get_action_for_mode(
    event: &KeyEvent,
    mode: Mode,
    hotkeys: &ViewHotkeys,
) -> Option<HotkeyAction> {
    hotkeys
        .for_mode(mode)
        .iter()
        .find(|(_, hotkey)| matches_hotkey(event, hotkey))
        .map(|(action, _)| *action)
}

/// Builds a footer text string from hotkey configurations.
/// Takes a list of tuples: (action, description, optional_second_action_for_paired_keys)
///
pub fn build_footer_text(
    hotkeys: &HashMap<HotkeyAction, Hotkey>,
    actions: &[(HotkeyAction, &str, Option<HotkeyAction>)],
) -> String {
    let parts: Vec<String> = actions
        .iter()
        .filter_map(|(action, description, paired_action)| {
            let hotkey = hotkeys.get(action)?;
            let paired = paired_action.and_then(|p| hotkeys.get(&p));
            Some(match paired {
                Some(paired_hotkey) => format!(
                    " {}/{}: {}",
                    format_hotkey_display(hotkey),
                    format_hotkey_display(paired_hotkey),
                    description
                ),
                None => format!(" {}: {}", format_hotkey_display(hotkey), description),
            })
        })
        .collect();
    parts.join(",")
}

/// Footer form of the hotkey, e.g. `Ctrl+s`.
///
pub fn format_hotkey_display(hotkey: &Hotkey) -> String {
    let mut parts = Vec::new();
    if hotkey.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if hotkey.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }
    if hotkey.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }

    let key_str = match &hotkey.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        _ => "Unknown".to_string(),
    };

    if parts.is_empty() {
        key_str
    } else {
        format!("{}+{}", parts.join("+"), key_str)
    }
}
