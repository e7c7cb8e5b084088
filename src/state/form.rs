//! Task form editing state.
//!
//! The same form backs task creation and editing. Single line fields are
//! plain strings, the description is a multi-line `TextArea`.

use crate::board::{parse_tags, Priority, Task, TaskFields};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::TextArea;

/// Specifying the form field being edited.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Tags,
    Due,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::Tags,
        FormField::Due,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Priority => "Priority",
            FormField::Tags => "Tags (comma separated)",
            FormField::Due => "Due",
        }
    }

    fn index(self) -> usize {
        FormField::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> FormField {
        FormField::ALL[(self.index() + 1) % FormField::ALL.len()]
    }

    pub fn previous(self) -> FormField {
        let len = FormField::ALL.len();
        FormField::ALL[(self.index() + len - 1) % len]
    }
}

/// Input state of the create/edit task form.
///
#[derive(Clone)]
pub struct TaskForm {
    editing: Option<String>,
    field: FormField,
    title: String,
    description: TextArea<'static>,
    priority: Priority,
    tags: String,
    due: String,
    error: Option<String>,
}

impl TaskForm {
    /// Empty form for a new task.
    ///
    pub fn create() -> Self {
        TaskForm {
            editing: None,
            field: FormField::Title,
            title: String::new(),
            description: TextArea::default(),
            priority: Priority::default(),
            tags: String::new(),
            due: String::new(),
            error: None,
        }
    }

    /// Form prefilled with an existing task.
    ///
    pub fn edit(task: &Task) -> Self {
        let lines = task
            .description
            .as_deref()
            .map(|d| d.lines().map(str::to_string).collect())
            .unwrap_or_default();
        TaskForm {
            editing: Some(task.id.clone()),
            title: task.title.clone(),
            description: TextArea::new(lines),
            priority: task.priority,
            tags: task.tags.join(", "),
            due: task.due.clone().unwrap_or_default(),
            ..TaskForm::create()
        }
    }

    /// Identifier of the task being edited, `None` when creating.
    ///
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn field(&self) -> FormField {
        self.field
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn previous_field(&mut self) {
        self.field = self.field.previous();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &TextArea<'static> {
        &self.description
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn due(&self) -> &str {
        &self.due
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    /// Feed a key press to the focused field.
    ///
    pub fn input(&mut self, key: KeyEvent) {
        self.error = None;
        match self.field {
            FormField::Description => {
                self.description.input(key);
            }
            FormField::Priority => {
                if matches!(
                    key.code,
                    KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                ) {
                    self.priority = self.priority.cycle();
                }
            }
            FormField::Title => edit_line(&mut self.title, key),
            FormField::Tags => edit_line(&mut self.tags, key),
            FormField::Due => edit_line(&mut self.due, key),
        }
    }

    /// Current input as board fields, trimmed and with blanks dropped.
    ///
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: Some(self.description.lines().join("\n")),
            priority: self.priority,
            tags: parse_tags(&self.tags),
            due: Some(self.due.clone()),
        }
        .normalized()
    }
}

fn edit_line(line: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            line.push(c);
        }
        KeyCode::Backspace => {
            line.pop();
        }
        _ => {}
    }
}
