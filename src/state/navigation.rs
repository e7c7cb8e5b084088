//! Navigation-related state types.
//!
//! This module contains the views of the application and the transient
//! messages shown to the user.

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum View {
    Board,
    CreateTask,
    EditTask,
}

impl View {
    pub fn is_form(self) -> bool {
        matches!(self, View::CreateTask | View::EditTask)
    }
}

/// Severity of a notification.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// One-line message shown in the header until it expires.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub(super) ticks_left: usize,
}

/// What the user is being asked to confirm.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PendingAction {
    DeleteTask(String),
    ClearCompleted,
}

/// A destructive action waiting for a yes or no.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PendingConfirmation {
    pub prompt: String,
    pub action: PendingAction,
}
