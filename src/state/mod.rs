//! Application state management module.
//!
//! This module contains the state of the terminal UI, including:
//! - Main `State` struct wrapping the board with cursor, filter and modes
//! - Navigation types (View, notifications, pending confirmations)
//! - The task form used to create and edit tasks

mod form;
mod navigation;

pub use form::{FormField, TaskForm};
pub use navigation::{
    Notification, NotificationLevel, PendingAction, PendingConfirmation, View,
};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
