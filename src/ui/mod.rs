//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - Terminal rendering and layout
//! - Theme management
//! - Styling helpers

type Frame<'a> = ratatui::Frame<'a>;

mod render;
pub mod theme;
mod widgets;

pub use render::render;
pub use theme::Theme;
