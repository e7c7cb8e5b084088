//! Event handling module.
//!
//! Terminal events are polled on a separate thread and applied to the state
//! on the render thread, one at a time.

pub mod terminal;
