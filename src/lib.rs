//! A task board with three ordered lanes (todo, in progress, done), filtering
//! by text and priority, keyboard drag reordering and a JSON backed durable
//! slot. The same board is driven by a terminal UI and by one-shot commands.

pub mod app;
pub mod board;
pub mod cli;
pub mod config;
pub mod drag;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod storage;
pub mod ui;
