//! Persistence gateway.
//!
//! This module serializes the whole board state to a durable slot and back:
//! - `Slot` abstracts the storage location (file on disk, or memory in tests)
//! - `Gateway` loads the board, seeding defaults on first run, and saves full
//!   snapshots after every mutation

mod error;
mod slot;

pub use error::StorageError;
pub use slot::{FileSlot, Slot};
#[cfg(test)]
pub use slot::MemorySlot;

use crate::board::{BoardState, Lane, Priority, Task, TaskFields};
use log::*;

/// Storage key used when the configuration does not name one.
pub const DEFAULT_STORAGE_KEY: &str = "mini-trello-state";

/// Reads and writes the board document in a slot.
///
pub struct Gateway {
    slot: Box<dyn Slot>,
}

impl Gateway {
    pub fn new(slot: Box<dyn Slot>) -> Self {
        Gateway { slot }
    }

    pub fn describe(&self) -> String {
        self.slot.describe()
    }

    /// Read the board state. An empty slot is seeded with the default tasks,
    /// which are written back immediately. A slot that does not parse is an
    /// error and is left as it is.
    ///
    pub fn load(&mut self) -> Result<BoardState, StorageError> {
        match self.slot.read()? {
            Some(contents) => {
                let state: BoardState = serde_json::from_str(&contents).map_err(|e| {
                    error!("Board at {} does not parse: {}", self.slot.describe(), e);
                    StorageError::Corrupt(e.to_string())
                })?;
                debug!(
                    "Loaded {} tasks from {}",
                    state.tasks.len(),
                    self.slot.describe()
                );
                Ok(state)
            }
            None => {
                info!("No board at {}, seeding defaults", self.slot.describe());
                let state = seed_state();
                self.save(&state)?;
                Ok(state)
            }
        }
    }

    /// Overwrite the slot with a full snapshot.
    ///
    pub fn save(&mut self, state: &BoardState) -> Result<(), StorageError> {
        let contents = serde_json::to_string(state)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.slot.write(&contents)?;
        trace!("Saved {} tasks", state.tasks.len());
        Ok(())
    }
}

/// The three example tasks a new board starts with.
///
pub fn seed_state() -> BoardState {
    let seed = |id: &str, lane: Lane, fields: TaskFields| {
        let mut task = Task::new(id.to_string(), fields);
        task.status = lane.into();
        task
    };

    BoardState {
        tasks: vec![
            seed(
                "T1",
                Lane::Done,
                TaskFields::new("Initialize System")
                    .with_description("Boot up the core kernel")
                    .with_priority(Priority::High)
                    .with_tags(["system"]),
            ),
            seed(
                "T2",
                Lane::InProgress,
                TaskFields::new("Design Interface")
                    .with_description("Create neon styling")
                    .with_priority(Priority::Medium)
                    .with_tags(["ui", "css"]),
            ),
            seed(
                "T3",
                Lane::Todo,
                TaskFields::new("Implement Drag & Drop")
                    .with_description("Enable task movement")
                    .with_priority(Priority::High)
                    .with_tags(["feature"]),
            ),
        ],
        next_id: 4,
    }
}
