//! Task board core.
//!
//! This module contains the presentation independent part of the application:
//! - Task model and editable fields
//! - The task store owning the canonical ordered collection
//! - The filter engine computing visible tasks per lane
//! - The reconciler merging a dragged layout back into the collection
//! - The `Board` mutation layer that validates, confirms and persists

mod confirm;
mod error;
pub mod filter;
pub mod reconcile;
mod stats;
mod store;
mod task;

pub use confirm::{Answer, Confirm, Deferred};
pub use error::BoardError;
pub use filter::{visible_tasks, FilterSelection, PrioritySelector, VisibleTasks};
pub use reconcile::{reconcile, LaneLayout};
pub use stats::Stats;
pub use store::{BoardState, TaskStore};
pub use task::{parse_tags, Lane, Priority, Status, Task, TaskFields};

use crate::storage::Gateway;
use log::*;

/// Result of a delete request.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The user confirmed; this many tasks were removed (possibly zero).
    Removed(usize),
    /// The user declined; nothing changed.
    Declined,
}

/// Everything a view needs after a mutation.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    pub visible: VisibleTasks<'a>,
    pub stats: Stats,
}

impl<'a> BoardView<'a> {
    /// Visible task count per lane, in board order.
    ///
    pub fn counts(&self) -> [usize; 3] {
        Lane::ALL.map(|lane| self.visible.count(lane))
    }
}

/// Mutation layer over the task store. Every successful mutation is followed
/// by a full save through the persistence gateway.
///
/// When a save fails the mutation stays applied in memory, the board is
/// flagged as unsaved and the storage error is returned.
pub struct Board {
    store: TaskStore,
    gateway: Gateway,
    unsaved: bool,
}

impl Board {
    /// Load (or seed) the persisted state and open the board.
    ///
    pub fn open(mut gateway: Gateway) -> Result<Board, BoardError> {
        let state = gateway.load()?;
        let store = TaskStore::from_state(state)?;
        info!(
            "Opened board from {} with {} tasks",
            gateway.describe(),
            store.len()
        );
        Ok(Board {
            store,
            gateway,
            unsaved: false,
        })
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn stats(&self) -> Stats {
        self.store.stats()
    }

    /// Whether the last save failed and memory is ahead of storage.
    ///
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn view(&self, selection: &FilterSelection) -> BoardView<'_> {
        BoardView {
            visible: visible_tasks(self.store.tasks(), selection),
            stats: self.store.stats(),
        }
    }

    pub fn create(&mut self, fields: TaskFields) -> Result<Task, BoardError> {
        let task = self.store.create(fields)?;
        info!("Created task {}", task.id);
        self.persist()?;
        Ok(task)
    }

    pub fn update(&mut self, id: &str, fields: TaskFields) -> Result<Task, BoardError> {
        let task = self.store.update(id, fields)?.clone();
        info!("Updated task {}", task.id);
        self.persist()?;
        Ok(task)
    }

    /// Delete a single task after confirmation. Deleting an identifier that
    /// does not exist removes nothing and asks nothing.
    ///
    pub fn delete(&mut self, id: &str, confirm: &mut dyn Confirm) -> Result<Removal, BoardError> {
        let Some(task) = self.store.get(id) else {
            debug!("Delete of unknown task {} ignored", id);
            return Ok(Removal::Removed(0));
        };

        let message = format!("Delete task {} \"{}\"?", task.id, task.title);
        if !confirm.confirm(&message) {
            debug!("Delete of task {} declined", id);
            return Ok(Removal::Declined);
        }

        let removed = self.store.delete(id);
        info!("Deleted task {}", id);
        self.persist()?;
        Ok(Removal::Removed(removed))
    }

    /// Delete every completed task after confirmation.
    ///
    pub fn clear_completed(&mut self, confirm: &mut dyn Confirm) -> Result<Removal, BoardError> {
        let done = self.store.stats().done;
        if done == 0 {
            return Ok(Removal::Removed(0));
        }

        let message = if done == 1 {
            "Delete 1 completed task?".to_string()
        } else {
            format!("Delete all {} completed tasks?", done)
        };
        if !confirm.confirm(&message) {
            debug!("Clear completed declined");
            return Ok(Removal::Declined);
        }

        let removed = self.store.clear_completed();
        info!("Cleared {} completed tasks", removed);
        self.persist()?;
        Ok(Removal::Removed(removed))
    }

    /// Apply a dropped lane layout. On an invariant violation the collection
    /// is left exactly as it was.
    ///
    pub fn apply_layout(&mut self, layout: &LaneLayout) -> Result<(), BoardError> {
        let reordered = match reconcile(self.store.tasks(), layout) {
            Ok(reordered) => reordered,
            Err(e) => {
                error!("Rejected drag layout: {}", e);
                return Err(e);
            }
        };
        self.store.reorder(reordered);
        debug!("Applied lane layout covering {} tasks", layout.len());
        self.persist()
    }

    /// Retry persisting the current state.
    ///
    pub fn save(&mut self) -> Result<(), BoardError> {
        self.persist()
    }

    fn persist(&mut self) -> Result<(), BoardError> {
        match self.gateway.save(&self.store.snapshot()) {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            }
            Err(e) => {
                self.unsaved = true;
                error!("Failed to save board: {}", e);
                Err(e.into())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::seeded_board;
    use super::*;
    use crate::storage::{Gateway, MemorySlot, Slot, StorageError};

    fn ids(board: &Board) -> Vec<String> {
        board.tasks().iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_open_seeds_and_persists() {
        let (board, slot) = seeded_board();
        assert_eq!(ids(&board), vec!["T1", "T2", "T3"]);
        assert_eq!(board.store().next_id(), 4);
        assert!(slot.read().unwrap().is_some());
    }

    #[test]
    fn test_create_scenario() {
        let (mut board, slot) = seeded_board();
        let task = board
            .create(TaskFields::new("X").with_priority(Priority::Low))
            .unwrap();
        assert_eq!(task.id, "T4");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(board.tasks().last().map(|t| t.id.as_str()), Some("T4"));

        let view = board.view(&FilterSelection::new());
        assert_eq!(view.stats.total, 4);
        assert_eq!(view.stats.pending, 3);
        assert_eq!(view.stats.done, 1);

        let reopened = Board::open(Gateway::new(Box::new(slot))).unwrap();
        assert_eq!(reopened.tasks(), board.tasks());
    }

    #[test]
    fn test_search_scenario_counts() {
        let (board, _slot) = seeded_board();
        let view = board.view(&FilterSelection::new().with_search("css"));
        assert_eq!(view.counts(), [0, 1, 0]);
        assert_eq!(view.visible.lane(Lane::InProgress)[0].id, "T2");
    }

    #[test]
    fn test_update_unknown_reports_not_found() {
        let (mut board, _slot) = seeded_board();
        let result = board.update("T42", TaskFields::new("Nope"));
        assert!(matches!(result, Err(BoardError::NotFound { .. })));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (mut board, _slot) = seeded_board();
        let mut deferred = Deferred::new();
        assert_eq!(board.delete("T2", &mut deferred).unwrap(), Removal::Declined);
        assert!(deferred.take_prompt().unwrap().contains("T2"));
        assert_eq!(board.tasks().len(), 3);

        assert_eq!(
            board.delete("T2", &mut Answer(true)).unwrap(),
            Removal::Removed(1)
        );
        assert_eq!(ids(&board), vec!["T1", "T3"]);
    }

    #[test]
    fn test_delete_unknown_asks_nothing() {
        let (mut board, _slot) = seeded_board();
        let mut deferred = Deferred::new();
        assert_eq!(board.delete("T9", &mut deferred).unwrap(), Removal::Removed(0));
        assert_eq!(deferred.take_prompt(), None);
    }

    #[test]
    fn test_clear_completed_scenario() {
        let (mut board, _slot) = seeded_board();
        let layout = LaneLayout::new()
            .with_lane(Lane::InProgress, ["T2"])
            .with_lane(Lane::Done, ["T1", "T3"]);
        board.apply_layout(&layout).unwrap();
        assert_eq!(board.stats().done, 2);

        let original = board.tasks().len();
        let removal = board.clear_completed(&mut Answer(true)).unwrap();
        assert_eq!(removal, Removal::Removed(2));
        assert_eq!(board.tasks().len(), original - 2);
        assert_eq!(ids(&board), vec!["T2"]);
    }

    #[test]
    fn test_clear_completed_declined() {
        let (mut board, _slot) = seeded_board();
        let removal = board.clear_completed(&mut Answer(false)).unwrap();
        assert_eq!(removal, Removal::Declined);
        assert_eq!(board.stats().done, 1);
    }

    #[test]
    fn test_drag_with_filter_scenario() {
        let (mut board, slot) = seeded_board();
        let selection = FilterSelection::new().with_search("r");
        let mut layout = board.view(&selection).visible.layout();
        assert!(layout.position("T1").is_none());

        let from = layout.lane_mut(Lane::Todo);
        let dragged = from.remove(0);
        layout.lane_mut(Lane::Done).insert(0, dragged);
        board.apply_layout(&layout).unwrap();

        let t3 = board.get("T3").unwrap();
        assert_eq!(t3.status, Status::Done);
        let t1 = board.get("T1").unwrap();
        assert_eq!(t1.status, Status::Done);
        assert_eq!(board.tasks().last().map(|t| t.id.as_str()), Some("T1"));

        let reopened = Board::open(Gateway::new(Box::new(slot))).unwrap();
        assert_eq!(reopened.tasks(), board.tasks());
    }

    #[test]
    fn test_invalid_layout_leaves_board_untouched() {
        let (mut board, _slot) = seeded_board();
        let before = board.tasks().to_vec();
        let layout = LaneLayout::new()
            .with_lane(Lane::Todo, ["T1"])
            .with_lane(Lane::Done, ["T1"]);
        assert!(matches!(
            board.apply_layout(&layout),
            Err(BoardError::InvariantViolation(_))
        ));
        assert_eq!(board.tasks(), before.as_slice());
    }

    #[test]
    fn test_open_unreadable_slot_reports_storage_error() {
        let slot = MemorySlot::new();
        slot.fail_reads(true);
        let result = Board::open(Gateway::new(Box::new(slot.clone())));
        assert!(matches!(
            result,
            Err(BoardError::Storage(StorageError::Read { .. }))
        ));

        slot.fail_reads(false);
        assert_eq!(slot.read().unwrap(), None);
    }

    #[test]
    fn test_storage_failure_keeps_mutation_in_memory() {
        let (mut board, slot) = seeded_board();
        slot.fail_writes(true);
        let result = board.create(TaskFields::new("Offline"));
        assert!(matches!(result, Err(BoardError::Storage(_))));
        assert!(board.has_unsaved_changes());
        assert!(board.get("T4").is_some());

        slot.fail_writes(false);
        board.save().unwrap();
        assert!(!board.has_unsaved_changes());
        let reopened = Board::open(Gateway::new(Box::new(slot))).unwrap();
        assert!(reopened.get("T4").is_some());
    }
}
