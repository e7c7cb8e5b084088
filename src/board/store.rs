//! Canonical task collection.
//!
//! The store owns the ordered task sequence and the identifier counter. Lane
//! order is not kept separately: a lane's order is the collection filtered by
//! status.

use super::{BoardError, Stats, Status, Task, TaskFields};
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Snapshot of everything the board persists.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub tasks: Vec<Task>,
    #[serde(rename = "nextId")]
    pub next_id: u64,
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState {
            tasks: vec![],
            next_id: 1,
        }
    }
}

/// Owns the canonical ordered collection of tasks.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore::from_parts(vec![], 1)
    }

    fn from_parts(tasks: Vec<Task>, next_id: u64) -> Self {
        TaskStore { tasks, next_id }
    }

    /// Build a store from a persisted snapshot.
    ///
    /// Duplicate identifiers are rejected. A counter that would hand out an
    /// identifier already in use is raised past the highest `T<n>` instead.
    ///
    pub fn from_state(state: BoardState) -> Result<Self, BoardError> {
        let mut seen = HashSet::new();
        for task in &state.tasks {
            if !seen.insert(task.id.as_str()) {
                return Err(BoardError::InvariantViolation(format!(
                    "duplicate task identifier {} in stored state",
                    task.id
                )));
            }
        }

        let floor = match state.tasks.iter().filter_map(|t| numeric_id(&t.id)).max() {
            None => 1,
            Some(max) => max.checked_add(1).ok_or_else(|| {
                BoardError::InvariantViolation(format!(
                    "stored identifier T{} leaves no identifier to allocate",
                    max
                ))
            })?,
        };
        let next_id = if state.next_id < floor {
            warn!(
                "Stored counter {} would reuse an identifier, raising it to {}",
                state.next_id, floor
            );
            floor
        } else {
            state.next_id
        };

        Ok(TaskStore::from_parts(state.tasks, next_id))
    }

    /// Copy of the full state, as written to storage.
    ///
    pub fn snapshot(&self) -> BoardState {
        BoardState {
            tasks: self.tasks.clone(),
            next_id: self.next_id,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Validate the fields, allocate the next identifier and append a new
    /// todo task at the end of the collection.
    ///
    pub fn create(&mut self, fields: TaskFields) -> Result<Task, BoardError> {
        let fields = fields.normalized();
        fields.validate()?;

        let next_id = self.next_id.checked_add(1).ok_or_else(|| {
            BoardError::InvariantViolation("task identifiers are exhausted".to_string())
        })?;
        let id = format!("T{}", self.next_id);
        self.next_id = next_id;

        let task = Task::new(id, fields);
        debug!("Created task {} '{}'", task.id, task.title);
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Replace every editable field of the task. Identifier and status are
    /// left alone.
    ///
    pub fn update(&mut self, id: &str, fields: TaskFields) -> Result<&Task, BoardError> {
        let fields = fields.normalized();
        fields.validate()?;

        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| BoardError::NotFound { id: id.to_string() })?;
        task.apply(fields);
        debug!("Updated task {}", id);
        Ok(task)
    }

    /// Remove the task with the given identifier. Returns the number of
    /// tasks removed; an unknown identifier removes nothing.
    ///
    pub fn delete(&mut self, id: &str) -> usize {
        self.delete_where(|t| t.id == id)
    }

    /// Remove every task matching the predicate, keeping the order of the
    /// rest. Returns the number of tasks removed.
    ///
    pub fn delete_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Task) -> bool,
    {
        let before = self.tasks.len();
        self.tasks.retain(|t| !predicate(t));
        before - self.tasks.len()
    }

    /// Remove every task in the done lane.
    ///
    pub fn clear_completed(&mut self) -> usize {
        self.delete_where(|t| t.status == Status::Done)
    }

    /// Replace the whole collection. The caller guarantees the sequence is a
    /// permutation of the current tasks.
    ///
    pub fn reorder(&mut self, tasks: Vec<Task>) {
        debug_assert_eq!(tasks.len(), self.tasks.len());
        self.tasks = tasks;
    }

    pub fn stats(&self) -> Stats {
        Stats::compute(&self.tasks)
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore::new()
    }
}

fn numeric_id(id: &str) -> Option<u64> {
    id.strip_prefix('T')?.parse().ok()
}
