//! Drag gesture collaborator.
//!
//! A drag session picks up one visible card, moves it between lanes and
//! positions, and on drop hands the resulting per-lane identifier lists to the
//! board for reconciliation. Only visible tasks take part; positional
//! insertion happens here, never in the reconciler.

use crate::board::{Lane, LaneLayout, VisibleTasks};

/// A card being dragged across the rendered board.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    task_id: String,
    origin: (Lane, usize),
    lane: Lane,
    position: usize,
    layout: LaneLayout,
}

impl DragSession {
    /// Start dragging a visible task. Returns `None` when the task is not
    /// rendered.
    ///
    pub fn pick_up(visible: &VisibleTasks<'_>, task_id: &str) -> Option<DragSession> {
        let (lane, position) = visible.position(task_id)?;
        Some(DragSession {
            task_id: task_id.to_string(),
            origin: (lane, position),
            lane,
            position,
            layout: visible.layout(),
        })
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Rendered layout with the card at its current hover position.
    ///
    pub fn layout(&self) -> &LaneLayout {
        &self.layout
    }

    /// Whether the card sits somewhere other than where it was picked up.
    ///
    pub fn has_moved(&self) -> bool {
        (self.lane, self.position) != self.origin
    }

    /// Move the card to a lane and position. Positions past the end of the
    /// lane place the card last.
    ///
    pub fn move_to(&mut self, lane: Lane, position: usize) {
        let current = self.layout.lane_mut(self.lane);
        if self.position < current.len() {
            current.remove(self.position);
        }

        let target = self.layout.lane_mut(lane);
        let position = position.min(target.len());
        target.insert(position, self.task_id.clone());

        self.lane = lane;
        self.position = position;
    }

    pub fn move_up(&mut self) {
        if self.position > 0 {
            self.move_to(self.lane, self.position - 1);
        }
    }

    pub fn move_down(&mut self) {
        self.move_to(self.lane, self.position + 1);
    }

    /// Move one lane to the left, keeping the position where possible.
    ///
    pub fn move_left(&mut self) {
        if let Some(lane) = self.lane.previous() {
            self.move_to(lane, self.position);
        }
    }

    pub fn move_right(&mut self) {
        if let Some(lane) = self.lane.next() {
            self.move_to(lane, self.position);
        }
    }

    /// Finish the gesture, yielding the post-drop layout.
    ///
    pub fn release(self) -> LaneLayout {
        self.layout
    }
}
