//! Visible subset of the board for a search term and priority selector.

use super::{BoardError, Lane, LaneLayout, Priority, Task};
use std::fmt;
use std::str::FromStr;

/// Priority part of a filter selection.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrioritySelector {
    #[default]
    All,
    Only(Priority),
}

impl PrioritySelector {
    pub fn matches(self, priority: Priority) -> bool {
        match self {
            PrioritySelector::All => true,
            PrioritySelector::Only(wanted) => wanted == priority,
        }
    }

    /// Next selector in the order all, high, medium, low.
    ///
    pub fn cycle(self) -> PrioritySelector {
        match self {
            PrioritySelector::All => PrioritySelector::Only(Priority::High),
            PrioritySelector::Only(Priority::High) => PrioritySelector::Only(Priority::Medium),
            PrioritySelector::Only(Priority::Medium) => PrioritySelector::Only(Priority::Low),
            PrioritySelector::Only(Priority::Low) => PrioritySelector::All,
        }
    }
}

impl fmt::Display for PrioritySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrioritySelector::All => f.write_str("all"),
            PrioritySelector::Only(priority) => write!(f, "{}", priority),
        }
    }
}

impl FromStr for PrioritySelector {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(PrioritySelector::All)
        } else {
            s.parse().map(PrioritySelector::Only)
        }
    }
}

/// Transient filter state. Never persisted.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub search: String,
    pub priority: PrioritySelector,
}

impl FilterSelection {
    pub fn new() -> Self {
        FilterSelection::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_priority(mut self, priority: PrioritySelector) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the selection can hide any task.
    ///
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.priority != PrioritySelector::All
    }

    /// Search and priority match, regardless of lane.
    ///
    pub fn matches(&self, task: &Task) -> bool {
        self.priority.matches(task.priority) && self.matches_search(task)
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Per-lane visible tasks, borrowed from the canonical collection in its
/// order.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleTasks<'a> {
    lanes: [Vec<&'a Task>; 3],
}

impl<'a> VisibleTasks<'a> {
    pub fn lane(&self, lane: Lane) -> &[&'a Task] {
        &self.lanes[lane.index()]
    }

    /// Visible count for a lane, not the lane's total.
    ///
    pub fn count(&self, lane: Lane) -> usize {
        self.lanes[lane.index()].len()
    }

    pub fn get(&self, lane: Lane, position: usize) -> Option<&'a Task> {
        self.lanes[lane.index()].get(position).copied()
    }

    pub fn position(&self, id: &str) -> Option<(Lane, usize)> {
        Lane::ALL.iter().find_map(|&lane| {
            self.lane(lane)
                .iter()
                .position(|t| t.id == id)
                .map(|pos| (lane, pos))
        })
    }

    /// Identifiers as currently rendered, the starting point of a drag.
    ///
    pub fn layout(&self) -> LaneLayout {
        let mut layout = LaneLayout::new();
        for lane in Lane::ALL {
            layout.set(lane, self.lane(lane).iter().map(|t| t.id.clone()).collect());
        }
        layout
    }
}

/// Compute the visible tasks per lane. Tasks whose status is not a lane are
/// never visible. The collection is only read.
///
pub fn visible_tasks<'a>(tasks: &'a [Task], selection: &FilterSelection) -> VisibleTasks<'a> {
    let mut visible = VisibleTasks::default();
    for task in tasks {
        if let Some(lane) = task.lane() {
            if selection.matches(task) {
                visible.lanes[lane.index()].push(task);
            }
        }
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Status, TaskFields};

    fn task(id: &str, title: &str, status: Status, priority: Priority, tags: &[&str]) -> Task {
        let mut task = Task::new(
            id.to_string(),
            TaskFields::new(title)
                .with_priority(priority)
                .with_tags(tags.iter().copied()),
        );
        task.status = status;
        task
    }

    fn seed() -> Vec<Task> {
        vec![
            task("T1", "Initialize System", Status::Done, Priority::High, &["system"]),
            task("T2", "Design Interface", Status::InProgress, Priority::Medium, &["ui", "css"]),
            task("T3", "Implement Drag & Drop", Status::Todo, Priority::High, &["feature"]),
        ]
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_no_filter_shows_every_lane() {
        let tasks = seed();
        let visible = visible_tasks(&tasks, &FilterSelection::new());
        assert_eq!(ids(visible.lane(Lane::Todo)), vec!["T3"]);
        assert_eq!(ids(visible.lane(Lane::InProgress)), vec!["T2"]);
        assert_eq!(ids(visible.lane(Lane::Done)), vec!["T1"]);
    }

    #[test]
    fn test_search_matches_tag() {
        let tasks = seed();
        let visible = visible_tasks(&tasks, &FilterSelection::new().with_search("css"));
        assert_eq!(ids(visible.lane(Lane::InProgress)), vec!["T2"]);
        assert_eq!(visible.count(Lane::Todo), 0);
        assert_eq!(visible.count(Lane::Done), 0);
    }

    #[test]
    fn test_search_is_case_insensitive_on_title() {
        let tasks = seed();
        let visible = visible_tasks(&tasks, &FilterSelection::new().with_search("DRAG"));
        assert_eq!(ids(visible.lane(Lane::Todo)), vec!["T3"]);
    }

    #[test]
    fn test_priority_selector() {
        let tasks = seed();
        let selection =
            FilterSelection::new().with_priority(PrioritySelector::Only(Priority::High));
        let visible = visible_tasks(&tasks, &selection);
        assert_eq!(visible.count(Lane::Todo), 1);
        assert_eq!(visible.count(Lane::InProgress), 0);
        assert_eq!(visible.count(Lane::Done), 1);
    }

    #[test]
    fn test_lane_order_follows_collection() {
        let mut tasks = seed();
        tasks.push(task("T4", "Second todo", Status::Todo, Priority::Low, &[]));
        tasks.insert(0, task("T5", "First todo", Status::Todo, Priority::Low, &[]));
        let visible = visible_tasks(&tasks, &FilterSelection::new());
        assert_eq!(ids(visible.lane(Lane::Todo)), vec!["T5", "T3", "T4"]);
    }

    #[test]
    fn test_unrecognized_status_is_invisible() {
        let mut tasks = seed();
        tasks.push(task(
            "T4",
            "Lost",
            Status::Unrecognized("archived".to_string()),
            Priority::Low,
            &[],
        ));
        let visible = visible_tasks(&tasks, &FilterSelection::new());
        let shown: usize = Lane::ALL.iter().map(|&l| visible.count(l)).sum();
        assert_eq!(shown, 3);
        assert_eq!(visible.position("T4"), None);
    }

    #[test]
    fn test_visible_tasks_is_pure() {
        let tasks = seed();
        let before = tasks.clone();
        let selection = FilterSelection::new().with_search("i");
        let first = visible_tasks(&tasks, &selection);
        let second = visible_tasks(&tasks, &selection);
        assert_eq!(first, second);
        assert_eq!(tasks, before);
    }

    #[test]
    fn test_layout_and_position() {
        let tasks = seed();
        let visible = visible_tasks(&tasks, &FilterSelection::new());
        assert_eq!(visible.position("T2"), Some((Lane::InProgress, 0)));
        let layout = visible.layout();
        assert_eq!(layout.lane(Lane::Done), ["T1".to_string()]);
    }

    #[test]
    fn test_priority_selector_cycle_and_parse() {
        let mut selector = PrioritySelector::All;
        let mut seen = vec![];
        for _ in 0..4 {
            selector = selector.cycle();
            seen.push(selector.to_string());
        }
        assert_eq!(seen, vec!["high", "medium", "low", "all"]);
        assert_eq!("ALL".parse::<PrioritySelector>().unwrap(), PrioritySelector::All);
        assert_eq!(
            "low".parse::<PrioritySelector>().unwrap(),
            PrioritySelector::Only(Priority::Low)
        );
        assert!("none".parse::<PrioritySelector>().is_err());
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterSelection::new().is_active());
        assert!(FilterSelection::new().with_search("x").is_active());
        assert!(FilterSelection::new()
            .with_priority(PrioritySelector::Only(Priority::Low))
            .is_active());
    }
}
