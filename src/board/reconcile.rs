//! Merge a post-drag visual ordering back into the canonical collection.
//!
//! A drag only sees the visible tasks. Every task hidden by the active filter
//! must survive the merge unchanged, so the output is always a permutation of
//! the input collection.

use super::{BoardError, Lane, Task};
use std::collections::{HashMap, HashSet};

/// Ordered task identifiers per lane, as rendered after a drop.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneLayout {
    lanes: [Vec<String>; 3],
}

impl LaneLayout {
    pub fn new() -> Self {
        LaneLayout::default()
    }

    pub fn with_lane<I, T>(mut self, lane: Lane, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.set(lane, ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn set(&mut self, lane: Lane, ids: Vec<String>) {
        self.lanes[lane.index()] = ids;
    }

    pub fn lane(&self, lane: Lane) -> &[String] {
        &self.lanes[lane.index()]
    }

    pub fn lane_mut(&mut self, lane: Lane) -> &mut Vec<String> {
        &mut self.lanes[lane.index()]
    }

    /// Lane and position of an identifier, first occurrence in lane order.
    ///
    pub fn position(&self, id: &str) -> Option<(Lane, usize)> {
        Lane::ALL.iter().find_map(|&lane| {
            self.lane(lane)
                .iter()
                .position(|candidate| candidate == id)
                .map(|pos| (lane, pos))
        })
    }

    pub fn len(&self) -> usize {
        self.lanes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the new canonical order from a lane layout.
///
/// Lanes are walked in board order; each listed task takes that lane's
/// status. Tasks not listed follow in their original relative order,
/// untouched. A layout naming an unknown identifier, or naming one twice, is
/// rejected and the input collection is left as it was.
///
pub fn reconcile(tasks: &[Task], layout: &LaneLayout) -> Result<Vec<Task>, BoardError> {
    let index: HashMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();

    let mut processed: HashSet<&str> = HashSet::with_capacity(layout.len());
    let mut output = Vec::with_capacity(tasks.len());

    for lane in Lane::ALL {
        for id in layout.lane(lane) {
            let &i = index.get(id.as_str()).ok_or_else(|| {
                BoardError::InvariantViolation(format!(
                    "lane {} lists unknown task {}",
                    lane, id
                ))
            })?;
            if !processed.insert(id.as_str()) {
                return Err(BoardError::InvariantViolation(format!(
                    "task {} is listed more than once",
                    id
                )));
            }
            let mut task = tasks[i].clone();
            task.status = lane.into();
            output.push(task);
        }
    }

    output.extend(
        tasks
            .iter()
            .filter(|t| !processed.contains(t.id.as_str()))
            .cloned(),
    );

    if output.len() != tasks.len() {
        return Err(BoardError::InvariantViolation(format!(
            "reconciled {} tasks from a collection of {}",
            output.len(),
            tasks.len()
        )));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::filter::{visible_tasks, FilterSelection, PrioritySelector};
    use crate::board::{Priority, Status, TaskFields};
    use fake::faker::lorem::en::Word;
    use fake::Fake;
    use rand::seq::SliceRandom;
    use rand::Rng;

    fn task(id: &str, title: &str, status: Status, tags: &[&str]) -> Task {
        let mut task = Task::new(
            id.to_string(),
            TaskFields::new(title).with_tags(tags.iter().copied()),
        );
        task.status = status;
        task
    }

    fn seed() -> Vec<Task> {
        vec![
            task("T1", "Initialize System", Status::Done, &["system"]),
            task("T2", "Design Interface", Status::InProgress, &["ui", "css"]),
            task("T3", "Implement Drag & Drop", Status::Todo, &["feature"]),
        ]
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_drag_with_hidden_task_keeps_it_at_end() {
        let tasks = seed();
        // A search that hides T1 only.
        let selection = FilterSelection::new().with_search("r");
        let visible = visible_tasks(&tasks, &selection);
        assert_eq!(visible.position("T1"), None);

        // T3 dropped at the top of the done lane.
        let layout = LaneLayout::new()
            .with_lane(Lane::InProgress, ["T2"])
            .with_lane(Lane::Done, ["T3"]);
        let output = reconcile(&tasks, &layout).unwrap();

        assert_eq!(ids(&output), vec!["T2", "T3", "T1"]);
        assert_eq!(output[1].status, Status::Done);
        assert_eq!(output[2], tasks[0]);
    }

    #[test]
    fn test_lanes_walked_in_board_order() {
        let tasks = seed();
        let layout = LaneLayout::new()
            .with_lane(Lane::Done, ["T3"])
            .with_lane(Lane::InProgress, ["T2"]);
        let output = reconcile(&tasks, &layout).unwrap();

        // Layout built done-first still yields todo, inprogress, done order.
        assert_eq!(ids(&output), vec!["T2", "T3", "T1"]);
        assert_eq!(output[2].status, Status::Done);
        assert_eq!(output[2], tasks[0]);
    }

    #[test]
    fn test_reorder_within_lane() {
        let mut tasks = seed();
        tasks.push(task("T4", "Write tests", Status::Todo, &[]));
        let layout = LaneLayout::new()
            .with_lane(Lane::Todo, ["T4", "T3"])
            .with_lane(Lane::InProgress, ["T2"])
            .with_lane(Lane::Done, ["T1"]);
        let output = reconcile(&tasks, &layout).unwrap();
        assert_eq!(ids(&output), vec!["T4", "T3", "T2", "T1"]);
    }

    #[test]
    fn test_duplicate_identifier_is_rejected() {
        let tasks = seed();
        let layout = LaneLayout::new()
            .with_lane(Lane::Todo, ["T3"])
            .with_lane(Lane::Done, ["T3", "T1"]);
        assert!(matches!(
            reconcile(&tasks, &layout),
            Err(BoardError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_unknown_identifier_is_rejected() {
        let tasks = seed();
        let layout = LaneLayout::new().with_lane(Lane::Todo, ["T3", "T9"]);
        assert!(matches!(
            reconcile(&tasks, &layout),
            Err(BoardError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_unrecognized_status_survives() {
        let mut tasks = seed();
        tasks.insert(
            1,
            task("T4", "Old", Status::Unrecognized("archived".to_string()), &[]),
        );
        let visible = visible_tasks(&tasks, &FilterSelection::new());
        let output = reconcile(&tasks, &visible.layout()).unwrap();
        assert_eq!(output.last(), Some(&tasks[1]));
        assert_eq!(output.len(), tasks.len());
    }

    #[test]
    fn test_output_is_permutation_under_random_filters_and_drags() {
        let mut rng = rand::thread_rng();
        let statuses = [Status::Todo, Status::InProgress, Status::Done];
        let priorities = Priority::ALL;

        for round in 0..50 {
            let tasks: Vec<Task> = (1..=rng.gen_range(1..20))
                .map(|n| {
                    let mut t = task(
                        &format!("T{}", n),
                        &Word().fake::<String>(),
                        statuses.choose(&mut rng).cloned().unwrap_or(Status::Todo),
                        &[],
                    );
                    t.priority = *priorities.choose(&mut rng).unwrap_or(&Priority::Low);
                    t
                })
                .collect();

            let selection = FilterSelection::new().with_priority(match round % 4 {
                0 => PrioritySelector::All,
                1 => PrioritySelector::Only(Priority::Low),
                2 => PrioritySelector::Only(Priority::Medium),
                _ => PrioritySelector::Only(Priority::High),
            });
            let visible = visible_tasks(&tasks, &selection);

            // Scatter the visible identifiers over random lanes and positions.
            let mut shown: Vec<String> = Lane::ALL
                .iter()
                .flat_map(|&lane| visible.lane(lane).iter().map(|t| t.id.clone()))
                .collect();
            shown.shuffle(&mut rng);
            let mut layout = LaneLayout::new();
            for id in shown {
                let lane = *Lane::ALL.choose(&mut rng).unwrap_or(&Lane::Todo);
                layout.lane_mut(lane).push(id);
            }

            let output = reconcile(&tasks, &layout).unwrap();
            assert_eq!(output.len(), tasks.len());
            let mut before: Vec<&str> = ids(&tasks);
            let mut after: Vec<&str> = ids(&output);
            before.sort_unstable();
            after.sort_unstable();
            assert_eq!(before, after);

            // Hidden tasks are untouched.
            for original in tasks.iter().filter(|t| !selection.matches(t)) {
                let kept = output.iter().find(|t| t.id == original.id);
                assert_eq!(kept, Some(original));
            }
        }
    }
}
