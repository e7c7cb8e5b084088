use super::Task;
use serde::Serialize;

/// Aggregate counts over the whole collection, independent of any filter.
///
/// Tasks with an unrecognized status count as pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub pending: usize,
    #[serde(rename = "completed")]
    pub done: usize,
}

impl Stats {
    pub fn compute(tasks: &[Task]) -> Stats {
        let total = tasks.len();
        let done = tasks.iter().filter(|t| t.status.is_done()).count();
        Stats {
            total,
            pending: total - done,
            done,
        }
    }
}
