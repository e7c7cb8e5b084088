//! Task data types.
//!
//! This module defines the task record persisted in the durable slot, the lane
//! and priority enums, and the editable field set used by create and update.

use super::BoardError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three board columns.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lane {
    Todo,
    InProgress,
    Done,
}

impl Lane {
    /// Lanes in board order. Reconciliation walks lanes in this order.
    pub const ALL: [Lane; 3] = [Lane::Todo, Lane::InProgress, Lane::Done];

    /// Position of the lane in [`Lane::ALL`].
    ///
    pub fn index(self) -> usize {
        match self {
            Lane::Todo => 0,
            Lane::InProgress => 1,
            Lane::Done => 2,
        }
    }

    /// Stored status string for the lane.
    ///
    pub fn as_str(self) -> &'static str {
        match self {
            Lane::Todo => "todo",
            Lane::InProgress => "inprogress",
            Lane::Done => "done",
        }
    }

    /// Column heading shown to the user.
    ///
    pub fn label(self) -> &'static str {
        match self {
            Lane::Todo => "To Do",
            Lane::InProgress => "In Progress",
            Lane::Done => "Done",
        }
    }

    /// Lane to the right, if any.
    ///
    pub fn next(self) -> Option<Lane> {
        Lane::ALL.get(self.index() + 1).copied()
    }

    /// Lane to the left, if any.
    ///
    pub fn previous(self) -> Option<Lane> {
        self.index().checked_sub(1).map(|i| Lane::ALL[i])
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lane {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "to-do" => Ok(Lane::Todo),
            "inprogress" | "in-progress" | "in_progress" | "doing" => Ok(Lane::InProgress),
            "done" => Ok(Lane::Done),
            other => Err(BoardError::Validation(format!("unknown lane '{}'", other))),
        }
    }
}

/// Status of a task as stored.
///
/// A status string outside the three lanes (only reachable through a hand
/// edited or damaged slot) is kept verbatim so the task survives a save.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Todo,
    InProgress,
    Done,
    Unrecognized(String),
}

impl Status {
    /// Lane the task is rendered in, `None` for unrecognized statuses.
    ///
    pub fn lane(&self) -> Option<Lane> {
        match self {
            Status::Todo => Some(Lane::Todo),
            Status::InProgress => Some(Lane::InProgress),
            Status::Done => Some(Lane::Done),
            Status::Unrecognized(_) => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Status::Done)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Unrecognized(raw) => raw,
            known => known.lane().map(Lane::as_str).unwrap_or_default(),
        }
    }
}

impl From<Lane> for Status {
    fn from(lane: Lane) -> Self {
        match lane {
            Lane::Todo => Status::Todo,
            Lane::InProgress => Status::InProgress,
            Lane::Done => Status::Done,
        }
    }
}

impl From<String> for Status {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "todo" => Status::Todo,
            "inprogress" => Status::InProgress,
            "done" => Status::Done,
            _ => Status::Unrecognized(raw),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Next priority in form order, wrapping around.
    ///
    pub fn cycle(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(BoardError::Validation(format!(
                "unknown priority '{}'",
                other
            ))),
        }
    }
}

/// Defines task data structure.
///
/// Field names on disk follow the board document format: the description is
/// stored as `desc`, and both `desc` and `due` are written as empty strings
/// when absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(rename = "desc", default, with = "blank_as_none")]
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, with = "blank_as_none")]
    pub due: Option<String>,
}

impl Task {
    /// Build a task from an identifier and validated fields. New tasks always
    /// start in the todo lane.
    ///
    pub(crate) fn new(id: String, fields: TaskFields) -> Task {
        Task {
            id,
            title: fields.title,
            description: fields.description,
            status: Status::Todo,
            priority: fields.priority,
            tags: fields.tags,
            due: fields.due,
        }
    }

    /// Replace every editable field. Identifier and status are kept.
    ///
    pub(crate) fn apply(&mut self, fields: TaskFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.priority = fields.priority;
        self.tags = fields.tags;
        self.due = fields.due;
    }

    /// Editable fields of this task, e.g. to prefill an edit form.
    ///
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            tags: self.tags.clone(),
            due: self.due.clone(),
        }
    }

    pub fn lane(&self) -> Option<Lane> {
        self.status.lane()
    }
}

/// User supplied task fields for create and update.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub due: Option<String>,
}

impl TaskFields {
    pub fn new(title: impl Into<String>) -> Self {
        TaskFields {
            title: title.into(),
            ..TaskFields::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_due(mut self, due: impl Into<String>) -> Self {
        self.due = Some(due.into());
        self
    }

    /// Trim text fields, turn blank optional fields into `None` and drop
    /// blank tags.
    ///
    pub fn normalized(self) -> Self {
        TaskFields {
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            priority: self.priority,
            tags: self
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            due: non_blank(self.due),
        }
    }

    /// Check required fields. Due dates are opaque and not validated.
    ///
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.title.trim().is_empty() {
            return Err(BoardError::Validation("title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Split comma separated tag input into trimmed, non-empty tags.
///
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional strings stored as `""` when absent.
mod blank_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_order_and_neighbours() {
        assert_eq!(Lane::ALL, [Lane::Todo, Lane::InProgress, Lane::Done]);
        assert_eq!(Lane::Todo.next(), Some(Lane::InProgress));
        assert_eq!(Lane::Done.next(), None);
        assert_eq!(Lane::Todo.previous(), None);
        assert_eq!(Lane::Done.previous(), Some(Lane::InProgress));
    }

    #[test]
    fn test_lane_from_str() {
        assert_eq!("todo".parse::<Lane>().unwrap(), Lane::Todo);
        assert_eq!("In-Progress".parse::<Lane>().unwrap(), Lane::InProgress);
        assert_eq!("done".parse::<Lane>().unwrap(), Lane::Done);
        assert!("later".parse::<Lane>().is_err());
    }

    #[test]
    fn test_status_keeps_unrecognized_value() {
        let status = Status::from("archived".to_string());
        assert_eq!(status, Status::Unrecognized("archived".to_string()));
        assert_eq!(status.lane(), None);
        assert_eq!(String::from(status), "archived");
    }

    #[test]
    fn test_status_known_values() {
        assert_eq!(Status::from("inprogress".to_string()), Status::InProgress);
        assert_eq!(String::from(Status::Done), "done");
        assert!(Status::Done.is_done());
        assert!(!Status::Todo.is_done());
    }

    #[test]
    fn test_priority_from_str_and_cycle() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert_eq!(Priority::High.cycle(), Priority::Low);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_task_serializes_board_document_fields() {
        let task = Task::new("T9".to_string(), TaskFields::new("Write docs"));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], "T9");
        assert_eq!(json["desc"], "");
        assert_eq!(json["due"], "");
        assert_eq!(json["status"], "todo");
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["tags"], serde_json::json!([]));
    }

    #[test]
    fn test_task_deserializes_missing_and_null_fields() {
        let task: Task = serde_json::from_str(
            r#"{"id":"T1","title":"A","status":"done","priority":"low","tags":null}"#,
        )
        .unwrap();
        assert_eq!(task.description, None);
        assert_eq!(task.due, None);
        assert!(task.tags.is_empty());
        assert_eq!(task.status, Status::Done);
    }

    #[test]
    fn test_fields_normalized() {
        let fields = TaskFields::new("  Ship it ")
            .with_description("   ")
            .with_tags(vec![" a ", "", "b"])
            .with_due(" 2024-05-01 ")
            .normalized();
        assert_eq!(fields.title, "Ship it");
        assert_eq!(fields.description, None);
        assert_eq!(fields.tags, vec!["a", "b"]);
        assert_eq!(fields.due.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_fields_validate_rejects_blank_title() {
        assert!(matches!(
            TaskFields::new("   ").validate(),
            Err(BoardError::Validation(_))
        ));
        assert!(TaskFields::new("ok").validate().is_ok());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("ui, css ,,"), vec!["ui", "css"]);
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn test_apply_keeps_id_and_status() {
        let mut task = Task::new("T1".to_string(), TaskFields::new("Old"));
        task.status = Status::Done;
        task.apply(TaskFields::new("New").with_priority(Priority::High));
        assert_eq!(task.id, "T1");
        assert_eq!(task.status, Status::Done);
        assert_eq!(task.title, "New");
        assert_eq!(task.priority, Priority::High);
    }
}
