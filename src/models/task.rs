use crate::models::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// A task item with priority, workflow status, and optional due date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: Uuid,

    /// Short task title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Priority level
    pub priority: Priority,

    /// Workflow status
    pub status: TaskStatus,

    /// Operation this task belongs to, if any
    pub operation_id: Option<Uuid>,

    /// Due date, if scheduled
    pub due_date: Option<DateTime<Utc>>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task in the `Todo` state
    pub fn new(title: String, description: String, priority: Priority) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            priority,
            status: TaskStatus::Todo,
            operation_id: None,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_operation(mut self, operation_id: Uuid) -> Self {
        self.operation_id = Some(operation_id);
        self
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Check if the task is still open
    pub fn is_open(&self) -> bool {
        matches!(self.status, TaskStatus::Todo | TaskStatus::InProgress)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new(
            "Write report".to_string(),
            "Quarterly summary".to_string(),
            Priority::High,
        );

        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.is_open());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_status_display_is_lowercase() {
        assert_eq!(TaskStatus::InProgress.to_string(), "inprogress");
        assert_eq!(Priority::Urgent.to_string(), "urgent");
    }
}
