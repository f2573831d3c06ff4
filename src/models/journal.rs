use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dated journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier
    pub id: Uuid,

    /// Entry title
    pub title: String,

    /// Entry body
    pub content: String,

    /// Day this entry is about
    pub date: NaiveDate,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Create a new journal entry for the given day
    pub fn new(title: String, content: String, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            date,
            created_at: Utc::now(),
        }
    }
}
