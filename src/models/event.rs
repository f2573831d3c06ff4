use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A calendar event with a time range and optional location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Unique identifier
    pub id: Uuid,

    /// Event title
    pub title: String,

    /// Event description
    pub description: String,

    /// Where the event takes place
    pub location: Option<String>,

    /// Start of the event
    pub start_time: DateTime<Utc>,

    /// End of the event
    pub end_time: DateTime<Utc>,
}

impl CalendarEvent {
    /// Create a new event
    pub fn new(
        title: String,
        description: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            location: None,
            start_time,
            end_time,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}
