use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A wiki page: free-form notes, optionally scoped to a region and an
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiPage {
    /// Unique identifier
    pub id: Uuid,

    /// Page title
    pub title: String,

    /// Page body
    pub content: String,

    /// Geographic/organizational region the page belongs to
    pub region: Option<String>,

    /// Operation this page is attached to, if any
    pub operation_id: Option<Uuid>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl WikiPage {
    /// Create a new wiki page
    pub fn new(title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            region: None,
            operation_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_operation(mut self, operation_id: Uuid) -> Self {
        self.operation_id = Some(operation_id);
        self
    }
}
