use crate::models::Priority;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// An operation: a named undertaking that wiki pages and tasks attach to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Unique identifier
    pub id: Uuid,

    /// Operation name
    pub name: String,

    /// What the operation is trying to achieve
    pub purpose: String,

    /// Outcome notes, once known
    pub outcome: Option<String>,

    /// Lifecycle status
    pub status: OperationStatus,

    /// Priority level
    pub priority: Priority,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Operation {
    /// Create a new operation in the `Planning` state
    pub fn new(name: String, purpose: String, priority: Priority) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            purpose,
            outcome: None,
            status: OperationStatus::Planning,
            priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the operation is still in flight
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            OperationStatus::Planning | OperationStatus::Active
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    Planning,
    Active,
    Completed,
    Archived,
}
