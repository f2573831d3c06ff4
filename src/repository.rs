//! Repository seams feeding the rebuild path
//!
//! The relational store of record stays outside this crate; rebuild only
//! needs a way to enumerate every entity of each kind. Entity services own
//! these implementations and call the search service's `index`/`unindex`
//! after their own transactions commit.

use crate::models::{CalendarEvent, JournalEntry, Operation, Task, WikiPage};
use async_trait::async_trait;
use std::sync::Arc;

/// Error surfaced by a repository fetch.
#[derive(Debug, thiserror::Error)]
#[error("repository error: {0}")]
pub struct RepositoryError(pub String);

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

#[async_trait]
pub trait WikiRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<WikiPage>>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Task>>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<CalendarEvent>>;
}

#[async_trait]
pub trait JournalRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<JournalEntry>>;
}

#[async_trait]
pub trait OperationRepository: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Operation>>;
}

/// The five authoritative sources a full rebuild reads from.
#[derive(Clone)]
pub struct SearchSources {
    pub wiki: Arc<dyn WikiRepository>,
    pub tasks: Arc<dyn TaskRepository>,
    pub events: Arc<dyn EventRepository>,
    pub journal: Arc<dyn JournalRepository>,
    pub operations: Arc<dyn OperationRepository>,
}
