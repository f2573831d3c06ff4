//! Unified full-text search over the five entity kinds
//!
//! One tantivy index holds wiki pages, tasks, calendar events, journal
//! entries, and operations as documents sharing a canonical schema. The
//! index is a derived, rebuildable cache beside the relational store of
//! record, never a source of truth.
//!
//! ```text
//! entity create/update/delete ──▶ mapper ──▶ IndexManager ──▶ durable index
//! search text + SearchFilter ──▶ sanitizer ──▶ query builder ──▶ snapshot
//!                                                  │
//!                                        ranked SearchHit list ◀┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use pim_search::models::{Priority, Task};
//! use pim_search::search::{SearchConfig, SearchFilter, SearchService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = SearchService::open(SearchConfig::default()).await?;
//!
//!     let task = Task::new(
//!         "Kickoff meeting".to_string(),
//!         "Agenda and logistics".to_string(),
//!         Priority::High,
//!     );
//!     service.index(&task).await?;
//!
//!     // A one-edit misspelling still matches
//!     let hits = service.search("kickof", &SearchFilter::default()).await?;
//!     println!("{} hits", hits.len());
//!
//!     service.close().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod document;
mod error;
mod index;
mod query;
mod sanitize;
mod service;

pub use config::{SearchConfig, SearchConfigBuilder};
pub use document::{build_schema, EntryAttrs, EntryKind, SchemaFields, SearchDocument};
pub use error::{InvalidQuery, SearchError, SearchResult};
pub use index::{IndexManager, IndexStats};
pub use query::{SearchFilter, DEFAULT_MAX_RESULTS};
pub use sanitize::{sanitize, SanitizedQuery};
pub use service::{RebuildReport, SearchHit, SearchService};
