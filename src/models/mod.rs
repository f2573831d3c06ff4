//! Entity models mirrored by the search index.
//!
//! These are seam-level representations of the five record kinds the
//! application persists relationally. The search engine never writes them;
//! it only reads their fields when mapping them to index documents.

pub mod event;
pub mod journal;
pub mod operation;
pub mod task;
pub mod wiki;

pub use event::*;
pub use journal::*;
pub use operation::*;
pub use task::*;
pub use wiki::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Priority vocabulary shared by tasks and operations.
///
/// The lowercase `Display` form is also the exact-match string stored in
/// the search index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}
