//! Canonical search documents and the tantivy schema behind them
//!
//! Every entity kind maps into one `SearchDocument`: a pair of analyzed
//! text fields (plus an optional auxiliary one), a catch-all combined field,
//! and a kind-specific set of exact-match attributes. The `(kind, id)` pair
//! is the identity the index upserts and deletes by.

use crate::models::{CalendarEvent, JournalEntry, Operation, Task, WikiPage};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};
use tantivy::schema::{Field, Schema, FAST, INDEXED, STORED, STRING, TEXT};
use tantivy::TantivyDocument;

// Field name constants
pub const FIELD_KEY: &str = "key";
pub const FIELD_ID: &str = "id";
pub const FIELD_KIND: &str = "kind";
pub const FIELD_PRIMARY: &str = "primary_text";
pub const FIELD_BODY: &str = "body_text";
pub const FIELD_AUX: &str = "auxiliary_text";
pub const FIELD_COMBINED: &str = "combined_text";
pub const FIELD_REGION: &str = "region";
pub const FIELD_OPERATION_ID: &str = "operation_id";
pub const FIELD_PRIORITY: &str = "priority";
pub const FIELD_STATUS: &str = "status";
pub const FIELD_DUE_DATE: &str = "due_date";
pub const FIELD_START_TIME: &str = "start_time";
pub const FIELD_END_TIME: &str = "end_time";
pub const FIELD_DATE: &str = "date";
pub const FIELD_UPDATED_AT: &str = "updated_at";

/// The five indexable entity kinds.
///
/// The lowercase `Display` form is the exact value stored in the `kind`
/// field, so filters compare against it literally.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    EnumCount,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Wiki,
    Task,
    Event,
    Journal,
    Operation,
}

/// Kind-specific exact-match attributes.
///
/// Enum/priority values are carried as their lowercase display strings,
/// which is exactly what the raw-tokenized index fields store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntryAttrs {
    Wiki {
        region: Option<String>,
        operation_id: Option<String>,
        updated_at: DateTime<Utc>,
    },
    Task {
        priority: String,
        status: String,
        operation_id: Option<String>,
        due_date: Option<DateTime<Utc>>,
    },
    Event {
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    },
    Journal {
        date: NaiveDate,
    },
    Operation {
        status: String,
        priority: String,
    },
}

impl EntryAttrs {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryAttrs::Wiki { .. } => EntryKind::Wiki,
            EntryAttrs::Task { .. } => EntryKind::Task,
            EntryAttrs::Event { .. } => EntryKind::Event,
            EntryAttrs::Journal { .. } => EntryKind::Journal,
            EntryAttrs::Operation { .. } => EntryKind::Operation,
        }
    }
}

/// The canonical indexable unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Stable external identity, unique per `(kind, id)`
    pub id: String,

    /// Title or name; analyzed and stored
    pub primary_text: String,

    /// Content, description, or purpose; analyzed and stored
    pub body_text: String,

    /// Location or outcome, empty for kinds without one
    pub auxiliary_text: String,

    /// Kind-specific exact-match attributes
    pub attrs: EntryAttrs,
}

impl SearchDocument {
    pub fn kind(&self) -> EntryKind {
        self.attrs.kind()
    }

    /// The upsert/delete term, e.g. `task:7d3e…`
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind(), self.id)
    }

    /// Catch-all text: primary + body (+ auxiliary where present)
    fn combined_text(&self) -> String {
        let mut combined =
            String::with_capacity(self.primary_text.len() + self.body_text.len() + 1);
        combined.push_str(&self.primary_text);
        if !self.body_text.is_empty() {
            combined.push(' ');
            combined.push_str(&self.body_text);
        }
        if !self.auxiliary_text.is_empty() {
            combined.push(' ');
            combined.push_str(&self.auxiliary_text);
        }
        combined
    }

    /// Convert to a tantivy document against the resolved schema handles
    pub fn to_tantivy_doc(&self, fields: &SchemaFields) -> TantivyDocument {
        let mut doc = TantivyDocument::new();

        doc.add_text(fields.key, self.key());
        doc.add_text(fields.id, &self.id);
        doc.add_text(fields.kind, self.kind().to_string());
        doc.add_text(fields.primary_text, &self.primary_text);
        doc.add_text(fields.body_text, &self.body_text);
        doc.add_text(fields.auxiliary_text, &self.auxiliary_text);
        doc.add_text(fields.combined_text, self.combined_text());

        match &self.attrs {
            EntryAttrs::Wiki {
                region,
                operation_id,
                updated_at,
            } => {
                if let Some(region) = region {
                    doc.add_text(fields.region, region);
                }
                if let Some(operation_id) = operation_id {
                    doc.add_text(fields.operation_id, operation_id);
                }
                doc.add_date(fields.updated_at, to_index_date(*updated_at));
            }
            EntryAttrs::Task {
                priority,
                status,
                operation_id,
                due_date,
            } => {
                doc.add_text(fields.priority, priority);
                doc.add_text(fields.status, status);
                if let Some(operation_id) = operation_id {
                    doc.add_text(fields.operation_id, operation_id);
                }
                if let Some(due) = due_date {
                    doc.add_date(fields.due_date, to_index_date(*due));
                }
            }
            EntryAttrs::Event {
                start_time,
                end_time,
            } => {
                doc.add_date(fields.start_time, to_index_date(*start_time));
                doc.add_date(fields.end_time, to_index_date(*end_time));
            }
            EntryAttrs::Journal { date } => {
                let midnight = date.and_time(NaiveTime::MIN).and_utc();
                doc.add_date(fields.date, to_index_date(midnight));
            }
            EntryAttrs::Operation { status, priority } => {
                doc.add_text(fields.status, status);
                doc.add_text(fields.priority, priority);
            }
        }

        doc
    }
}

fn to_index_date(dt: DateTime<Utc>) -> tantivy::DateTime {
    tantivy::DateTime::from_timestamp_secs(dt.timestamp())
}

impl From<&WikiPage> for SearchDocument {
    fn from(page: &WikiPage) -> Self {
        Self {
            id: page.id.to_string(),
            primary_text: page.title.clone(),
            body_text: page.content.clone(),
            auxiliary_text: String::new(),
            attrs: EntryAttrs::Wiki {
                region: page.region.clone(),
                operation_id: page.operation_id.map(|id| id.to_string()),
                updated_at: page.updated_at,
            },
        }
    }
}

impl From<&Task> for SearchDocument {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            primary_text: task.title.clone(),
            body_text: task.description.clone(),
            auxiliary_text: String::new(),
            attrs: EntryAttrs::Task {
                priority: task.priority.to_string(),
                status: task.status.to_string(),
                operation_id: task.operation_id.map(|id| id.to_string()),
                due_date: task.due_date,
            },
        }
    }
}

impl From<&CalendarEvent> for SearchDocument {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            id: event.id.to_string(),
            primary_text: event.title.clone(),
            body_text: event.description.clone(),
            auxiliary_text: event.location.clone().unwrap_or_default(),
            attrs: EntryAttrs::Event {
                start_time: event.start_time,
                end_time: event.end_time,
            },
        }
    }
}

impl From<&JournalEntry> for SearchDocument {
    fn from(entry: &JournalEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            primary_text: entry.title.clone(),
            body_text: entry.content.clone(),
            auxiliary_text: String::new(),
            attrs: EntryAttrs::Journal { date: entry.date },
        }
    }
}

impl From<&Operation> for SearchDocument {
    fn from(operation: &Operation) -> Self {
        // The operation's `name` aliases into primary_text; hits read their
        // title from there like every other kind.
        Self {
            id: operation.id.to_string(),
            primary_text: operation.name.clone(),
            body_text: operation.purpose.clone(),
            auxiliary_text: operation.outcome.clone().unwrap_or_default(),
            attrs: EntryAttrs::Operation {
                status: operation.status.to_string(),
                priority: operation.priority.to_string(),
            },
        }
    }
}

/// Build the unified search schema
pub fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();

    // Identity - raw strings, exact match only
    schema_builder.add_text_field(FIELD_KEY, STRING);
    schema_builder.add_text_field(FIELD_ID, STRING | STORED);
    schema_builder.add_text_field(FIELD_KIND, STRING | STORED);

    // Analyzed text fields
    schema_builder.add_text_field(FIELD_PRIMARY, TEXT | STORED);
    schema_builder.add_text_field(FIELD_BODY, TEXT | STORED);
    schema_builder.add_text_field(FIELD_AUX, TEXT | STORED);
    schema_builder.add_text_field(FIELD_COMBINED, TEXT);

    // Exact-match attributes
    schema_builder.add_text_field(FIELD_REGION, STRING | STORED);
    schema_builder.add_text_field(FIELD_OPERATION_ID, STRING | STORED);
    schema_builder.add_text_field(FIELD_PRIORITY, STRING | STORED);
    schema_builder.add_text_field(FIELD_STATUS, STRING | STORED);

    // Date attributes, projection only
    schema_builder.add_date_field(FIELD_DUE_DATE, INDEXED | STORED | FAST);
    schema_builder.add_date_field(FIELD_START_TIME, INDEXED | STORED | FAST);
    schema_builder.add_date_field(FIELD_END_TIME, INDEXED | STORED | FAST);
    schema_builder.add_date_field(FIELD_DATE, INDEXED | STORED | FAST);
    schema_builder.add_date_field(FIELD_UPDATED_AT, INDEXED | STORED | FAST);

    schema_builder.build()
}

/// Resolved field handles, cached once per index
#[derive(Debug, Clone)]
pub struct SchemaFields {
    pub schema: Schema,
    pub key: Field,
    pub id: Field,
    pub kind: Field,
    pub primary_text: Field,
    pub body_text: Field,
    pub auxiliary_text: Field,
    pub combined_text: Field,
    pub region: Field,
    pub operation_id: Field,
    pub priority: Field,
    pub status: Field,
    pub due_date: Field,
    pub start_time: Field,
    pub end_time: Field,
    pub date: Field,
    pub updated_at: Field,
}

impl SchemaFields {
    pub fn new() -> Self {
        let schema = build_schema();
        // The schema is built right above; every lookup is infallible.
        let field = |name: &str| schema.get_field(name).expect(name);

        Self {
            key: field(FIELD_KEY),
            id: field(FIELD_ID),
            kind: field(FIELD_KIND),
            primary_text: field(FIELD_PRIMARY),
            body_text: field(FIELD_BODY),
            auxiliary_text: field(FIELD_AUX),
            combined_text: field(FIELD_COMBINED),
            region: field(FIELD_REGION),
            operation_id: field(FIELD_OPERATION_ID),
            priority: field(FIELD_PRIORITY),
            status: field(FIELD_STATUS),
            due_date: field(FIELD_DUE_DATE),
            start_time: field(FIELD_START_TIME),
            end_time: field(FIELD_END_TIME),
            date: field(FIELD_DATE),
            updated_at: field(FIELD_UPDATED_AT),
            schema,
        }
    }
}

impl Default for SchemaFields {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use chrono::Utc;

    #[test]
    fn test_schema_building() {
        let schema = build_schema();
        assert!(schema.get_field(FIELD_KEY).is_ok());
        assert!(schema.get_field(FIELD_PRIMARY).is_ok());
        assert!(schema.get_field(FIELD_COMBINED).is_ok());
        assert!(schema.get_field(FIELD_OPERATION_ID).is_ok());
    }

    #[test]
    fn test_task_to_document() {
        let task = Task::new(
            "Pack supplies".to_string(),
            "Batteries and water".to_string(),
            Priority::High,
        );

        let doc = SearchDocument::from(&task);
        assert_eq!(doc.kind(), EntryKind::Task);
        assert_eq!(doc.primary_text, "Pack supplies");
        assert_eq!(doc.key(), format!("task:{}", task.id));
        match &doc.attrs {
            EntryAttrs::Task {
                priority, status, ..
            } => {
                assert_eq!(priority, "high");
                assert_eq!(status, "todo");
            }
            other => panic!("unexpected attrs: {other:?}"),
        }
    }

    #[test]
    fn test_operation_name_aliases_into_primary_text() {
        let operation = Operation::new(
            "Northern survey".to_string(),
            "Map the northern region".to_string(),
            Priority::Medium,
        );

        let doc = SearchDocument::from(&operation);
        assert_eq!(doc.primary_text, "Northern survey");
        assert_eq!(doc.kind(), EntryKind::Operation);
    }

    #[test]
    fn test_absent_text_maps_to_empty_string() {
        let event = CalendarEvent::new(
            "Standup".to_string(),
            String::new(),
            Utc::now(),
            Utc::now(),
        );

        let doc = SearchDocument::from(&event);
        assert!(doc.body_text.is_empty());
        assert!(doc.auxiliary_text.is_empty());
    }
}
