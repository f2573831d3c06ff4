//! Search service: the facade entity services and the UI talk to
//!
//! `search` runs sanitize → build → snapshot → project. `index`/`unindex`
//! are the fire-and-forget hooks entity services call after their own
//! transactions commit; a failure here is logged by the caller and never
//! unwinds the entity mutation. `rebuild_all` reconciles drift by clearing
//! the index and repopulating it from the repositories.

use crate::repository::SearchSources;
use crate::search::config::SearchConfig;
use crate::search::document::{EntryKind, SchemaFields, SearchDocument};
use crate::search::error::{SearchError, SearchResult};
use crate::search::index::{IndexManager, IndexStats};
use crate::search::query::{build_query, SearchFilter};
use crate::search::sanitize::sanitize;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tantivy::collector::TopDocs;
use tantivy::schema::{Field, Value};
use tantivy::TantivyDocument;

/// A single ranked search result.
///
/// Only the attribute subset relevant to `kind` is populated; the rest
/// stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub kind: EntryKind,
    pub title: String,
    pub snippet: String,
    pub score: f32,
    pub region: Option<String>,
    pub operation_id: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub date: Option<NaiveDate>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Outcome of a full rebuild.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RebuildReport {
    /// Documents successfully indexed
    pub indexed: usize,

    /// Entities (or whole repository fetches) that failed and were skipped
    pub failed: usize,
}

/// Unified search over all five entity kinds.
pub struct SearchService {
    index_manager: Arc<IndexManager>,
    config: SearchConfig,
}

impl SearchService {
    /// Open (or create) the index and return the service owning it.
    pub async fn open(config: SearchConfig) -> SearchResult<Self> {
        let index_manager = Arc::new(IndexManager::open(config.clone()).await?);
        Ok(Self {
            index_manager,
            config,
        })
    }

    /// Free-text search with typed filters.
    ///
    /// Fails with `SearchError::InvalidQuery` when sanitization rejects the
    /// text. Zero matches return an empty list, not an error. An empty
    /// query with a default filter matches nothing by design.
    pub async fn search(&self, raw: &str, filter: &SearchFilter) -> SearchResult<Vec<SearchHit>> {
        let sanitized = sanitize(raw, &self.config)?;
        let fields = self.index_manager.fields();
        let query = build_query(&sanitized, filter, fields, &self.config);

        let searcher = self.index_manager.snapshot()?;
        let limit = filter.max_results.min(self.config.max_results).max(1);

        let top_docs = searcher
            .search(&*query, &TopDocs::with_limit(limit))
            .map_err(|e| SearchError::SearchFailed(format!("search execution failed: {}", e)))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher
                .doc(doc_address)
                .map_err(|e| SearchError::SearchFailed(format!("failed to retrieve doc: {}", e)))?;

            if let Some(hit) = self.project_hit(&doc, score, fields) {
                hits.push(hit);
            }
        }

        Ok(hits)
    }

    /// Upsert one entity into the index. Called by entity services after
    /// their transaction commits.
    pub async fn index<D: Into<SearchDocument>>(&self, entity: D) -> SearchResult<()> {
        self.index_manager.upsert(&entity.into()).await
    }

    /// Remove the entity's document. Absent documents are a no-op.
    pub async fn unindex(&self, kind: EntryKind, id: &str) -> SearchResult<()> {
        self.index_manager.delete(kind, id).await
    }

    /// Clear the index and repopulate it from every repository.
    ///
    /// Per-entity failures are counted and skipped; the rebuild never
    /// aborts partway. A failing repository fetch counts once and the
    /// remaining repositories still run.
    pub async fn rebuild_all(&self, sources: &SearchSources) -> SearchResult<RebuildReport> {
        self.index_manager.clear_all().await?;

        let mut report = RebuildReport::default();
        let mut documents: Vec<SearchDocument> = Vec::new();

        match sources.wiki.find_all().await {
            Ok(pages) => documents.extend(pages.iter().map(SearchDocument::from)),
            Err(e) => {
                tracing::warn!(error = %e, "rebuild: wiki repository fetch failed");
                report.failed += 1;
            }
        }
        match sources.tasks.find_all().await {
            Ok(tasks) => documents.extend(tasks.iter().map(SearchDocument::from)),
            Err(e) => {
                tracing::warn!(error = %e, "rebuild: task repository fetch failed");
                report.failed += 1;
            }
        }
        match sources.events.find_all().await {
            Ok(events) => documents.extend(events.iter().map(SearchDocument::from)),
            Err(e) => {
                tracing::warn!(error = %e, "rebuild: event repository fetch failed");
                report.failed += 1;
            }
        }
        match sources.journal.find_all().await {
            Ok(entries) => documents.extend(entries.iter().map(SearchDocument::from)),
            Err(e) => {
                tracing::warn!(error = %e, "rebuild: journal repository fetch failed");
                report.failed += 1;
            }
        }
        match sources.operations.find_all().await {
            Ok(operations) => documents.extend(operations.iter().map(SearchDocument::from)),
            Err(e) => {
                tracing::warn!(error = %e, "rebuild: operation repository fetch failed");
                report.failed += 1;
            }
        }

        for document in &documents {
            match self.index_manager.upsert(document).await {
                Ok(()) => report.indexed += 1,
                Err(e) => {
                    tracing::warn!(key = %document.key(), error = %e, "rebuild: upsert failed, skipping");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            indexed = report.indexed,
            failed = report.failed,
            "search index rebuilt"
        );

        Ok(report)
    }

    /// Get index statistics
    pub async fn stats(&self) -> SearchResult<IndexStats> {
        self.index_manager.stats().await
    }

    /// Release the index writer at shutdown. Idempotent.
    pub async fn close(&self) -> SearchResult<()> {
        self.index_manager.close().await
    }

    /// Map a stored document back to a typed hit. Unknown kind values are
    /// skipped, not fatal.
    fn project_hit(
        &self,
        doc: &TantivyDocument,
        score: f32,
        fields: &SchemaFields,
    ) -> Option<SearchHit> {
        let kind_str = get_str(doc, fields.kind)?;
        let kind = match EntryKind::from_str(&kind_str) {
            Ok(kind) => kind,
            Err(_) => {
                tracing::debug!(kind = %kind_str, "skipping document with unknown kind");
                return None;
            }
        };

        let id = get_str(doc, fields.id).unwrap_or_default();
        let title = get_str(doc, fields.primary_text).unwrap_or_default();

        let body = get_str(doc, fields.body_text).unwrap_or_default();
        let auxiliary = get_str(doc, fields.auxiliary_text).unwrap_or_default();
        let snippet_source = if !body.is_empty() { body } else { auxiliary };
        let snippet = make_snippet(&snippet_source, self.config.snippet_len);

        Some(SearchHit {
            id,
            kind,
            title,
            snippet,
            score,
            region: get_str(doc, fields.region),
            operation_id: get_str(doc, fields.operation_id),
            priority: get_str(doc, fields.priority),
            status: get_str(doc, fields.status),
            due_date: get_date(doc, fields.due_date),
            start_time: get_date(doc, fields.start_time),
            end_time: get_date(doc, fields.end_time),
            date: get_date(doc, fields.date).map(|dt| dt.date_naive()),
            updated_at: get_date(doc, fields.updated_at),
        })
    }
}

fn get_str(doc: &TantivyDocument, field: Field) -> Option<String> {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn get_date(doc: &TantivyDocument, field: Field) -> Option<DateTime<Utc>> {
    doc.get_first(field)
        .and_then(|v| v.as_datetime())
        .and_then(|dt| DateTime::from_timestamp(dt.into_timestamp_secs(), 0))
}

/// First `limit` characters, with an ellipsis when anything was cut.
fn make_snippet(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut snippet: String = text.chars().take(limit).collect();
    snippet.push_str("...");
    snippet
}
