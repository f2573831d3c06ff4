//! Index lifecycle management
//!
//! One `IndexManager` owns the on-disk index for the life of the process:
//! exactly one writer handle, any number of point-in-time read snapshots.
//! Every mutation commits before returning, so a fresh snapshot always sees
//! it. Writes after `close()` fail with `IndexClosed`; closing twice is a
//! no-op.

use crate::search::config::SearchConfig;
use crate::search::document::{EntryKind, SchemaFields, SearchDocument};
use crate::search::error::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tantivy::collector::Count;
use tantivy::query::AllQuery;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Searcher, Term};
use tokio::sync::RwLock;

/// Index statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Total number of live documents in the index
    pub total_documents: u64,

    /// Index size in bytes
    pub index_size_bytes: u64,

    /// Number of segments
    pub num_segments: usize,
}

/// Manages the tantivy index behind the search service
pub struct IndexManager {
    /// Resolved schema field handles
    fields: SchemaFields,

    /// The process-wide writer handle; `None` once closed
    writer: RwLock<Option<IndexWriter>>,

    /// Reader with manual reload; `snapshot()` reloads explicitly so a new
    /// snapshot always sees the latest commit
    reader: IndexReader,

    config: SearchConfig,
}

impl IndexManager {
    /// Open the index at the configured path, creating it if absent.
    pub async fn open(config: SearchConfig) -> SearchResult<Self> {
        std::fs::create_dir_all(&config.index_path).map_err(|e| {
            SearchError::IndexInitFailed(format!("failed to create index directory: {}", e))
        })?;

        let fields = SchemaFields::new();

        let index = if Self::index_exists(&config.index_path) {
            Index::open_in_dir(&config.index_path).map_err(|e| {
                SearchError::IndexInitFailed(format!("failed to open existing index: {}", e))
            })?
        } else {
            Index::create_in_dir(&config.index_path, fields.schema.clone()).map_err(|e| {
                SearchError::IndexInitFailed(format!("failed to create new index: {}", e))
            })?
        };

        let writer = index
            .writer(config.writer_heap_size)
            .map_err(|e| SearchError::IndexInitFailed(format!("failed to create writer: {}", e)))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| SearchError::IndexInitFailed(format!("failed to create reader: {}", e)))?;

        tracing::info!(path = %config.index_path.display(), "search index opened");

        Ok(Self {
            fields,
            writer: RwLock::new(Some(writer)),
            reader,
            config,
        })
    }

    fn index_exists(path: &Path) -> bool {
        path.join("meta.json").exists()
    }

    pub fn fields(&self) -> &SchemaFields {
        &self.fields
    }

    /// Insert or replace the document keyed by `(kind, id)`, then commit.
    pub async fn upsert(&self, document: &SearchDocument) -> SearchResult<()> {
        let tantivy_doc = document.to_tantivy_doc(&self.fields);

        let mut guard = self.writer.write().await;
        let writer = guard.as_mut().ok_or(SearchError::IndexClosed)?;

        // Replace-by-key: drop any prior document sharing the identity
        writer.delete_term(Term::from_field_text(self.fields.key, &document.key()));

        writer
            .add_document(tantivy_doc)
            .map_err(|e| SearchError::IndexingFailed(format!("failed to add document: {}", e)))?;

        writer
            .commit()
            .map_err(|e| SearchError::IndexingFailed(format!("failed to commit document: {}", e)))?;

        Ok(())
    }

    /// Remove the document for `(kind, id)` if present; absent is a no-op.
    pub async fn delete(&self, kind: EntryKind, id: &str) -> SearchResult<()> {
        let mut guard = self.writer.write().await;
        let writer = guard.as_mut().ok_or(SearchError::IndexClosed)?;

        let key = format!("{}:{}", kind, id);
        writer.delete_term(Term::from_field_text(self.fields.key, &key));

        writer
            .commit()
            .map_err(|e| SearchError::DeletionFailed(format!("failed to commit deletion: {}", e)))?;

        Ok(())
    }

    /// Remove every document. Only the rebuild path calls this.
    pub async fn clear_all(&self) -> SearchResult<()> {
        let mut guard = self.writer.write().await;
        let writer = guard.as_mut().ok_or(SearchError::IndexClosed)?;

        writer
            .delete_all_documents()
            .map_err(|e| SearchError::DeletionFailed(format!("failed to clear index: {}", e)))?;
        writer
            .commit()
            .map_err(|e| SearchError::DeletionFailed(format!("failed to commit clear: {}", e)))?;

        Ok(())
    }

    /// An immutable, point-in-time view including every committed write.
    ///
    /// Already-open snapshots never change; callers wanting to observe a
    /// later commit take a new one.
    pub fn snapshot(&self) -> SearchResult<Searcher> {
        self.reader
            .reload()
            .map_err(|e| SearchError::SearchFailed(format!("failed to reload reader: {}", e)))?;
        Ok(self.reader.searcher())
    }

    /// Release the writer handle. Safe to call once at shutdown; calling
    /// again is a no-op.
    pub async fn close(&self) -> SearchResult<()> {
        let mut guard = self.writer.write().await;
        if let Some(mut writer) = guard.take() {
            writer
                .commit()
                .map_err(|e| SearchError::IndexingFailed(format!("failed to commit on close: {}", e)))?;
            tracing::info!("search index closed");
        }
        Ok(())
    }

    /// Get index statistics
    pub async fn stats(&self) -> SearchResult<IndexStats> {
        let searcher = self.snapshot()?;

        let total_documents = searcher
            .search(&AllQuery, &Count)
            .map_err(|e| SearchError::SearchFailed(format!("failed to count documents: {}", e)))?
            as u64;

        let num_segments = searcher.segment_readers().len();

        let index_size_bytes = std::fs::read_dir(&self.config.index_path)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .filter_map(|e| e.metadata().ok())
                    .map(|m| m.len())
                    .sum()
            })
            .unwrap_or(0);

        Ok(IndexStats {
            total_documents,
            index_size_bytes,
            num_segments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Task};
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> SearchConfig {
        SearchConfig {
            index_path: dir.path().to_path_buf(),
            ..Default::default()
        }
    }

    fn task_doc(title: &str) -> SearchDocument {
        let task = Task::new(title.to_string(), "details".to_string(), Priority::Low);
        SearchDocument::from(&task)
    }

    #[tokio::test]
    async fn test_open_creates_index() {
        let dir = TempDir::new().unwrap();
        let manager = IndexManager::open(test_config(&dir)).await;
        assert!(manager.is_ok());
        assert!(dir.path().join("meta.json").exists());
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let dir = TempDir::new().unwrap();
        {
            let manager = IndexManager::open(test_config(&dir)).await.unwrap();
            manager.upsert(&task_doc("persisted")).await.unwrap();
            manager.close().await.unwrap();
        }

        // Second open finds the existing store and its document
        let manager = IndexManager::open(test_config(&dir)).await.unwrap();
        let stats = manager.stats().await.unwrap();
        assert_eq!(stats.total_documents, 1);
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_key() {
        let dir = TempDir::new().unwrap();
        let manager = IndexManager::open(test_config(&dir)).await.unwrap();

        let mut doc = task_doc("first title");
        manager.upsert(&doc).await.unwrap();
        doc.primary_text = "second title".to_string();
        manager.upsert(&doc).await.unwrap();

        let stats = manager.stats().await.unwrap();
        assert_eq!(stats.total_documents, 1);
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let dir = TempDir::new().unwrap();
        let manager = IndexManager::open(test_config(&dir)).await.unwrap();

        let result = manager.delete(EntryKind::Task, "no-such-id").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_blocks_writes() {
        let dir = TempDir::new().unwrap();
        let manager = IndexManager::open(test_config(&dir)).await.unwrap();

        manager.close().await.unwrap();
        manager.close().await.unwrap();

        let err = manager.upsert(&task_doc("late")).await.unwrap_err();
        assert!(matches!(err, SearchError::IndexClosed));
    }

    #[tokio::test]
    async fn test_clear_all_empties_index() {
        let dir = TempDir::new().unwrap();
        let manager = IndexManager::open(test_config(&dir)).await.unwrap();

        manager.upsert(&task_doc("one")).await.unwrap();
        manager.upsert(&task_doc("two")).await.unwrap();
        manager.clear_all().await.unwrap();

        let stats = manager.stats().await.unwrap();
        assert_eq!(stats.total_documents, 0);
    }
}
