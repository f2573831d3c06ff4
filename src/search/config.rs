//! Search configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Search engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Path to the search index directory
    pub index_path: PathBuf,

    /// Index writer heap size in bytes (default: 50MB)
    pub writer_heap_size: usize,

    /// Hard cap on results per query, above any filter's `max_results`
    pub max_results: usize,

    /// Maximum raw query length in characters
    pub max_query_len: usize,

    /// Maximum number of wildcard markers (`*`/`?`) per query
    pub max_wildcards: usize,

    /// Snippet length in characters before the ellipsis is appended
    pub snippet_len: usize,

    /// Terms at or below this length fuzzy-match with edit distance 1,
    /// longer terms with edit distance 2
    pub fuzzy_distance_cutoff: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from("./data/search_index"),
            writer_heap_size: 50_000_000, // 50MB
            max_results: 1000,
            max_query_len: 500,
            max_wildcards: 5,
            snippet_len: 150,
            fuzzy_distance_cutoff: 4,
        }
    }
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn index_path(mut self, path: PathBuf) -> Self {
        self.config.index_path = path;
        self
    }

    pub fn writer_heap_size(mut self, size: usize) -> Self {
        self.config.writer_heap_size = size;
        self
    }

    pub fn max_results(mut self, max: usize) -> Self {
        self.config.max_results = max;
        self
    }

    pub fn max_query_len(mut self, len: usize) -> Self {
        self.config.max_query_len = len;
        self
    }

    pub fn max_wildcards(mut self, max: usize) -> Self {
        self.config.max_wildcards = max;
        self
    }

    pub fn snippet_len(mut self, len: usize) -> Self {
        self.config.snippet_len = len;
        self
    }

    pub fn fuzzy_distance_cutoff(mut self, cutoff: usize) -> Self {
        self.config.fuzzy_distance_cutoff = cutoff;
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
