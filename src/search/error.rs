//! Error types for search operations

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// User query rejected by the sanitizer; recoverable, surface to the user
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] InvalidQuery),

    /// Index initialization failed
    #[error("index initialization failed: {0}")]
    IndexInitFailed(String),

    /// Writer handle already released by `close()`
    #[error("index is closed")]
    IndexClosed,

    /// Document indexing failed
    #[error("document indexing failed: {0}")]
    IndexingFailed(String),

    /// Document deletion failed
    #[error("document deletion failed: {0}")]
    DeletionFailed(String),

    /// Search execution failed
    #[error("search execution failed: {0}")]
    SearchFailed(String),

    /// Underlying index storage error
    #[error("index I/O error: {0}")]
    IndexIo(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons the sanitizer rejects raw query text.
///
/// These are user-input validation failures, never retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum InvalidQuery {
    /// Query text exceeds the configured length cap
    #[error("query is {length} characters, maximum is {max}")]
    TooLong { length: usize, max: usize },

    /// Query contains too many wildcard markers
    #[error("query has {count} wildcard markers, maximum is {max}")]
    TooManyWildcards { count: usize, max: usize },

    /// Query mixes statement keywords with statement separators
    #[error("query contains disallowed statement keywords")]
    ForbiddenKeywords,
}

impl From<tantivy::TantivyError> for SearchError {
    fn from(err: tantivy::TantivyError) -> Self {
        SearchError::IndexIo(err.to_string())
    }
}
