//! Search filters and query construction

use crate::search::config::SearchConfig;
use crate::search::document::{EntryKind, SchemaFields};
use crate::search::sanitize::SanitizedQuery;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use tantivy::query::{
    BooleanQuery, DisjunctionMaxQuery, EmptyQuery, FuzzyTermQuery, Occur, Query, TermQuery,
};
use tantivy::schema::IndexRecordOption;
use tantivy::Term;

/// Default result cap for a single search.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// Query-time filter options.
///
/// `types` defaults to all five kinds, which behaves identically to "no
/// kind filter": the builder adds a kind clause only for a proper subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Entity kinds to match
    pub types: Vec<EntryKind>,

    /// Exact region match (wiki pages)
    pub region: Option<String>,

    /// Exact operation membership (wiki pages, tasks)
    pub operation_id: Option<String>,

    /// Exact priority match (tasks, operations)
    pub priority: Option<String>,

    /// Exact status match (tasks, operations)
    pub status: Option<String>,

    /// Maximum number of hits to return
    pub max_results: usize,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            types: EntryKind::iter().collect(),
            region: None,
            operation_id: None,
            priority: None,
            status: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given kinds
    pub fn with_types(mut self, types: Vec<EntryKind>) -> Self {
        self.types = types;
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_operation_id(mut self, operation_id: impl ToString) -> Self {
        self.operation_id = Some(operation_id.to_string());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Kinds that actually constrain the query, deduplicated. Empty when
    /// the filter covers every kind (the default).
    fn constraining_kinds(&self) -> Vec<EntryKind> {
        let mut kinds: Vec<EntryKind> = Vec::new();
        for kind in &self.types {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        if kinds.len() >= EntryKind::COUNT {
            return Vec::new();
        }
        kinds
    }
}

/// Build the executable index query for sanitized text plus a filter.
///
/// The text clause and every populated attribute clause are required
/// (AND-level); kinds combine with OR among themselves. With no clauses at
/// all the result is a match-nothing query: an unfiltered empty search must
/// not dump the corpus.
pub fn build_query(
    sanitized: &SanitizedQuery,
    filter: &SearchFilter,
    fields: &SchemaFields,
    config: &SearchConfig,
) -> Box<dyn Query> {
    let mut subqueries: Vec<(Occur, Box<dyn Query>)> = Vec::new();

    if !sanitized.is_empty() {
        let terms = tokenize(sanitized.as_str());
        if !terms.is_empty() {
            subqueries.push((Occur::Must, fuzzy_text_clause(&terms, fields, config)));
        }
    }

    let kinds = filter.constraining_kinds();
    if !kinds.is_empty() {
        let kind_queries: Vec<Box<dyn Query>> = kinds
            .iter()
            .map(|kind| {
                Box::new(TermQuery::new(
                    Term::from_field_text(fields.kind, &kind.to_string()),
                    IndexRecordOption::Basic,
                )) as Box<dyn Query>
            })
            .collect();
        subqueries.push((Occur::Must, Box::new(DisjunctionMaxQuery::new(kind_queries))));
    }

    let exact_clauses = [
        (fields.region, filter.region.as_deref()),
        (fields.operation_id, filter.operation_id.as_deref()),
        (fields.priority, filter.priority.as_deref()),
        (fields.status, filter.status.as_deref()),
    ];
    for (field, value) in exact_clauses {
        if let Some(value) = value {
            subqueries.push((
                Occur::Must,
                Box::new(TermQuery::new(
                    Term::from_field_text(field, value),
                    IndexRecordOption::Basic,
                )),
            ));
        }
    }

    if subqueries.is_empty() {
        Box::new(EmptyQuery)
    } else if subqueries.len() == 1 {
        subqueries.remove(0).1
    } else {
        Box::new(BooleanQuery::new(subqueries))
    }
}

/// Lowercased alphanumeric terms; escapes and wildcard markers drop out
/// here, fuzzy matching covers the near-miss intent.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// OR across every term and every analyzed field, fuzzy per term.
fn fuzzy_text_clause(
    terms: &[String],
    fields: &SchemaFields,
    config: &SearchConfig,
) -> Box<dyn Query> {
    let text_fields = [
        fields.primary_text,
        fields.body_text,
        fields.auxiliary_text,
        fields.combined_text,
    ];

    let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
    for term in terms {
        let distance = if term.chars().count() <= config.fuzzy_distance_cutoff {
            1
        } else {
            2
        };

        for field in text_fields {
            let tantivy_term = Term::from_field_text(field, term);
            clauses.push((
                Occur::Should,
                Box::new(FuzzyTermQuery::new(tantivy_term, distance, true)),
            ));
        }
    }

    Box::new(BooleanQuery::new(clauses))
}
