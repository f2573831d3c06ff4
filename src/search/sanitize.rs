//! Query sanitization
//!
//! Raw search-box text passes through here before any query is built. The
//! sanitizer only guarantees the text is safe and bounded; it knows nothing
//! about filters or ranking.
//!
//! Rules, applied in order:
//! 1. trim whitespace; an empty string is valid and matches nothing
//! 2. reject over-long input
//! 3. reject too many wildcard markers
//! 4. escape reserved query-syntax characters, wildcards excepted
//! 5. reject statement keywords combined with statement separators

use crate::search::config::SearchConfig;
use crate::search::error::InvalidQuery;
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters with meaning in the index query syntax. Wildcard markers
/// (`*`, `?`) are deliberately absent; they are counted, not escaped.
const RESERVED: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', ':', '\\', '/',
];

static DML_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(select|insert|update|delete|drop|alter|create|truncate|exec)\b")
        .expect("statement keyword pattern")
});

/// Query text that has passed sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedQuery(String);

impl SanitizedQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validate and normalize raw user query text.
///
/// An empty (or whitespace-only) query is valid and yields zero results
/// downstream; it is not an error.
pub fn sanitize(raw: &str, config: &SearchConfig) -> Result<SanitizedQuery, InvalidQuery> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(SanitizedQuery(String::new()));
    }

    let length = trimmed.chars().count();
    if length > config.max_query_len {
        return Err(InvalidQuery::TooLong {
            length,
            max: config.max_query_len,
        });
    }

    let count = trimmed.chars().filter(|c| matches!(c, '*' | '?')).count();
    if count > config.max_wildcards {
        return Err(InvalidQuery::TooManyWildcards {
            count,
            max: config.max_wildcards,
        });
    }

    let escaped = escape_reserved(trimmed);

    // Defense in depth: the sanitized text must stay inert even if it is
    // ever forwarded to a keyword-sensitive secondary sink.
    if escaped.contains(';') && DML_KEYWORD.is_match(&escaped) {
        return Err(InvalidQuery::ForbiddenKeywords);
    }

    Ok(SanitizedQuery(escaped))
}

fn escape_reserved(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SearchConfig {
        SearchConfig::default()
    }

    #[test]
    fn test_empty_query_is_valid() {
        let sanitized = sanitize("   ", &config()).unwrap();
        assert!(sanitized.is_empty());
    }

    #[test]
    fn test_length_guard() {
        let long = "a".repeat(501);
        match sanitize(&long, &config()) {
            Err(InvalidQuery::TooLong { length, max }) => {
                assert_eq!(length, 501);
                assert_eq!(max, 500);
            }
            other => panic!("expected TooLong, got {other:?}"),
        }

        let exactly_max = "a".repeat(500);
        assert!(sanitize(&exactly_max, &config()).is_ok());
    }

    #[test]
    fn test_wildcard_guard() {
        assert!(sanitize("a* b* c* d* e*", &config()).is_ok());
        match sanitize("a* b* c* d* e* f?", &config()) {
            Err(InvalidQuery::TooManyWildcards { count, max }) => {
                assert_eq!(count, 6);
                assert_eq!(max, 5);
            }
            other => panic!("expected TooManyWildcards, got {other:?}"),
        }
    }

    #[test]
    fn test_reserved_characters_escaped() {
        let sanitized = sanitize("title:(foo)", &config()).unwrap();
        assert_eq!(sanitized.as_str(), "title\\:\\(foo\\)");
    }

    #[test]
    fn test_wildcards_survive_escaping() {
        let sanitized = sanitize("kick*", &config()).unwrap();
        assert_eq!(sanitized.as_str(), "kick*");
    }

    #[test]
    fn test_forbidden_keyword_with_separator() {
        assert!(matches!(
            sanitize("foo; DROP table", &config()),
            Err(InvalidQuery::ForbiddenKeywords)
        ));
        assert!(matches!(
            sanitize("x; select y", &config()),
            Err(InvalidQuery::ForbiddenKeywords)
        ));
    }

    #[test]
    fn test_keyword_without_separator_is_allowed() {
        // "delete old drafts" is a perfectly good note search
        assert!(sanitize("delete old drafts", &config()).is_ok());
    }

    #[test]
    fn test_separator_without_keyword_is_allowed() {
        assert!(sanitize("notes; misc", &config()).is_ok());
    }
}
