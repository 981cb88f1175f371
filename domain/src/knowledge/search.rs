//! Relevance ranking for knowledge log search

use crate::core::string::shared_token_count;

/// How well an entry's content matches a search query.
///
/// Variants are ordered from weakest to strongest, so `Ord` ranks results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Relevance {
    /// Nothing in common; excluded from results
    None,
    /// Number of whitespace tokens shared with the query
    Tokens(usize),
    /// Query appears inside the content
    Substring,
    /// Content equals the query (case-insensitive)
    Exact,
}

impl Relevance {
    /// Score `content` against `query`, ignoring case
    pub fn score(query: &str, content: &str) -> Self {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Relevance::None;
        }
        let content_lower = content.trim().to_lowercase();

        if content_lower == query {
            Relevance::Exact
        } else if content_lower.contains(&query) {
            Relevance::Substring
        } else {
            match shared_token_count(&query, &content_lower) {
                0 => Relevance::None,
                n => Relevance::Tokens(n),
            }
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, Relevance::None)
    }
}
