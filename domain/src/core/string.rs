//! String utilities for the domain layer.

use std::collections::HashSet;

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Split text into lowercased whitespace-delimited tokens.
///
/// Leading and trailing ASCII punctuation is stripped from each token so that
/// `"database?"` and `"database"` compare equal.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| c.is_ascii_punctuation()).to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Number of distinct tokens shared by two texts
pub fn shared_token_count(a: &str, b: &str) -> usize {
    let left: HashSet<String> = tokenize(a).into_iter().collect();
    let right: HashSet<String> = tokenize(b).into_iter().collect();
    left.intersection(&right).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'の' is 3 bytes; "あのね" is 9 bytes
        assert_eq!(truncate("あのね", 9), "あのね");
        assert_eq!(truncate("あのねあのね", 8), "あ...");
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        assert_eq!(
            tokenize("Should we migrate the database?"),
            vec!["should", "we", "migrate", "the", "database"]
        );
        assert!(tokenize("  ... ").is_empty());
    }

    #[test]
    fn test_shared_token_count() {
        assert_eq!(shared_token_count("Use Postgres now", "postgres is fine"), 1);
        assert_eq!(shared_token_count("a b c", "c b a a"), 3);
        assert_eq!(shared_token_count("alpha", "beta"), 0);
    }
}
