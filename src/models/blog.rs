//! Derived-field logic for blog posts: URL slugs, read time, and
//! auto-generated summaries. These are pure functions; the service layer
//! decides when each one is recomputed.

use regex::Regex;
use std::sync::LazyLock;

/// Assumed reading speed for the read-time estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Number of leading content characters used for a derived summary.
pub const SUMMARY_PREVIEW_CHARS: usize = 200;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("valid regex"));

/// Builds a URL slug from a title plus a creation-time token.
///
/// The title is lowercased, punctuation is stripped, and runs of
/// whitespace/underscores/hyphens collapse to a single hyphen. The token
/// (creation timestamp in milliseconds) keeps slugs unique even when two
/// blogs share a title.
#[must_use]
pub fn slugify(title: &str, token: i64) -> String {
    let lowered = title.to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    let hyphenated = SEPARATOR_RUNS.replace_all(&stripped, "-");
    let base = hyphenated.trim_matches('-');
    format!("{base}-{token}")
}

/// Estimated reading time in whole minutes, never below 1.
#[must_use]
pub fn read_time_minutes(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    i32::try_from(words.div_ceil(WORDS_PER_MINUTE).max(1)).unwrap_or(i32::MAX)
}

/// Default summary when the author does not supply one: the first
/// [`SUMMARY_PREVIEW_CHARS`] characters of content plus an ellipsis.
#[must_use]
pub fn derive_summary(content: &str) -> String {
    let preview: String = content.chars().take(SUMMARY_PREVIEW_CHARS).collect();
    format!("{preview}...")
}

/// Tags are stored as a JSON array in a single text column.
#[must_use]
pub fn encode_tags(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string())
}

#[must_use]
pub fn decode_tags(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World", 42), "hello-world-42");
        assert_eq!(slugify("Hello World!!", 42), "hello-world-42");
    }

    #[test]
    fn test_slugify_strips_punctuation_and_collapses_runs() {
        assert_eq!(slugify("Rust -- async_await, explained", 7), "rust-async-await-explained-7");
        assert_eq!(slugify("  spaced   out  ", 7), "spaced-out-7");
    }

    #[test]
    fn test_slugify_same_title_different_tokens() {
        let a = slugify("My Post", 1000);
        let b = slugify("My Post", 1001);
        assert_ne!(a, b);
        assert!(a.starts_with("my-post-"));
        assert!(b.starts_with("my-post-"));
    }

    #[test]
    fn test_read_time_floors_at_one_minute() {
        assert_eq!(read_time_minutes(""), 1);
        assert_eq!(read_time_minutes("just a few words"), 1);
    }

    #[test]
    fn test_read_time_rounds_up() {
        let exactly_200 = "word ".repeat(200);
        assert_eq!(read_time_minutes(&exactly_200), 1);

        let two_hundred_one = "word ".repeat(201);
        assert_eq!(read_time_minutes(&two_hundred_one), 2);

        let five_hundred = "word ".repeat(500);
        assert_eq!(read_time_minutes(&five_hundred), 3);
    }

    #[test]
    fn test_derive_summary_truncates_long_content() {
        let content = "x".repeat(500);
        let summary = derive_summary(&content);
        assert_eq!(summary.len(), SUMMARY_PREVIEW_CHARS + 3);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_derive_summary_short_content() {
        assert_eq!(derive_summary("short text"), "short text...");
    }

    #[test]
    fn test_tags_roundtrip() {
        let tags = vec!["rust".to_string(), "web dev".to_string()];
        assert_eq!(decode_tags(&encode_tags(&tags)), tags);
        assert!(decode_tags("not json").is_empty());
        assert!(decode_tags("[]").is_empty());
    }
}
