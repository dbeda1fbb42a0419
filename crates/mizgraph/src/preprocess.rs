//! Comment stripping and import extraction.
//!
//! Mizar comments run from `::` to the end of the line. Removing them keeps
//! every newline in place, so line structure (and therefore line-leading
//! label detection) is preserved.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::ExternalArticles;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)::.*$").expect("comment pattern is valid"));

static ENVIRON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\benviron\b(.*?)\bbegin\b").expect("environ pattern is valid")
});

static ARTICLE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][A-Z0-9_]*").expect("article name pattern is valid"));

/// Remove every `::` comment, leaving line breaks untouched.
#[must_use]
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    COMMENT_RE.replace_all(text, "")
}

/// Collect the article names declared between `environ` and `begin`.
///
/// Every uppercase identifier in the region counts; directive keywords
/// (`vocabularies`, `theorems`, ...) are lowercase and never match. Without an
/// `environ ... begin` region the set is empty.
#[must_use]
pub fn extract_external_articles(text: &str) -> ExternalArticles {
    let Some(region) = ENVIRON_RE.captures(text).and_then(|caps| caps.get(1)) else {
        return ExternalArticles::default();
    };

    ARTICLE_NAME_RE
        .find_iter(region.as_str())
        .map(|m| m.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_to_end_of_line() {
        let text = "theorem Th1: :: the first one\n  X = X; :: trivial\nend;";

        assert_eq!(strip_comments(text), "theorem Th1: \n  X = X; \nend;");
    }

    #[test]
    fn stripping_preserves_line_count() {
        let text = ":: header\n:: more\nbegin\n";

        let stripped = strip_comments(text);
        assert_eq!(stripped.lines().count(), text.lines().count());
    }

    #[test]
    fn single_colons_are_not_comments() {
        let text = "  :Def1: X = X by TARSKI:def 1;";

        assert_eq!(strip_comments(text), text);
    }

    #[test]
    fn extracts_articles_from_environ_section() {
        let text = "environ\n vocabularies XBOOLE_0, SUBSET_1;\n theorems TARSKI, XBOOLE_0;\nbegin\ntheorem Th1: X = X;";

        let articles = extract_external_articles(text);
        assert_eq!(
            articles.iter().collect::<Vec<_>>(),
            vec!["SUBSET_1", "TARSKI", "XBOOLE_0"]
        );
    }

    #[test]
    fn environ_keyword_is_case_insensitive() {
        let articles = extract_external_articles("ENVIRON requirements NUMERALS; BEGIN");

        assert!(articles.contains("NUMERALS"));
        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn names_after_begin_are_ignored() {
        let articles =
            extract_external_articles("environ theorems TARSKI; begin theorem FOO: X = X;");

        assert!(articles.contains("TARSKI"));
        assert!(!articles.contains("FOO"));
    }

    #[test]
    fn missing_markers_yield_empty_set() {
        assert!(extract_external_articles("theorem Th1: X = X;").is_empty());
        assert!(extract_external_articles("environ theorems TARSKI;").is_empty());
    }
}
