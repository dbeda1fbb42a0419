//! Citation resolution.
//!
//! Extracts the `by ...;` and `from ...;` justification clauses of an entry
//! body and classifies every cited token. Classification order is fixed:
//!
//! 1. fold token (`A1`, `B`) - a local reasoning step, discarded
//! 2. internal label (`Th3`, `Def_auto1`, `Lm2`) - another entry of this article
//! 3. external article (`XBOOLE_0:7` -> `XBOOLE_0`) - an imported article
//! 4. anything else - discarded
//!
//! Nothing here fails: tokens that resolve to nothing are dropped silently.

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::types::{ExternalArticles, Reference};

static BY_CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bby\s+([^;]+);").expect("by pattern is valid"));

static FROM_CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfrom\s+([^;]+);").expect("from pattern is valid"));

/// `TARSKI:def 1` as one token, otherwise any uppercase-leading identifier.
static CITATION_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z][A-Za-z0-9_]*:[A-Za-z0-9_]+\s*\d+|[A-Z][A-Za-z0-9_]*")
        .expect("citation token pattern is valid")
});

/// Label prefixes an internal citation may carry. Longer prefixes first.
const INTERNAL_LABEL_PREFIXES: [&str; 5] = ["Th_auto", "Def_auto", "Th", "Def", "Lm"];

/// Outcome of classifying one citation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Local reasoning step such as `A1`
    Fold,
    /// Label of another entry in the same article
    Internal(&'a str),
    /// Name of an imported article
    External(&'a str),
    /// Neither; dropped
    Noise,
}

/// Whether `token` is a local reasoning-step name: one uppercase letter,
/// optionally followed by digits.
#[must_use]
pub fn is_fold_token(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_digit())
}

/// Whether `token` has the shape of a label this crate assigns:
/// `Th<N>`, `Th_auto<N>`, `Def<N>`, `Def_auto<N>` or `Lm<N>`.
#[must_use]
pub fn is_internal_label_shape(token: &str) -> bool {
    INTERNAL_LABEL_PREFIXES.iter().any(|prefix| {
        token
            .strip_prefix(prefix)
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    })
}

/// The article a token cites, if its name before any `:` was imported.
#[must_use]
pub fn is_external_article_name<'a>(token: &'a str, articles: &ExternalArticles) -> Option<&'a str> {
    let article = token.split(':').next().unwrap_or(token);
    articles.contains(article).then_some(article)
}

/// Classify one citation token against the article's labels and imports.
#[must_use]
pub fn classify<'a>(
    token: &'a str,
    labels: &HashSet<&str>,
    articles: &ExternalArticles,
) -> Classification<'a> {
    if is_fold_token(token) {
        return Classification::Fold;
    }
    if labels.contains(token) && is_internal_label_shape(token) {
        return Classification::Internal(token);
    }
    match is_external_article_name(token, articles) {
        Some(article) => Classification::External(article),
        None => Classification::Noise,
    }
}

/// Every `by`/`from` clause in `body`, without keyword and terminating `;`.
///
/// A clause may span several lines. A clause with no terminating `;` is not
/// returned.
pub fn citation_clauses(body: &str) -> impl Iterator<Item = &str> {
    BY_CLAUSE_RE
        .captures_iter(body)
        .chain(FROM_CLAUSE_RE.captures_iter(body))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Raw citation tokens of one clause, trailing whitespace trimmed.
pub fn citation_tokens(clause: &str) -> impl Iterator<Item = &str> {
    CITATION_TOKEN_RE
        .find_iter(clause)
        .map(|m| m.as_str().trim_end())
}

/// Resolve the citations of one entry body into a set of references.
///
/// `own_label` is removed from the result so an entry never cites itself.
#[must_use]
pub fn resolve_references(
    body: &str,
    own_label: &str,
    labels: &HashSet<&str>,
    articles: &ExternalArticles,
) -> BTreeSet<Reference> {
    let mut references = BTreeSet::new();

    for clause in citation_clauses(body) {
        for token in citation_tokens(clause) {
            match classify(token, labels, articles) {
                Classification::Internal(label) => {
                    references.insert(Reference::internal(label));
                }
                Classification::External(article) => {
                    references.insert(Reference::external(article));
                }
                Classification::Fold | Classification::Noise => {
                    trace!(token, "Discarded citation token");
                }
            }
        }
    }

    references.retain(|reference| reference.label != own_label);
    references
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReferenceKind;
    use rstest::rstest;

    fn articles(names: &[&str]) -> ExternalArticles {
        names.iter().copied().collect()
    }

    fn labels<'a>(names: &[&'a str]) -> HashSet<&'a str> {
        names.iter().copied().collect()
    }

    fn reference_labels(references: &BTreeSet<Reference>) -> Vec<&str> {
        references.iter().map(|r| r.label.as_str()).collect()
    }

    #[rstest]
    #[case("A", true)]
    #[case("A1", true)]
    #[case("Z42", true)]
    #[case("AB", false)]
    #[case("A1B", false)]
    #[case("Th1", false)]
    #[case("a1", false)]
    #[case("", false)]
    fn fold_tokens(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_fold_token(token), expected);
    }

    #[rstest]
    #[case("Th1", true)]
    #[case("Th_auto12", true)]
    #[case("Def3", true)]
    #[case("Def_auto1", true)]
    #[case("Lm4", true)]
    #[case("Th", false)]
    #[case("Th_auto", false)]
    #[case("Main", false)]
    #[case("TH1", false)]
    #[case("Def3a", false)]
    #[case("XBOOLE_0", false)]
    fn internal_label_shapes(#[case] token: &str, #[case] expected: bool) {
        assert_eq!(is_internal_label_shape(token), expected);
    }

    #[rstest]
    #[case("XBOOLE_0", Some("XBOOLE_0"))]
    #[case("XBOOLE_0:7", Some("XBOOLE_0"))]
    #[case("TARSKI:def 1", Some("TARSKI"))]
    #[case("ZFMISC_1", None)]
    fn external_article_names(#[case] token: &str, #[case] expected: Option<&str>) {
        let imported = articles(&["XBOOLE_0", "TARSKI"]);

        assert_eq!(is_external_article_name(token, &imported), expected);
    }

    #[test]
    fn fold_check_runs_before_external_check() {
        let imported = articles(&["A"]);

        assert_eq!(classify("A", &labels(&[]), &imported), Classification::Fold);
    }

    #[test]
    fn internal_requires_declared_label() {
        let imported = articles(&[]);

        assert_eq!(
            classify("Th9", &labels(&["Th1"]), &imported),
            Classification::Noise
        );
        assert_eq!(
            classify("Th1", &labels(&["Th1"]), &imported),
            Classification::Internal("Th1")
        );
    }

    #[test]
    fn internal_requires_label_shape() {
        let imported = articles(&[]);

        assert_eq!(
            classify("Main", &labels(&["Main"]), &imported),
            Classification::Noise
        );
    }

    #[test]
    fn tokenizer_keeps_article_keyword_number_together() {
        let tokens: Vec<_> = citation_tokens("TARSKI:def 1, XBOOLE_0:7, A1, Def2").collect();

        assert_eq!(tokens, vec!["TARSKI:def 1", "XBOOLE_0", "A1", "Def2"]);
    }

    #[test]
    fn clauses_may_span_lines() {
        let body = "thus thesis by\n  Th1,\n  Th2;\n";

        let clauses: Vec<_> = citation_clauses(body).collect();
        assert_eq!(clauses, vec!["Th1,\n  Th2"]);
    }

    #[test]
    fn clause_keywords_are_case_insensitive() {
        let clauses: Vec<_> = citation_clauses("thesis BY Th1; X FROM Sch1(A1);").collect();

        assert_eq!(clauses, vec!["Th1", "Sch1(A1)"]);
    }

    #[test]
    fn unterminated_clause_yields_nothing() {
        assert_eq!(citation_clauses("thus thesis by Th1, Th2").count(), 0);
    }

    #[test]
    fn external_citations_collapse_to_article_name() {
        let refs = resolve_references(
            " X c= Y by XBOOLE_0:7, A1;\n Y c= Z by XBOOLE_0:12;",
            "Th1",
            &labels(&["Th1"]),
            &articles(&["XBOOLE_0"]),
        );

        assert_eq!(reference_labels(&refs), vec!["XBOOLE_0"]);
        assert!(refs.iter().all(|r| r.kind == ReferenceKind::External));
    }

    #[test]
    fn internal_and_external_references_are_combined() {
        let refs = resolve_references(
            " thus thesis by Def3, TARSKI:def 1;\n hence X from Lm1;",
            "Th2",
            &labels(&["Def3", "Lm1", "Th2"]),
            &articles(&["TARSKI"]),
        );

        assert_eq!(reference_labels(&refs), vec!["Def3", "Lm1", "TARSKI"]);
    }

    #[test]
    fn own_label_is_removed() {
        let refs = resolve_references(
            " X = X by Th1, Th2;",
            "Th1",
            &labels(&["Th1", "Th2"]),
            &articles(&[]),
        );

        assert_eq!(reference_labels(&refs), vec!["Th2"]);
    }

    #[test]
    fn undeclared_tokens_are_discarded() {
        let refs = resolve_references(
            " X = X by Th5, FOO_1:3, Zorn;",
            "Th1",
            &labels(&["Th1"]),
            &articles(&["XBOOLE_0"]),
        );

        assert!(refs.is_empty());
    }
}
