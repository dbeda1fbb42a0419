//! Statement entry scanning.
//!
//! Finds every theorem header, definition block and inline `Def<N>:` /
//! `Lm<N>:` label in comment-stripped article text, assigns each a canonical
//! label and returns the entries ordered by position.
//!
//! ## Labeling rules
//!
//! | Source | Label | Kind |
//! |--------|-------|------|
//! | `theorem Th3:` | `Th3` (as written) | theorem |
//! | `theorem` (unlabeled) | `Th_auto<k>` | auto-theorem |
//! | `:Def2:` / `Def2:` | `Def2` | definition |
//! | `:Lm1:` / `Lm1:` | `Lm1` | lemma |
//! | `definition` header | `Def_auto<k>` | definition |
//!
//! Theorem auto-numbering is global: every explicit `Th<N>` in the article is
//! collected before the first auto label is handed out, so `Th_auto<k>` never
//! reuses an `N` that appears anywhere in the file.
//!
//! Every `definition` header gets its own `Def_auto<k>` entry, even when the
//! block also carries inline labels, so text between the header and the first
//! inline label stays with the block.
//!
//! A label declared twice yields two entries. Each keeps its own body span;
//! the graph merges them into one node.

use std::collections::{BTreeSet, HashSet};
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::types::{Entry, EntryKind};

static THEOREM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\btheorem\b(?:\s+([A-Za-z0-9_]+)\s*:)?").expect("theorem pattern is valid")
});

static DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdefinition\b(?:\s+([A-Za-z0-9_]+)\s*:)?")
        .expect("definition pattern is valid")
});

/// `Def1:` or `:Def1:` at the start of a line.
static LINE_LEADING_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*:?\s*((?:Def|Lm)\d+)\s*:").expect("line-leading pattern is valid")
});

/// `:Def1:` anywhere in a line.
static LINE_INTERNAL_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i):\s*((?:Def|Lm)\d+)\s*:").expect("line-internal pattern is valid")
});

/// A `theorem` or `definition` keyword match.
#[derive(Debug, Clone)]
struct Header {
    start: usize,
    end: usize,
    label: Option<String>,
}

impl Header {
    fn find_all(pattern: &Regex, text: &str) -> Vec<Self> {
        pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(Self {
                    start: whole.start(),
                    end: whole.end(),
                    label: caps.get(1).map(|m| m.as_str().to_string()),
                })
            })
            .collect()
    }
}

/// Numeric suffix of an explicit `Th<digits>` label.
fn explicit_theorem_number(label: &str) -> Option<u32> {
    let digits = label.strip_prefix("Th")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Bookkeeping threaded through one scan.
///
/// Holds the explicit theorem numbers, both auto-numbering counters, the
/// positions of inline labels that have already been claimed, and the set of
/// labels handed out so far. Nothing here outlives a single `scan_entries`
/// call.
#[derive(Debug)]
pub struct ScanState {
    explicit_numbers: BTreeSet<u32>,
    reserved_labels: HashSet<String>,
    next_auto_theorem: u32,
    next_auto_definition: u32,
    claimed_positions: BTreeSet<usize>,
    registered: HashSet<String>,
}

impl ScanState {
    /// Create a state that reserves the given explicit theorem labels.
    ///
    /// Every `Th<N>` among them removes `N` from the auto-numbering sequence.
    pub fn with_explicit_labels<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let reserved_labels: HashSet<String> = labels.into_iter().map(str::to_string).collect();
        let explicit_numbers = reserved_labels
            .iter()
            .filter_map(|label| explicit_theorem_number(label))
            .collect();

        Self {
            explicit_numbers,
            reserved_labels,
            next_auto_theorem: 1,
            next_auto_definition: 1,
            claimed_positions: BTreeSet::new(),
            registered: HashSet::new(),
        }
    }

    /// Hand out the next `Th_auto<k>` label.
    ///
    /// Skips every `k` used by an explicit `Th<k>` and any label that is
    /// already taken.
    pub fn next_auto_theorem_label(&mut self) -> String {
        loop {
            let k = self.next_auto_theorem;
            self.next_auto_theorem += 1;
            if self.explicit_numbers.contains(&k) {
                continue;
            }
            let label = format!("Th_auto{k}");
            if !self.is_taken(&label) {
                return label;
            }
        }
    }

    /// Hand out the next `Def_auto<k>` label.
    pub fn next_auto_definition_label(&mut self) -> String {
        loop {
            let k = self.next_auto_definition;
            self.next_auto_definition += 1;
            let label = format!("Def_auto{k}");
            if !self.is_taken(&label) {
                return label;
            }
        }
    }

    /// Claim an inline label position. Returns `false` if it was already claimed.
    pub fn claim(&mut self, position: usize) -> bool {
        self.claimed_positions.insert(position)
    }

    fn is_taken(&self, label: &str) -> bool {
        self.reserved_labels.contains(label) || self.registered.contains(label)
    }

    /// Add `entry`, recording its label as taken.
    ///
    /// Repeated labels are kept so their bodies are not absorbed by the
    /// preceding entry.
    fn register(&mut self, entries: &mut Vec<Entry>, entry: Entry) {
        if self.registered.insert(entry.label.clone()) {
            trace!(label = %entry.label, kind = entry.kind.as_str(), offset = entry.start, "Registered entry");
        } else {
            debug!(label = %entry.label, offset = entry.start, "Label declared again");
        }
        entries.push(entry);
    }
}

/// Scan comment-stripped article text for statement entries.
///
/// The returned entries are sorted by `start`. Generated labels never collide
/// with declared ones; a label declared twice appears twice.
#[must_use]
pub fn scan_entries(text: &str) -> Vec<Entry> {
    let theorems = Header::find_all(&THEOREM_RE, text);
    let definitions = Header::find_all(&DEFINITION_RE, text);

    let mut state =
        ScanState::with_explicit_labels(theorems.iter().filter_map(|h| h.label.as_deref()));
    let mut entries = Vec::new();

    register_theorems(&theorems, &mut state, &mut entries);
    register_definitions(text, &definitions, &theorems, &mut state, &mut entries);

    // Labels outside any recognized definition block
    claim_inline_labels(text, 0..text.len(), &mut state, &mut entries);

    entries.sort_by_key(|entry| entry.start);
    debug!(
        entries = entries.len(),
        theorems = theorems.len(),
        definitions = definitions.len(),
        "Scanned article"
    );
    entries
}

fn register_theorems(headers: &[Header], state: &mut ScanState, entries: &mut Vec<Entry>) {
    for header in headers {
        let (label, kind) = match &header.label {
            Some(label) => (label.clone(), EntryKind::Theorem),
            None => (state.next_auto_theorem_label(), EntryKind::AutoTheorem),
        };
        state.register(entries, Entry::new(header.start, header.end, label, kind));
    }
}

fn register_definitions(
    text: &str,
    definitions: &[Header],
    theorems: &[Header],
    state: &mut ScanState,
    entries: &mut Vec<Entry>,
) {
    for (i, header) in definitions.iter().enumerate() {
        let block_end = block_end(text, header, definitions.get(i + 1), theorems);
        let label = state.next_auto_definition_label();
        state.register(
            entries,
            Entry::new(header.start, header.end, label, EntryKind::Definition),
        );
        claim_inline_labels(text, header.end..block_end, state, entries);
    }
}

/// End of a definition block: the next theorem or definition header, whichever
/// comes first.
fn block_end(
    text: &str,
    header: &Header,
    next_definition: Option<&Header>,
    theorems: &[Header],
) -> usize {
    let first_after = theorems.partition_point(|t| t.start < header.end);
    let next_theorem = theorems.get(first_after).map(|t| t.start);
    let next_definition = next_definition.map(|d| d.start);

    [next_theorem, next_definition]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(text.len())
}

/// Register the unclaimed inline `Def<N>:` / `Lm<N>:` labels inside `span`.
///
/// Line-leading labels are processed before line-internal ones. A label is
/// claimed by the offset of its own text, so `:Def1:` at the start of a line
/// is registered once even though both patterns match it.
fn claim_inline_labels(
    text: &str,
    span: Range<usize>,
    state: &mut ScanState,
    entries: &mut Vec<Entry>,
) {
    let Some(region) = text.get(span.clone()) else {
        return;
    };

    for pattern in [&*LINE_LEADING_LABEL_RE, &*LINE_INTERNAL_LABEL_RE] {
        for caps in pattern.captures_iter(region) {
            let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if !state.claim(span.start + label.start()) {
                continue;
            }

            let entry = Entry::new(
                span.start + whole.start(),
                span.start + whole.end(),
                label.as_str(),
                EntryKind::of_inline_label(label.as_str()),
            );
            state.register(entries, entry);
        }
    }
}

/// Pair each entry with its body text.
///
/// A body runs from the end of the entry's own header to the start of the next
/// entry (or the end of the text). `entries` must be sorted by `start`.
#[must_use]
pub fn entry_bodies<'t, 'e>(text: &'t str, entries: &'e [Entry]) -> Vec<(&'e Entry, &'t str)> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let body_end = entries.get(i + 1).map_or(text.len(), |next| next.start);
            let body = if entry.end < body_end {
                text.get(entry.end..body_end).unwrap_or("")
            } else {
                ""
            };
            (entry, body)
        })
        .collect()
}
