//! Line-oriented discovery of call sites that deserve an inline action.
//!
//! Unlike the caret locator this works line by line with a regex over the
//! first [`MAX_LINE_SCAN`] bytes of each line, which is plenty for call
//! openings and keeps pathological minified lines cheap.

use std::ops::Range;

use regex::Regex;

use super::brackets::{Step, match_bracket};
use super::call_site::{CallKind, CallVocabulary};

pub const MAX_LINE_SCAN: usize = 1000;

/// A call site an editor can attach an "update snapshots" action to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensAnchor {
    pub kind: CallKind,
    /// Zero-based line number.
    pub line: usize,
    /// Byte columns from just after the call's `(` to the end of the line.
    pub columns: Range<usize>,
    /// Offset just inside the first argument, usable as a caret position.
    pub offset: usize,
}

/// Test calls whose arguments contain at least one named assertion.
pub fn find_test_lenses(text: &str, vocabulary: &CallVocabulary) -> Vec<LensAnchor> {
    call_anchors(text, vocabulary, CallKind::Test)
        .into_iter()
        .filter(|(_, paren)| {
            let end = match_bracket(text, paren + 1, b'(', b')', Step::Forward)
                .map(|close| close + 1)
                .unwrap_or(text.len());
            let args = &text[*paren..end];
            vocabulary
                .identifiers(CallKind::NamedAssertion)
                .iter()
                .any(|ident| args.contains(ident.as_str()))
        })
        .map(|(anchor, _)| anchor)
        .collect()
}

/// Every suite/story call in the text.
pub fn find_suite_lenses(text: &str, vocabulary: &CallVocabulary) -> Vec<LensAnchor> {
    call_anchors(text, vocabulary, CallKind::SuiteOrStory)
        .into_iter()
        .map(|(anchor, _)| anchor)
        .collect()
}

/// Anchors for `kind`, each paired with the absolute offset of its `(`.
fn call_anchors(
    text: &str,
    vocabulary: &CallVocabulary,
    kind: CallKind,
) -> Vec<(LensAnchor, usize)> {
    let Some(re) = call_opening_regex(vocabulary.identifiers(kind)) else {
        return Vec::new();
    };

    let bytes = text.as_bytes();
    let mut anchors = Vec::new();
    let mut line_start = 0;

    for (line, content) in text.split('\n').enumerate() {
        let scanned = truncate_at_boundary(content, MAX_LINE_SCAN);
        for m in re.find_iter(scanned) {
            let paren = line_start + m.end() - 1;

            let mut arg = paren + 1;
            while bytes.get(arg).is_some_and(|b| b.is_ascii_whitespace()) {
                arg += 1;
            }
            if matches!(bytes.get(arg), Some(b'\'' | b'"' | b'`')) {
                arg += 1;
            }

            anchors.push((
                LensAnchor {
                    kind,
                    line,
                    columns: m.end()..scanned.len(),
                    offset: arg,
                },
                paren,
            ));
        }
        line_start += content.len() + 1;
    }

    anchors
}

fn call_opening_regex(identifiers: &[String]) -> Option<Regex> {
    if identifiers.is_empty() {
        return None;
    }
    let alternation = identifiers
        .iter()
        .map(|ident| regex::escape(ident))
        .collect::<Vec<_>>()
        .join("|");
    match Regex::new(&format!(r"(?:{alternation})\s*\(")) {
        Ok(re) => Some(re),
        Err(e) => {
            log::warn!("invalid call identifiers {identifiers:?}: {e}");
            None
        }
    }
}

fn truncate_at_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
