//! Finds the test call surrounding a caret with a single backward pass.
//!
//! The scan starts just before the `{` that opens the innermost block
//! around the caret and walks toward the start of the document:
//!
//! 1. `SearchingTest`: every position is checked against the test call
//!    forms. The first hit fixes the test name and its argument span.
//! 2. `SearchingSuites`: every position is checked against the suite/story
//!    forms. A hit records the name and jumps straight to the `{` of the
//!    enclosing body, skipping earlier siblings in one step.
//!
//! Suite calls seen before the test is found are ignored, so a sibling
//! suite that happens to precede the caret never leaks into the path.

use crate::models::ResolvedLocation;

use super::assertions::extract_assertion_names;
use super::brackets::{Step, match_bracket};
use super::call_site::{CallKind, CallVocabulary, match_call};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SearchingTest,
    SearchingSuites,
}

/// Position just before the `{` opening the block that contains `caret`.
///
/// The block is found from the first `}` at or after the caret. Returns
/// `None` when there is no such brace, or it has no matching `{`.
pub fn context_start(text: &str, caret: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let caret = caret.min(bytes.len());
    let close = caret + bytes[caret..].iter().position(|&b| b == b'}')?;
    let open = match_bracket(text, close.checked_sub(1)?, b'{', b'}', Step::Backward)?;
    open.checked_sub(1)
}

/// Resolves the test, suite path and snapshot names around `caret`.
///
/// Returns a location with `test_name: None` when no test call encloses the
/// caret. The result may still lack folders for a test written at the top
/// level of a file; deciding whether that is good enough is up to the caller.
pub fn locate_test(text: &str, caret: usize, vocabulary: &CallVocabulary) -> ResolvedLocation {
    let Some(start) = context_start(text, caret) else {
        return ResolvedLocation::default();
    };

    let mut state = ScanState::SearchingTest;
    let mut test = None;
    let mut folders = Vec::new();

    let mut cursor = Some(start);
    while let Some(i) = cursor {
        let mut next = i.checked_sub(1);

        match state {
            ScanState::SearchingTest => {
                if let Some(found) = match_call(text, vocabulary, CallKind::Test, i) {
                    let end = match_bracket(text, i, b'(', b')', Step::Forward)
                        .unwrap_or_else(|| text.len().saturating_sub(1));
                    log::trace!("test '{}' spans {}..={}", found.name, found.start, end);
                    test = Some((found, end));
                    state = ScanState::SearchingSuites;
                }
            }
            ScanState::SearchingSuites => {
                if let Some(found) = match_call(text, vocabulary, CallKind::SuiteOrStory, i) {
                    folders.push(found.name);
                    // Arrow bodies without braces have no enclosing `{`; keep
                    // walking so outer suites are still reached.
                    if let Some(open) = match_bracket(text, i, b'{', b'}', Step::Backward) {
                        next = open.checked_sub(1);
                    }
                }
            }
        }

        cursor = next;
    }

    let Some((test, test_end)) = test else {
        return ResolvedLocation::default();
    };

    folders.reverse();
    let mut snapshot_names = extract_assertion_names(text, test.start, test_end, vocabulary);
    snapshot_names.push(test.name.clone());

    ResolvedLocation {
        test_name: Some(test.name),
        folders,
        snapshot_names,
    }
}
