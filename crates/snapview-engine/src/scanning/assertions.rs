use super::call_site::{CallKind, CallVocabulary, match_call};

/// Collects the names of all named-assertion calls between `start` and `end`.
///
/// Scans backward from `end`, so names come out in reverse source order.
pub fn extract_assertion_names(
    text: &str,
    start: usize,
    end: usize,
    vocabulary: &CallVocabulary,
) -> Vec<String> {
    let Some(last) = text.len().checked_sub(1).map(|max| end.min(max)) else {
        return Vec::new();
    };
    if start > last {
        return Vec::new();
    }

    (start..=last)
        .rev()
        .filter_map(|i| match_call(text, vocabulary, CallKind::NamedAssertion, i))
        .map(|m| m.name)
        .collect()
}
