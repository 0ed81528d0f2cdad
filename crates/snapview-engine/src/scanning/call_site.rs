use super::brackets::scan_quoted_literal;

/// The roles a recognised call can play in a test file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// A single test case, e.g. `it('...')`.
    Test,
    /// A grouping construct, e.g. `describe('...')` or `storyOf('...')`.
    SuiteOrStory,
    /// A named comparison against a stored snapshot, e.g. `matchSnapshot('...')`.
    NamedAssertion,
}

/// A call whose first argument is a string literal, found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMatch {
    pub kind: CallKind,
    pub name: String,
    /// Offset of the opening quote of the literal argument.
    pub start: usize,
    /// Offset of the closing quote of the literal argument.
    pub end: usize,
}

/// Call identifiers recognised for each [`CallKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallVocabulary {
    pub tests: Vec<String>,
    pub suites: Vec<String>,
    pub assertions: Vec<String>,
}

impl Default for CallVocabulary {
    fn default() -> Self {
        Self {
            tests: vec![
                "it".to_string(),
                "itMountsAnd".to_string(),
                "itMountsContainerAnd".to_string(),
            ],
            suites: vec!["describe".to_string(), "storyOf".to_string()],
            assertions: vec!["matchSnapshot".to_string()],
        }
    }
}

impl CallVocabulary {
    pub fn identifiers(&self, kind: CallKind) -> &[String] {
        match kind {
            CallKind::Test => &self.tests,
            CallKind::SuiteOrStory => &self.suites,
            CallKind::NamedAssertion => &self.assertions,
        }
    }

    /// Adds identifiers that are not already known, keeping the defaults.
    pub fn extend(&mut self, kind: CallKind, extra: impl IntoIterator<Item = String>) {
        let list = match kind {
            CallKind::Test => &mut self.tests,
            CallKind::SuiteOrStory => &mut self.suites,
            CallKind::NamedAssertion => &mut self.assertions,
        };
        for ident in extra {
            if !list.contains(&ident) {
                list.push(ident);
            }
        }
    }
}

/// Checks whether `position` is the quote opening the first argument of
/// the call form `literal` (for example `it('`).
///
/// The literal is compared in reverse, one character at a time, skipping
/// any whitespace in the source before each comparison. Matching is exact
/// and untokenised: `split('` matches `it('` because it ends the same way.
pub fn matches_call_at_position(text: &str, literal: &str, position: usize) -> bool {
    let bytes = text.as_bytes();
    if bytes.get(position) != Some(&b'\'') {
        return false;
    }

    let mut cur = Some(position);
    for &expected in literal.as_bytes().iter().rev() {
        while let Some(p) = cur
            && bytes[p].is_ascii_whitespace()
        {
            cur = p.checked_sub(1);
        }
        match cur {
            Some(p) if bytes[p] == expected => cur = p.checked_sub(1),
            _ => return false,
        }
    }
    true
}

/// Tries every identifier of `kind` at `position`, returning the first match.
pub fn match_call(
    text: &str,
    vocabulary: &CallVocabulary,
    kind: CallKind,
    position: usize,
) -> Option<CallMatch> {
    if text.as_bytes().get(position) != Some(&b'\'') {
        return None;
    }
    let matched = vocabulary
        .identifiers(kind)
        .iter()
        .any(|ident| matches_call_at_position(text, &call_literal(ident), position));
    if !matched {
        return None;
    }

    let literal = scan_quoted_literal(text, position);
    Some(CallMatch {
        kind,
        name: literal.value,
        start: position,
        end: literal.end,
    })
}

/// The textual anchor a call identifier is matched against.
pub(crate) fn call_literal(ident: &str) -> String {
    format!("{ident}('")
}
