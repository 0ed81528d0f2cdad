use crate::models::ResolvedLocation;
use crate::scanning::{CallVocabulary, locate_test};

/// Outcome of resolving a caret position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A test and its suite path were found at the caret.
    Resolved(ResolvedLocation),
    /// Nothing was found at the caret; this is the last good resolution.
    Fallback(ResolvedLocation),
    /// Nothing was found and nothing has ever been resolved.
    NoTest,
}

impl Resolution {
    pub fn location(&self) -> Option<&ResolvedLocation> {
        match self {
            Resolution::Resolved(loc) | Resolution::Fallback(loc) => Some(loc),
            Resolution::NoTest => None,
        }
    }

    pub fn is_no_test(&self) -> bool {
        matches!(self, Resolution::NoTest)
    }
}

/// Resolves caret positions for one editing session.
///
/// Remembers the last successful resolution so that moving the caret
/// outside any test keeps showing the previous test's snapshots.
#[derive(Debug, Default)]
pub struct Resolver {
    vocabulary: CallVocabulary,
    last_resolved: Option<ResolvedLocation>,
}

impl Resolver {
    pub fn new(vocabulary: CallVocabulary) -> Self {
        Self {
            vocabulary,
            last_resolved: None,
        }
    }

    pub fn vocabulary(&self) -> &CallVocabulary {
        &self.vocabulary
    }

    pub fn last_resolved(&self) -> Option<&ResolvedLocation> {
        self.last_resolved.as_ref()
    }

    /// Resolves `caret` in `text`, falling back to the last good result.
    ///
    /// Only a location with both a test name and a suite path counts as
    /// resolved and replaces the remembered one.
    pub fn resolve(&mut self, text: &str, caret: usize) -> Resolution {
        let located = locate_test(text, caret, &self.vocabulary);

        if located.is_complete() {
            log::debug!(
                "resolved '{}' in {:?}",
                located.test_name.as_deref().unwrap_or_default(),
                located.folders
            );
            self.last_resolved = Some(located.clone());
            return Resolution::Resolved(located);
        }

        match &self.last_resolved {
            Some(last) => {
                log::debug!("no test at offset {caret}, keeping previous resolution");
                Resolution::Fallback(last.clone())
            }
            None => Resolution::NoTest,
        }
    }

    /// Forgets the remembered resolution, e.g. when the active file changes.
    pub fn reset(&mut self) {
        self.last_resolved = None;
    }
}
