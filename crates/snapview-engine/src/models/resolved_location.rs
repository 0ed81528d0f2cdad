use serde::Serialize;

/// The test surrounding a caret, with its suite path and snapshot names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedLocation {
    /// Name of the enclosing test call, if one was found.
    pub test_name: Option<String>,
    /// Suite/story names, outermost first.
    pub folders: Vec<String>,
    /// Named assertions inside the test, with the test name appended last.
    pub snapshot_names: Vec<String>,
}

impl ResolvedLocation {
    /// True when both a test and at least one enclosing suite were found.
    pub fn is_complete(&self) -> bool {
        self.test_name.is_some() && !self.folders.is_empty()
    }

    /// Identifier of the story in a component explorer, e.g. `widgets-button`.
    pub fn story_id(&self) -> String {
        self.folders
            .iter()
            .map(|f| slugify(f))
            .collect::<Vec<_>>()
            .join("-")
    }

    /// The test name in the same slug form as [`Self::story_id`].
    pub fn test_slug(&self) -> Option<String> {
        self.test_name.as_deref().map(slugify)
    }
}

fn slugify(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect::<String>()
        .to_lowercase()
}
