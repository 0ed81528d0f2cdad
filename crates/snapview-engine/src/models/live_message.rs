use serde::Deserialize;
use serde_json::{Map, Value};

use super::snapshot_record::{SnapshotContent, SnapshotRecord};

/// A snapshot pushed by a running test process.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMessage {
    /// The test (or stylesheet) file the snapshot belongs to.
    #[serde(alias = "testPath")]
    pub file: String,
    pub content: LiveContent,
    #[serde(default)]
    pub test_name: Option<String>,
    #[serde(default)]
    pub snapshot_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LiveContent {
    Text(String),
    Fields(Map<String, Value>),
}

impl LiveMessage {
    /// Parses a message from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_stylesheet(&self) -> bool {
        self.file.ends_with(".css")
    }
}

impl LiveContent {
    /// Looks up a named field, stringifying non-string JSON values.
    pub fn field(&self, name: &str) -> Option<String> {
        match self {
            LiveContent::Text(_) => None,
            LiveContent::Fields(fields) => fields.get(name).map(value_text),
        }
    }

    pub fn into_snapshot_content(self) -> SnapshotContent {
        match self {
            LiveContent::Text(text) => SnapshotContent::Text(text),
            LiveContent::Fields(fields) => SnapshotContent::Record(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), value_text(v)))
                    .collect::<SnapshotRecord>(),
            ),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_text_message() {
        let msg = LiveMessage::from_json(
            r#"{"file": "/src/button.test.tsx", "content": "<div/>", "snapshotName": "renders 1"}"#,
        )
        .unwrap();
        assert_eq!(msg.file, "/src/button.test.tsx");
        assert_eq!(msg.snapshot_name.as_deref(), Some("renders 1"));
        assert_eq!(msg.test_name, None);
        assert_eq!(msg.content, LiveContent::Text("<div/>".into()));
    }

    #[test]
    fn accepts_test_path_alias_and_record_content() {
        let msg = LiveMessage::from_json(
            r#"{"testPath": "a.test.js", "content": {"one": "<b/>", "cssClassName": "x", "n": 3}}"#,
        )
        .unwrap();
        assert_eq!(msg.file, "a.test.js");

        let SnapshotContent::Record(record) = msg.content.into_snapshot_content() else {
            panic!("expected record content");
        };
        assert_eq!(record.get("one"), Some("<b/>"));
        assert_eq!(record.get("n"), Some("3"));
        assert_eq!(record.css_class_name.as_deref(), Some("x"));
    }

    #[test]
    fn stylesheet_messages_expose_styles_field() {
        let msg =
            LiveMessage::from_json(r#"{"file": "theme.css", "content": {"styles": "a{}"}}"#)
                .unwrap();
        assert!(msg.is_stylesheet());
        assert_eq!(msg.content.field("styles").as_deref(), Some("a{}"));
    }

    #[test]
    fn missing_content_is_an_error() {
        assert!(LiveMessage::from_json(r#"{"file": "x"}"#).is_err());
    }
}
