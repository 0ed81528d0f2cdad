use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// How snapshot values that look like serialized data are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StructuredMode {
    /// Show the stored text as-is inside `<pre>`.
    #[default]
    Verbatim,
    /// Clean up serializer output, parse it as JSON and pretty-print it.
    /// Falls back to the stored text if parsing fails.
    Reserialize,
}

fn type_prefix_regex() -> &'static Regex {
    static TYPE_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
    TYPE_PREFIX_REGEX
        .get_or_init(|| Regex::new(r"\b(?:Object|Array) ([\{\[])").expect("Invalid prefix regex"))
}

fn trailing_comma_regex() -> &'static Regex {
    static TRAILING_COMMA_REGEX: OnceLock<Regex> = OnceLock::new();
    TRAILING_COMMA_REGEX
        .get_or_init(|| Regex::new(r",(\s*[\}\]])").expect("Invalid trailing comma regex"))
}

/// True if the value should be shown as data rather than markup.
pub fn looks_structured(value: &str) -> bool {
    value.trim_start().starts_with(['{', '['])
}

/// Renders a structured value as a `<pre>` block.
pub fn render_structured(value: &str, mode: StructuredMode) -> String {
    let body = match mode {
        StructuredMode::Verbatim => value.to_string(),
        StructuredMode::Reserialize => match reserialize(value) {
            Ok(pretty) => pretty,
            Err(e) => {
                log::warn!("could not reparse structured snapshot: {e}");
                value.to_string()
            }
        },
    };
    format!("<pre>{body}</pre>")
}

/// Strips `Object`/`Array` type tags and trailing commas, then pretty-prints.
pub fn reserialize(value: &str) -> Result<String, serde_json::Error> {
    let cleaned = type_prefix_regex().replace_all(value.trim(), "$1");
    let cleaned = trailing_comma_regex().replace_all(&cleaned, "$1");
    let parsed: Value = serde_json::from_str(&cleaned)?;
    serde_json::to_string_pretty(&parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SERIALIZED: &str = "\nObject {\n  \"items\": Array [\n    1,\n    2,\n  ],\n  \"name\": \"x\",\n}\n";

    #[test]
    fn detects_structured_values() {
        assert!(looks_structured("  {\"a\": 1}"));
        assert!(looks_structured("\n[1]"));
        assert!(!looks_structured("<div/>"));
        assert!(!looks_structured("Object {}"));
    }

    #[test]
    fn verbatim_keeps_text() {
        assert_eq!(
            render_structured("{ \"a\": 1, }", StructuredMode::Verbatim),
            "<pre>{ \"a\": 1, }</pre>"
        );
    }

    #[test]
    fn reserialize_cleans_serializer_output() {
        let pretty = reserialize(SERIALIZED).unwrap();
        assert_eq!(
            pretty,
            "{\n  \"items\": [\n    1,\n    2\n  ],\n  \"name\": \"x\"\n}"
        );
    }

    #[test]
    fn reserialize_failure_falls_back_to_text() {
        let out = render_structured("{ not json", StructuredMode::Reserialize);
        assert_eq!(out, "<pre>{ not json</pre>");
    }
}
