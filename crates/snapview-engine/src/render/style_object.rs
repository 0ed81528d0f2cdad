//! Conversion of serialized inline style objects into CSS attributes.
//!
//! Snapshot serializers print `style={{...}}` props as
//!
//! ```text
//! style={
//!   Object {
//!     "backgroundColor": "red",
//!     "fontSize": 12,
//!   }
//! }
//! ```
//!
//! which becomes `style="background-color: red; font-size: 12; "`.

use std::sync::OnceLock;

use serde_json::{Map, Value};

use regex::Regex;

#[derive(Debug, thiserror::Error)]
pub enum StyleObjectError {
    #[error("Malformed style object at byte {offset}: {source}")]
    Malformed {
        offset: usize,
        source: serde_json::Error,
    },
}

fn style_object_regex() -> &'static Regex {
    static STYLE_OBJECT_REGEX: OnceLock<Regex> = OnceLock::new();
    STYLE_OBJECT_REGEX.get_or_init(|| {
        Regex::new(r"style=\{\n.*Object (\{[^\}]*\})\n.*\}").expect("Invalid style object regex")
    })
}

fn trailing_comma_regex() -> &'static Regex {
    static TRAILING_COMMA_REGEX: OnceLock<Regex> = OnceLock::new();
    TRAILING_COMMA_REGEX
        .get_or_init(|| Regex::new(r",\n.*\}").expect("Invalid trailing comma regex"))
}

/// Replaces every serialized style object in `markup` with a `style` attribute.
///
/// Fails as a whole if any object cannot be parsed.
pub fn inline_style_objects(markup: &str) -> Result<String, StyleObjectError> {
    let mut out = String::with_capacity(markup.len());
    let mut last = 0;

    for caps in style_object_regex().captures_iter(markup) {
        let (Some(whole), Some(object)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let json = trailing_comma_regex().replacen(object.as_str(), 1, "}");
        let props: Map<String, Value> =
            serde_json::from_str(&json).map_err(|source| StyleObjectError::Malformed {
                offset: object.start(),
                source,
            })?;

        out.push_str(&markup[last..whole.start()]);
        out.push_str("style=\"");
        for (name, value) in &props {
            out.push_str(&kebab_case(name));
            out.push_str(": ");
            match value {
                Value::String(s) => out.push_str(s),
                other => out.push_str(&other.to_string()),
            }
            out.push_str("; ");
        }
        out.push('"');
        last = whole.end();
    }

    out.push_str(&markup[last..]);
    Ok(out)
}

/// Like [`inline_style_objects`], but logs failures and keeps the input.
pub fn inline_style_objects_or_original(markup: &str) -> String {
    match inline_style_objects(markup) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("{e}; leaving style objects untouched");
            markup.to_string()
        }
    }
}

/// `backgroundColor` -> `background-color`.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
