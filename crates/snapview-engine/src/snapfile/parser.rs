//! Parser for Jest-style `.snap` modules.
//!
//! A snapshot module is a list of assignments to `exports`:
//!
//! ```text
//! // Jest Snapshot v1
//!
//! exports[`Widgets renders correctly 1`] = `
//! <div>
//!   hello
//! </div>
//! `;
//!
//! exports.cssClassName = 'ui segment';
//! ```
//!
//! Keys and values may be backtick, single or double quoted. Anything else at
//! the top level except comments and whitespace is an error.

use super::cursor::Cursor;
use crate::models::SnapshotRecord;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapFileError {
    #[error("Unexpected character {found:?} at byte {offset}, expected {expected}")]
    Unexpected {
        offset: usize,
        found: char,
        expected: &'static str,
    },
    #[error("Unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    #[error("Unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },
    #[error("Unterminated comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },
}

const EXPORTS: &[u8] = b"exports";

/// Parses the text of a snapshot module into a record.
pub fn parse_snap_file(text: &str) -> Result<SnapshotRecord, SnapFileError> {
    let mut cur = Cursor::new(text);
    let mut record = SnapshotRecord::new();

    loop {
        skip_trivia(&mut cur)?;
        if cur.eof() {
            break;
        }
        let (key, value) = parse_assignment(&mut cur)?;
        log::trace!("snapshot entry {key:?} ({} bytes)", value.len());
        record.insert(key, value);
    }

    Ok(record)
}

fn parse_assignment(cur: &mut Cursor) -> Result<(String, String), SnapFileError> {
    if !cur.starts_with(EXPORTS) {
        return Err(unexpected(cur, "`exports`"));
    }
    cur.bump_n(EXPORTS.len());
    skip_trivia(cur)?;

    let key = match cur.peek() {
        Some(b'[') => {
            cur.bump();
            skip_trivia(cur)?;
            let key = parse_string(cur)?;
            skip_trivia(cur)?;
            expect(cur, b']', "`]`")?;
            key
        }
        Some(b'.') => {
            cur.bump();
            skip_trivia(cur)?;
            let ident = cur.take_ident();
            if ident.is_empty() {
                return Err(unexpected(cur, "property name"));
            }
            ident.to_string()
        }
        _ => return Err(unexpected(cur, "`[` or `.`")),
    };

    skip_trivia(cur)?;
    expect(cur, b'=', "`=`")?;
    skip_trivia(cur)?;
    let value = parse_string(cur)?;
    skip_trivia(cur)?;
    if cur.peek() == Some(b';') {
        cur.bump();
    }

    Ok((key, value))
}

/// Reads a quoted string and unescapes it.
fn parse_string(cur: &mut Cursor) -> Result<String, SnapFileError> {
    let start = cur.pos();
    let quote = match cur.peek() {
        Some(q @ (b'`' | b'\'' | b'"')) => q,
        _ => return Err(unexpected(cur, "a quoted string")),
    };
    cur.bump();

    let mut value = String::new();
    loop {
        match cur.bump_char() {
            None => return Err(SnapFileError::UnterminatedString { offset: start }),
            Some('\\') => match cur.bump_char() {
                None => return Err(SnapFileError::UnterminatedString { offset: start }),
                Some(escaped) => value.push(unescape(escaped)),
            },
            Some(c) if c as u32 == u32::from(quote) => return Ok(value),
            Some(c) => value.push(c),
        }
    }
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

/// Skips whitespace, `//` line comments and `/* */` block comments.
fn skip_trivia(cur: &mut Cursor) -> Result<(), SnapFileError> {
    loop {
        cur.skip_whitespace();
        if cur.starts_with(b"//") {
            while let Some(b) = cur.bump()
                && b != b'\n'
            {}
        } else if cur.starts_with(b"/*") {
            let start = cur.pos();
            cur.bump_n(2);
            while !cur.starts_with(b"*/") {
                if cur.bump().is_none() {
                    return Err(SnapFileError::UnterminatedComment { offset: start });
                }
            }
            cur.bump_n(2);
        } else {
            return Ok(());
        }
    }
}

fn expect(cur: &mut Cursor, byte: u8, expected: &'static str) -> Result<(), SnapFileError> {
    if cur.peek() == Some(byte) {
        cur.bump();
        Ok(())
    } else {
        Err(unexpected(cur, expected))
    }
}

fn unexpected(cur: &Cursor, expected: &'static str) -> SnapFileError {
    match cur.s.get(cur.pos()..).and_then(|rest| rest.chars().next()) {
        Some(found) => SnapFileError::Unexpected {
            offset: cur.pos(),
            found,
            expected,
        },
        None => SnapFileError::UnexpectedEof { expected },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const JEST_FILE: &str = r#"// Jest Snapshot v1, https://goo.gl/fbAQLP

exports[`Widgets renders correctly 1`] = `
<div
  className="widget"
>
  hello
</div>
`;

exports[`Widgets renders correctly: layout 1`] = `"<section />"`;
"#;

    #[test]
    fn parses_jest_module() {
        let record = parse_snap_file(JEST_FILE).unwrap();
        let keys: Vec<_> = record.entries().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "Widgets renders correctly 1",
                "Widgets renders correctly: layout 1"
            ]
        );
        assert_eq!(
            record.get("Widgets renders correctly 1"),
            Some("\n<div\n  className=\"widget\"\n>\n  hello\n</div>\n")
        );
        assert_eq!(
            record.get("Widgets renders correctly: layout 1"),
            Some("\"<section />\"")
        );
    }

    #[test]
    fn unescapes_backticks_and_backslashes() {
        let record = parse_snap_file(r"exports[`a \`b\` 1`] = `c:\\d \${x}`;").unwrap();
        assert_eq!(record.get("a `b` 1"), Some(r"c:\d ${x}"));
    }

    #[test]
    fn sidecar_keys_in_both_forms() {
        let text = "exports.cssClassName = 'ui segment';\n\
                    exports[\"decorator\"] = \"<main>$snapshot</main>\";\n\
                    /* block\n comment */ exports['x 1'] = '<b/>'";
        let record = parse_snap_file(text).unwrap();
        assert_eq!(record.css_class_name.as_deref(), Some("ui segment"));
        assert_eq!(record.decorator.as_deref(), Some("<main>$snapshot</main>"));
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("x 1"), Some("<b/>"));
    }

    #[test]
    fn empty_and_comment_only_files() {
        assert!(parse_snap_file("").unwrap().is_empty());
        assert!(parse_snap_file("// nothing yet\n").unwrap().is_empty());
    }

    #[test]
    fn keeps_multibyte_text() {
        let record = parse_snap_file("exports[`ü 1`] = `<p>→</p>`;").unwrap();
        assert_eq!(record.get("ü 1"), Some("<p>→</p>"));
    }

    #[test]
    fn unterminated_string_reports_offset() {
        let err = parse_snap_file("exports[`a 1`] = `open").unwrap_err();
        assert_eq!(err, SnapFileError::UnterminatedString { offset: 17 });
    }

    #[test]
    fn unterminated_comment_reports_offset() {
        let err = parse_snap_file("\n/* never closed").unwrap_err();
        assert_eq!(err, SnapFileError::UnterminatedComment { offset: 1 });
    }

    #[test]
    fn stray_code_is_rejected() {
        let err = parse_snap_file("module.exports = {}").unwrap_err();
        assert_eq!(
            err,
            SnapFileError::Unexpected {
                offset: 0,
                found: 'm',
                expected: "`exports`"
            }
        );
    }

    #[test]
    fn missing_value_at_eof() {
        let err = parse_snap_file("exports.x =").unwrap_err();
        assert_eq!(
            err,
            SnapFileError::UnexpectedEof {
                expected: "a quoted string"
            }
        );
    }
}
