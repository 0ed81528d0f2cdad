//! Delimiter matching and quoted literal reading over raw source bytes.
//!
//! Both helpers are deliberately naive: they look at single bytes and know
//! nothing about strings or comments. A `{` inside a string literal counts
//! like any other `{`, so callers must pick scan windows where that cannot
//! desynchronise the count.

/// Direction of a [`match_bracket`] scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Backward,
    Forward,
}

impl Step {
    fn advance(self, pos: usize) -> Option<usize> {
        match self {
            Step::Backward => pos.checked_sub(1),
            Step::Forward => pos.checked_add(1),
        }
    }
}

/// Finds the delimiter balancing one bracket that has already been consumed.
///
/// The depth counter starts at 1. Scanning from `start` (inclusive) in the
/// given direction, the terminating delimiter decrements it and the nesting
/// delimiter increments it. A backward scan terminates on `open` and nests on
/// `close`; a forward scan terminates on `close` and nests on `open`.
///
/// Returns the offset of the delimiter that brings the depth to zero, or
/// `None` when the scan runs off either end of `text`.
///
/// ```
/// use snapview_engine::scanning::{match_bracket, Step};
///
/// let src = "f(a, (b))";
/// assert_eq!(match_bracket(src, 2, b'(', b')', Step::Forward), Some(8));
/// assert_eq!(match_bracket(src, 7, b'(', b')', Step::Backward), Some(1));
/// ```
pub fn match_bracket(text: &str, start: usize, open: u8, close: u8, step: Step) -> Option<usize> {
    let bytes = text.as_bytes();
    let (terminator, nested) = match step {
        Step::Backward => (open, close),
        Step::Forward => (close, open),
    };

    let mut depth = 1usize;
    let mut pos = start;
    loop {
        let b = *bytes.get(pos)?;
        if b == terminator {
            depth -= 1;
            if depth == 0 {
                return Some(pos);
            }
        } else if b == nested {
            depth += 1;
        }
        pos = step.advance(pos)?;
    }
}

/// A string literal read out of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedLiteral {
    /// Unescaped contents, without the surrounding quotes.
    pub value: String,
    /// Offset of the closing quote, or the text length if unterminated.
    pub end: usize,
}

/// Reads the literal whose opening quote sits at `quote_start`.
///
/// The quote character is taken from `quote_start` (`"` or, for anything
/// else, `'`). A backslash escapes the byte after it: both are stepped over
/// together, the backslash is dropped and the escaped character kept.
pub fn scan_quoted_literal(text: &str, quote_start: usize) -> QuotedLiteral {
    let bytes = text.as_bytes();
    let quote = match bytes.get(quote_start) {
        Some(b'"') => b'"',
        _ => b'\'',
    };

    let mut value = Vec::new();
    let mut pos = quote_start + 1;
    while let Some(&b) = bytes.get(pos) {
        if b == quote {
            break;
        }
        if b == b'\\' {
            if let Some(&escaped) = bytes.get(pos + 1) {
                value.push(escaped);
            }
            pos += 2;
            continue;
        }
        value.push(b);
        pos += 1;
    }

    QuotedLiteral {
        value: String::from_utf8_lossy(&value).into_owned(),
        end: pos.min(bytes.len()),
    }
}

/// Convenience wrapper around [`scan_quoted_literal`] returning only the value.
pub fn read_quoted_literal(text: &str, quote_start: usize) -> String {
    scan_quoted_literal(text, quote_start).value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn backward_match_finds_enclosing_brace() {
        let src = "describe('A', () => { it('x', () => {}); }";
        let close = src.rfind('}').unwrap();
        let open = match_bracket(src, close - 1, b'{', b'}', Step::Backward).unwrap();
        assert_eq!(open, src.find('{').unwrap());
    }

    #[test]
    fn forward_match_finds_call_close() {
        let src = "it('a (b)', () => { foo(1) }) + rest";
        let close = match_bracket(src, 3, b'(', b')', Step::Forward).unwrap();
        assert_eq!(&src[..=close], "it('a (b)', () => { foo(1) })");
    }

    #[rstest]
    #[case("{}")]
    #[case("{ a { b } c }")]
    #[case("(f(x), g(h(y)))")]
    #[case("{{{}}{}}")]
    fn forward_and_backward_land_on_each_other(#[case] src: &str) {
        let (open, close) = match src.as_bytes()[0] {
            b'{' => (b'{', b'}'),
            _ => (b'(', b')'),
        };
        let last = src.len() - 1;

        let forward = match_bracket(src, 1, open, close, Step::Forward).unwrap();
        assert_eq!(forward, last);

        let backward = match_bracket(src, last - 1, open, close, Step::Backward).unwrap();
        assert_eq!(backward, 0);
    }

    #[test]
    fn unbalanced_scan_runs_off_the_end() {
        assert_eq!(match_bracket("a { b", 4, b'{', b'}', Step::Forward), None);
        assert_eq!(match_bracket("x } y", 4, b'{', b'}', Step::Backward), None);
        assert_eq!(match_bracket("", 0, b'{', b'}', Step::Backward), None);
    }

    #[test]
    fn brackets_inside_strings_are_counted() {
        // Known limitation: string contents are not excluded.
        let src = "{ '}' }";
        let found = match_bracket(src, 1, b'{', b'}', Step::Forward);
        assert_eq!(found, Some(3));
    }

    #[rstest]
    #[case("'plain'", "plain")]
    #[case("\"double\"", "double")]
    #[case("'it\\'s'", "it's")]
    #[case("\"say \\\"hi\\\"\"", "say \"hi\"")]
    #[case("'mixed \"quotes\"'", "mixed \"quotes\"")]
    #[case("'unterminated", "unterminated")]
    #[case("''", "")]
    fn reads_literals(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(read_quoted_literal(src, 0), expected);
    }

    #[test]
    fn escaped_quote_round_trips() {
        let src = r"'a\'b'";
        let value = read_quoted_literal(src, 0);
        let requoted = format!("'{}'", value.replace('\'', "\\'"));
        assert_eq!(requoted, src);
    }

    #[test]
    fn literal_end_points_at_closing_quote() {
        let src = "x('name', 1)";
        let lit = scan_quoted_literal(src, 2);
        assert_eq!(lit.value, "name");
        assert_eq!(lit.end, 7);
        assert_eq!(&src[lit.end..=lit.end], "'");
    }

    #[test]
    fn multibyte_characters_survive() {
        assert_eq!(read_quoted_literal("'héllo ✓'", 0), "héllo ✓");
        assert_eq!(read_quoted_literal("'\\✓'", 0), "✓");
    }
}
