use anyhow::{Result, bail};

use crate::args::CaretArgs;

/// Byte offset of the caret described by `args` within `text`.
pub fn caret_offset(text: &str, args: &CaretArgs) -> Result<usize> {
    match (args.offset, args.line) {
        (Some(offset), _) => {
            if offset > text.len() {
                bail!("Offset {offset} is past the end of the file ({} bytes)", text.len());
            }
            Ok(offset)
        }
        (None, Some(line)) => line_column_offset(text, line, args.column),
        (None, None) => bail!("Give the caret with --offset or --line"),
    }
}

/// Converts a 1-based line and character column to a byte offset.
///
/// Columns past the end of the line clamp to the line end.
pub fn line_column_offset(text: &str, line: usize, column: usize) -> Result<usize> {
    if line == 0 || column == 0 {
        bail!("Lines and columns start at 1");
    }

    let mut line_start = 0;
    for (i, current) in text.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let content = current.strip_suffix('\n').unwrap_or(current);
            let within = content
                .char_indices()
                .nth(column - 1)
                .map(|(at, _)| at)
                .unwrap_or(content.len());
            return Ok(line_start + within);
        }
        line_start += current.len();
    }

    bail!("Line {line} is past the end of the file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const TEXT: &str = "ab\nçd\n\nlast";

    #[rstest]
    #[case(1, 1, 0)]
    #[case(1, 2, 1)]
    #[case(2, 1, 3)]
    #[case(2, 2, 5)]
    #[case(2, 9, 6)]
    #[case(3, 1, 7)]
    #[case(4, 4, 11)]
    fn converts_line_and_column(#[case] line: usize, #[case] column: usize, #[case] offset: usize) {
        assert_eq!(line_column_offset(TEXT, line, column).unwrap(), offset);
    }

    #[test]
    fn rejects_out_of_range_positions() {
        assert!(line_column_offset(TEXT, 0, 1).is_err());
        assert!(line_column_offset(TEXT, 9, 1).is_err());
    }

    #[test]
    fn offset_wins_when_given() {
        let args = CaretArgs {
            file: "a.test.js".into(),
            offset: Some(4),
            line: None,
            column: 1,
        };
        assert_eq!(caret_offset(TEXT, &args).unwrap(), 4);

        let past_end = CaretArgs {
            offset: Some(99),
            ..args
        };
        assert!(caret_offset(TEXT, &past_end).is_err());
    }
}
