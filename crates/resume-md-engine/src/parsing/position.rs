//! Conversions from parser-native coordinates into zero-based [`Position`]s.
//!
//! The AST adapter reports 1-based [`Point`]s; the YAML builder reports char
//! offsets into the metadata body. Both end up here.

use crate::models::{Position, Range};

use super::ast::{Point, SourceSpan};

/// Converts a 1-based point into a zero-based position. A missing point maps
/// to the document origin.
pub fn to_position(point: Option<&Point>) -> Position {
    match point {
        None => Position::default(),
        Some(p) => Position {
            line: p.line.saturating_sub(1),
            character: p.column.saturating_sub(1),
        },
    }
}

/// Converts a 1-based span into a zero-based range. A missing span maps to
/// the zero-width range at the origin.
pub fn to_range(span: Option<&SourceSpan>) -> Range {
    match span {
        None => Range::default(),
        Some(s) => Range::new(to_position(Some(&s.start)), to_position(Some(&s.end))),
    }
}

/// Maps a char offset within `content` to a position, with `content`'s first
/// line sitting at `base_line`.
///
/// Offsets past the end of `content` are not clamped: the character keeps
/// counting past the last line's length.
pub fn offset_to_position(content: &str, offset: usize, base_line: usize) -> Position {
    let mut newlines = 0;
    let mut line_start = 0;
    for (i, ch) in content.chars().take(offset).enumerate() {
        if ch == '\n' {
            newlines += 1;
            line_start = i + 1;
        }
    }
    Position {
        line: base_line + newlines,
        character: offset - line_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn point(line: usize, column: usize) -> Point {
        Point {
            line,
            column,
            offset: 0,
        }
    }

    #[rstest]
    #[case(1, 1, 0, 0)]
    #[case(5, 10, 4, 9)]
    #[case(12, 3, 11, 2)]
    fn to_position_shifts_to_zero_based(
        #[case] line: usize,
        #[case] column: usize,
        #[case] expected_line: usize,
        #[case] expected_character: usize,
    ) {
        assert_eq!(
            to_position(Some(&point(line, column))),
            Position::new(expected_line, expected_character)
        );
    }

    #[test]
    fn to_position_of_nothing_is_origin() {
        assert_eq!(to_position(None), Position::new(0, 0));
    }

    #[test]
    fn to_position_never_goes_negative() {
        assert_eq!(to_position(Some(&point(0, 0))), Position::new(0, 0));
    }

    #[test]
    fn to_range_of_nothing_is_empty_origin() {
        let r = to_range(None);
        assert_eq!(r.start, Position::new(0, 0));
        assert_eq!(r.end, Position::new(0, 0));
    }

    #[test]
    fn to_range_converts_both_ends() {
        let span = SourceSpan {
            start: point(2, 1),
            end: point(4, 4),
        };
        insta::assert_debug_snapshot!(to_range(Some(&span)), @r"
        Range {
            start: Position {
                line: 1,
                character: 0,
            },
            end: Position {
                line: 3,
                character: 3,
            },
        }
        ");
    }

    #[rstest]
    #[case("abc", 0, 0, 0)]
    #[case("abc", 2, 0, 2)]
    #[case("ab\ncd", 3, 1, 0)]
    #[case("ab\ncd", 5, 1, 2)]
    #[case("a\n\nb", 3, 2, 0)]
    fn offset_to_position_counts_newlines(
        #[case] content: &str,
        #[case] offset: usize,
        #[case] line: usize,
        #[case] character: usize,
    ) {
        assert_eq!(
            offset_to_position(content, offset, 0),
            Position::new(line, character)
        );
    }

    #[test]
    fn offset_to_position_adds_base_line() {
        assert_eq!(
            offset_to_position("name: x\nrole: y", 14, 1),
            Position::new(2, 6)
        );
    }

    #[test]
    fn offset_to_position_does_not_clamp() {
        assert_eq!(offset_to_position("ab\ncd", 9, 0), Position::new(1, 6));
    }

    #[test]
    fn offset_to_position_counts_chars_not_bytes() {
        assert_eq!(offset_to_position("職歴: x", 3, 0), Position::new(0, 3));
    }
}
