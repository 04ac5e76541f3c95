use super::node::{Point, SourceSpan};

/// Byte offsets of line starts, for turning parser byte offsets into 1-based
/// line/column points.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { text, starts }
    }

    /// Point for a byte offset. Offsets past the end clamp to the end of text;
    /// offsets inside a multi-byte char snap back to its start.
    pub fn point(&self, offset: usize) -> Point {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self.starts.partition_point(|&s| s <= offset) - 1;
        let line_start = self.starts[line];
        Point {
            line: line + 1,
            column: self.text[line_start..offset].chars().count() + 1,
            offset,
        }
    }

    /// Span for a byte range, with trailing line terminators dropped so a
    /// block ends on its own last line.
    pub fn span(&self, range: std::ops::Range<usize>) -> SourceSpan {
        let start = range.start.min(self.text.len());
        let mut end = range.end.min(self.text.len()).max(start);
        let bytes = self.text.as_bytes();
        while end > start && matches!(bytes[end - 1], b'\n' | b'\r') {
            end -= 1;
        }
        SourceSpan {
            start: self.point(start),
            end: self.point(end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_offset_is_line_one_column_one() {
        let idx = LineIndex::new("hello\nworld");
        let p = idx.point(0);
        assert_eq!((p.line, p.column), (1, 1));
    }

    #[test]
    fn offset_after_newline_starts_next_line() {
        let idx = LineIndex::new("hello\nworld");
        let p = idx.point(6);
        assert_eq!((p.line, p.column), (2, 1));
    }

    #[test]
    fn columns_count_chars() {
        let idx = LineIndex::new("# 職歴\n");
        // "# 職歴" is 2 + 3 + 3 bytes
        let p = idx.point(8);
        assert_eq!((p.line, p.column), (1, 5));
    }

    #[test]
    fn span_drops_trailing_newlines() {
        let idx = LineIndex::new("# Title\n\nbody\n");
        let s = idx.span(0..8);
        assert_eq!((s.start.line, s.start.column), (1, 1));
        assert_eq!((s.end.line, s.end.column), (1, 8));
    }

    #[test]
    fn span_drops_crlf() {
        let idx = LineIndex::new("# Title\r\nnext");
        let s = idx.span(0..9);
        assert_eq!((s.end.line, s.end.column), (1, 8));
    }

    #[test]
    fn offsets_past_end_clamp() {
        let idx = LineIndex::new("ab");
        let p = idx.point(10);
        assert_eq!((p.line, p.column, p.offset), (1, 3, 2));
    }
}
