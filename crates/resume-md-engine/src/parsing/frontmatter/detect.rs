use crate::models::{Position, Range};

/// Delimiter line that opens and closes the metadata block.
pub const DELIMITER: &str = "---";

/// A metadata block found at the top of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterBlock<'a> {
    /// Text between the delimiter lines, including the final newline.
    pub body: &'a str,
    /// Number of lines the block occupies, delimiters included.
    pub line_count: usize,
    /// Byte offset just past the closing delimiter line.
    pub end: usize,
    /// From the opening delimiter to the end of the closing one.
    pub range: Range,
}

impl FrontmatterBlock<'_> {
    /// Returns `source` with the block's lines emptied.
    ///
    /// Line numbers of everything after the block are unchanged, so positions
    /// computed on the masked text are valid for the original.
    pub fn mask(&self, source: &str) -> String {
        let rest = source.get(self.end..).unwrap_or_default();
        let terminated = self.line_count - usize::from(self.end == source.len() && !source.ends_with('\n'));
        let mut out = String::with_capacity(terminated + rest.len());
        out.extend(std::iter::repeat_n('\n', terminated));
        out.push_str(rest);
        out
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\n', '\r', ' ', '\t']) == DELIMITER
}

/// Finds a metadata block opened on the very first line.
///
/// A block without a closing delimiter is not a block.
pub fn detect(source: &str) -> Option<FrontmatterBlock<'_>> {
    let mut lines = source.split_inclusive('\n');
    let first = lines.next()?;
    if !is_delimiter(first) {
        return None;
    }

    let body_start = first.len();
    let mut offset = body_start;
    for (i, line) in lines.enumerate() {
        if is_delimiter(line) {
            let closing_line = i + 1;
            let closing_width = line.trim_end_matches(['\n', '\r']).chars().count();
            return Some(FrontmatterBlock {
                body: &source[body_start..offset],
                line_count: closing_line + 1,
                end: offset + line.len(),
                range: Range::new(
                    Position::new(0, 0),
                    Position::new(closing_line, closing_width),
                ),
            });
        }
        offset += line.len();
    }
    None
}
