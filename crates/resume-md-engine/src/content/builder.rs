use crate::models::{CodeBlock, Document, Section};

use super::ContentBlock;

/// Builds the ordered body of `section`.
///
/// Lines between the heading and the section end are cut at each resume
/// block. Prose runs become [`ContentBlock::Markdown`] (blank runs are
/// skipped) and each block becomes its typed variant. A block with an
/// unknown type or an unreadable payload is kept as markdown holding the
/// fence as written.
pub fn section_content(doc: &Document, section: &Section) -> Vec<ContentBlock> {
    let lines: Vec<&str> = doc.raw_content().lines().collect();
    let body_start = section.title_range.end.line + 1;
    let body_end = (section.range.end.line + 1).min(lines.len());

    let mut out = Vec::new();
    let mut cursor = body_start;
    for block in &section.code_blocks {
        let start = block.range.start.line;
        if start < cursor {
            continue;
        }
        push_prose(&mut out, &lines, cursor, start);
        out.push(typed_block(block, &lines));
        cursor = block.range.end.line + 1;
    }
    push_prose(&mut out, &lines, cursor, body_end);
    out
}

fn push_prose(out: &mut Vec<ContentBlock>, lines: &[&str], from: usize, to: usize) {
    if from >= to || from >= lines.len() {
        return;
    }
    let chunk = &lines[from..to.min(lines.len())];
    let first = chunk.iter().position(|l| !l.trim().is_empty());
    let last = chunk.iter().rposition(|l| !l.trim().is_empty());
    if let (Some(first), Some(last)) = (first, last) {
        out.push(ContentBlock::Markdown {
            content: chunk[first..=last].join("\n"),
        });
    }
}

fn typed_block(block: &CodeBlock, lines: &[&str]) -> ContentBlock {
    match ContentBlock::from_payload(&block.block_type, &block.content) {
        Ok(Some(typed)) => typed,
        Ok(None) => {
            log::warn!(
                "no content type for {:?} at line {}; keeping it as markdown",
                block.lang,
                block.range.start.line + 1
            );
            verbatim(block, lines)
        }
        Err(e) => {
            log::warn!(
                "unreadable {:?} block at line {}: {e}; keeping it as markdown",
                block.lang,
                block.range.start.line + 1
            );
            verbatim(block, lines)
        }
    }
}

fn verbatim(block: &CodeBlock, lines: &[&str]) -> ContentBlock {
    let from = block.range.start.line.min(lines.len());
    let to = (block.range.end.line + 1).min(lines.len());
    ContentBlock::Markdown {
        content: lines[from..to].join("\n"),
    }
}
