use crate::models::{CodeBlock, Position, Range};

use super::{
    ast::{Node, NodeKind},
    position::{offset_to_position, to_range},
};

/// Tag prefix that marks a fenced block as structured resume data.
pub const RESUME_PREFIX: &str = "resume:";

/// Turns a fenced code node tagged `resume:<type>` into a [`CodeBlock`].
///
/// Returns `None` for anything else: other tags, untagged fences, indented
/// code and non-code nodes.
pub fn classify(node: &Node) -> Option<CodeBlock> {
    let NodeKind::Code {
        fenced: true,
        lang: Some(lang),
        ..
    } = &node.kind
    else {
        return None;
    };
    let block_type = lang.strip_prefix(RESUME_PREFIX)?;

    let content = strip_final_newline(node.value.as_deref().unwrap_or_default()).to_string();
    let range = to_range(node.position.as_ref());
    // Content lines sit at the fence's indent (list items, block quotes).
    let indent = range.start.character;
    let content_start = Position::new(range.start.line + 1, indent);
    let dedented_end = offset_to_position(&content, content.chars().count(), content_start.line);
    let content_end = Position::new(dedented_end.line, dedented_end.character + indent);

    Some(CodeBlock {
        block_type: block_type.to_string(),
        lang: lang.clone(),
        content,
        range,
        content_range: Range::new(content_start, content_end),
    })
}

fn strip_final_newline(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

/// Collects every resume block under `node`, in document order.
pub fn collect(node: &Node) -> Vec<CodeBlock> {
    let mut out = Vec::new();
    node.walk(&mut |n| {
        if let Some(block) = classify(n) {
            out.push(block);
        } else if let NodeKind::Code { lang, .. } = &n.kind {
            log::debug!("ignoring code block tagged {lang:?}");
        }
    });
    out
}
