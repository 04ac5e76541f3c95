use super::ast::Node;

/// Flattens an inline subtree into plain text.
///
/// Leaves give their literal value, containers concatenate their children
/// with no separator, anything else (breaks, images) gives `""`.
pub fn extract_text(node: &Node) -> String {
    if let Some(value) = &node.value {
        return value.clone();
    }
    let mut out = String::new();
    for child in &node.children {
        out.push_str(&extract_text(child));
    }
    out
}
