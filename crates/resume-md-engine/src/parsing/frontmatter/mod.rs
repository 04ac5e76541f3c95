//! # Metadata Block Extractor
//!
//! A document may open with a `---` delimited YAML block. This module finds
//! it (`detect`), parses its body with `yaml-rust2` into a span-carrying
//! tree (`yaml`), and flattens the top-level keys into [`MetadataField`]s
//! (`render`).
//!
//! A missing block is not an error. A block whose YAML does not parse, or
//! that repeats a key within one mapping, fails the whole document with a
//! single `frontmatter` error.

pub mod detect;
pub mod render;
pub mod yaml;

use std::collections::HashSet;

use crate::models::{Metadata, MetadataField, ParseError, Position, Range};

use super::position::offset_to_position;

pub use detect::{FrontmatterBlock, detect};

use yaml::{YamlNode, YamlValue};

/// Line of the first body line; line 0 is the opening delimiter.
const BODY_LINE: usize = 1;

/// Parses the block's body into ordered metadata fields.
pub fn extract(block: &FrontmatterBlock<'_>) -> Result<Metadata, ParseError> {
    let body = block.body;
    let root = yaml::parse(body).map_err(|err| {
        let range = err
            .offset
            .map(|offset| Range::empty_at(offset_to_position(body, offset, BODY_LINE)))
            .unwrap_or(block.range);
        ParseError::frontmatter(format!("Invalid frontmatter YAML: {}", err.message), range)
    })?;

    let entries = match root.as_ref().map(|node| (node, node.as_mapping())) {
        None => &[][..],
        Some((_, Some(entries))) => entries,
        Some((node, None)) => {
            log::debug!("frontmatter root is not a mapping: {:?}", node.value);
            &[][..]
        }
    };

    if let Some(root) = &root
        && let Some(key) = repeated_key(root)
    {
        let range = key
            .span
            .map(|span| span_range(body, span.start, span.end))
            .unwrap_or(block.range);
        return Err(ParseError::frontmatter(
            format!(
                "Map keys must be unique; \"{}\" is repeated",
                render::render_key(key)
            ),
            range,
        ));
    }

    let mut fields = Vec::with_capacity(entries.len());
    for (ordinal, (key, value)) in entries.iter().enumerate() {
        let key_text = render::render_key(key);
        let range = match value.span {
            Some(span) => span_range(body, span.start, span.end),
            None => Range::empty_at(Position::new(BODY_LINE + ordinal, 0)),
        };
        fields.push(MetadataField {
            key: key_text,
            value: render::render_value(value),
            range,
        });
    }

    Ok(Metadata {
        fields,
        range: block.range,
    })
}

/// First key repeated within any one mapping, searching in document order.
fn repeated_key(node: &YamlNode) -> Option<&YamlNode> {
    match &node.value {
        YamlValue::Mapping(entries) => {
            let mut seen = HashSet::new();
            for (key, value) in entries {
                if !seen.insert(render::render_key(key)) {
                    return Some(key);
                }
                if let Some(found) = repeated_key(value) {
                    return Some(found);
                }
            }
            None
        }
        YamlValue::Sequence(items) => items.iter().find_map(repeated_key),
        _ => None,
    }
}

fn span_range(body: &str, start: usize, end: usize) -> Range {
    Range::new(
        offset_to_position(body, start, BODY_LINE),
        offset_to_position(body, end, BODY_LINE),
    )
}
