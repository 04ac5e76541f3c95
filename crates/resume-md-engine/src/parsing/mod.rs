//! # Document Parsing
//!
//! Turns resume markdown into a [`Document`] whose every element points
//! back at its source range.
//!
//! ## Pipeline
//!
//! 1. **Metadata** (`frontmatter`): find and parse the leading `---` block.
//!    A YAML failure here is the only way a parse can fail.
//! 2. **AST** (`ast`): parse the rest with pulldown-cmark, with the metadata
//!    lines blanked so line numbers stay put.
//! 3. **Sections** (`sections`): group top-level headings known to the
//!    [`SectionRegistry`], collecting `resume:` blocks (`code_block`) and
//!    heading titles (`text`) on the way.
//!
//! Positions are zero-based line/char pairs; see `position`.

pub mod ast;
pub mod code_block;
pub mod frontmatter;
pub mod position;
pub mod sections;
pub mod text;

#[cfg(test)]
pub mod tests;

use std::borrow::Cow;

use crate::{
    models::{Document, ParseFailure},
    registry::SectionRegistry,
};

/// Parses `source` using the given section registry.
///
/// Either the whole document comes back, or only the errors that stopped it.
pub fn parse_document(source: &str, registry: &SectionRegistry) -> Result<Document, ParseFailure> {
    let block = frontmatter::detect(source);
    let metadata = match &block {
        Some(block) => Some(frontmatter::extract(block).map_err(ParseFailure::single)?),
        None => None,
    };

    let markdown: Cow<'_, str> = match &block {
        Some(block) => Cow::Owned(block.mask(source)),
        None => Cow::Borrowed(source),
    };
    let root = ast::parse_markdown(&markdown);
    let segments = sections::segment(&root, &markdown, registry);

    log::debug!(
        "parsed document: {} section(s), {} resume block(s), metadata: {}",
        segments.sections.len(),
        segments.code_blocks.len(),
        metadata.is_some()
    );

    Ok(Document::new(
        metadata,
        segments.sections,
        segments.code_blocks,
        source.to_string(),
    ))
}

/// Parses `source` with the built-in English/Japanese section titles.
pub fn parse_resume(source: &str) -> Result<Document, ParseFailure> {
    parse_document(source, &SectionRegistry::default())
}
