use serde::Serialize;

use super::position::{Position, Range};

/// One top-level key of the metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataField {
    pub key: String,
    /// String rendering of the value; nulls render as `"null"`, collections as JSON.
    pub value: String,
    /// Location of the value (or a zero-width fallback when the YAML node has none).
    pub range: Range,
}

/// The leading `---` delimited block. Always starts at line 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub fields: Vec<MetadataField>,
    pub range: Range,
}

impl Metadata {
    /// Looks up a field by key.
    pub fn get(&self, key: &str) -> Option<&MetadataField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// A fenced block tagged `resume:<type>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    /// Suffix after `resume:`; may be empty.
    #[serde(rename = "type")]
    pub block_type: String,
    /// The full tag as written, e.g. `resume:experience`.
    pub lang: String,
    pub content: String,
    /// From the opening fence to the closing fence (or end of document).
    pub range: Range,
    /// Starts on the line after the opening fence.
    pub content_range: Range,
}

/// A recognized top-level heading and everything under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Canonical registry id, e.g. `experience`.
    pub id: String,
    /// Heading text as written, trimmed.
    pub title: String,
    pub title_range: Range,
    pub range: Range,
    pub code_blocks: Vec<CodeBlock>,
}

/// The parsed document.
///
/// Built once by [`crate::parse_document`] and only readable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    metadata: Option<Metadata>,
    sections: Vec<Section>,
    code_blocks: Vec<CodeBlock>,
    raw_content: String,
}

impl Document {
    pub(crate) fn new(
        metadata: Option<Metadata>,
        sections: Vec<Section>,
        code_blocks: Vec<CodeBlock>,
        raw_content: String,
    ) -> Self {
        Self {
            metadata,
            sections,
            code_blocks,
            raw_content,
        }
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Every `resume:` block in the document, in source order, whether or not
    /// it sits inside a recognized section.
    pub fn code_blocks(&self) -> &[CodeBlock] {
        &self.code_blocks
    }

    /// The input text, unchanged.
    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    /// First section with the given registry id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// The section whose range contains `pos`, used to map an editor cursor
    /// back onto the model.
    pub fn section_at(&self, pos: Position) -> Option<&Section> {
        self.sections.iter().find(|s| s.range.contains(pos))
    }

    /// Document-wide code blocks with the given `type`.
    pub fn code_blocks_of_type<'a>(
        &'a self,
        block_type: &'a str,
    ) -> impl Iterator<Item = &'a CodeBlock> + 'a {
        self.code_blocks
            .iter()
            .filter(move |b| b.block_type == block_type)
    }
}
