//! # Section Content
//!
//! What renderers consume: a section's body as an ordered run of
//! [`ContentBlock`]s, free prose interleaved with typed entries read from
//! `resume:<type>` blocks.

mod builder;
mod entries;

use serde::Serialize;

pub use builder::section_content;
pub use entries::{
    CertificationEntry, CompetencyEntry, EducationEntry, EntryError, ExperienceEntry,
    LanguageEntry, SkillEntry, TableBlock, parse_entries, parse_single,
};

/// One piece of a section body.
///
/// Serialized with a `type` tag, e.g. `{"type":"skills","entries":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Markdown { content: String },
    Education { entries: Vec<EducationEntry> },
    Experience { entries: Vec<ExperienceEntry> },
    Certifications { entries: Vec<CertificationEntry> },
    Skills { entries: Vec<SkillEntry> },
    Competencies { entries: Vec<CompetencyEntry> },
    Languages { entries: Vec<LanguageEntry> },
    Table { table: TableBlock },
}

impl ContentBlock {
    /// The serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Markdown { .. } => "markdown",
            ContentBlock::Education { .. } => "education",
            ContentBlock::Experience { .. } => "experience",
            ContentBlock::Certifications { .. } => "certifications",
            ContentBlock::Skills { .. } => "skills",
            ContentBlock::Competencies { .. } => "competencies",
            ContentBlock::Languages { .. } => "languages",
            ContentBlock::Table { .. } => "table",
        }
    }

    /// Reads a `resume:<type>` payload into its variant.
    ///
    /// `markdown`, `summary` and `motivation` payloads are prose and come back
    /// as [`ContentBlock::Markdown`]. Returns `Ok(None)` for types with no
    /// variant.
    pub fn from_payload(block_type: &str, content: &str) -> Result<Option<Self>, EntryError> {
        let block = match block_type {
            "markdown" | "summary" | "motivation" => ContentBlock::Markdown {
                content: content.to_string(),
            },
            "education" => ContentBlock::Education {
                entries: parse_entries(content)?,
            },
            "experience" => ContentBlock::Experience {
                entries: parse_entries(content)?,
            },
            "certifications" => ContentBlock::Certifications {
                entries: parse_entries(content)?,
            },
            "skills" => ContentBlock::Skills {
                entries: parse_entries(content)?,
            },
            "competencies" => ContentBlock::Competencies {
                entries: parse_entries(content)?,
            },
            "languages" => ContentBlock::Languages {
                entries: parse_entries(content)?,
            },
            "table" => ContentBlock::Table {
                table: parse_single(content)?,
            },
            _ => return Ok(None),
        };
        Ok(Some(block))
    }
}
