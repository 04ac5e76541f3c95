//! Position-accurate parser for resume markdown.
//!
//! A resume is ordinary markdown with three conventions layered on top: a
//! leading `---` metadata block, fenced blocks tagged `resume:<type>` that
//! carry structured entries, and top-level headings that open sections when
//! their title is known to a [`SectionRegistry`]. Every element of the parsed
//! [`Document`] records the zero-based line/character [`Range`] it came from.
//!
//! ```
//! use resume_md_engine::parse_resume;
//!
//! let doc = parse_resume("# Experience\n\n```resume:experience\ncompany: A\n```").unwrap();
//! assert_eq!(doc.sections()[0].id, "experience");
//! assert_eq!(doc.code_blocks()[0].block_type, "experience");
//! ```

pub mod content;
pub mod models;
pub mod parsing;
pub mod registry;

pub use content::{ContentBlock, section_content};
pub use models::*;
pub use parsing::{parse_document, parse_resume};
pub use registry::SectionRegistry;
