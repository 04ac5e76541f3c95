pub mod document;
pub mod error;
pub mod position;

pub use document::{CodeBlock, Document, Metadata, MetadataField, Section};
pub use error::{ErrorSource, ParseError, ParseFailure};
pub use position::{Position, Range};
