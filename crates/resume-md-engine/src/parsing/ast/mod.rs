//! # AST Adapter
//!
//! Wraps `pulldown-cmark` and exposes its output as an owned, generic node
//! tree with optional 1-based source points. The rest of the engine only
//! sees [`Node`]; the markdown dialect itself is pulldown-cmark's business.
//!
//! - **`node`**: `Node`, `NodeKind`, `Point`, `SourceSpan`
//! - **`lines`**: `LineIndex`, byte offset to line/column conversion
//! - **`builder`**: `TreeBuilder`, folds the event stream into a tree

pub mod builder;
pub mod lines;
pub mod node;

pub use builder::parse_markdown;
pub use lines::LineIndex;
pub use node::{Node, NodeKind, Point, SourceSpan};
