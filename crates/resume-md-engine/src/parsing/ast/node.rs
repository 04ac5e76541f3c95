/// A 1-based line/column point, as the AST adapter reports it.
///
/// `column` counts chars; `offset` is the byte offset into the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

/// Start and end points of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub start: Point,
    pub end: Point,
}

/// The node shapes the rest of the engine cares about. Everything else the
/// markdown parser produces folds into [`NodeKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Heading {
        depth: u8,
    },
    Paragraph,
    /// A code block. `lang` is the first word of the info string.
    Code {
        fenced: bool,
        lang: Option<String>,
        meta: Option<String>,
    },
    BlockQuote,
    List,
    ListItem,
    Table,
    TableRow,
    TableCell,
    Html,
    ThematicBreak,
    Text,
    InlineCode,
    Emphasis,
    Strong,
    Delete,
    Link,
    Image,
    Break,
    Other,
}

/// A node of the adapted markdown tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Literal text for leaves (text, inline code, html, code block bodies).
    pub value: Option<String>,
    pub children: Vec<Node>,
    /// `None` when the parser gave no location for the node.
    pub position: Option<SourceSpan>,
}

impl Node {
    pub fn new(kind: NodeKind, position: Option<SourceSpan>) -> Self {
        Self {
            kind,
            value: None,
            children: Vec::new(),
            position,
        }
    }

    pub fn leaf(kind: NodeKind, value: impl Into<String>, position: Option<SourceSpan>) -> Self {
        Self {
            kind,
            value: Some(value.into()),
            children: Vec::new(),
            position,
        }
    }

    /// Heading depth, if this is a heading.
    pub fn heading_depth(&self) -> Option<u8> {
        match self.kind {
            NodeKind::Heading { depth } => Some(depth),
            _ => None,
        }
    }

    /// Depth-first, pre-order walk over this node and its descendants.
    pub fn walk(&self, visit: &mut impl FnMut(&Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
