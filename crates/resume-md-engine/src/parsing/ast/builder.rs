use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag};

use super::{
    lines::LineIndex,
    node::{Node, NodeKind},
};

/// Folds pulldown-cmark's flat event stream into an owned [`Node`] tree.
///
/// Each `Start` opens a node on the stack and the matching `End` closes it
/// into its parent. Code and HTML blocks collect their text into `value`.
pub struct TreeBuilder<'a> {
    index: &'a LineIndex<'a>,
    stack: Vec<Node>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(index: &'a LineIndex<'a>, text_len: usize) -> Self {
        let root = Node::new(NodeKind::Root, Some(index.span(0..text_len)));
        Self {
            index,
            stack: vec![root],
        }
    }

    pub fn push(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => {
                let mut node = Node::new(kind_for(&tag), Some(self.index.span(range)));
                if matches!(node.kind, NodeKind::Code { .. } | NodeKind::Html) {
                    node.value = Some(String::new());
                }
                self.stack.push(node);
            }
            Event::End(_) => self.close(),
            Event::Text(text) => {
                if !self.append_to_raw_block(&text) {
                    self.add_leaf(NodeKind::Text, text, range);
                }
            }
            Event::Html(html) => {
                if !self.append_to_raw_block(&html) {
                    self.add_leaf(NodeKind::Html, html, range);
                }
            }
            Event::InlineHtml(html) => self.add_leaf(NodeKind::Html, html, range),
            Event::Code(code) => self.add_leaf(NodeKind::InlineCode, code, range),
            Event::SoftBreak => self.add_leaf(NodeKind::Text, CowStr::Borrowed("\n"), range),
            Event::HardBreak => {
                let span = self.index.span(range);
                self.add_node(Node::new(NodeKind::Break, Some(span)));
            }
            Event::Rule => {
                let span = self.index.span(range);
                self.add_node(Node::new(NodeKind::ThematicBreak, Some(span)));
            }
            _ => {}
        }
    }

    /// Closes any nodes left open and returns the root.
    pub fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack
            .pop()
            .unwrap_or_else(|| Node::new(NodeKind::Root, None))
    }

    fn close(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(mut node) = self.stack.pop() {
            if node.kind == NodeKind::Image {
                // Alt text is not part of the surrounding text.
                node.children.clear();
            }
            self.add_node(node);
        }
    }

    fn append_to_raw_block(&mut self, text: &str) -> bool {
        match self.stack.last_mut() {
            Some(top) if matches!(top.kind, NodeKind::Code { .. } | NodeKind::Html) => {
                top.value.get_or_insert_with(String::new).push_str(text);
                true
            }
            _ => false,
        }
    }

    fn add_leaf(&mut self, kind: NodeKind, value: CowStr<'_>, range: Range<usize>) {
        let span = self.index.span(range);
        self.add_node(Node::leaf(kind, value.into_string(), Some(span)));
    }

    fn add_node(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }
}

fn kind_for(tag: &Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading {
            depth: *level as u8,
        },
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
            let (lang, meta) = split_info(info);
            NodeKind::Code {
                fenced: true,
                lang,
                meta,
            }
        }
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::Code {
            fenced: false,
            lang: None,
            meta: None,
        },
        Tag::HtmlBlock => NodeKind::Html,
        Tag::List(_) => NodeKind::List,
        Tag::Item => NodeKind::ListItem,
        Tag::Table(_) => NodeKind::Table,
        Tag::TableHead | Tag::TableRow => NodeKind::TableRow,
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::Strong,
        Tag::Strikethrough => NodeKind::Delete,
        Tag::Link { .. } => NodeKind::Link,
        Tag::Image { .. } => NodeKind::Image,
        _ => NodeKind::Other,
    }
}

/// Splits a fence info string into its tag (first word) and the rest.
fn split_info(info: &str) -> (Option<String>, Option<String>) {
    let info = info.trim();
    if info.is_empty() {
        return (None, None);
    }
    match info.split_once(char::is_whitespace) {
        Some((lang, meta)) => {
            let meta = meta.trim();
            (
                Some(lang.to_string()),
                (!meta.is_empty()).then(|| meta.to_string()),
            )
        }
        None => (Some(info.to_string()), None),
    }
}

/// Markdown extensions enabled for resume documents.
pub fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Parses `text` into a [`Node`] tree rooted at [`NodeKind::Root`].
pub fn parse_markdown(text: &str) -> Node {
    let index = LineIndex::new(text);
    let mut builder = TreeBuilder::new(&index, text.len());
    for (event, range) in Parser::new_ext(text, options()).into_offset_iter() {
        builder.push(event, range);
    }
    builder.finish()
}
