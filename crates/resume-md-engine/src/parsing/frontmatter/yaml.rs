//! YAML event receiver that builds a small value tree with char-offset spans.

use std::collections::HashMap;

use yaml_rust2::{
    ScanError,
    parser::{Event, MarkedEventReceiver, Parser},
    scanner::{Marker, TScalarStyle},
};

/// `[start, end)` char offsets into the YAML text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSpan {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    Quoted,
    Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum YamlValue {
    Null,
    Scalar { text: String, style: ScalarStyle },
    Sequence(Vec<YamlNode>),
    Mapping(Vec<(YamlNode, YamlNode)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    pub value: YamlValue,
    /// `None` for empty values and aliases, which have no text of their own.
    pub span: Option<CharSpan>,
}

impl YamlNode {
    fn detached(value: YamlValue) -> Self {
        Self { value, span: None }
    }

    /// Entries of a mapping node.
    pub fn as_mapping(&self) -> Option<&[(YamlNode, YamlNode)]> {
        match &self.value {
            YamlValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Scalar text, if this is a scalar.
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            YamlValue::Scalar { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Failure reported by the YAML scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlError {
    pub message: String,
    /// Char offset of the failure, when the scanner knows it.
    pub offset: Option<usize>,
}

impl From<ScanError> for YamlError {
    fn from(err: ScanError) -> Self {
        Self {
            message: err.info().to_string(),
            offset: Some(err.marker().index()),
        }
    }
}

/// Parses the first YAML document in `text`. Empty input gives `Ok(None)`.
pub fn parse(text: &str) -> Result<Option<YamlNode>, YamlError> {
    let mut builder = TreeBuilder::new(text);
    let mut parser = Parser::new_from_str(text);
    parser.load(&mut builder, false)?;
    Ok(builder.finish())
}

enum Frame {
    Sequence {
        start: usize,
        anchor: usize,
        items: Vec<YamlNode>,
    },
    Mapping {
        start: usize,
        anchor: usize,
        entries: Vec<(YamlNode, YamlNode)>,
        pending_key: Option<YamlNode>,
    },
}

struct TreeBuilder {
    chars: Vec<char>,
    stack: Vec<Frame>,
    root: Option<YamlNode>,
    anchors: HashMap<usize, YamlValue>,
    /// Set after a literal/folded scalar; its end is the next event's start.
    open_block_scalar: bool,
}

impl TreeBuilder {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            stack: Vec::new(),
            root: None,
            anchors: HashMap::new(),
            open_block_scalar: false,
        }
    }

    fn finish(self) -> Option<YamlNode> {
        self.root
    }

    fn scalar(&mut self, text: String, style: TScalarStyle, anchor: usize, start: usize) {
        let style = match style {
            TScalarStyle::Plain => ScalarStyle::Plain,
            TScalarStyle::SingleQuoted | TScalarStyle::DoubleQuoted => ScalarStyle::Quoted,
            _ => ScalarStyle::Block,
        };

        // A missing value arrives as an empty plain scalar marked at the next token.
        let missing = style == ScalarStyle::Plain
            && (text.is_empty() || (text == "~" && self.chars.get(start) != Some(&'~')));
        let node = if missing {
            YamlNode::detached(YamlValue::Null)
        } else {
            let (start, end) = match style {
                ScalarStyle::Plain => (start, self.plain_end(start, &text)),
                ScalarStyle::Quoted => (start, self.quoted_end(start, &text)),
                ScalarStyle::Block => {
                    self.open_block_scalar = true;
                    let indicator = self.block_indicator(start);
                    (indicator, indicator)
                }
            };
            let value = if style == ScalarStyle::Plain && is_null_literal(&text) {
                YamlValue::Null
            } else {
                YamlValue::Scalar { text, style }
            };
            YamlNode {
                value,
                span: Some(CharSpan { start, end }),
            }
        };
        self.register_anchor(anchor, &node);
        self.push_complete(node);
    }

    fn end_collection(&mut self, at: usize) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let (start, anchor, value) = match frame {
            Frame::Sequence {
                start,
                anchor,
                items,
            } => (start, anchor, YamlValue::Sequence(items)),
            Frame::Mapping {
                start,
                anchor,
                mut entries,
                pending_key,
            } => {
                if let Some(key) = pending_key {
                    entries.push((key, YamlNode::detached(YamlValue::Null)));
                }
                (start, anchor, YamlValue::Mapping(entries))
            }
        };
        let end = self.collection_end(start, at);
        let node = YamlNode {
            value,
            span: Some(CharSpan { start, end }),
        };
        self.register_anchor(anchor, &node);
        self.push_complete(node);
    }

    fn push_complete(&mut self, node: YamlNode) {
        match self.stack.last_mut() {
            None => self.root = Some(node),
            Some(Frame::Sequence { items, .. }) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key.take() {
                Some(key) => entries.push((key, node)),
                None => *pending_key = Some(node),
            },
        }
    }

    fn register_anchor(&mut self, anchor: usize, node: &YamlNode) {
        if anchor > 0 {
            self.anchors.insert(anchor, node.value.clone());
        }
    }

    /// The most recently completed node, wherever it was attached.
    fn last_node_mut(&mut self) -> Option<&mut YamlNode> {
        match self.stack.last_mut() {
            None => self.root.as_mut(),
            Some(Frame::Sequence { items, .. }) => items.last_mut(),
            Some(Frame::Mapping {
                entries,
                pending_key,
                ..
            }) => match pending_key {
                Some(key) => Some(key),
                None => entries.last_mut().map(|(_, value)| value),
            },
        }
    }

    fn close_block_scalar(&mut self, at: usize) {
        self.open_block_scalar = false;
        let start = match self.last_node_mut().and_then(|n| n.span) {
            Some(span) => span.start,
            None => return,
        };
        let end = self.trim_back(at, start);
        if let Some(span) = self.last_node_mut().and_then(|n| n.span.as_mut()) {
            span.end = end;
        }
    }

    fn trim_back(&self, at: usize, floor: usize) -> usize {
        let mut end = at.min(self.chars.len());
        while end > floor && self.chars[end - 1].is_whitespace() {
            end -= 1;
        }
        end
    }

    fn collection_end(&self, start: usize, at: usize) -> usize {
        match self.chars.get(at) {
            Some(']' | '}') => at + 1,
            _ => self.trim_back(at, start),
        }
    }

    fn plain_end(&self, start: usize, text: &str) -> usize {
        let len = text.chars().count();
        let verbatim = self
            .chars
            .get(start..)
            .is_some_and(|rest| rest.iter().copied().take(len).eq(text.chars()));
        if verbatim {
            return start + len;
        }
        // Folded over several lines: settle for the end of the first one.
        let mut end = start;
        while let Some(&ch) = self.chars.get(end) {
            if ch == '\n' || (ch == '#' && end > start && self.chars[end - 1].is_whitespace()) {
                break;
            }
            end += 1;
        }
        self.trim_back(end, start)
    }

    /// The `|` or `>` header of a block scalar whose content is marked at
    /// `content`. Falls back to `content` when no header is found.
    fn block_indicator(&self, content: usize) -> usize {
        if matches!(self.chars.get(content), Some('|' | '>')) {
            return content;
        }
        let mut end = content.min(self.chars.len());
        while end > 0 && self.chars[end - 1].is_whitespace() {
            end -= 1;
        }
        let line_start = self.chars[..end]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);

        let mut found = None;
        for i in line_start..end {
            let after_blank = i == line_start || self.chars[i - 1].is_whitespace();
            match self.chars[i] {
                '#' if after_blank => break,
                '|' | '>' if after_blank => found = Some(i),
                _ => {}
            }
        }
        found.unwrap_or(content)
    }

    fn quoted_end(&self, start: usize, text: &str) -> usize {
        let Some(&quote) = self.chars.get(start) else {
            return start;
        };
        let mut i = start + 1;
        while let Some(&ch) = self.chars.get(i) {
            match ch {
                '\\' if quote == '"' => i += 2,
                '\'' if quote == '\'' && self.chars.get(i + 1) == Some(&'\'') => i += 2,
                c if c == quote => return i + 1,
                _ => i += 1,
            }
        }
        start + text.chars().count() + 2
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        if self.open_block_scalar {
            self.close_block_scalar(mark.index());
        }
        match ev {
            Event::Scalar(text, style, anchor, _tag) => {
                self.scalar(text, style, anchor, mark.index());
            }
            Event::SequenceStart(anchor, _tag) => self.stack.push(Frame::Sequence {
                start: mark.index(),
                anchor,
                items: Vec::new(),
            }),
            Event::MappingStart(anchor, _tag) => self.stack.push(Frame::Mapping {
                start: mark.index(),
                anchor,
                entries: Vec::new(),
                pending_key: None,
            }),
            Event::SequenceEnd | Event::MappingEnd => self.end_collection(mark.index()),
            Event::Alias(id) => {
                let value = self.anchors.get(&id).cloned().unwrap_or(YamlValue::Null);
                self.push_complete(YamlNode::detached(value));
            }
            _ => {}
        }
    }
}

/// Plain scalars YAML reads as null.
pub fn is_null_literal(text: &str) -> bool {
    matches!(text, "" | "~" | "null" | "Null" | "NULL")
}
