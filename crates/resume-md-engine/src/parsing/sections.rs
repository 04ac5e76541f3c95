use crate::{
    models::{CodeBlock, Position, Range, Section},
    registry::SectionRegistry,
};

use super::{
    ast::Node,
    code_block,
    position::to_range,
    text::extract_text,
};

/// Heading depth that opens and closes sections.
const SECTION_DEPTH: u8 = 1;

/// Recognized sections plus every resume block in the document.
#[derive(Debug, Default)]
pub struct Segments {
    pub sections: Vec<Section>,
    pub code_blocks: Vec<CodeBlock>,
}

/// A section still collecting content.
struct OpenSection {
    id: String,
    title: String,
    title_range: Range,
    range: Range,
    code_blocks: Vec<CodeBlock>,
}

impl OpenSection {
    fn new(id: &str, title: String, heading: &Node) -> Self {
        let title_range = to_range(heading.position.as_ref());
        Self {
            id: id.to_string(),
            title,
            title_range,
            range: title_range,
            code_blocks: Vec::new(),
        }
    }

    fn absorb(&mut self, node: &Node, blocks: &[CodeBlock]) {
        if node.position.is_some() {
            let end = to_range(node.position.as_ref()).end;
            if end > self.range.end {
                self.range.end = end;
            }
        }
        self.code_blocks.extend_from_slice(blocks);
    }

    /// Finishes the section. `boundary` is the last position before the next
    /// top-level heading or the end of the document.
    fn close(self, boundary: Option<Position>) -> Section {
        let mut range = self.range;
        if let Some(end) = boundary {
            range.end = end.max(self.title_range.end);
        }
        Section {
            id: self.id,
            title: self.title,
            title_range: self.title_range,
            range,
            code_blocks: self.code_blocks,
        }
    }
}

/// End of the given line in `lines`, or `None` past the last line.
fn line_end(lines: &[&str], line: usize) -> Option<Position> {
    lines
        .get(line)
        .map(|text| Position::new(line, text.chars().count()))
}

/// Splits the root's top-level blocks into sections.
///
/// Each depth-1 heading starts a new span that runs up to the line before
/// the next depth-1 heading, or to the end of `text`. Spans whose heading
/// the registry recognizes become sections; the rest are dropped whole.
/// Resume blocks are collected document-wide either way.
pub fn segment(root: &Node, text: &str, registry: &SectionRegistry) -> Segments {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Segments::default();
    let mut current: Option<OpenSection> = None;

    for node in &root.children {
        if node.heading_depth() == Some(SECTION_DEPTH) {
            if let Some(open) = current.take() {
                let boundary = node
                    .position
                    .as_ref()
                    .map(|span| to_range(Some(span)).start.line)
                    .and_then(|line| line.checked_sub(1))
                    .and_then(|line| line_end(&lines, line));
                out.sections.push(open.close(boundary));
            }
            let title = extract_text(node).trim().to_string();
            current = match registry.resolve(&title) {
                Some(id) => Some(OpenSection::new(id, title, node)),
                None => {
                    log::debug!("dropping unrecognized section {title:?}");
                    None
                }
            };
            continue;
        }

        let blocks = code_block::collect(node);
        if let Some(open) = current.as_mut() {
            open.absorb(node, &blocks);
        }
        out.code_blocks.extend(blocks);
    }

    if let Some(open) = current.take() {
        let boundary = lines
            .len()
            .checked_sub(1)
            .and_then(|line| line_end(&lines, line));
        out.sections.push(open.close(boundary));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Position, parsing::ast::parse_markdown};

    fn run(md: &str) -> Segments {
        segment(&parse_markdown(md), md, &SectionRegistry::default())
    }

    fn ids(segments: &Segments) -> Vec<&str> {
        segments.sections.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn recognized_heading_opens_section() {
        let out = run("# Experience\n\nDid things.\n");
        assert_eq!(ids(&out), vec!["experience"]);
        let section = &out.sections[0];
        assert_eq!(section.title, "Experience");
        assert_eq!(
            section.title_range,
            Range::new(Position::new(0, 0), Position::new(0, 12))
        );
        assert_eq!(section.range.end, Position::new(2, 11));
    }

    #[test]
    fn unrecognized_heading_is_dropped_with_its_body() {
        let out = run(
            "# Hobbies\n\n```resume:skills\n- chess\n```\n\n# Skills\n\n```resume:skills\n- Rust\n```\n",
        );
        assert_eq!(ids(&out), vec!["skills"]);
        assert_eq!(out.sections[0].code_blocks.len(), 1);
        assert_eq!(out.sections[0].code_blocks[0].content, "- Rust");
        assert_eq!(out.code_blocks.len(), 2);
    }

    #[test]
    fn section_stops_before_an_unrecognized_heading() {
        let out = run("# Skills\n\nRust\n\n# Hobbies\n\nChess\n");
        assert_eq!(out.sections.len(), 1);
        assert_eq!(out.sections[0].range.end, Position::new(3, 0));
    }

    #[test]
    fn section_runs_up_to_the_next_heading() {
        let out = run("# Skills\n\nRust   \n\n\n# Education\n\nMIT\n");
        assert_eq!(
            out.sections[0].range,
            Range::new(Position::new(0, 0), Position::new(4, 0))
        );
        assert_eq!(
            out.sections[1].range,
            Range::new(Position::new(5, 0), Position::new(7, 3))
        );
    }

    #[test]
    fn last_section_runs_to_document_end() {
        let out = run("# Skills\n\nRust\n\n   ");
        assert_eq!(out.sections[0].range.end, Position::new(4, 3));
    }

    #[test]
    fn subheadings_stay_inside_the_section() {
        let out = run("# Experience\n\n## Acme\n\nWork.\n\n### Role\n");
        assert_eq!(ids(&out), vec!["experience"]);
        assert_eq!(out.sections[0].range.end, Position::new(6, 8));
    }

    #[test]
    fn back_to_back_headings_make_empty_sections() {
        let out = run("# Skills\n# Education\n");
        assert_eq!(ids(&out), vec!["skills", "education"]);
        assert_eq!(out.sections[0].range, out.sections[0].title_range);
        assert!(out.sections[0].code_blocks.is_empty());
    }

    #[test]
    fn blocks_before_any_heading_are_document_wide_only() {
        let out = run("```resume:summary\nhi\n```\n\n# Skills\n");
        assert_eq!(out.code_blocks.len(), 1);
        assert!(out.sections[0].code_blocks.is_empty());
    }

    #[test]
    fn setext_heading_counts_as_depth_one() {
        let out = run("Education\n=========\n\nMIT\n");
        assert_eq!(ids(&out), vec!["education"]);
    }

    #[test]
    fn heading_title_is_trimmed_and_case_insensitive() {
        let out = run("#   work EXPERIENCE   \n");
        assert_eq!(ids(&out), vec!["experience"]);
        assert_eq!(out.sections[0].title, "work EXPERIENCE");
    }

    #[test]
    fn custom_registry_is_used() {
        let registry = SectionRegistry::new([("awards", ["Awards"])]);
        let md = "# Awards\n\n# Experience\n";
        let out = segment(&parse_markdown(md), md, &registry);
        assert_eq!(ids(&out), vec!["awards"]);
    }
}
