//! Integration tests for the parsing module.
//!
//! Fixtures (.md) live in `fixtures/`; every fixture is also run through the
//! invariant checker.


use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{
    models::{Document, ErrorSource, Position, Range},
    parsing::{parse_document, parse_resume},
    registry::SectionRegistry,
};

fn fixture(name: &str) -> String {
    let path = format!(
        "{}/src/parsing/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    );
    std::fs::read_to_string(path).unwrap()
}

fn parse_fixture(name: &str) -> Document {
    let md = fixture(name);
    let doc = parse_resume(&md).unwrap();
    invariants::check(&md, &doc);
    doc
}

fn section_ids(doc: &Document) -> Vec<&str> {
    doc.sections().iter().map(|s| s.id.as_str()).collect()
}

// Fixture-based tests

#[rstest]
#[case("full_resume")]
#[case("japanese_resume")]
#[case("unterminated_fence")]
#[case("no_frontmatter")]
fn fixtures_hold_invariants(#[case] name: &str) {
    parse_fixture(name);
}

#[test]
fn fixture_full_resume() {
    let doc = parse_fixture("full_resume");

    let meta = doc.metadata().unwrap();
    let keys: Vec<_> = meta.fields.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, vec!["name", "title", "email", "links"]);
    assert_eq!(
        meta.get("links").unwrap().value,
        r#"["https://github.com/janedoe","https://janedoe.dev"]"#
    );
    assert_eq!(meta.range, Range::new(Position::new(0, 0), Position::new(7, 3)));

    assert_eq!(
        section_ids(&doc),
        vec!["summary", "experience", "skills", "education"]
    );

    // The Hobbies block is not in any section but is still listed.
    let types: Vec<_> = doc.code_blocks().iter().map(|b| b.block_type.as_str()).collect();
    assert_eq!(types, vec!["experience", "skills", "skills", "education"]);

    let experience = doc.section("experience").unwrap();
    assert_eq!(experience.title_range.start, Position::new(13, 0));
    assert_eq!(experience.range.end, Position::new(28, 0));
    assert_eq!(experience.code_blocks.len(), 1);
    assert_eq!(experience.code_blocks[0].range.start, Position::new(15, 0));
    assert_eq!(experience.code_blocks[0].range.end, Position::new(25, 3));

    let skills = doc.section("skills").unwrap();
    assert_eq!(skills.code_blocks.len(), 1);
    assert_eq!(skills.code_blocks[0].range.start, Position::new(38, 0));
}

#[test]
fn fixture_japanese_resume() {
    let doc = parse_fixture("japanese_resume");

    let meta = doc.metadata().unwrap();
    assert_eq!(meta.fields[0].key, "名前");
    assert_eq!(meta.fields[0].value, "山田 太郎");
    assert_eq!(
        meta.fields[0].range,
        Range::new(Position::new(1, 4), Position::new(1, 9))
    );

    assert_eq!(
        section_ids(&doc),
        vec!["summary", "experience", "certifications"]
    );
    let experience = doc.section("experience").unwrap();
    assert_eq!(experience.title, "職務経歴");
    assert_eq!(
        experience.title_range,
        Range::new(Position::new(9, 0), Position::new(9, 6))
    );
    assert!(experience.code_blocks[0].content.contains("株式会社サンプル"));
}

#[test]
fn fixture_unterminated_fence() {
    let doc = parse_fixture("unterminated_fence");
    let skills = doc.section("skills").unwrap();
    assert_eq!(skills.code_blocks.len(), 1);
    let block = &skills.code_blocks[0];
    assert_eq!(block.content, "- category: Tools\n  items: [git]");
    assert_eq!(block.range.end.line, 6);
    assert_eq!(block.content_range.end, Position::new(6, 14));
}

#[test]
fn fixture_no_frontmatter() {
    let doc = parse_fixture("no_frontmatter");
    assert!(doc.metadata().is_none());
    assert_eq!(section_ids(&doc), vec!["experience"]);
    assert_eq!(doc.sections()[0].code_blocks.len(), 1);
}

// Behaviour tests

#[rstest]
#[case("")]
#[case("just text")]
#[case("# Experience")]
#[case("---")]
#[case("---\nname: x\n")]
#[case("\n---\nname: x\n---\n")]
fn input_without_closed_leading_block_has_no_metadata(#[case] md: &str) {
    let doc = parse_resume(md).unwrap();
    assert!(doc.metadata().is_none());
    invariants::check(md, &doc);
}

#[test]
fn empty_metadata_block_is_present_with_no_fields() {
    let doc = parse_resume("---\n---\n").unwrap();
    let meta = doc.metadata().unwrap();
    assert!(meta.fields.is_empty());
}

#[test]
fn readme_example_parses_into_one_section() {
    let md = "# Experience\n\n```resume:experience\ncompany: A\n```";
    let doc = parse_resume(md).unwrap();
    assert_eq!(section_ids(&doc), vec!["experience"]);
    assert_eq!(doc.sections()[0].code_blocks.len(), 1);
    assert_eq!(doc.sections()[0].code_blocks[0].block_type, "experience");
    assert_eq!(doc.code_blocks().len(), 1);
    invariants::check(md, &doc);
}

#[test]
fn unclosed_quote_in_metadata_fails_atomically() {
    let md = "---\nname: \"unclosed\n---\n\n# Experience\n";
    let failure = parse_resume(md).unwrap_err();
    let errors = failure.errors();
    assert!(!errors.is_empty());
    assert_eq!(errors[0].origin, ErrorSource::Frontmatter);
}

#[test]
fn headings_inside_metadata_do_not_open_sections() {
    let md = "---\n# Experience\nname: x\n---\n# Skills\n";
    let doc = parse_resume(md).unwrap();
    assert_eq!(section_ids(&doc), vec!["skills"]);
    assert_eq!(
        doc.sections()[0].title_range.start,
        Position::new(4, 0)
    );
}

#[test]
fn javascript_blocks_never_listed() {
    let md = "# Skills\n\n```javascript\nlet a = 1;\n```\n";
    let doc = parse_resume(md).unwrap();
    assert!(doc.code_blocks().is_empty());
    assert!(doc.sections()[0].code_blocks.is_empty());
}

#[test]
fn registry_is_injected() {
    let registry = SectionRegistry::new([("experience", ["Career"])]);
    let doc = parse_document("# Career\n\n# Experience\n", &registry).unwrap();
    assert_eq!(section_ids(&doc), vec!["experience"]);
    assert_eq!(doc.sections()[0].title, "Career");
}

#[test]
fn section_at_maps_positions_back() {
    let doc = parse_fixture("full_resume");
    assert_eq!(
        doc.section_at(Position::new(20, 4)).map(|s| s.id.as_str()),
        Some("experience")
    );
    // Blank line before the Hobbies heading still belongs to experience.
    assert_eq!(
        doc.section_at(Position::new(28, 0)).map(|s| s.id.as_str()),
        Some("experience")
    );
    // Past the last character on a prose line.
    assert_eq!(
        doc.section_at(Position::new(27, 80)).map(|s| s.id.as_str()),
        Some("experience")
    );
    // Inside the dropped Hobbies span.
    assert_eq!(doc.section_at(Position::new(32, 0)), None);
    // Inside the metadata block.
    assert_eq!(doc.section_at(Position::new(2, 0)), None);
}

#[test]
fn repeated_parses_are_identical() {
    let md = fixture("full_resume");
    assert_eq!(parse_resume(&md).unwrap(), parse_resume(&md).unwrap());
}
