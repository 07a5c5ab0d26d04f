use rat_engine::{Fragment, FragmentKind, LinkTarget, pack_columns, render};
use rat_types::{Node, NodeAstPart};
use std::fs;
use std::path::Path;

fn load_node(fixture_name: &str) -> Node {
    let path = Path::new("tests/fixtures").join(fixture_name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|_| panic!("Failed to parse fixture: {}", path.display()))
}

fn text(s: &str) -> NodeAstPart {
    NodeAstPart::leaf("text").with_attr("text", s)
}

fn kinds(fragment: &Fragment) -> Vec<&FragmentKind> {
    fragment.children.iter().map(|c| &c.kind).collect()
}

#[test]
fn test_unknown_leaf_mentions_tag() {
    let out = render(&NodeAstPart::leaf("footnote_definition").with_attr("text", "[^1]"));
    assert_eq!(out.plain_text(), "unimplemented parser for footnote_definition [^1]");
    assert!(out.children.is_empty());
}

#[test]
fn test_unknown_container_renders_children() {
    let part = NodeAstPart::container(
        "callout",
        vec![NodeAstPart::container("strong", vec![text("careful")])],
    );
    let out = render(&part);

    assert!(out.plain_text().contains("callout"));
    assert_eq!(out.children.len(), 1);
    assert_eq!(out.children[0].kind, FragmentKind::Strong);
    assert_eq!(out.children[0].plain_text(), "careful");
}

#[test]
fn test_unknown_tag_with_odd_attributes_does_not_panic() {
    let part = NodeAstPart::leaf("math")
        .with_attr("text", 3.5)
        .with_attr("nested", serde_json::json!({"a": [1, 2]}));
    let out = render(&part);
    assert!(out.plain_text().contains("math"));
    assert!(out.plain_text().contains("3.5"));
}

#[test]
fn test_heading_levels() {
    for level in 1..=6 {
        let out = render(
            &NodeAstPart::container("heading", vec![text("t")]).with_attr("level", level),
        );
        assert_eq!(
            out.kind,
            FragmentKind::Heading {
                tier: level as u8,
                diagnostic: None
            }
        );
    }

    for bad in [
        NodeAstPart::container("heading", vec![text("seven")]).with_attr("level", 7),
        NodeAstPart::container("heading", vec![text("zero")]).with_attr("level", 0),
        NodeAstPart::container("heading", vec![text("none")]),
    ] {
        let out = render(&bad);
        let FragmentKind::Heading { tier, diagnostic } = &out.kind else {
            panic!("expected heading, got {:?}", out.kind);
        };
        assert_eq!(*tier, 1);
        assert_eq!(diagnostic.as_deref(), Some("unknown heading level"));
        assert_eq!(out.children.len(), 1, "children still rendered");
    }
}

#[test]
fn test_missing_and_empty_children_are_equivalent() {
    let missing = render(&NodeAstPart::leaf("paragraph"));
    let empty = render(&NodeAstPart::container("paragraph", vec![]));
    assert_eq!(missing, empty);
}

#[test]
fn test_table_containment_is_preserved() {
    let node = load_node("roadmap_node.json");
    let out = render(&node.ast);

    let table = out
        .find(&|f| f.kind == FragmentKind::Table)
        .expect("table fragment");
    assert_eq!(
        kinds(table),
        vec![&FragmentKind::TableHeader, &FragmentKind::TableBody]
    );

    for section in &table.children {
        for row in &section.children {
            assert_eq!(row.kind, FragmentKind::TableRow);
            assert_eq!(kinds(row), vec![&FragmentKind::TableCell; 2]);
        }
    }

    let body_row = &table.children[1].children[0];
    assert_eq!(
        body_row.children[0].children[0].kind,
        FragmentKind::Code("v0.3".to_string())
    );
}

#[test]
fn test_document_fixture() {
    let node = load_node("roadmap_node.json");
    let out = render(&node.ast);

    assert_eq!(out.kind, FragmentKind::Document);
    assert_eq!(out.children.len(), 5);

    let links: Vec<_> = {
        let paragraph = &out.children[1];
        paragraph
            .children
            .iter()
            .filter_map(|f| match &f.kind {
                FragmentKind::Link { target } => Some((target.clone(), f.plain_text())),
                _ => None,
            })
            .collect()
    };
    assert_eq!(
        links,
        vec![
            (
                LinkTarget::Internal("projects/roadmap/notes".to_string()),
                "notes".to_string()
            ),
            (
                LinkTarget::External("https://example.org/rfc".to_string()),
                "the RFC".to_string()
            ),
        ]
    );

    let cards = out.count(&|f| matches!(f.kind, FragmentKind::KanbanCard { .. }));
    assert_eq!(cards, 3);

    insta::assert_snapshot!(out.children[4].plain_text(), @"unimplemented parser for footnote_definition [^1]");
}

#[test]
fn test_fixture_child_columns() {
    let node = load_node("roadmap_node.json");
    let columns = pack_columns(&node.child_nodes);

    let left: Vec<_> = columns.left.iter().map(|n| n.name.as_str()).collect();
    let right: Vec<_> = columns.right.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(left, vec!["backlog", "done"]);
    assert_eq!(right, vec!["doing", "notes"]);
}
