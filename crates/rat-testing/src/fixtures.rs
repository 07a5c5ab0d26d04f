//! Builders for AST parts and nodes.

use crate::FakeGraph;
use rat_types::{Node, NodeAstPart, path_name};
use serde_json::json;

pub fn node(path: &str, ast: NodeAstPart) -> Node {
    Node {
        id: format!("id:{}", path),
        name: path_name(path).unwrap_or_default().to_string(),
        path: path.to_string(),
        length: 0,
        child_nodes: Vec::new(),
        ast,
    }
}

pub fn sized_node(path: &str, length: u64) -> Node {
    Node {
        length,
        ..node(path, NodeAstPart::default())
    }
}

pub fn document(children: Vec<NodeAstPart>) -> NodeAstPart {
    NodeAstPart::container("document", children)
}

pub fn text(s: &str) -> NodeAstPart {
    NodeAstPart::leaf("text").with_attr("text", s)
}

pub fn paragraph(s: &str) -> NodeAstPart {
    NodeAstPart::container("paragraph", vec![text(s)])
}

pub fn heading(level: i64, s: &str) -> NodeAstPart {
    NodeAstPart::container("heading", vec![text(s)]).with_attr("level", level)
}

pub fn graph_link(path: &str, title: &str) -> NodeAstPart {
    NodeAstPart::leaf("graph_link")
        .with_attr("destination", format!("/view/{}", path))
        .with_attr("title", title)
}

pub fn card(id: &str, name: &str, path: &str) -> NodeAstPart {
    NodeAstPart::leaf("kanban_card")
        .with_attr("id", id)
        .with_attr("nameFromPath", name)
        .with_attr("path", path)
}

/// A column whose cards are named `card_names`. Card paths sit under the
/// column path and card ids match the ids [`node`] gives those paths.
pub fn column(id: &str, path: &str, card_names: &[&str]) -> NodeAstPart {
    let cards = card_names
        .iter()
        .map(|name| {
            let card_path = format!("{}/{}", path, name);
            card(&format!("id:{}", card_path), name, &card_path)
        })
        .collect();
    NodeAstPart::container("kanban_column", cards)
        .with_attr("id", id)
        .with_attr("name", path_name(path).unwrap_or_default())
        .with_attr("path", path)
}

pub fn kanban(columns: Vec<NodeAstPart>) -> NodeAstPart {
    NodeAstPart::container("kanban", columns)
}

pub fn table(header: &[&str], rows: &[&[&str]]) -> NodeAstPart {
    let row = |cells: &[&str]| {
        NodeAstPart::container(
            "table_row",
            cells
                .iter()
                .map(|c| NodeAstPart::container("table_cell", vec![text(c)]))
                .collect(),
        )
    };
    NodeAstPart::container(
        "table",
        vec![
            NodeAstPart::container("table_header", vec![row(header)]),
            NodeAstPart::container("table_body", rows.iter().map(|r| row(r)).collect()),
        ],
    )
}

pub fn todo(entries: &[(&str, bool)]) -> NodeAstPart {
    NodeAstPart::container(
        "todo",
        entries
            .iter()
            .map(|(label, done)| {
                NodeAstPart::leaf("todo_entry")
                    .with_attr("text", *label)
                    .with_attr("done", *done)
            })
            .collect(),
    )
    .with_attr("hints", json!([{"type": "due", "value": "friday"}]))
}

/// A small project graph: a board node with a kanban, its column nodes and
/// their cards, and a notes node.
pub fn project_graph() -> FakeGraph {
    let board = document(vec![
        heading(1, "Board"),
        paragraph("Work in flight."),
        kanban(vec![
            column("col-todo", "board/todo", &["parser", "search"]),
            column("col-done", "board/done", &["tui"]),
        ]),
    ]);

    FakeGraph::new()
        .with_node(node("board", board))
        .with_node(sized_node("board/todo", 2))
        .with_node(sized_node("board/done", 1))
        .with_node(node("board/todo/parser", NodeAstPart::default()))
        .with_node(node("board/todo/search", NodeAstPart::default()))
        .with_node(node("board/done/tui", NodeAstPart::default()))
        .with_node(node(
            "notes",
            document(vec![paragraph("see"), graph_link("board", "the board")]),
        ))
}
