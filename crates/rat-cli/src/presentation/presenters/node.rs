use rat_engine::{Renderer, pack_columns};
use rat_types::Node;

use super::document::present_document;
use crate::presentation::view_models::{
    ChildColumnsViewModel, ChildPreviewViewModel, NodeViewModel, PathListViewModel,
};

pub fn present_paths(paths: Vec<String>) -> PathListViewModel {
    PathListViewModel { paths }
}

/// Children in two bin-packed columns, each with the first non-empty lines
/// of its own content as a preview.
pub fn present_children(
    renderer: &Renderer,
    children: &[Node],
    width: usize,
    preview_lines: usize,
) -> ChildColumnsViewModel {
    let columns = pack_columns(children);
    let column_width = width / 2;
    let preview = |node: &Node| ChildPreviewViewModel {
        name: node.name.clone(),
        path: node.path.clone(),
        length: node.length,
        preview: present_document(&renderer.render(&node.ast), column_width)
            .lines
            .iter()
            .map(|line| line.text())
            .filter(|line| !line.trim().is_empty())
            .take(preview_lines)
            .collect(),
    };

    ChildColumnsViewModel {
        left: columns.left.iter().map(|&n| preview(n)).collect(),
        right: columns.right.iter().map(|&n| preview(n)).collect(),
    }
}

pub fn present_node(
    renderer: &Renderer,
    node: &Node,
    width: usize,
    preview_lines: usize,
) -> NodeViewModel {
    NodeViewModel {
        id: node.id.clone(),
        path: node.path.clone(),
        document: present_document(&renderer.render(&node.ast), width),
        children: present_children(renderer, &node.child_nodes, width, preview_lines),
        width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rat_testing::fixtures::{document, node, paragraph, sized_node};

    #[test]
    fn test_children_are_balanced_by_length() {
        let children = vec![
            sized_node("notes/a", 5),
            sized_node("notes/b", 1),
            sized_node("notes/c", 1),
            sized_node("notes/d", 1),
        ];
        let vm = present_children(&Renderer::default(), &children, 80, 3);

        let left: Vec<_> = vm.left.iter().map(|c| c.name.as_str()).collect();
        let right: Vec<_> = vm.right.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(left, vec!["a"]);
        assert_eq!(right, vec!["b", "c", "d"]);
    }

    #[test]
    fn test_preview_is_limited() {
        let child = node(
            "notes/long",
            document(vec![paragraph("one"), paragraph("two"), paragraph("three")]),
        );
        let vm = present_children(&Renderer::default(), &[child], 80, 2);
        assert_eq!(vm.left[0].preview, vec!["one", "two"]);
    }
}
