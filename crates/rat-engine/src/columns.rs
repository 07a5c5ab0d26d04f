use rat_types::Node;

/// A node's children split into two visually balanced columns.
#[derive(Debug, Default, PartialEq)]
pub struct ChildColumns<'a> {
    pub left: Vec<&'a Node>,
    pub right: Vec<&'a Node>,
}

impl<'a> ChildColumns<'a> {
    pub fn left_total(&self) -> u64 {
        self.left.iter().map(|n| n.length).sum()
    }

    pub fn right_total(&self) -> u64 {
        self.right.iter().map(|n| n.length).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Left column first, then right.
    pub fn iter(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.left.iter().chain(self.right.iter()).copied()
    }
}

/// Sort children by name, then greedily append each one to the column with
/// the smaller running `length` total. Ties go left.
pub fn pack_columns(children: &[Node]) -> ChildColumns<'_> {
    let mut sorted: Vec<&Node> = children.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut columns = ChildColumns::default();
    let (mut left_total, mut right_total) = (0u64, 0u64);
    for child in sorted {
        if left_total > right_total {
            right_total += child.length;
            columns.right.push(child);
        } else {
            left_total += child.length;
            columns.left.push(child);
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, length: u64) -> Node {
        Node {
            id: name.to_string(),
            name: name.to_string(),
            path: name.to_string(),
            length,
            child_nodes: Vec::new(),
            ast: Default::default(),
        }
    }

    fn names(column: &[&Node]) -> Vec<String> {
        column.iter().map(|n| n.name.clone()).collect()
    }

    #[test]
    fn test_right_fills_before_left_catches_up() {
        let children = vec![node("a", 5), node("b", 1), node("c", 1), node("d", 1)];
        let columns = pack_columns(&children);
        assert_eq!(names(&columns.left), vec!["a"]);
        assert_eq!(names(&columns.right), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_sorted_by_name_before_packing() {
        let children = vec![node("d", 1), node("a", 5), node("c", 1), node("b", 1)];
        let columns = pack_columns(&children);
        assert_eq!(names(&columns.left), vec!["a"]);
        assert_eq!(names(&columns.right), vec!["b", "c", "d"]);
        assert_eq!(
            columns.iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn test_ties_go_left() {
        let children = vec![node("a", 2), node("b", 2), node("c", 3)];
        let columns = pack_columns(&children);
        assert_eq!(names(&columns.left), vec!["a", "c"]);
        assert_eq!(names(&columns.right), vec!["b"]);
        assert_eq!(columns.left_total(), 5);
        assert_eq!(columns.right_total(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(pack_columns(&[]).is_empty());
    }
}
