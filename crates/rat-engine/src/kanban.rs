//! Kanban drag-and-drop reconciliation.
//!
//! Each top-level `kanban` part of the current document gets a
//! [`KanbanBoard`]: a working copy cloned from the canonical AST when the node
//! is mounted. Drops mutate only the working copy and report a [`CardMove`]
//! that the runtime persists. Refetching the node remounts and discards every
//! working copy.

use rat_types::{NodeAstPart, join_path, path_name};

/// Display and storage name of a card: `name`, then `nameFromPath`, then the
/// last segment of its `path`.
pub fn card_name(card: &NodeAstPart) -> Option<String> {
    card.attr_str_any(&["name", "nameFromPath"])
        .filter(|n| !n.is_empty())
        .or_else(|| {
            card.attr_str("path")
                .and_then(|p| path_name(&p).map(str::to_string))
        })
}

/// A committed cross-column drop, with enough context to persist or undo it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMove {
    pub board: usize,
    pub card_id: String,
    pub card_name: String,
    pub from_column_id: String,
    pub from_index: usize,
    pub from_path: Option<String>,
    pub to_column_id: String,
    /// `{destination column path}/{card name}`
    pub new_path: String,
}

#[derive(Debug, Clone)]
pub struct KanbanBoard {
    working: NodeAstPart,
}

impl KanbanBoard {
    pub fn from_canonical(kanban: &NodeAstPart) -> Self {
        Self {
            working: kanban.clone(),
        }
    }

    pub fn part(&self) -> &NodeAstPart {
        &self.working
    }

    pub fn columns(&self) -> &[NodeAstPart] {
        self.working.children()
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns()
            .iter()
            .position(|col| col.attr_str("id").as_deref() == Some(column_id))
    }

    /// `(column index, card index)` of a card.
    pub fn locate_card(&self, card_id: &str) -> Option<(usize, usize)> {
        self.columns().iter().enumerate().find_map(|(col, column)| {
            column
                .children()
                .iter()
                .position(|card| card.attr_str("id").as_deref() == Some(card_id))
                .map(|idx| (col, idx))
        })
    }

    pub fn card_count(&self) -> usize {
        self.columns().iter().map(|c| c.children().len()).sum()
    }

    /// Card ids of one column, in order.
    pub fn card_ids(&self, column_id: &str) -> Vec<String> {
        self.column_index(column_id)
            .map(|col| {
                self.columns()[col]
                    .children()
                    .iter()
                    .filter_map(|card| card.attr_str("id"))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Move a card to the end of another column.
    ///
    /// A no-op returning `None` when the destination column or the card is
    /// unknown, when the card already sits in the destination, or when no
    /// storage path can be derived for it.
    pub fn drop_card(&mut self, card_id: &str, target_column_id: &str) -> Option<CardMove> {
        let to = self.column_index(target_column_id)?;
        let (from, index) = self.locate_card(card_id)?;
        if from == to {
            return None;
        }

        let columns = self.working.children_mut();
        let column_path = columns[to].attr_str("path")?;
        let from_column_id = columns[from].attr_str("id")?;
        let card_name = card_name(&columns[from].children()[index])?;
        let new_path = join_path(&column_path, &card_name);

        let mut card = columns[from].children_mut().remove(index);
        let from_path = card.attr_str("path");
        card.attributes
            .insert("path".to_string(), new_path.clone().into());
        columns[to].children_mut().push(card);

        Some(CardMove {
            board: 0,
            card_id: card_id.to_string(),
            card_name,
            from_column_id,
            from_index: index,
            from_path,
            to_column_id: target_column_id.to_string(),
            new_path,
        })
    }

    /// Undo a move: put the card back at its original index in its original
    /// column with its original path.
    pub fn revert(&mut self, mv: &CardMove) -> bool {
        let (Some(to), Some(from)) = (
            self.column_index(&mv.to_column_id),
            self.column_index(&mv.from_column_id),
        ) else {
            return false;
        };
        let Some((col, index)) = self.locate_card(&mv.card_id) else {
            return false;
        };
        if col != to {
            return false;
        }

        let columns = self.working.children_mut();
        let mut card = columns[to].children_mut().remove(index);
        match &mv.from_path {
            Some(path) => {
                card.attributes.insert("path".to_string(), path.clone().into());
            }
            None => {
                card.attributes.remove("path");
            }
        }
        let cards = columns[from].children_mut();
        let at = mv.from_index.min(cards.len());
        cards.insert(at, card);
        true
    }
}

/// Working copies for every top-level board of one document.
#[derive(Debug, Clone, Default)]
pub struct KanbanBoards {
    boards: Vec<KanbanBoard>,
}

impl KanbanBoards {
    /// Clone every `kanban` part of `ast` that is not nested in another board,
    /// in document order.
    pub fn mount(ast: &NodeAstPart) -> Self {
        let mut boards = Vec::new();
        collect_boards(ast, &mut boards);
        Self { boards }
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn board(&self, index: usize) -> Option<&KanbanBoard> {
        self.boards.get(index)
    }

    pub fn board_of_card(&self, card_id: &str) -> Option<usize> {
        self.boards
            .iter()
            .position(|board| board.locate_card(card_id).is_some())
    }

    /// Drop within the board holding the card. Columns of other boards are
    /// not valid destinations.
    pub fn drop_card(&mut self, card_id: &str, target_column_id: &str) -> Option<CardMove> {
        let board = self.board_of_card(card_id)?;
        let mut mv = self.boards[board].drop_card(card_id, target_column_id)?;
        mv.board = board;
        Some(mv)
    }

    pub fn revert(&mut self, mv: &CardMove) -> bool {
        self.boards
            .get_mut(mv.board)
            .is_some_and(|board| board.revert(mv))
    }

    /// `ast` with each board replaced by its working copy.
    pub fn overlay(&self, ast: &NodeAstPart) -> NodeAstPart {
        let mut next = 0;
        self.overlay_part(ast, &mut next)
    }

    fn overlay_part(&self, part: &NodeAstPart, next: &mut usize) -> NodeAstPart {
        if part.part_type == "kanban" {
            let index = *next;
            *next += 1;
            return match self.boards.get(index) {
                Some(board) => board.part().clone(),
                None => part.clone(),
            };
        }

        let mut out = NodeAstPart {
            part_type: part.part_type.clone(),
            children: None,
            attributes: part.attributes.clone(),
        };
        if let Some(children) = &part.children {
            out.children = Some(
                children
                    .iter()
                    .map(|child| self.overlay_part(child, next))
                    .collect(),
            );
        }
        out
    }
}

fn collect_boards(part: &NodeAstPart, boards: &mut Vec<KanbanBoard>) {
    if part.part_type == "kanban" {
        boards.push(KanbanBoard::from_canonical(part));
        return;
    }
    for child in part.children() {
        collect_boards(child, boards);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, name: &str) -> NodeAstPart {
        NodeAstPart::leaf("kanban_card")
            .with_attr("id", id)
            .with_attr("name", name)
    }

    fn column(id: &str, path: &str, cards: Vec<NodeAstPart>) -> NodeAstPart {
        NodeAstPart::container("kanban_column", cards)
            .with_attr("id", id)
            .with_attr("path", path)
    }

    fn board() -> NodeAstPart {
        NodeAstPart::container(
            "kanban",
            vec![
                column("todo", "b/todo", vec![card("1", "one"), card("2", "two")]),
                column("done", "b/done", vec![card("3", "three")]),
            ],
        )
    }

    #[test]
    fn test_drop_records_move() {
        let mut kanban = KanbanBoard::from_canonical(&board());
        let mv = kanban.drop_card("1", "done").unwrap();
        assert_eq!(mv.new_path, "b/done/one");
        assert_eq!(mv.from_column_id, "todo");
        assert_eq!(mv.from_index, 0);
        assert_eq!(kanban.card_ids("done"), vec!["3", "1"]);

        let (col, idx) = kanban.locate_card("1").unwrap();
        assert_eq!(
            kanban.columns()[col].children()[idx]
                .attr_str("path")
                .as_deref(),
            Some("b/done/one")
        );
    }

    #[test]
    fn test_canonical_is_untouched() {
        let canonical = board();
        let mut kanban = KanbanBoard::from_canonical(&canonical);
        kanban.drop_card("2", "done");
        assert_eq!(canonical, board());
    }

    #[test]
    fn test_revert_restores_index() {
        let mut kanban = KanbanBoard::from_canonical(&board());
        let mv = kanban.drop_card("1", "done").unwrap();
        assert!(kanban.revert(&mv));
        assert_eq!(kanban.card_ids("todo"), vec!["1", "2"]);
        assert_eq!(kanban.card_ids("done"), vec!["3"]);
        assert_eq!(kanban.part(), &board());
    }

    #[test]
    fn test_card_name_from_path() {
        let part = NodeAstPart::leaf("kanban_card").with_attr("path", "b/todo/fix-bug");
        assert_eq!(card_name(&part).as_deref(), Some("fix-bug"));
        assert_eq!(card_name(&NodeAstPart::leaf("kanban_card")), None);
    }

    #[test]
    fn test_boards_overlay() {
        let ast = NodeAstPart::container(
            "document",
            vec![
                NodeAstPart::leaf("paragraph"),
                board(),
                NodeAstPart::container("list", vec![board()]),
            ],
        );
        let mut boards = KanbanBoards::mount(&ast);
        assert_eq!(boards.len(), 2);

        // Card ids repeat across the two boards here; the first board wins.
        let mv = boards.drop_card("2", "done").unwrap();
        assert_eq!(mv.board, 0);

        let overlaid = boards.overlay(&ast);
        let first = &overlaid.children()[1];
        assert_eq!(first.children()[1].children().len(), 2);
        let second = &overlaid.children()[2].children()[0];
        assert_eq!(second, &board());
    }
}
