use tw_core::{Depth, FetchError, Snapshot};

use crate::traits::BoardSource;

/// Build an in-memory snapshot of the remote tree, bounded by `depth`.
///
/// Children are populated iff the depth reaches their level; an untraversed
/// collection is the same empty `Vec` as a traversed-but-empty one (the
/// caller always knows which depth it asked for). Siblings are read
/// sequentially in remote order and any fetch failure aborts the whole read.
pub fn read_tree(source: &dyn BoardSource, depth: Depth) -> Result<Snapshot, FetchError> {
    let mut boards = source.boards()?;
    if depth.reaches(1) {
        for board in &mut boards {
            let mut lists = source.lists(&board.id)?;
            if depth.reaches(2) {
                for list in &mut lists {
                    let mut cards = source.cards(&list.id)?;
                    if depth.reaches(3) {
                        for card in &mut cards {
                            card.labels = source.card_labels(&card.id)?;
                            let mut checklists = source.card_checklists(&card.id)?;
                            if depth.reaches(4) {
                                for checklist in &mut checklists {
                                    checklist.items = source.checklist_items(&checklist.id)?;
                                }
                            }
                            card.checklists = checklists;
                            card.comments = source.card_comments(&card.id)?;
                        }
                    }
                    list.cards = cards;
                }
            }
            board.lists = lists;
        }
    }
    Ok(Snapshot { boards })
}
