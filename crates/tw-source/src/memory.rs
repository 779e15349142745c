use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{json, Value};
use tw_core::{
    BoardNode, CardNode, ChecklistItem, ChecklistNode, FetchError, LabelNode, ListNode, Snapshot,
};
use uuid::Uuid;

use crate::traits::BoardSource;

/// In-memory board tree. Backs the unit tests and the CLI's file-backed
/// harness; a network client owned by the host is the production peer.
#[derive(Default)]
pub struct InMemoryBoards {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    boards: Vec<BoardNode>,
    /// Per-board label registry, keyed by board id. Seeded from card labels
    /// on construction so lookups work without an explicit create step.
    board_labels: HashMap<String, Vec<LabelNode>>,
    fail: Option<String>,
}

impl Inner {
    fn check(&self) -> Result<(), FetchError> {
        match &self.fail {
            Some(msg) => Err(FetchError::new(msg.clone())),
            None => Ok(()),
        }
    }
}

fn unknown(kind: &str, id: &str) -> FetchError {
    FetchError::new(format!("unknown {kind} id: {id}"))
}

fn list_ref<'a>(boards: &'a [BoardNode], list_id: &str) -> Option<&'a ListNode> {
    boards.iter().flat_map(|b| b.lists.iter()).find(|l| l.id == list_id)
}

fn card_ref<'a>(boards: &'a [BoardNode], card_id: &str) -> Option<&'a CardNode> {
    boards
        .iter()
        .flat_map(|b| b.lists.iter())
        .flat_map(|l| l.cards.iter())
        .find(|c| c.id == card_id)
}

fn card_mut<'a>(boards: &'a mut [BoardNode], card_id: &str) -> Option<&'a mut CardNode> {
    boards
        .iter_mut()
        .flat_map(|b| b.lists.iter_mut())
        .flat_map(|l| l.cards.iter_mut())
        .find(|c| c.id == card_id)
}

fn checklist_mut<'a>(
    boards: &'a mut [BoardNode],
    checklist_id: &str,
) -> Option<&'a mut ChecklistNode> {
    boards
        .iter_mut()
        .flat_map(|b| b.lists.iter_mut())
        .flat_map(|l| l.cards.iter_mut())
        .flat_map(|c| c.checklists.iter_mut())
        .find(|cl| cl.id == checklist_id)
}

impl InMemoryBoards {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a full-depth snapshot, e.g. one previously exported with
    /// [`InMemoryBoards::snapshot`] or deserialized from a tree file.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut board_labels: HashMap<String, Vec<LabelNode>> = HashMap::new();
        for board in &snapshot.boards {
            let registry = board_labels.entry(board.id.clone()).or_default();
            for label in board
                .lists
                .iter()
                .flat_map(|l| l.cards.iter())
                .flat_map(|c| c.labels.iter())
            {
                if !registry.iter().any(|known| known.id == label.id) {
                    registry.push(label.clone());
                }
            }
        }
        Self {
            inner: Mutex::new(Inner { boards: snapshot.boards, board_labels, fail: None }),
        }
    }

    /// Full-depth export of the current tree.
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner.lock().unwrap();
        Snapshot { boards: inner.boards.clone() }
    }

    /// Make every subsequent call fail, for error-propagation tests.
    pub fn fail_with(&self, msg: &str) {
        self.inner.lock().unwrap().fail = Some(msg.to_string());
    }
}

impl BoardSource for InMemoryBoards {
    fn boards(&self) -> Result<Vec<BoardNode>, FetchError> {
        let inner = self.inner.lock().unwrap();
        inner.check()?;
        Ok(inner
            .boards
            .iter()
            .map(|b| BoardNode { lists: Vec::new(), ..b.clone() })
            .collect())
    }

    fn lists(&self, board_id: &str) -> Result<Vec<ListNode>, FetchError> {
        let inner = self.inner.lock().unwrap();
        inner.check()?;
        let board = inner
            .boards
            .iter()
            .find(|b| b.id == board_id)
            .ok_or_else(|| unknown("board", board_id))?;
        Ok(board
            .lists
            .iter()
            .map(|l| ListNode { cards: Vec::new(), ..l.clone() })
            .collect())
    }

    fn cards(&self, list_id: &str) -> Result<Vec<CardNode>, FetchError> {
        let inner = self.inner.lock().unwrap();
        inner.check()?;
        let list = list_ref(&inner.boards, list_id).ok_or_else(|| unknown("list", list_id))?;
        Ok(list
            .cards
            .iter()
            .map(|c| CardNode {
                labels: Vec::new(),
                checklists: Vec::new(),
                comments: Vec::new(),
                ..c.clone()
            })
            .collect())
    }

    fn card_labels(&self, card_id: &str) -> Result<Vec<LabelNode>, FetchError> {
        let inner = self.inner.lock().unwrap();
        inner.check()?;
        let card = card_ref(&inner.boards, card_id).ok_or_else(|| unknown("card", card_id))?;
        Ok(card.labels.clone())
    }

    fn board_labels(&self, board_id: &str) -> Result<Vec<LabelNode>, FetchError> {
        let inner = self.inner.lock().unwrap();
        inner.check()?;
        if !inner.boards.iter().any(|b| b.id == board_id) {
            return Err(unknown("board", board_id));
        }
        Ok(inner.board_labels.get(board_id).cloned().unwrap_or_default())
    }

    fn card_checklists(&self, card_id: &str) -> Result<Vec<ChecklistNode>, FetchError> {
        let inner = self.inner.lock().unwrap();
        inner.check()?;
        let card = card_ref(&inner.boards, card_id).ok_or_else(|| unknown("card", card_id))?;
        Ok(card
            .checklists
            .iter()
            .map(|cl| ChecklistNode { items: Vec::new(), ..cl.clone() })
            .collect())
    }

    fn checklist_items(&self, checklist_id: &str) -> Result<Vec<ChecklistItem>, FetchError> {
        let inner = self.inner.lock().unwrap();
        inner.check()?;
        let checklist = inner
            .boards
            .iter()
            .flat_map(|b| b.lists.iter())
            .flat_map(|l| l.cards.iter())
            .flat_map(|c| c.checklists.iter())
            .find(|cl| cl.id == checklist_id)
            .ok_or_else(|| unknown("checklist", checklist_id))?;
        Ok(checklist.items.clone())
    }

    fn card_comments(&self, card_id: &str) -> Result<Vec<Value>, FetchError> {
        let inner = self.inner.lock().unwrap();
        inner.check()?;
        let card = card_ref(&inner.boards, card_id).ok_or_else(|| unknown("card", card_id))?;
        Ok(card.comments.clone())
    }

    fn add_board(&self, name: &str, _permission: Option<&str>) -> Result<BoardNode, FetchError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        let board = BoardNode {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            closed: false,
            lists: Vec::new(),
        };
        inner.board_labels.insert(board.id.clone(), Vec::new());
        inner.boards.push(board.clone());
        Ok(board)
    }

    fn add_label(&self, board_id: &str, name: &str, color: &str) -> Result<LabelNode, FetchError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        if !inner.boards.iter().any(|b| b.id == board_id) {
            return Err(unknown("board", board_id));
        }
        let label = LabelNode {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            color: color.to_string(),
        };
        inner.board_labels.entry(board_id.to_string()).or_default().push(label.clone());
        Ok(label)
    }

    fn attach_label(&self, card_id: &str, label_id: &str) -> Result<(), FetchError> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        inner.check()?;
        let board_id = inner
            .boards
            .iter()
            .find(|b| b.lists.iter().any(|l| l.cards.iter().any(|c| c.id == card_id)))
            .map(|b| b.id.clone())
            .ok_or_else(|| unknown("card", card_id))?;
        let label = inner
            .board_labels
            .get(&board_id)
            .and_then(|registry| registry.iter().find(|l| l.id == label_id))
            .cloned()
            .ok_or_else(|| unknown("label", label_id))?;
        let card = card_mut(&mut inner.boards, card_id).ok_or_else(|| unknown("card", card_id))?;
        if !card.labels.iter().any(|l| l.id == label.id) {
            card.labels.push(label);
        }
        Ok(())
    }

    fn add_comment(&self, card_id: &str, text: &str) -> Result<(), FetchError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        let card =
            card_mut(&mut inner.boards, card_id).ok_or_else(|| unknown("card", card_id))?;
        card.comments.push(json!({"data": {"text": text}}));
        Ok(())
    }

    fn add_checklist(&self, card_id: &str, name: &str) -> Result<ChecklistNode, FetchError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        let card =
            card_mut(&mut inner.boards, card_id).ok_or_else(|| unknown("card", card_id))?;
        let checklist = ChecklistNode {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            items: Vec::new(),
        };
        card.checklists.push(checklist.clone());
        Ok(checklist)
    }

    fn add_checklist_item(
        &self,
        checklist_id: &str,
        item: &str,
        checked: bool,
    ) -> Result<(), FetchError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        let checklist = checklist_mut(&mut inner.boards, checklist_id)
            .ok_or_else(|| unknown("checklist", checklist_id))?;
        checklist.items.push(ChecklistItem { name: item.to_string(), checked });
        Ok(())
    }

    fn set_checklist_item(
        &self,
        checklist_id: &str,
        item: &str,
        checked: bool,
    ) -> Result<(), FetchError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        let checklist = checklist_mut(&mut inner.boards, checklist_id)
            .ok_or_else(|| unknown("checklist", checklist_id))?;
        // A missing item is a no-op, like the remote.
        for entry in checklist.items.iter_mut().filter(|i| i.name == item) {
            entry.checked = checked;
        }
        Ok(())
    }

    fn remove_checklist_item(&self, checklist_id: &str, item: &str) -> Result<(), FetchError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check()?;
        let checklist = checklist_mut(&mut inner.boards, checklist_id)
            .ok_or_else(|| unknown("checklist", checklist_id))?;
        checklist.items.retain(|i| i.name != item);
        Ok(())
    }
}
