use serde_json::Value;
use tw_core::{
    BoardNode, CardNode, ChecklistItem, ChecklistNode, FetchError, LabelNode, ListNode,
};

/// Capability over the remote board tree. Credentials, transport, and
/// pagination are the implementor's problem; every method is a blocking call
/// that either returns remote-ordered data or a [`FetchError`] as-is.
///
/// Read methods return nodes with their child collections empty; the reader
/// fills children according to the requested depth.
pub trait BoardSource: Send + Sync {
    fn boards(&self) -> Result<Vec<BoardNode>, FetchError>;
    fn lists(&self, board_id: &str) -> Result<Vec<ListNode>, FetchError>;
    fn cards(&self, list_id: &str) -> Result<Vec<CardNode>, FetchError>;
    fn card_labels(&self, card_id: &str) -> Result<Vec<LabelNode>, FetchError>;
    /// The board's label registry (labels exist on the board even when no
    /// card carries them).
    fn board_labels(&self, board_id: &str) -> Result<Vec<LabelNode>, FetchError>;
    /// Checklists without their items; items are a separate, deeper read.
    fn card_checklists(&self, card_id: &str) -> Result<Vec<ChecklistNode>, FetchError>;
    fn checklist_items(&self, checklist_id: &str) -> Result<Vec<ChecklistItem>, FetchError>;
    fn card_comments(&self, card_id: &str) -> Result<Vec<Value>, FetchError>;

    fn board_url(&self, board_id: &str) -> String {
        format!("https://trello.com/b/{board_id}")
    }

    fn card_url(&self, card_id: &str) -> String {
        format!("https://trello.com/c/{card_id}")
    }

    fn add_board(&self, name: &str, permission: Option<&str>) -> Result<BoardNode, FetchError>;
    fn add_label(&self, board_id: &str, name: &str, color: &str) -> Result<LabelNode, FetchError>;
    fn attach_label(&self, card_id: &str, label_id: &str) -> Result<(), FetchError>;
    fn add_comment(&self, card_id: &str, text: &str) -> Result<(), FetchError>;
    fn add_checklist(&self, card_id: &str, name: &str) -> Result<ChecklistNode, FetchError>;
    fn add_checklist_item(&self, checklist_id: &str, item: &str, checked: bool) -> Result<(), FetchError>;
    fn set_checklist_item(&self, checklist_id: &str, item: &str, checked: bool) -> Result<(), FetchError>;
    fn remove_checklist_item(&self, checklist_id: &str, item: &str) -> Result<(), FetchError>;
}
