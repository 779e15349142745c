use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How many hierarchy levels a tree read populates.
///
/// 0 = boards only, 1 = + lists, 2 = + cards, 3 = + labels/checklists/comments
/// (items not expanded), 4 = + checklist items. `Full` means every level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Depth {
    Bounded(u8),
    Full,
}

impl Depth {
    pub const BOARDS: Depth = Depth::Bounded(0);
    pub const MAX_LEVEL: u8 = 4;

    /// Whether a read at this depth populates children that live at `level`.
    pub fn reaches(self, level: u8) -> bool {
        match self {
            Depth::Full => true,
            Depth::Bounded(d) => d >= level,
        }
    }
}

impl std::str::FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("full") {
            return Ok(Depth::Full);
        }
        match s.parse::<u8>() {
            Ok(d) if d <= Depth::MAX_LEVEL => Ok(Depth::Bounded(d)),
            _ => Err(format!("depth must be 0..={} or 'full', got {s:?}", Depth::MAX_LEVEL)),
        }
    }
}

/// Point-in-time capture of the whole board hierarchy at some depth.
/// Serializes as a bare array of boards, which is also the persisted format.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub boards: Vec<BoardNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardNode {
    pub id: String,
    pub name: String,
    pub closed: bool,
    #[serde(default)]
    pub lists: Vec<ListNode>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListNode {
    pub id: String,
    pub name: String,
    pub closed: bool,
    #[serde(default)]
    pub cards: Vec<CardNode>,
}

/// Card attributes mirror the remote representation; `attachments`, `badges`
/// and `comments` are opaque pass-through blobs the watcher never inspects.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardNode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub closed: bool,
    #[serde(rename = "creation_date", default)]
    pub created_at: String,
    #[serde(rename = "last_activity", default)]
    pub last_activity_at: String,
    #[serde(rename = "idmembers", default)]
    pub member_ids: Vec<String>,
    #[serde(default)]
    pub attachments: Value,
    #[serde(default)]
    pub badges: Value,
    #[serde(default)]
    pub labels: Vec<LabelNode>,
    #[serde(default)]
    pub checklists: Vec<ChecklistNode>,
    #[serde(default)]
    pub comments: Vec<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelNode {
    pub id: String,
    pub name: String,
    /// Color string as reported by the remote; not validated here.
    pub color: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecklistNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub name: String,
    pub checked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_reaches_levels_up_to_bound() {
        assert!(Depth::Bounded(0).reaches(0));
        assert!(!Depth::Bounded(0).reaches(1));
        assert!(Depth::Bounded(2).reaches(1));
        assert!(Depth::Bounded(2).reaches(2));
        assert!(!Depth::Bounded(2).reaches(3));
        for level in 0..=Depth::MAX_LEVEL {
            assert!(Depth::Full.reaches(level));
        }
    }

    #[test]
    fn depth_parses_bounds_and_full() {
        assert_eq!("0".parse::<Depth>().unwrap(), Depth::Bounded(0));
        assert_eq!("4".parse::<Depth>().unwrap(), Depth::Bounded(4));
        assert_eq!("full".parse::<Depth>().unwrap(), Depth::Full);
        assert_eq!("FULL".parse::<Depth>().unwrap(), Depth::Full);
        assert!("5".parse::<Depth>().is_err());
        assert!("boards".parse::<Depth>().is_err());
    }

    #[test]
    fn snapshot_serializes_as_bare_board_array() {
        let snap = Snapshot {
            boards: vec![BoardNode {
                id: "b1".into(),
                name: "Inbox".into(),
                closed: false,
                lists: vec![],
            }],
        };
        let v = serde_json::to_value(&snap).unwrap();
        assert!(v.is_array());
        assert_eq!(v[0]["name"], "Inbox");
        assert_eq!(v[0]["lists"], serde_json::json!([]));
    }

    #[test]
    fn card_uses_remote_field_names() {
        let card = CardNode {
            id: "c1".into(),
            name: "Fix door".into(),
            created_at: "Mon Jan  1 00:00:00 2024".into(),
            last_activity_at: "Tue Jan  2 00:00:00 2024".into(),
            member_ids: vec!["m1".into()],
            ..Default::default()
        };
        let v = serde_json::to_value(&card).unwrap();
        assert_eq!(v["creation_date"], "Mon Jan  1 00:00:00 2024");
        assert_eq!(v["last_activity"], "Tue Jan  2 00:00:00 2024");
        assert_eq!(v["idmembers"][0], "m1");
        let back: CardNode = serde_json::from_value(v).unwrap();
        assert_eq!(back, card);
    }
}
