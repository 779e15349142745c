use std::collections::BTreeSet;

use serde_json::{json, Value};

use crate::model::Snapshot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// New boards appeared since the stored snapshot; names in remote order.
    Fire { board_names: Vec<String> },
    NoFire,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffResult {
    pub outcome: Outcome,
    /// When set, the persisted snapshot must be overwritten with the current
    /// tree so the same creation is never reported twice and a count change
    /// does not skew the next comparison.
    pub store_dirty: bool,
}

/// Compare two snapshots at the top level only.
///
/// Matching is by board name, never by id: a rename looks like delete+create
/// and duplicate names are indistinguishable. That is the documented contract
/// of the trigger, not an oversight.
pub fn diff_boards(
    current: &Snapshot,
    previous: &Snapshot,
    filter: Option<&BTreeSet<String>>,
) -> DiffResult {
    let known: BTreeSet<&str> = previous.boards.iter().map(|b| b.name.as_str()).collect();

    let extra: Vec<String> = current
        .boards
        .iter()
        .filter(|b| !known.contains(b.name.as_str()))
        .filter(|b| filter.map_or(true, |f| f.contains(&b.name)))
        .map(|b| b.name.clone())
        .collect();

    if !extra.is_empty() {
        return DiffResult {
            outcome: Outcome::Fire { board_names: extra },
            store_dirty: true,
        };
    }

    // Nothing new, but a count change (e.g. a deletion) still invalidates
    // the stored baseline.
    DiffResult {
        outcome: Outcome::NoFire,
        store_dirty: current.boards.len() != previous.boards.len(),
    }
}

impl DiffResult {
    /// Render the host-facing payload. Exactly one new name is a scalar
    /// `board` field, several are an array; the fire flag is a string.
    pub fn to_payload(&self) -> Value {
        match &self.outcome {
            Outcome::NoFire => json!({"fire": "false"}),
            Outcome::Fire { board_names } if board_names.len() == 1 => {
                json!({"fire": "true", "board": board_names[0]})
            }
            Outcome::Fire { board_names } => json!({"fire": "true", "board": board_names}),
        }
    }
}
