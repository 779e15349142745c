use std::collections::BTreeSet;

use tracing::debug;
use tw_core::{diff_boards, Depth, DiffResult, Outcome, WatchError};
use tw_source::{read_tree, BoardSource};
use tw_store::SnapshotStore;

/// Orchestrates one snapshot/diff/persist cycle over a source and a store.
///
/// Invocations are independent and synchronous; the host scheduler is
/// expected to serialize them (no locking around the store here).
pub struct Watcher<'a> {
    source: &'a dyn BoardSource,
    store: &'a dyn SnapshotStore,
}

impl<'a> Watcher<'a> {
    pub fn new(source: &'a dyn BoardSource, store: &'a dyn SnapshotStore) -> Self {
        Self { source, store }
    }

    /// Seed the baseline from a full-depth read. Must run once before any
    /// trigger check; without it, `reconcile` fails with `NotFound`.
    pub fn prelaunch(&self) -> Result<(), WatchError> {
        let full = read_tree(self.source, Depth::Full)?;
        debug!(boards = full.boards.len(), "seeding snapshot baseline");
        self.store.save(&full)?;
        Ok(())
    }

    /// One trigger check: shallow read, load baseline, diff, and refresh the
    /// baseline when the diff says so. The refresh re-reads at full depth
    /// rather than reusing the shallow snapshot, because downstream
    /// consumers of the stored document may need nested fields.
    pub fn reconcile(
        &self,
        filter: Option<&BTreeSet<String>>,
    ) -> Result<DiffResult, WatchError> {
        let current = read_tree(self.source, Depth::BOARDS)?;
        let previous = self.store.load()?;
        let result = diff_boards(&current, &previous, filter);
        match &result.outcome {
            Outcome::Fire { board_names } => {
                debug!(new = board_names.len(), "new boards detected")
            }
            Outcome::NoFire if result.store_dirty => {
                debug!("board count changed without new names")
            }
            Outcome::NoFire => {}
        }
        if result.store_dirty {
            self.refresh_baseline()?;
        }
        Ok(result)
    }

    /// Overwrite the baseline with the live tree at full depth. Also used
    /// after mutations that create boards, so they do not fire the trigger.
    pub fn refresh_baseline(&self) -> Result<(), WatchError> {
        let full = read_tree(self.source, Depth::Full)?;
        self.store.save(&full)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_core::{BoardNode, CardNode, ListNode, Snapshot, StoreError};
    use tw_source::InMemoryBoards;
    use tw_store::InMemorySnapshotStore;

    fn board(id: &str, name: &str, with_list: bool) -> BoardNode {
        BoardNode {
            id: id.into(),
            name: name.into(),
            closed: false,
            lists: if with_list {
                vec![ListNode {
                    id: format!("{id}-l"),
                    name: "Todo".into(),
                    closed: false,
                    cards: vec![CardNode {
                        id: format!("{id}-c"),
                        name: "task".into(),
                        ..Default::default()
                    }],
                }]
            } else {
                vec![]
            },
        }
    }

    fn filter(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn prelaunch_seeds_full_depth_baseline() {
        let source =
            InMemoryBoards::from_snapshot(Snapshot { boards: vec![board("b1", "A", true)] });
        let store = InMemorySnapshotStore::new();
        Watcher::new(&source, &store).prelaunch().unwrap();
        let stored = store.load().unwrap();
        assert_eq!(stored.boards[0].lists[0].cards[0].name, "task");
    }

    #[test]
    fn reconcile_without_baseline_is_not_found() {
        let source = InMemoryBoards::new();
        let store = InMemorySnapshotStore::new();
        let err = Watcher::new(&source, &store).reconcile(None).unwrap_err();
        assert!(matches!(err, WatchError::Store(StoreError::NotFound { .. })));
    }

    #[test]
    fn new_board_fires_once_and_refreshes_deep() {
        let source =
            InMemoryBoards::from_snapshot(Snapshot { boards: vec![board("b1", "A", false)] });
        let store = InMemorySnapshotStore::new();
        let watcher = Watcher::new(&source, &store);
        watcher.prelaunch().unwrap();

        source.add_board("B", None).unwrap();
        let first = watcher.reconcile(None).unwrap();
        assert_eq!(first.outcome, Outcome::Fire { board_names: vec!["B".into()] });

        // The refreshed baseline carries full-depth content, not the
        // shallow read used for diffing.
        let stored = store.load().unwrap();
        assert_eq!(stored.boards.len(), 2);
        assert_eq!(stored, source.snapshot());

        // At-most-once: the same creation does not fire again.
        let second = watcher.reconcile(None).unwrap();
        assert_eq!(second.outcome, Outcome::NoFire);
        assert!(!second.store_dirty);
    }

    #[test]
    fn clean_run_does_not_touch_the_store() {
        let source =
            InMemoryBoards::from_snapshot(Snapshot { boards: vec![board("b1", "A", true)] });
        let store = InMemorySnapshotStore::new();
        let watcher = Watcher::new(&source, &store);
        watcher.prelaunch().unwrap();
        assert_eq!(store.save_count(), 1);
        let result = watcher.reconcile(None).unwrap();
        assert_eq!(result.outcome, Outcome::NoFire);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn deletion_refreshes_without_firing() {
        let source =
            InMemoryBoards::from_snapshot(Snapshot { boards: vec![board("b1", "A", false)] });
        let store = InMemorySnapshotStore::seeded(Snapshot {
            boards: vec![board("b1", "A", false), board("b2", "B", false)],
        });
        let result = Watcher::new(&source, &store).reconcile(None).unwrap();
        assert_eq!(result.outcome, Outcome::NoFire);
        assert!(result.store_dirty);
        assert_eq!(store.load().unwrap().boards.len(), 1);
    }

    #[test]
    fn filtered_reconcile_ignores_other_boards_but_still_refreshes() {
        let source = InMemoryBoards::from_snapshot(Snapshot {
            boards: vec![board("b1", "A", false), board("b2", "X", false)],
        });
        let store =
            InMemorySnapshotStore::seeded(Snapshot { boards: vec![board("b1", "A", false)] });
        let watcher = Watcher::new(&source, &store);

        let result = watcher.reconcile(Some(&filter(&["Y"]))).unwrap();
        assert_eq!(result.outcome, Outcome::NoFire);
        assert!(result.store_dirty);

        // The refresh swallowed X, so an unfiltered check stays quiet now.
        let result = watcher.reconcile(None).unwrap();
        assert_eq!(result.outcome, Outcome::NoFire);
        assert!(!result.store_dirty);
    }

    #[test]
    fn filtered_reconcile_fires_on_matching_name() {
        let source = InMemoryBoards::from_snapshot(Snapshot {
            boards: vec![board("b1", "A", false), board("b2", "Y", false)],
        });
        let store =
            InMemorySnapshotStore::seeded(Snapshot { boards: vec![board("b1", "A", false)] });
        let result = Watcher::new(&source, &store).reconcile(Some(&filter(&["Y"]))).unwrap();
        assert_eq!(result.outcome, Outcome::Fire { board_names: vec!["Y".into()] });
    }

    #[test]
    fn fetch_failure_aborts_without_saving() {
        let source =
            InMemoryBoards::from_snapshot(Snapshot { boards: vec![board("b1", "A", false)] });
        let store = InMemorySnapshotStore::new();
        let watcher = Watcher::new(&source, &store);
        watcher.prelaunch().unwrap();
        source.fail_with("rate limited");
        let err = watcher.reconcile(None).unwrap_err();
        assert!(matches!(err, WatchError::Fetch(_)));
        assert_eq!(store.save_count(), 1);
    }
}
