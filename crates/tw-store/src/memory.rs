use std::path::PathBuf;
use std::sync::Mutex;

use tw_core::{Snapshot, StoreError};

use crate::traits::SnapshotStore;

/// Store without a filesystem, for tests. Tracks how many saves happened so
/// tests can assert a reconcile left the baseline untouched.
#[derive(Default)]
pub struct InMemorySnapshotStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    snapshot: Option<Snapshot>,
    saves: usize,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(snapshot: Snapshot) -> Self {
        Self { inner: Mutex::new(Inner { snapshot: Some(snapshot), saves: 0 }) }
    }

    pub fn save_count(&self) -> usize {
        self.inner.lock().unwrap().saves
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Snapshot, StoreError> {
        let inner = self.inner.lock().unwrap();
        inner
            .snapshot
            .clone()
            .ok_or_else(|| StoreError::NotFound { path: PathBuf::from("<memory>") })
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.snapshot = Some(snapshot.clone());
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_core::BoardNode;

    fn snap(name: &str) -> Snapshot {
        Snapshot {
            boards: vec![BoardNode { id: "b1".into(), name: name.into(), ..Default::default() }],
        }
    }

    #[test]
    fn empty_store_is_not_found() {
        let store = InMemorySnapshotStore::new();
        assert!(matches!(store.load(), Err(StoreError::NotFound { .. })));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = InMemorySnapshotStore::new();
        store.save(&snap("A")).unwrap();
        assert_eq!(store.load().unwrap(), snap("A"));
        store.save(&snap("B")).unwrap();
        assert_eq!(store.load().unwrap(), snap("B"));
        assert_eq!(store.save_count(), 2);
    }

    #[test]
    fn seeded_store_loads_without_a_save() {
        let store = InMemorySnapshotStore::seeded(snap("A"));
        assert_eq!(store.load().unwrap(), snap("A"));
        assert_eq!(store.save_count(), 0);
    }
}
