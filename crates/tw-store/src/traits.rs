use tw_core::{Snapshot, StoreError};

/// Persistence for the single comparison baseline. One document, no history:
/// `save` replaces whatever was there, `load` returns the latest.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Snapshot, StoreError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}
