use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tw_core::{Snapshot, StoreError};

use crate::traits::SnapshotStore;

/// One snapshot document at a fixed path. Writes go to a temp file in the
/// same directory and are renamed over the target, so a concurrent reader
/// never observes a partial document.
pub struct FsSnapshotStore {
    path: PathBuf,
}

impl FsSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn load(&self) -> Result<Snapshot, StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { path: self.path.clone() })
            }
            Err(source) => return Err(StoreError::Read { path: self.path.clone(), source }),
        };
        serde_json::from_slice(&bytes)
            .map_err(|source| StoreError::Corrupt { path: self.path.clone(), source })
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let write_err =
            |source: io::Error| StoreError::Write { path: self.path.clone(), source };

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        serde_json::to_writer(&mut tmp, snapshot)
            .map_err(|e| write_err(io::Error::from(e)))?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tw_core::{BoardNode, CardNode, ListNode};

    fn sample(depth_markers: bool) -> Snapshot {
        let card = CardNode {
            id: "c1".into(),
            name: "Fix door".into(),
            description: "hinge".into(),
            ..Default::default()
        };
        Snapshot {
            boards: vec![BoardNode {
                id: "b1".into(),
                name: "House".into(),
                closed: false,
                lists: if depth_markers {
                    vec![ListNode {
                        id: "l1".into(),
                        name: "Todo".into(),
                        closed: false,
                        cards: vec![card],
                    }]
                } else {
                    vec![]
                },
            }],
        }
    }

    #[test]
    fn round_trips_shallow_and_deep_snapshots() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path().join("state.json"));
        for snap in [Snapshot::default(), sample(false), sample(true)] {
            store.save(&snap).unwrap();
            assert_eq!(store.load().unwrap(), snap);
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path().join("state.json"));
        assert!(matches!(store.load(), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn unparsable_file_is_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"{not json").unwrap();
        let store = FsSnapshotStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));

        // Valid JSON of the wrong shape is corrupt too.
        std::fs::write(&path, br#"{"boards": 3}"#).unwrap();
        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn save_overwrites_wholesale() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path().join("state.json"));
        store.save(&sample(true)).unwrap();
        store.save(&sample(false)).unwrap();
        assert_eq!(store.load().unwrap(), sample(false));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path().join("nested").join("state.json"));
        store.save(&sample(false)).unwrap();
        assert_eq!(store.load().unwrap(), sample(false));
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path().join("state.json"));
        store.save(&sample(true)).unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
