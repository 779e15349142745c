use std::path::PathBuf;

use thiserror::Error;

/// Remote capability failure (network, auth, rate limit). The watcher does
/// not classify these further and never retries; the message carries whatever
/// the capability reported.
#[derive(Debug, Error)]
#[error("remote fetch failed: {0}")]
pub struct FetchError(pub String);

impl FetchError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no snapshot at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read snapshot at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot at {} is not parseable: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write snapshot at {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Umbrella for a reconcile or prelaunch run. Source and store failures
/// abort the run as-is; there is no fallback to a stale or empty snapshot.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
