pub mod actions;
pub mod args;
pub mod registry;
pub mod triggers;

pub use args::*;
pub use registry::*;

use thiserror::Error;
use tw_core::{FetchError, StoreError, WatchError};

#[derive(Debug, Error)]
pub enum HookError {
    #[error(transparent)]
    Watch(#[from] WatchError),

    #[error("argument {name}: {reason}")]
    BadArg { name: String, reason: String },
}

impl From<FetchError> for HookError {
    fn from(e: FetchError) -> Self {
        HookError::Watch(e.into())
    }
}

impl From<StoreError> for HookError {
    fn from(e: StoreError) -> Self {
        HookError::Watch(e.into())
    }
}
