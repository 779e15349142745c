pub mod diff;
pub mod error;
pub mod model;

pub use diff::*;
pub use error::*;
pub use model::*;
