pub mod memory;
pub mod reader;
pub mod traits;

pub use memory::*;
pub use reader::*;
pub use traits::*;
