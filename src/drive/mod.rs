pub mod error;
mod json;
mod memory;
mod r#trait;

pub use error::DriveError;
pub use json::*;
pub use memory::*;
pub use r#trait::*;
