mod entity;
pub mod error;
mod r#trait;

pub use entity::*;
pub use error::LightningError;
pub use r#trait::*;
