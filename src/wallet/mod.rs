pub mod error;
mod r#trait;

pub use error::WalletError;
pub use r#trait::*;
