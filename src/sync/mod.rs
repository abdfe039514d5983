mod config;
pub mod error;
mod reconciler;
mod runner;

pub use config::SyncConfig;
pub use error::PayConfigSyncError;
pub use reconciler::*;
pub use runner::*;
