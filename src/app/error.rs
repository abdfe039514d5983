use thiserror::Error;

use crate::{slashtag::SlashtagError, sync::PayConfigSyncError};

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    PayConfigSyncError(#[from] PayConfigSyncError),
    #[error("{0}")]
    SlashtagError(#[from] SlashtagError),
}
