use thiserror::Error;

use crate::{drive::DriveError, pay_config::*};

#[derive(Error, Debug)]
pub enum PayConfigSyncError {
    #[error("PayConfigSyncError - Drive: {0}")]
    Drive(#[from] DriveError),
    #[error("PayConfigSyncError - PayConfig: {0}")]
    PayConfig(#[from] PayConfigError),
    #[error("PayConfigSyncError - Write: could not publish {} entries: {source}", .config.len())]
    Write {
        config: PayConfig,
        source: DriveError,
    },
}
