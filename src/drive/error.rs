use thiserror::Error;

use crate::primitives::DriveKey;

#[derive(Error, Debug)]
pub enum DriveError {
    #[error("DriveError - Closed")]
    Closed,
    #[error("DriveError - ReadOnly: {0}")]
    ReadOnly(DriveKey),
    #[error("DriveError - NotFound: {0}")]
    NotFound(DriveKey),
    #[error("DriveError - Json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("DriveError - Io: {0}")]
    Io(String),
}
