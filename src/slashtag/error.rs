use thiserror::Error;

use crate::{drive::DriveError, primitives::PrimitivesError};

#[derive(Error, Debug)]
pub enum SlashtagError {
    #[error("SlashtagError - Closed: the slashtags sdk is closed")]
    Closed,
    #[error("SlashtagError - InvalidUrl: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("SlashtagError - UnsupportedProtocol: {0}")]
    UnsupportedProtocol(String),
    #[error("SlashtagError - MissingId: {0}")]
    MissingId(String),
    #[error("SlashtagError - InvalidId: {0}")]
    InvalidId(#[from] PrimitivesError),
    #[error("SlashtagError - Drive: {0}")]
    Drive(#[from] DriveError),
}
