use async_trait::async_trait;

use std::fmt;

use super::error::*;
use crate::primitives::DriveKey;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum DriveName {
    /// The default drive holding the profile and pay config.
    Public,
    Named(String),
}

impl DriveName {
    pub fn contacts() -> Self {
        Self::Named("contacts".to_string())
    }
}

impl fmt::Display for DriveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveName::Public => f.write_str("public"),
            DriveName::Named(name) => f.write_str(name),
        }
    }
}

#[async_trait]
pub trait Drive: Send + Sync {
    fn key(&self) -> DriveKey;

    /// Monotonic counter bumped by every mutation of the drive.
    fn version(&self) -> u64;

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, DriveError>;

    async fn put(&self, path: &str, content: Vec<u8>) -> Result<(), DriveError>;

    async fn del(&self, path: &str) -> Result<(), DriveError>;

    async fn list(&self, prefix: &str) -> Result<Vec<String>, DriveError>;

    async fn close(&self);
}

/// Access to the drives of the local slashtag and read access to peers' drives.
#[async_trait]
pub trait DriveStore: Send + Sync {
    fn key(&self) -> DriveKey;

    fn is_closed(&self) -> bool;

    async fn open(&self, name: DriveName) -> Result<Box<dyn Drive>, DriveError>;

    async fn open_remote(&self, key: &DriveKey) -> Result<Box<dyn Drive>, DriveError>;

    async fn close(&self);
}
