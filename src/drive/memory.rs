use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
        Arc,
    },
};

use super::{error::*, r#trait::*};
use crate::primitives::DriveKey;

#[derive(Default)]
struct DriveContents {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
    version: AtomicU64,
}

/// Process-local stand-in for the peer network: every drive created through
/// any store attached to the same swarm is readable by the others.
#[derive(Clone, Default)]
pub struct MemorySwarm {
    drives: Arc<Mutex<HashMap<(DriveKey, DriveName), Arc<DriveContents>>>>,
}

impl MemorySwarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> MemoryDriveStore {
        MemoryDriveStore::new(self.clone(), DriveKey::generate())
    }

    async fn contents(&self, key: DriveKey, name: DriveName) -> Arc<DriveContents> {
        let mut drives = self.drives.lock().await;
        Arc::clone(drives.entry((key, name)).or_default())
    }

    async fn existing(&self, key: DriveKey, name: DriveName) -> Option<Arc<DriveContents>> {
        self.drives.lock().await.get(&(key, name)).cloned()
    }
}

pub struct MemoryDriveStore {
    swarm: MemorySwarm,
    key: DriveKey,
    closed: AtomicBool,
    open_handles: Arc<AtomicUsize>,
}

impl MemoryDriveStore {
    pub fn new(swarm: MemorySwarm, key: DriveKey) -> Self {
        Self {
            swarm,
            key,
            closed: AtomicBool::new(false),
            open_handles: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of drive handles opened through this store that were not closed yet.
    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    fn handle(&self, key: DriveKey, contents: Arc<DriveContents>, writable: bool) -> Box<dyn Drive> {
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        Box::new(MemoryDrive {
            key,
            contents,
            writable,
            closed: AtomicBool::new(false),
            open_handles: Arc::clone(&self.open_handles),
        })
    }
}

#[async_trait]
impl DriveStore for MemoryDriveStore {
    fn key(&self) -> DriveKey {
        self.key
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    async fn open(&self, name: DriveName) -> Result<Box<dyn Drive>, DriveError> {
        if self.is_closed() {
            return Err(DriveError::Closed);
        }
        let contents = self.swarm.contents(self.key, name).await;
        Ok(self.handle(self.key, contents, true))
    }

    async fn open_remote(&self, key: &DriveKey) -> Result<Box<dyn Drive>, DriveError> {
        if self.is_closed() {
            return Err(DriveError::Closed);
        }
        let contents = self
            .swarm
            .existing(*key, DriveName::Public)
            .await
            .ok_or(DriveError::NotFound(*key))?;
        Ok(self.handle(*key, contents, *key == self.key))
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

pub struct MemoryDrive {
    key: DriveKey,
    contents: Arc<DriveContents>,
    writable: bool,
    closed: AtomicBool,
    open_handles: Arc<AtomicUsize>,
}

impl MemoryDrive {
    fn check_open(&self) -> Result<(), DriveError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(DriveError::Closed);
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<(), DriveError> {
        self.check_open()?;
        if !self.writable {
            return Err(DriveError::ReadOnly(self.key));
        }
        Ok(())
    }
}

#[async_trait]
impl Drive for MemoryDrive {
    fn key(&self) -> DriveKey {
        self.key
    }

    fn version(&self) -> u64 {
        self.contents.version.load(Ordering::SeqCst)
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, DriveError> {
        self.check_open()?;
        Ok(self.contents.files.read().await.get(path).cloned())
    }

    async fn put(&self, path: &str, content: Vec<u8>) -> Result<(), DriveError> {
        self.check_writable()?;
        self.contents
            .files
            .write()
            .await
            .insert(path.to_string(), content);
        self.contents.version.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn del(&self, path: &str) -> Result<(), DriveError> {
        self.check_writable()?;
        if self.contents.files.write().await.remove(path).is_some() {
            self.contents.version.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, DriveError> {
        self.check_open()?;
        Ok(self
            .contents
            .files
            .read()
            .await
            .keys()
            .filter(|path| path.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.open_handles.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
