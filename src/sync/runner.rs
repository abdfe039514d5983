use tokio::{sync::Mutex, task::JoinHandle};

use std::{collections::HashMap, sync::Arc};

use super::{error::*, reconciler::*};
use crate::primitives::DriveKey;

#[derive(Default)]
struct DriveSlot {
    running: Mutex<()>,
    pending: Mutex<Option<SyncArgs>>,
}

type Slots = Arc<Mutex<HashMap<DriveKey, Arc<DriveSlot>>>>;

#[derive(Debug)]
pub enum Submission {
    /// No drive store was given, so there is nothing to reconcile.
    Skipped,
    /// A pass was scheduled. It starts once any running pass on the same drive finished.
    Queued(JoinHandle<Result<ReconcileOutcome, PayConfigSyncError>>),
    /// A pass was already waiting for this drive; it will run with these arguments instead.
    Coalesced,
}

/// Serializes reconciliation passes per drive so an older pass can never
/// overwrite the result of a newer one.
///
/// Failed passes are logged at `warn` by the reconciler span.
#[derive(Clone)]
pub struct PayConfigSyncer {
    reconciler: Arc<PayConfigReconciler>,
    slots: Slots,
}

impl PayConfigSyncer {
    pub fn new(reconciler: PayConfigReconciler) -> Self {
        Self {
            reconciler: Arc::new(reconciler),
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn reconciler(&self) -> &PayConfigReconciler {
        &self.reconciler
    }

    pub async fn submit(&self, args: SyncArgs) -> Submission {
        let key = match args.sdk.as_ref() {
            Some(sdk) => sdk.key(),
            None => {
                tracing::debug!("skipping pay config sync, sdk not ready");
                return Submission::Skipped;
            }
        };
        let slot = slot(&self.slots, key).await;
        if slot.pending.lock().await.replace(args).is_some() {
            return Submission::Coalesced;
        }

        let reconciler = Arc::clone(&self.reconciler);
        let slots = Arc::clone(&self.slots);
        Submission::Queued(tokio::spawn(async move {
            let res = {
                let _running = slot.running.lock().await;
                let args = slot.pending.lock().await.take();
                match args {
                    Some(args) => reconciler.execute(args).await,
                    None => Ok(ReconcileOutcome::Unchanged),
                }
            };
            release(&slots, key, slot).await;
            res
        }))
    }

    /// Runs a pass right away, waiting for any pass already running on the same drive.
    pub async fn run(&self, args: SyncArgs) -> Result<ReconcileOutcome, PayConfigSyncError> {
        let key = match args.sdk.as_ref() {
            Some(sdk) => sdk.key(),
            None => return Ok(ReconcileOutcome::SdkNotReady),
        };
        let slot = slot(&self.slots, key).await;
        let res = {
            let _running = slot.running.lock().await;
            self.reconciler.execute(args).await
        };
        release(&self.slots, key, slot).await;
        res
    }

    /// Number of drives with a pass running or waiting.
    pub async fn active_drives(&self) -> usize {
        self.slots.lock().await.len()
    }
}

async fn slot(slots: &Slots, key: DriveKey) -> Arc<DriveSlot> {
    let mut slots = slots.lock().await;
    Arc::clone(slots.entry(key).or_default())
}

/// Drops the slot once nobody but the map holds it and no args are waiting.
async fn release(slots: &Slots, key: DriveKey, slot: Arc<DriveSlot>) {
    let mut slots = slots.lock().await;
    let idle = Arc::strong_count(&slot) == 2 && slot.pending.lock().await.is_none();
    if idle && slots.get(&key).is_some_and(|held| Arc::ptr_eq(held, &slot)) {
        slots.remove(&key);
    }
}
