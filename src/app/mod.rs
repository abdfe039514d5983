mod config;
pub mod error;

use std::sync::Arc;

pub use config::*;
use error::*;

use crate::{
    debounce::Debouncer,
    drive::DriveStore,
    lightning::LightningNode,
    pay_config::PayConfig,
    slashtag::{self, Slashtag},
    sync::*,
    wallet::{Settings, WalletState},
};

pub struct App {
    syncer: PayConfigSyncer,
    debouncer: Debouncer<SyncArgs>,
}

impl App {
    pub fn new(
        wallet: Arc<dyn WalletState>,
        lightning: Arc<dyn LightningNode>,
        settings: Arc<dyn Settings>,
        config: AppConfig,
    ) -> Self {
        let delay = config.sync.debounce_delay;
        let syncer = PayConfigSyncer::new(PayConfigReconciler::new(
            wallet,
            lightning,
            settings,
            config.sync,
        ));
        let debounced = syncer.clone();
        let debouncer = Debouncer::new(delay, move |args: SyncArgs| {
            let syncer = debounced.clone();
            async move {
                if let Submission::Queued(handle) = syncer.submit(args).await {
                    if let Err(e) = handle.await {
                        tracing::warn!(error = %e, "pay config sync task aborted");
                    }
                }
            }
        });
        Self { syncer, debouncer }
    }

    /// Schedules a pay config sync once triggers have been quiet for the
    /// configured window. Returns without waiting for the pass.
    pub fn update_slash_pay_config(&self, args: SyncArgs) {
        self.debouncer.trigger(args);
    }

    /// Runs a scheduled sync right away instead of waiting for the window to pass.
    pub async fn flush(&self) {
        self.debouncer.flush().await;
    }

    pub fn cancel(&self) {
        self.debouncer.cancel();
    }

    pub fn has_pending_update(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub async fn reconcile_now(&self, args: SyncArgs) -> Result<ReconcileOutcome, ApplicationError> {
        Ok(self.syncer.run(args).await?)
    }

    pub fn syncer(&self) -> &PayConfigSyncer {
        &self.syncer
    }

    pub fn slashtag(&self, store: Arc<dyn DriveStore>) -> Slashtag {
        Slashtag::new(store)
    }

    pub async fn contact_pay_config(&self, store: &dyn DriveStore, url: &str) -> PayConfig {
        slashtag::get_slash_pay_config(store, url).await
    }
}
