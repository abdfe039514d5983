use tracing::instrument;

use std::{fmt, sync::Arc};

use super::{config::*, error::*};
use crate::{
    drive::{Drive, DriveName, DriveStore},
    lightning::*,
    pay_config::*,
    primitives::{Network, WalletName},
    wallet::{Settings, WalletState},
};

/// Arguments of one reconciliation pass. Missing wallet and network fall back
/// to the currently selected ones.
#[derive(Clone, Default)]
pub struct SyncArgs {
    pub sdk: Option<Arc<dyn DriveStore>>,
    pub wallet: Option<WalletName>,
    pub network: Option<Network>,
}

impl SyncArgs {
    pub fn new(sdk: Arc<dyn DriveStore>) -> Self {
        Self {
            sdk: Some(sdk),
            wallet: None,
            network: None,
        }
    }

    pub fn wallet(mut self, wallet: WalletName) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }
}

impl fmt::Debug for SyncArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncArgs")
            .field("sdk", &self.sdk.as_ref().map(|sdk| sdk.key()))
            .field("wallet", &self.wallet)
            .field("network", &self.network)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No drive store was available yet.
    SdkNotReady,
    /// Offline payments are disabled and nothing is published.
    AlreadyEmpty,
    /// Offline payments are disabled and the published config was emptied.
    Cleared,
    /// The recomputed config needed no write.
    Unchanged,
    Published(PayConfig),
}

impl ReconcileOutcome {
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Cleared | Self::Published(_))
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SdkNotReady => f.write_str("sdk_not_ready"),
            Self::AlreadyEmpty => f.write_str("already_empty"),
            Self::Cleared => f.write_str("cleared"),
            Self::Unchanged => f.write_str("unchanged"),
            Self::Published(config) => write!(f, "published({})", config.len()),
        }
    }
}

/// Why the published lightning invoice has to be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceRefresh {
    Missing,
    NoLongerTracked,
    Undecodable,
    Expired,
}

impl InvoiceRefresh {
    pub fn from_decoded(decoded: &Result<DecodedInvoice, LightningError>) -> Option<Self> {
        match decoded {
            Err(_) => Some(Self::Undecodable),
            Ok(invoice) if invoice.is_expired => Some(Self::Expired),
            Ok(_) => None,
        }
    }
}

pub struct PayConfigReconciler {
    wallet: Arc<dyn WalletState>,
    lightning: Arc<dyn LightningNode>,
    settings: Arc<dyn Settings>,
    config: SyncConfig,
}

impl PayConfigReconciler {
    pub fn new(
        wallet: Arc<dyn WalletState>,
        lightning: Arc<dyn LightningNode>,
        settings: Arc<dyn Settings>,
        config: SyncConfig,
    ) -> Self {
        Self {
            wallet,
            lightning,
            settings,
            config,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Runs one reconciliation pass. The public drive opened here is closed
    /// on every path out of the pass.
    #[instrument(
        name = "sync.reconcile",
        skip(self),
        fields(wallet, network, outcome),
        err(level = "warn")
    )]
    pub async fn execute(&self, args: SyncArgs) -> Result<ReconcileOutcome, PayConfigSyncError> {
        let sdk = match args.sdk {
            Some(sdk) => sdk,
            None => return Ok(ReconcileOutcome::SdkNotReady),
        };
        let wallet = args
            .wallet
            .unwrap_or_else(|| self.wallet.selected_wallet());
        let network = args
            .network
            .unwrap_or_else(|| self.wallet.selected_network());
        let span = tracing::Span::current();
        span.record("wallet", tracing::field::display(&wallet));
        span.record("network", tracing::field::display(network));

        let drive = sdk.open(DriveName::Public).await?;
        let res = self.reconcile(drive.as_ref(), &wallet, network).await;
        drive.close().await;

        if let Ok(outcome) = &res {
            span.record("outcome", tracing::field::display(outcome));
        }
        res
    }

    async fn reconcile(
        &self,
        drive: &dyn Drive,
        wallet: &WalletName,
        network: Network,
    ) -> Result<ReconcileOutcome, PayConfigSyncError> {
        let published = read_pay_config(drive).await;

        self.lightning.wait_until_ready().await;

        let node = self.lightning.node_state(wallet, network);
        let enable_offline_payments = self.settings.enable_offline_payments();
        let address_type = self.wallet.selected_address_type(wallet, network);

        if !enable_offline_payments {
            if published.is_empty() {
                return Ok(ReconcileOutcome::AlreadyEmpty);
            }
            publish(drive, &published, PayConfig::empty()).await?;
            return Ok(ReconcileOutcome::Cleared);
        }

        let mut need_to_update = false;
        let mut new_config = PayConfig::empty();

        let current_address = published.find(&address_type.into());
        match self.wallet.receive_address(wallet, network).await {
            Ok(address) if current_address != Some(address.as_str()) => {
                need_to_update = true;
                new_config.push(address_type, address);
            }
            res => {
                if let Err(e) = res {
                    tracing::warn!(error = %e, "couldn't resolve receive address");
                }
                if let Some(current) = current_address {
                    new_config.push(address_type, current);
                }
            }
        }

        let current_invoice = published
            .find(&PaymentKind::LightningInvoice)
            .unwrap_or_default();
        if node.has_open_channels() {
            match self.invoice_refresh(current_invoice, &node).await {
                Some(reason) => {
                    tracing::debug!(?reason, "refreshing published invoice");
                    match self.create_invoice(wallet, network).await {
                        Ok(invoice) => {
                            need_to_update = true;
                            new_config.push(PaymentKind::LightningInvoice, invoice.to_str);
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "couldn't create invoice");
                            if !current_invoice.is_empty() {
                                new_config.push(PaymentKind::LightningInvoice, current_invoice);
                            }
                        }
                    }
                }
                None => new_config.push(PaymentKind::LightningInvoice, current_invoice),
            }
        } else if !current_invoice.is_empty() {
            // invoice can't be paid without channels
            need_to_update = true;
        }

        if !need_to_update {
            return Ok(ReconcileOutcome::Unchanged);
        }

        let new_config = publish(drive, &published, new_config).await?;
        Ok(ReconcileOutcome::Published(new_config))
    }

    async fn invoice_refresh(&self, current: &str, node: &NodeState) -> Option<InvoiceRefresh> {
        if current.is_empty() {
            return Some(InvoiceRefresh::Missing);
        }
        if !node.is_tracked(current) {
            return Some(InvoiceRefresh::NoLongerTracked);
        }
        InvoiceRefresh::from_decoded(&self.lightning.decode_invoice(current).await)
    }

    async fn create_invoice(
        &self,
        wallet: &WalletName,
        network: Network,
    ) -> Result<Invoice, LightningError> {
        let request = CreateInvoiceRequest::builder()
            .amount_sats(self.config.invoice_amount_sats)
            .description(self.config.invoice_description.clone())
            .expiry_delta(self.config.invoice_expiry)
            .wallet(wallet.clone())
            .network(network)
            .build()
            .map_err(|e| LightningError::CreateInvoice(e.to_string()))?;
        self.lightning.create_invoice(request).await
    }
}

async fn publish(
    drive: &dyn Drive,
    previous: &PayConfig,
    new_config: PayConfig,
) -> Result<PayConfig, PayConfigSyncError> {
    tracing::debug!(?previous, next = ?new_config, "pushing new slashpay.json");
    let content = new_config.to_bytes()?;
    match drive.put(PAY_CONFIG_PATH, content).await {
        Ok(()) => {
            tracing::debug!(config = ?new_config, "updated slashpay.json");
            Ok(new_config)
        }
        Err(source) => Err(PayConfigSyncError::Write {
            config: new_config,
            source,
        }),
    }
}
