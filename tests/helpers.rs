#![allow(dead_code)]

use async_trait::async_trait;
use tokio::sync::watch;

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use slashpay::{
    app::*, drive::*, lightning::*, pay_config::*, primitives::*, sync::*, wallet::*,
};

pub struct FakeWallet {
    pub selected_wallet: WalletName,
    pub selected_network: Network,
    address_type: Mutex<AddressType>,
    address: Mutex<Option<String>>,
    panics: AtomicBool,
    pub receive_address_calls: Mutex<Vec<(WalletName, Network)>>,
}

impl FakeWallet {
    pub fn new(address: &str) -> Self {
        Self {
            selected_wallet: WalletName::default(),
            selected_network: Network::Bitcoin,
            address_type: Mutex::new(AddressType::P2wpkh),
            address: Mutex::new(Some(address.to_string())),
            panics: AtomicBool::new(false),
            receive_address_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_address(&self, address: Option<&str>) {
        *self.address.lock().unwrap() = address.map(str::to_string);
    }

    pub fn set_address_type(&self, address_type: AddressType) {
        *self.address_type.lock().unwrap() = address_type;
    }

    /// Makes address resolution panic, simulating a crashing wallet backend.
    pub fn set_panics(&self, panics: bool) {
        self.panics.store(panics, Ordering::SeqCst);
    }
}

#[async_trait]
impl WalletState for FakeWallet {
    fn selected_wallet(&self) -> WalletName {
        self.selected_wallet.clone()
    }

    fn selected_network(&self) -> Network {
        self.selected_network
    }

    fn selected_address_type(&self, _: &WalletName, _: Network) -> AddressType {
        *self.address_type.lock().unwrap()
    }

    async fn receive_address(
        &self,
        wallet: &WalletName,
        network: Network,
    ) -> Result<String, WalletError> {
        if self.panics.load(Ordering::SeqCst) {
            panic!("wallet backend crashed");
        }
        self.receive_address_calls
            .lock()
            .unwrap()
            .push((wallet.clone(), network));
        self.address
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| WalletError::NoAddress(wallet.to_string()))
    }
}

pub struct FakeSettings {
    enabled: AtomicBool,
}

impl FakeSettings {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
        }
    }

    pub fn set(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

impl Settings for FakeSettings {
    fn enable_offline_payments(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

pub fn invoice(to_str: &str, is_expired: bool) -> Invoice {
    Invoice {
        payment_hash: format!("hash-{to_str}"),
        to_str: to_str.to_string(),
        amount_sats: None,
        description: String::new(),
        expiry_seconds: 604_800,
        is_expired,
    }
}

pub struct FakeLightning {
    ready: watch::Sender<bool>,
    state: Mutex<NodeState>,
    decodable: Mutex<HashMap<String, DecodedInvoice>>,
    next_invoice: Mutex<Option<String>>,
    pub decode_calls: AtomicUsize,
    pub create_requests: Mutex<Vec<CreateInvoiceRequest>>,
}

impl FakeLightning {
    pub fn new() -> Self {
        let (ready, _) = watch::channel(true);
        Self {
            ready,
            state: Mutex::new(NodeState::default()),
            decodable: Mutex::new(HashMap::new()),
            next_invoice: Mutex::new(None),
            decode_calls: AtomicUsize::new(0),
            create_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.send_replace(ready);
    }

    /// Number of passes currently blocked waiting for the node.
    pub fn waiters(&self) -> usize {
        self.ready.receiver_count()
    }

    pub fn open_channel(&self, id: &str) {
        self.state
            .lock()
            .unwrap()
            .open_channel_ids
            .push(id.to_string());
    }

    pub fn close_channels(&self) {
        self.state.lock().unwrap().open_channel_ids.clear();
    }

    /// Tracks the invoice as unpaid and makes it decodable.
    pub fn track_invoice(&self, invoice: Invoice) {
        self.decodable
            .lock()
            .unwrap()
            .insert(invoice.to_str.clone(), invoice.clone());
        self.state
            .lock()
            .unwrap()
            .invoices
            .insert(invoice.payment_hash.clone(), invoice);
    }

    /// Makes the invoice decodable without tracking it.
    pub fn make_decodable(&self, invoice: Invoice) {
        self.decodable
            .lock()
            .unwrap()
            .insert(invoice.to_str.clone(), invoice);
    }

    pub fn set_next_invoice(&self, to_str: Option<&str>) {
        *self.next_invoice.lock().unwrap() = to_str.map(str::to_string);
    }

    pub fn created(&self) -> usize {
        self.create_requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LightningNode for FakeLightning {
    async fn wait_until_ready(&self) {
        let mut ready = self.ready.subscribe();
        while !*ready.borrow_and_update() {
            if ready.changed().await.is_err() {
                return;
            }
        }
    }

    fn node_state(&self, _: &WalletName, _: Network) -> NodeState {
        self.state.lock().unwrap().clone()
    }

    async fn decode_invoice(&self, payment_request: &str) -> Result<DecodedInvoice, LightningError> {
        self.decode_calls.fetch_add(1, Ordering::SeqCst);
        self.decodable
            .lock()
            .unwrap()
            .get(payment_request)
            .cloned()
            .ok_or_else(|| LightningError::Decode(payment_request.to_string()))
    }

    async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<Invoice, LightningError> {
        self.create_requests.lock().unwrap().push(request);
        let next = self.next_invoice.lock().unwrap().clone();
        match next {
            Some(to_str) => {
                let invoice = invoice(&to_str, false);
                self.track_invoice(invoice.clone());
                Ok(invoice)
            }
            None => Err(LightningError::CreateInvoice("no route".to_string())),
        }
    }
}

/// Wraps a store so that every write fails.
pub struct FailingWritesStore(pub Arc<MemoryDriveStore>);

struct FailingWritesDrive(Box<dyn Drive>);

#[async_trait]
impl Drive for FailingWritesDrive {
    fn key(&self) -> DriveKey {
        self.0.key()
    }

    fn version(&self) -> u64 {
        self.0.version()
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>, DriveError> {
        self.0.get(path).await
    }

    async fn put(&self, _: &str, _: Vec<u8>) -> Result<(), DriveError> {
        Err(DriveError::Io("disk full".to_string()))
    }

    async fn del(&self, _: &str) -> Result<(), DriveError> {
        Err(DriveError::Io("disk full".to_string()))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, DriveError> {
        self.0.list(prefix).await
    }

    async fn close(&self) {
        self.0.close().await
    }
}

#[async_trait]
impl DriveStore for FailingWritesStore {
    fn key(&self) -> DriveKey {
        self.0.key()
    }

    fn is_closed(&self) -> bool {
        self.0.is_closed()
    }

    async fn open(&self, name: DriveName) -> Result<Box<dyn Drive>, DriveError> {
        Ok(Box::new(FailingWritesDrive(self.0.open(name).await?)))
    }

    async fn open_remote(&self, key: &DriveKey) -> Result<Box<dyn Drive>, DriveError> {
        self.0.open_remote(key).await
    }

    async fn close(&self) {
        self.0.close().await
    }
}

pub struct Harness {
    pub swarm: MemorySwarm,
    pub store: Arc<MemoryDriveStore>,
    pub wallet: Arc<FakeWallet>,
    pub lightning: Arc<FakeLightning>,
    pub settings: Arc<FakeSettings>,
}

impl Harness {
    pub fn new(address: &str, enable_offline_payments: bool) -> Self {
        let swarm = MemorySwarm::new();
        let store = Arc::new(swarm.store());
        Self {
            swarm,
            store,
            wallet: Arc::new(FakeWallet::new(address)),
            lightning: Arc::new(FakeLightning::new()),
            settings: Arc::new(FakeSettings::new(enable_offline_payments)),
        }
    }

    pub fn reconciler(&self) -> PayConfigReconciler {
        PayConfigReconciler::new(
            self.wallet.clone(),
            self.lightning.clone(),
            self.settings.clone(),
            SyncConfig::default(),
        )
    }

    pub fn app(&self) -> App {
        App::new(
            self.wallet.clone(),
            self.lightning.clone(),
            self.settings.clone(),
            AppConfig::default(),
        )
    }

    pub fn args(&self) -> SyncArgs {
        SyncArgs::new(self.store.clone())
    }

    pub async fn publish(&self, config: &PayConfig) -> anyhow::Result<()> {
        let drive = self.store.open(DriveName::Public).await?;
        drive.put(PAY_CONFIG_PATH, config.to_bytes()?).await?;
        drive.close().await;
        Ok(())
    }

    pub async fn published(&self) -> anyhow::Result<Option<PayConfig>> {
        let drive = self.store.open(DriveName::Public).await?;
        let content = drive.get(PAY_CONFIG_PATH).await?;
        drive.close().await;
        Ok(match content {
            Some(content) => Some(PayConfig::from_bytes(&content)?),
            None => None,
        })
    }

    /// Number of writes the public drive has seen so far.
    pub async fn writes(&self) -> anyhow::Result<u64> {
        let drive = self.store.open(DriveName::Public).await?;
        let version = drive.version();
        drive.close().await;
        Ok(version)
    }
}

pub fn config(entries: &[(PaymentKind, &str)]) -> PayConfig {
    PayConfig::from(
        entries
            .iter()
            .map(|(kind, value)| PayConfigEntry::new(kind.clone(), *value))
            .collect::<Vec<_>>(),
    )
}
