use async_trait::async_trait;

use super::error::*;
use crate::primitives::{AddressType, Network, WalletName};

#[async_trait]
pub trait WalletState: Send + Sync {
    fn selected_wallet(&self) -> WalletName;

    fn selected_network(&self) -> Network;

    fn selected_address_type(&self, wallet: &WalletName, network: Network) -> AddressType;

    async fn receive_address(
        &self,
        wallet: &WalletName,
        network: Network,
    ) -> Result<String, WalletError>;
}

/// Read-only view of the user's preferences.
pub trait Settings: Send + Sync {
    fn enable_offline_payments(&self) -> bool;
}
