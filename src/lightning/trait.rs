use async_trait::async_trait;

use super::{entity::*, error::*};
use crate::primitives::{Network, WalletName};

#[async_trait]
pub trait LightningNode: Send + Sync {
    /// Resolves once the node is able to decode and create invoices.
    async fn wait_until_ready(&self);

    fn node_state(&self, wallet: &WalletName, network: Network) -> NodeState;

    async fn decode_invoice(&self, payment_request: &str) -> Result<DecodedInvoice, LightningError>;

    async fn create_invoice(&self, request: CreateInvoiceRequest) -> Result<Invoice, LightningError>;
}
