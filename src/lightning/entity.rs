use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use std::{collections::HashMap, time::Duration};

use crate::primitives::{Network, Satoshis, WalletName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub payment_hash: String,
    pub to_str: String,
    #[serde(default)]
    pub amount_sats: Option<Satoshis>,
    #[serde(default)]
    pub description: String,
    pub expiry_seconds: u64,
    pub is_expired: bool,
}

pub type DecodedInvoice = Invoice;

/// Snapshot of the lightning node for one wallet/network pair.
#[derive(Debug, Clone, Default)]
pub struct NodeState {
    pub open_channel_ids: Vec<String>,
    pub invoices: HashMap<String, Invoice>,
}

impl NodeState {
    pub fn has_open_channels(&self) -> bool {
        !self.open_channel_ids.is_empty()
    }

    /// Whether the node still tracks an invoice with this payment request.
    /// Tracked invoices are taken to be unpaid; this is not a validity check.
    pub fn is_tracked(&self, payment_request: &str) -> bool {
        !payment_request.is_empty()
            && self
                .invoices
                .values()
                .any(|invoice| invoice.to_str == payment_request)
    }
}

#[derive(Debug, Clone, Builder)]
#[builder(pattern = "owned")]
pub struct CreateInvoiceRequest {
    #[builder(default)]
    pub amount_sats: Satoshis,
    #[builder(setter(into), default)]
    pub description: String,
    pub expiry_delta: Duration,
    pub wallet: WalletName,
    pub network: Network,
}

impl CreateInvoiceRequest {
    pub fn builder() -> CreateInvoiceRequestBuilder {
        CreateInvoiceRequestBuilder::default()
    }

    pub fn expiry_delta_seconds(&self) -> u64 {
        self.expiry_delta.as_secs()
    }
}
