use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::primitives::Satoshis;

#[serde_with::serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Quiescence window collapsing bursts of update triggers, in milliseconds.
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    #[serde(default = "default_debounce_delay")]
    pub debounce_delay: Duration,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    #[serde(default = "default_invoice_expiry")]
    pub invoice_expiry: Duration,
    #[serde(default)]
    pub invoice_amount_sats: Satoshis,
    #[serde(default)]
    pub invoice_description: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_delay: default_debounce_delay(),
            invoice_expiry: default_invoice_expiry(),
            invoice_amount_sats: Satoshis::ZERO,
            invoice_description: String::new(),
        }
    }
}

fn default_debounce_delay() -> Duration {
    Duration::from_millis(5000)
}

fn default_invoice_expiry() -> Duration {
    Duration::from_secs(60 * 60 * 24 * 7)
}
