mod entity;
pub mod error;

pub use entity::*;
pub use error::PayConfigError;

use crate::drive::Drive;

/// Well-known location of the pay config on a slashtag's public drive.
pub const PAY_CONFIG_PATH: &str = "/slashpay.json";

/// Reads the pay config published on `drive`. Read and decoding failures
/// degrade to the empty config.
pub async fn read_pay_config(drive: &dyn Drive) -> PayConfig {
    match drive.get(PAY_CONFIG_PATH).await {
        Ok(Some(content)) => PayConfig::from_bytes(&content).unwrap_or_else(|e| {
            tracing::debug!(drive = %drive.key(), error = %e, "unreadable pay config");
            PayConfig::empty()
        }),
        Ok(None) => PayConfig::empty(),
        Err(e) => {
            tracing::debug!(drive = %drive.key(), error = %e, "couldn't read pay config");
            PayConfig::empty()
        }
    }
}
