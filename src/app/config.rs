use serde::{Deserialize, Serialize};

use crate::sync::SyncConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub sync: SyncConfig,
}
