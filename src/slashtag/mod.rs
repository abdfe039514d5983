pub mod error;
mod profile;
mod url;

use tracing::instrument;

use std::sync::Arc;

pub use self::url::*;
pub use error::SlashtagError;
pub use profile::*;

use crate::{
    drive::*,
    pay_config::{read_pay_config, PayConfig},
};

pub const PROFILE_PATH: &str = "/profile.json";

/// The local slashtag: profile on the public drive, contacts on the `contacts` drive.
#[derive(Clone)]
pub struct Slashtag {
    store: Arc<dyn DriveStore>,
    cache: ProfileCache,
}

impl Slashtag {
    pub fn new(store: Arc<dyn DriveStore>) -> Self {
        Self {
            store,
            cache: ProfileCache::new(),
        }
    }

    pub fn store(&self) -> Arc<dyn DriveStore> {
        Arc::clone(&self.store)
    }

    pub fn url(&self) -> SlashUrl {
        SlashUrl::new(SlashProtocol::Slash, self.store.key())
    }

    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }

    pub async fn profile(&self) -> Result<Option<BasicProfile>, SlashtagError> {
        self.check_closed()?;
        let drive = self.store.open(DriveName::Public).await?;
        let res = drive.get(PROFILE_PATH).await.and_then(decode_json);
        drive.close().await;
        Ok(res?)
    }

    #[instrument(name = "slashtag.save_profile", skip(self, profile), err)]
    pub async fn save_profile(&self, profile: BasicProfile) -> Result<(), SlashtagError> {
        self.check_closed()?;
        let content = encode_json(&profile)?;
        let drive = self.store.open(DriveName::Public).await?;
        let res = drive.put(PROFILE_PATH, content).await;
        let version = drive.version();
        drive.close().await;
        res?;
        self.cache
            .insert(self.url().to_string(), version, profile)
            .await;
        Ok(())
    }

    #[instrument(name = "slashtag.save_contact", skip(self, record), err)]
    pub async fn save_contact(&self, url: &str, record: &ContactRecord) -> Result<(), SlashtagError> {
        self.check_closed()?;
        let id = url.parse::<SlashUrl>()?.id;
        let content = encode_json(record)?;
        let drive = self.store.open(DriveName::contacts()).await?;
        let res = drive.put(&format!("/{id}"), content).await;
        drive.close().await;
        Ok(res?)
    }

    #[instrument(name = "slashtag.delete_contact", skip(self), err)]
    pub async fn delete_contact(&self, url: &str) -> Result<(), SlashtagError> {
        self.check_closed()?;
        let id = url.parse::<SlashUrl>()?.id;
        let drive = self.store.open(DriveName::contacts()).await?;
        let res = drive.del(&format!("/{id}")).await;
        drive.close().await;
        Ok(res?)
    }

    pub async fn contacts(&self) -> Result<Vec<ContactRecord>, SlashtagError> {
        self.check_closed()?;
        let drive = self.store.open(DriveName::contacts()).await?;
        let res = read_contacts(drive.as_ref()).await;
        drive.close().await;
        res
    }

    pub async fn read_as_data_url(&self, path: &str) -> Result<Option<String>, SlashtagError> {
        self.check_closed()?;
        let drive = self.store.open(DriveName::Public).await?;
        let res = read_as_data_url(drive.as_ref(), path).await;
        drive.close().await;
        Ok(res?)
    }

    fn check_closed(&self) -> Result<(), SlashtagError> {
        if self.store.is_closed() {
            return Err(SlashtagError::Closed);
        }
        Ok(())
    }
}

async fn read_contacts(drive: &dyn Drive) -> Result<Vec<ContactRecord>, SlashtagError> {
    let mut contacts = Vec::new();
    for path in drive.list("/").await? {
        match drive.get(&path).await.and_then(decode_json::<ContactRecord>) {
            Ok(Some(record)) => contacts.push(record),
            Ok(None) => (),
            Err(e) => tracing::warn!(%path, error = %e, "skipping unreadable contact"),
        }
    }
    Ok(contacts)
}

/// Reads the pay config a peer publishes. Any failure yields the empty config.
#[instrument(name = "slashtag.get_slash_pay_config", skip(store))]
pub async fn get_slash_pay_config(store: &dyn DriveStore, url: &str) -> PayConfig {
    if store.is_closed() {
        tracing::debug!("skipping, sdk is closed");
        return PayConfig::empty();
    }
    let key = match url.parse::<SlashUrl>() {
        Ok(parsed) => parsed.id,
        Err(e) => {
            tracing::debug!(error = %e, "invalid slashtag url");
            return PayConfig::empty();
        }
    };
    let drive = match store.open_remote(&key).await {
        Ok(drive) => drive,
        Err(e) => {
            tracing::debug!(error = %e, "couldn't open remote drive");
            return PayConfig::empty();
        }
    };
    let config = read_pay_config(drive.as_ref()).await;
    drive.close().await;
    config
}

/// Resolves a peer's profile from its public drive.
pub async fn resolve_profile(
    store: &dyn DriveStore,
    url: &str,
) -> Result<Option<BasicProfile>, SlashtagError> {
    if store.is_closed() {
        return Err(SlashtagError::Closed);
    }
    let key = url.parse::<SlashUrl>()?.id;
    let drive = store.open_remote(&key).await?;
    let res = drive.get(PROFILE_PATH).await.and_then(decode_json);
    drive.close().await;
    Ok(res?)
}
