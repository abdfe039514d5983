use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use std::{collections::HashMap, sync::Arc};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BasicProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

/// Contact entry stored in the `contacts` drive under `/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub url: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl ContactRecord {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            bio: None,
            image: None,
            links: Vec::new(),
        }
    }

    /// A contact keeps the peer's profile but may be renamed locally.
    pub fn from_profile(url: impl Into<String>, name: impl Into<String>, profile: BasicProfile) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            bio: profile.bio,
            image: profile.image,
            links: profile.links,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedProfile {
    pub version: u64,
    pub profile: BasicProfile,
}

#[derive(Clone, Default)]
pub struct ProfileCache {
    profiles: Arc<RwLock<HashMap<String, CachedProfile>>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `profile` unless a newer version is already cached.
    pub async fn insert(&self, url: String, version: u64, profile: BasicProfile) {
        let mut profiles = self.profiles.write().await;
        match profiles.get(&url) {
            Some(cached) if cached.version > version => (),
            _ => {
                profiles.insert(url, CachedProfile { version, profile });
            }
        }
    }

    pub async fn get(&self, url: &str) -> Option<CachedProfile> {
        self.profiles.read().await.get(url).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cache_keeps_newest_version() {
        let cache = ProfileCache::new();
        let newer = BasicProfile {
            name: Some("Satoshi".to_string()),
            ..Default::default()
        };
        cache.insert("slash:a".to_string(), 3, newer.clone()).await;
        cache
            .insert("slash:a".to_string(), 2, BasicProfile::default())
            .await;
        assert_eq!(cache.get("slash:a").await.unwrap().profile, newer);
        assert!(cache.get("slash:b").await.is_none());
    }

    #[test]
    fn empty_profile_fields_are_omitted() {
        let json = serde_json::to_string(&BasicProfile {
            name: Some("John".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json, r#"{"name":"John"}"#);
    }
}
