use std::{fmt, str::FromStr};

use super::error::*;
use crate::primitives::DriveKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashProtocol {
    Slash,
    SlashFeed,
}

impl SlashProtocol {
    fn scheme(&self) -> &'static str {
        match self {
            SlashProtocol::Slash => "slash",
            SlashProtocol::SlashFeed => "slashfeed",
        }
    }
}

/// `slash:<id>[/path][?query]`, where `id` is the key of the slashtag's public drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlashUrl {
    pub protocol: SlashProtocol,
    pub id: DriveKey,
    pub path: String,
    pub query: Option<String>,
}

impl SlashUrl {
    pub fn new(protocol: SlashProtocol, id: DriveKey) -> Self {
        Self {
            protocol,
            id,
            path: String::new(),
            query: None,
        }
    }
}

impl FromStr for SlashUrl {
    type Err = SlashtagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = url::Url::parse(s.trim())?;
        let protocol = match parsed.scheme() {
            "slash" => SlashProtocol::Slash,
            "slashfeed" => SlashProtocol::SlashFeed,
            other => return Err(SlashtagError::UnsupportedProtocol(other.to_string())),
        };
        let (id, path) = match parsed.host_str() {
            Some(host) => (host.to_string(), parsed.path().to_string()),
            None => {
                let path = parsed.path();
                match path.find('/') {
                    Some(idx) => (path[..idx].to_string(), path[idx..].to_string()),
                    None => (path.to_string(), String::new()),
                }
            }
        };
        if id.is_empty() {
            return Err(SlashtagError::MissingId(s.to_string()));
        }
        Ok(Self {
            protocol,
            id: id.parse()?,
            path,
            query: parsed.query().map(str::to_string),
        })
    }
}

impl fmt::Display for SlashUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.protocol.scheme(), self.id, self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}

/// What a scanned or pasted slashtags url points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashtagTarget {
    Contact(SlashUrl),
    Feed(SlashUrl),
}

pub fn handle_slashtag_url(url: &str) -> Result<SlashtagTarget, SlashtagError> {
    let parsed: SlashUrl = url.parse()?;
    Ok(match parsed.protocol {
        SlashProtocol::Slash => SlashtagTarget::Contact(parsed),
        SlashProtocol::SlashFeed => SlashtagTarget::Feed(parsed),
    })
}

/// True only for profile urls; feed urls are not slashtags.
pub fn validate_slashtag_url(url: &str) -> bool {
    matches!(
        url.parse::<SlashUrl>(),
        Ok(SlashUrl {
            protocol: SlashProtocol::Slash,
            ..
        })
    )
}
