use serde::{Deserialize, Serialize};

use std::fmt;

use super::error::PayConfigError;
use crate::primitives::AddressType;

/// The `type` tag of an entry. Tags written by other clients are kept
/// verbatim as `Unknown` so the document still decodes.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentKind {
    P2pkh,
    P2sh,
    P2wpkh,
    P2tr,
    LightningInvoice,
    Unknown(String),
}

impl PaymentKind {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentKind::P2pkh => "p2pkh",
            PaymentKind::P2sh => "p2sh",
            PaymentKind::P2wpkh => "p2wpkh",
            PaymentKind::P2tr => "p2tr",
            PaymentKind::LightningInvoice => "lightningInvoice",
            PaymentKind::Unknown(tag) => tag,
        }
    }
}

impl From<AddressType> for PaymentKind {
    fn from(address_type: AddressType) -> Self {
        match address_type {
            AddressType::P2pkh => Self::P2pkh,
            AddressType::P2sh => Self::P2sh,
            AddressType::P2wpkh => Self::P2wpkh,
            AddressType::P2tr => Self::P2tr,
        }
    }
}

impl From<String> for PaymentKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "p2pkh" => Self::P2pkh,
            "p2sh" => Self::P2sh,
            "p2wpkh" => Self::P2wpkh,
            "p2tr" => Self::P2tr,
            "lightningInvoice" => Self::LightningInvoice,
            _ => Self::Unknown(tag),
        }
    }
}

impl From<PaymentKind> for String {
    fn from(kind: PaymentKind) -> Self {
        match kind {
            PaymentKind::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayConfigEntry {
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    pub value: String,
}

impl PayConfigEntry {
    pub fn new(kind: impl Into<PaymentKind>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Ordered list of the payment methods a slashtag publishes.
///
/// An empty config is meaningful: it tells peers that no offline payment
/// method is currently offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PayConfig(Vec<PayConfigEntry>);

impl PayConfig {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn entries(&self) -> &[PayConfigEntry] {
        &self.0
    }

    pub fn find(&self, kind: &PaymentKind) -> Option<&str> {
        self.0
            .iter()
            .find(|entry| &entry.kind == kind)
            .map(|entry| entry.value.as_str())
    }

    pub fn push(&mut self, kind: impl Into<PaymentKind>, value: impl Into<String>) {
        self.0.push(PayConfigEntry::new(kind, value));
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PayConfigError> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    /// Zero-length content is treated the same as an absent document.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PayConfigError> {
        if bytes.is_empty() {
            return Ok(Self::empty());
        }
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl From<Vec<PayConfigEntry>> for PayConfig {
    fn from(entries: Vec<PayConfigEntry>) -> Self {
        Self(entries)
    }
}

impl IntoIterator for PayConfig {
    type Item = PayConfigEntry;
    type IntoIter = std::vec::IntoIter<PayConfigEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
