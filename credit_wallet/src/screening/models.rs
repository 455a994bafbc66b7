//! Screening provider wire and domain models.

use serde::Deserialize;

/// Envelope every provider response arrives in
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<D> {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub data: Option<D>,
}

/// Karma lookup payload as returned by the provider.
///
/// The provider sends more fields (reporting entity, karma type); only the
/// ones the verdict needs are deserialized.
#[derive(Debug, Deserialize)]
pub struct KarmaLookup {
    pub karma_identity: String,
    #[serde(default)]
    pub amount_in_contention: String,
    pub reason: Option<String>,
}

/// Screening verdict for one identity.
///
/// `reason == None` is the all-clear; any string is the blacklist reason.
#[derive(Debug, Clone)]
pub struct KarmaReport {
    pub identity: String,
    pub reason: Option<String>,
}

impl KarmaReport {
    /// Whether the identity may proceed.
    pub fn is_clear(&self) -> bool {
        self.reason.is_none()
    }
}

impl From<KarmaLookup> for KarmaReport {
    fn from(lookup: KarmaLookup) -> Self {
        Self {
            identity: lookup.karma_identity,
            reason: lookup.reason,
        }
    }
}
