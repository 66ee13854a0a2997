use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pki::certificate::AlgorithmIdentifier;
use crate::pki::codec::IntegerValue;
use crate::pki::crypto::Fingerprints;
use crate::pki::extensions::Extension;
use crate::pki::name::DistinguishedName;

/// Number of revoked entries decoded into the sample.
pub const REVOKED_SAMPLE_SIZE: usize = 5;

/// A revoked certificate listed on a CRL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokedEntry {
    pub serial: IntegerValue,
    pub revocation_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalidity_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,
}

/// Semantic view of a Certificate Revocation List.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crl {
    pub version: u32,
    pub issuer: DistinguishedName,
    pub this_update: Option<DateTime<Utc>>,
    pub next_update: Option<DateTime<Utc>>,
    pub crl_number: Option<IntegerValue>,
    pub delta_base_crl_number: Option<IntegerValue>,
    /// Set exactly when a delta CRL indicator is present.
    pub is_delta: bool,
    pub authority_key_identifier: Option<String>,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature_hex: String,
    pub fingerprints: Fingerprints,
    pub revoked_count: usize,
    pub revoked_sample: Vec<RevokedEntry>,
    pub extensions: Vec<Extension>,
}

impl Crl {
    /// Whether the CRL is past its nextUpdate at `now`; `None` without a nextUpdate.
    pub fn expired_at(&self, now: DateTime<Utc>) -> Option<bool> {
        self.next_update.map(|next_update| now > next_update)
    }

    /// Short tag identifying this version: its number, or a digest prefix.
    pub fn version_tag(&self) -> String {
        match &self.crl_number {
            Some(number) => number.decimal.clone(),
            None => self.fingerprints.sha256.chars().take(16).collect(),
        }
    }
}

/// The fields that order two versions of the same CRL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrlVersion {
    pub crl_number: Option<IntegerValue>,
    pub this_update: Option<DateTime<Utc>>,
}

impl From<&Crl> for CrlVersion {
    fn from(crl: &Crl) -> Self {
        Self {
            crl_number: crl.crl_number.clone(),
            this_update: crl.this_update,
        }
    }
}

impl std::fmt::Display for CrlVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.crl_number {
            Some(number) => write!(f, "number {number}")?,
            None => write!(f, "no number")?,
        }
        match &self.this_update {
            Some(this_update) => write!(f, ", thisUpdate {}", this_update.to_rfc3339()),
            None => write!(f, ", no thisUpdate"),
        }
    }
}
