//! Ordering of CRL versions and their storage identity.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::warn;

use super::types::Crl;
use crate::pki::certificate::Certificate;
use crate::pki::codec::{IntegerValue, slug};

pub const FULL_FOLDER: &str = "full";
pub const DELTA_FOLDER: &str = "delta";

/// Outcome of comparing an incoming CRL with the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Newer,
    NotNewer,
    /// Neither CRL numbers nor thisUpdate times allow an ordering.
    Indeterminate,
}

pub fn compare_freshness(incoming: &Crl, existing: &Crl) -> Freshness {
    if let (Some(incoming_number), Some(existing_number)) =
        (&incoming.crl_number, &existing.crl_number)
    {
        match incoming_number.cmp(existing_number) {
            Ordering::Greater => return Freshness::Newer,
            Ordering::Less => return Freshness::NotNewer,
            // equal numbers are settled by thisUpdate
            Ordering::Equal => {}
        }
    }

    match (incoming.this_update, existing.this_update) {
        (Some(incoming_time), Some(existing_time)) if incoming_time > existing_time => {
            Freshness::Newer
        }
        (Some(_), Some(_)) => Freshness::NotNewer,
        _ => Freshness::Indeterminate,
    }
}

/// Whether `incoming` supersedes `existing`.
///
/// Anything supersedes a missing CRL. When the two cannot be ordered the
/// answer is `false`.
pub fn is_newer(incoming: &Crl, existing: Option<&Crl>) -> bool {
    let Some(existing) = existing else {
        return true;
    };
    match compare_freshness(incoming, existing) {
        Freshness::Newer => true,
        Freshness::NotNewer => false,
        Freshness::Indeterminate => {
            warn!(
                "Cannot order CRLs from {}: incoming (number {:?}, thisUpdate {:?}) vs existing \
                 (number {:?}, thisUpdate {:?}); keeping the existing one",
                incoming.issuer.rendered,
                incoming.crl_number.as_ref().map(|n| n.decimal.as_str()),
                incoming.this_update,
                existing.crl_number.as_ref().map(|n| n.decimal.as_str()),
                existing.this_update,
            );
            false
        }
    }
}

/// Storage identity derived for an incoming CRL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub friendly_issuer_name: String,
    /// Path-safe form of the issuer name used in every key.
    pub label: String,
    pub is_delta: bool,
    pub delta_base_number: Option<IntegerValue>,
    pub storage_folder: &'static str,
    pub canonical_der_key: String,
    pub canonical_pem_key: String,
    pub aki_alias_key: Option<String>,
}

pub fn classify(crl: &Crl, issuer: &Certificate) -> ClassificationResult {
    let (friendly_issuer_name, label) = match &issuer.subject.common_name {
        Some(common_name) if !slug(common_name).is_empty() => {
            (common_name.clone(), slug(common_name))
        }
        _ => {
            let label = key_label(crl, issuer);
            (label.clone(), label)
        }
    };
    let storage_folder = if crl.is_delta {
        DELTA_FOLDER
    } else {
        FULL_FOLDER
    };

    ClassificationResult {
        canonical_der_key: format!("{storage_folder}/{label}.crl"),
        canonical_pem_key: format!("{storage_folder}/{label}.crl.pem"),
        aki_alias_key: crl
            .authority_key_identifier
            .as_ref()
            .map(|aki| format!("{storage_folder}/by-aki/{}.crl", aki.to_ascii_lowercase())),
        friendly_issuer_name,
        label,
        is_delta: crl.is_delta,
        delta_base_number: crl.delta_base_crl_number.clone(),
        storage_folder,
    }
}

/// Key under which `existing` is preserved before it is replaced.
pub fn archive(existing: &Crl, classification: &ClassificationResult) -> String {
    archive_key(classification, &existing.version_tag())
}

pub(crate) fn archive_key(classification: &ClassificationResult, tag: &str) -> String {
    format!(
        "{}/archive/{}-{}.crl",
        classification.storage_folder, classification.label, tag
    )
}

fn key_label(crl: &Crl, issuer: &Certificate) -> String {
    let identifier = issuer
        .subject_key_identifier
        .as_deref()
        .or(crl.authority_key_identifier.as_deref())
        .unwrap_or(&issuer.fingerprints.sha256);
    let prefix: String = identifier.chars().take(16).collect();
    format!("key-{}", prefix.to_ascii_lowercase())
}
