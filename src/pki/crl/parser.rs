use tracing::debug;
use x509_parser::prelude::{CertificateRevocationList, FromDer, RevokedCertificate};

use super::types::{Crl, REVOKED_SAMPLE_SIZE, RevokedEntry};
use crate::pki::Pki;
use crate::pki::certificate::AlgorithmIdentifier;
use crate::pki::codec::{IntegerValue, to_datetime};
use crate::pki::crypto::{Fingerprints, display_version};
use crate::pki::errors::{PkiError, PkiResult};
use crate::pki::extensions::{ExtensionOwner, ExtensionValue, find_value};
use crate::pki::kind::{ObjectKind, rejection};
use crate::pki::name::DistinguishedName;
use crate::pki::oid;

/// Decodes `der` into a [`Crl`].
pub fn build_crl_details(pki: &Pki, der: &[u8]) -> PkiResult<Crl> {
    let (remaining, crl) = CertificateRevocationList::from_der(der)
        .map_err(|e| rejection(der, ObjectKind::Crl, e))?;
    if !remaining.is_empty() {
        return Err(PkiError::MalformedDer(format!(
            "{} bytes of trailing data after CRL",
            remaining.len()
        )));
    }

    let extensions = pki.registry(ExtensionOwner::Crl).resolve_all(crl.extensions());

    let crl_number = match find_value(&extensions, oid::EXT_CRL_NUMBER) {
        Some(ExtensionValue::CrlNumber(number)) => Some(number.clone()),
        _ => None,
    };
    let delta_base_crl_number = match find_value(&extensions, oid::EXT_DELTA_CRL_INDICATOR) {
        Some(ExtensionValue::DeltaCrlIndicator(base)) => Some(base.clone()),
        _ => None,
    };
    // a delta indicator that failed to decode still marks the CRL as a delta
    let is_delta = extensions
        .iter()
        .any(|extension| extension.oid == oid::EXT_DELTA_CRL_INDICATOR);
    let authority_key_identifier =
        match find_value(&extensions, oid::EXT_AUTHORITY_KEY_IDENTIFIER) {
            Some(ExtensionValue::AuthorityKeyIdentifier(aki)) => aki.key_identifier.clone(),
            _ => None,
        };

    let revoked = &crl.tbs_cert_list.revoked_certificates;
    let revoked_sample = revoked
        .iter()
        .take(REVOKED_SAMPLE_SIZE)
        .map(|entry| revoked_entry(pki, entry))
        .collect();

    let details = Crl {
        version: crl.version().map_or(1, display_version),
        issuer: DistinguishedName::from_x509(crl.issuer()),
        this_update: to_datetime(crl.last_update()),
        next_update: crl.next_update().and_then(to_datetime),
        crl_number,
        delta_base_crl_number,
        is_delta,
        authority_key_identifier,
        signature_algorithm: AlgorithmIdentifier::signature(
            crl.signature_algorithm.algorithm.to_id_string(),
        ),
        signature_hex: hex::encode(&crl.signature_value.data),
        fingerprints: Fingerprints::compute(pki.crypto(), der),
        revoked_count: revoked.len(),
        revoked_sample,
        extensions,
    };
    debug!(
        "Built CRL details for {} ({} revoked, delta: {})",
        details.issuer.rendered, details.revoked_count, details.is_delta
    );
    Ok(details)
}

fn revoked_entry(pki: &Pki, entry: &RevokedCertificate<'_>) -> RevokedEntry {
    let extensions = pki
        .registry(ExtensionOwner::CrlEntry)
        .resolve_all(entry.extensions());
    let reason = match find_value(&extensions, oid::EXT_CRL_REASON) {
        Some(ExtensionValue::CrlReason(reason)) => Some(reason.clone()),
        _ => None,
    };
    let invalidity_date = match find_value(&extensions, oid::EXT_INVALIDITY_DATE) {
        Some(ExtensionValue::InvalidityDate(date)) => Some(*date),
        _ => None,
    };
    RevokedEntry {
        serial: IntegerValue::from_be_bytes(entry.raw_serial()),
        revocation_date: to_datetime(entry.revocation_date),
        reason,
        invalidity_date,
        extensions,
    }
}
