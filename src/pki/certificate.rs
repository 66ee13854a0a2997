//! Semantic view of an X.509 certificate.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use x509_parser::prelude::{FromDer, SubjectPublicKeyInfo, X509Certificate};
use x509_parser::public_key::PublicKey;

use super::Pki;
use super::codec::{IntegerValue, to_datetime};
use super::crypto::{Fingerprints, display_version};
use super::errors::{PkiError, PkiResult};
use super::extensions::{Extension, ExtensionOwner, ExtensionValue, find_value};
use super::kind::{ObjectKind, rejection};
use super::name::DistinguishedName;
use super::oid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmIdentifier {
    pub oid: String,
    /// Friendly name, or the OID when the algorithm is not known.
    pub name: String,
}

impl AlgorithmIdentifier {
    pub fn signature(oid: String) -> Self {
        let name = oid::signature_algorithm_name(&oid)
            .map(str::to_string)
            .unwrap_or_else(|| oid.clone());
        Self { oid, name }
    }

    pub fn key(oid: String) -> Self {
        let name = oid::key_algorithm_name(&oid)
            .map(str::to_string)
            .unwrap_or_else(|| oid.clone());
        Self { oid, name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validity {
    pub not_before: Option<DateTime<Utc>>,
    pub not_after: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsaPublicKey {
    pub modulus_hex: String,
    pub exponent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedCurve {
    pub oid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyInfo {
    pub algorithm: AlgorithmIdentifier,
    pub size_bits: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsa: Option<RsaPublicKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<NamedCurve>,
    pub key_hex: String,
    /// Digests of the DER-encoded SubjectPublicKeyInfo.
    pub fingerprints: Fingerprints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub version: u32,
    pub serial: IntegerValue,
    pub issuer: DistinguishedName,
    pub subject: DistinguishedName,
    pub validity: Validity,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature_hex: String,
    pub public_key: PublicKeyInfo,
    /// Digests of the full certificate DER.
    pub fingerprints: Fingerprints,
    pub is_ca: bool,
    pub is_self_issued: bool,
    pub subject_key_identifier: Option<String>,
    pub authority_key_identifier: Option<String>,
    pub extensions: Vec<Extension>,
}

/// Decodes `der` into a [`Certificate`].
pub fn build_certificate_details(pki: &Pki, der: &[u8]) -> PkiResult<Certificate> {
    let (remaining, cert) = X509Certificate::from_der(der)
        .map_err(|e| rejection(der, ObjectKind::Certificate, e))?;
    if !remaining.is_empty() {
        return Err(PkiError::MalformedDer(format!(
            "{} bytes of trailing data after certificate",
            remaining.len()
        )));
    }

    let extensions = pki
        .registry(ExtensionOwner::Certificate)
        .resolve_all(cert.extensions());

    let is_ca = matches!(
        find_value(&extensions, oid::EXT_BASIC_CONSTRAINTS),
        Some(ExtensionValue::BasicConstraints(constraints)) if constraints.is_ca
    );
    let subject_key_identifier = match find_value(&extensions, oid::EXT_SUBJECT_KEY_IDENTIFIER) {
        Some(ExtensionValue::SubjectKeyIdentifier(id)) => Some(id.clone()),
        _ => None,
    };
    let authority_key_identifier =
        match find_value(&extensions, oid::EXT_AUTHORITY_KEY_IDENTIFIER) {
            Some(ExtensionValue::AuthorityKeyIdentifier(aki)) => aki.key_identifier.clone(),
            _ => None,
        };

    let issuer = DistinguishedName::from_x509(cert.issuer());
    let subject = DistinguishedName::from_x509(cert.subject());
    let validity = cert.validity();

    let details = Certificate {
        version: display_version(cert.version()),
        serial: IntegerValue::from_be_bytes(cert.raw_serial()),
        is_self_issued: issuer.rendered == subject.rendered,
        issuer,
        subject,
        validity: Validity {
            not_before: to_datetime(validity.not_before),
            not_after: to_datetime(validity.not_after),
        },
        signature_algorithm: AlgorithmIdentifier::signature(
            cert.signature_algorithm.algorithm.to_id_string(),
        ),
        signature_hex: hex::encode(&cert.signature_value.data),
        public_key: public_key_info(pki, cert.public_key()),
        fingerprints: Fingerprints::compute(pki.crypto(), der),
        is_ca,
        subject_key_identifier,
        authority_key_identifier,
        extensions,
    };
    debug!(
        "Built certificate details for {} (serial {})",
        details.subject.rendered, details.serial.hex
    );
    Ok(details)
}

fn public_key_info(pki: &Pki, spki: &SubjectPublicKeyInfo<'_>) -> PublicKeyInfo {
    let algorithm_oid = spki.algorithm.algorithm.to_id_string();
    let key = &spki.subject_public_key.data;
    let mut info = PublicKeyInfo {
        algorithm: AlgorithmIdentifier::key(algorithm_oid.clone()),
        size_bits: None,
        rsa: None,
        curve: None,
        key_hex: hex::encode(key),
        fingerprints: Fingerprints::compute(pki.crypto(), spki.raw),
    };

    match algorithm_oid.as_str() {
        oid::RSA_ENCRYPTION => match spki.parsed() {
            Ok(PublicKey::RSA(rsa)) => {
                let modulus = strip_leading_zeros(rsa.modulus);
                info.size_bits = Some(modulus.len() * 8);
                info.rsa = Some(RsaPublicKey {
                    modulus_hex: hex::encode(modulus),
                    exponent: IntegerValue::from_be_bytes(rsa.exponent).decimal,
                });
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to decode RSA public key: {}", e),
        },
        oid::EC_PUBLIC_KEY => {
            let curve_oid = spki
                .algorithm
                .parameters
                .as_ref()
                .and_then(|parameters| parameters.as_oid().ok())
                .map(|curve| curve.to_id_string());
            if let Some(curve_oid) = curve_oid {
                info.curve = Some(NamedCurve {
                    name: oid::curve_name(&curve_oid).map(str::to_string),
                    oid: curve_oid,
                });
            }
            // uncompressed point: 0x04 || X || Y
            if !key.is_empty() {
                info.size_bits = Some((key.len() - 1) / 2 * 8);
            }
        }
        other => {
            if let Some(name) = oid::curve_name(other) {
                info.curve = Some(NamedCurve {
                    oid: other.to_string(),
                    name: Some(name.to_string()),
                });
                info.size_bits = Some(key.len() * 8);
            }
        }
    }
    info
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len());
    &bytes[start..]
}
