use std::fmt;

use ring::digest;
use x509_parser::prelude::{AlgorithmIdentifier, SubjectPublicKeyInfo};
use x509_parser::x509::X509Version;

pub use x509_parser::der_parser::asn1_rs::BitString;

/// Digest and signature primitives used by the builders and the verifier.
///
/// The provider is handed to [`super::Pki`] explicitly; nothing in this crate
/// reaches for a process-wide instance.
pub trait CryptoProvider: Send + Sync + fmt::Debug {
    fn sha1(&self, data: &[u8]) -> Vec<u8>;

    fn sha256(&self, data: &[u8]) -> Vec<u8>;

    /// Verifies `signature` over `message` with the signer's public key.
    fn verify_signature(
        &self,
        public_key: &SubjectPublicKeyInfo<'_>,
        algorithm: &AlgorithmIdentifier<'_>,
        signature: &BitString<'_>,
        message: &[u8],
    ) -> Result<(), String>;
}

/// Provider backed by `ring`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RingCrypto;

impl CryptoProvider for RingCrypto {
    fn sha1(&self, data: &[u8]) -> Vec<u8> {
        digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, data)
            .as_ref()
            .to_vec()
    }

    fn sha256(&self, data: &[u8]) -> Vec<u8> {
        digest::digest(&digest::SHA256, data).as_ref().to_vec()
    }

    fn verify_signature(
        &self,
        public_key: &SubjectPublicKeyInfo<'_>,
        algorithm: &AlgorithmIdentifier<'_>,
        signature: &BitString<'_>,
        message: &[u8],
    ) -> Result<(), String> {
        x509_parser::verify::verify_signature(public_key, algorithm, signature, message)
            .map_err(|e| e.to_string())
    }
}

/// Hex-encoded SHA-1 and SHA-256 digests of the same input.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fingerprints {
    pub sha1: String,
    pub sha256: String,
}

impl Fingerprints {
    pub fn compute(crypto: &dyn CryptoProvider, data: &[u8]) -> Self {
        Self {
            sha1: hex::encode(crypto.sha1(data)),
            sha256: hex::encode(crypto.sha256(data)),
        }
    }
}

/// One-based version number as shown to users.
pub(crate) fn display_version(version: X509Version) -> u32 {
    version.0 + 1
}
