//! CA certificates kept in object storage.
//!
//! Stored CA certificates are the candidate issuers for uploaded CRLs.

mod error;

use std::sync::Arc;

use tracing::{info, warn};

use crate::pki::Pki;
use crate::pki::certificate::Certificate;
use crate::pki::codec::slug;
use crate::pki::pem::{self, CERTIFICATE_LABEL};
use crate::storage::{BlobStore, Metadata, StorageResult};

pub use error::{TrustStoreError, TrustStoreResult};

pub const CERTIFICATE_CONTENT_TYPE: &str = "application/pkix-cert";

/// One stored CA certificate considered during issuer resolution.
#[derive(Debug, Clone)]
pub struct CaCandidate {
    pub storage_key: String,
    pub der: Vec<u8>,
    pub certificate: Certificate,
}

/// The CA certificates stored under a key prefix.
#[derive(Clone)]
pub struct CaDirectory {
    store: Arc<dyn BlobStore>,
    prefix: String,
}

impl CaDirectory {
    pub fn new(store: Arc<dyn BlobStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Decodes every object under the prefix. Objects that are not
    /// certificates are skipped.
    pub async fn candidates(&self, pki: &Pki) -> StorageResult<Vec<CaCandidate>> {
        let objects = self.store.list(&self.prefix).await?;
        let mut candidates = Vec::with_capacity(objects.len());
        for object in objects {
            let decoded = pem::der_or_pem(&object.bytes, CERTIFICATE_LABEL).and_then(|der| {
                let certificate = pki.build_certificate_details(&der)?;
                Ok((der, certificate))
            });
            match decoded {
                Ok((der, certificate)) => candidates.push(CaCandidate {
                    storage_key: object.key,
                    der,
                    certificate,
                }),
                Err(e) => warn!("Skipping stored object {}: {}", object.key, e),
            }
        }
        Ok(candidates)
    }

    /// Stores a CA certificate given as DER or PEM and returns its key.
    ///
    /// The key carries a digest of the certificate, so distinct CAs sharing a
    /// common name are kept side by side. Registering the same certificate
    /// again overwrites it in place.
    pub async fn register(
        &self,
        pki: &Pki,
        bytes: &[u8],
    ) -> TrustStoreResult<(String, Certificate)> {
        let der = pem::der_or_pem(bytes, CERTIFICATE_LABEL)?;
        let certificate = pki.build_certificate_details(&der)?;
        if !certificate.is_ca {
            warn!(
                "Registering {} although it is not marked as a CA",
                certificate.subject.rendered
            );
        }

        let key = format!("{}{}.der", self.prefix, certificate_label(&certificate));
        let mut metadata = Metadata::new();
        metadata.insert("subject".to_string(), certificate.subject.rendered.clone());
        metadata.insert("serial".to_string(), certificate.serial.hex.clone());
        metadata.insert(
            "contentType".to_string(),
            CERTIFICATE_CONTENT_TYPE.to_string(),
        );
        if let Some(ski) = &certificate.subject_key_identifier {
            metadata.insert("subjectKeyIdentifier".to_string(), ski.clone());
        }

        self.store.put(&key, der, metadata).await?;
        info!("Registered CA {} at {}", certificate.subject.rendered, key);
        Ok((key, certificate))
    }
}

/// `<slug(CN)>-<digest>`, or `key-<digest>` without a usable common name.
fn certificate_label(certificate: &Certificate) -> String {
    let digest: String = certificate.fingerprints.sha256.chars().take(16).collect();
    match certificate.subject.common_name.as_deref().map(slug) {
        Some(label) if !label.is_empty() => format!("{label}-{digest}"),
        _ => format!("key-{digest}"),
    }
}
