use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::errors::{CrlError, CrlResult};
use super::lifecycle::{self, ClassificationResult};
use super::types::{Crl, CrlVersion};
use super::validation;
use crate::pki::Pki;
use crate::pki::pem::{self, CRL_LABEL};
use crate::pki::trust_store::CaDirectory;
use crate::storage::{BlobStore, Metadata};

pub const CRL_CONTENT_TYPE: &str = "application/pkix-crl";
pub const PEM_CONTENT_TYPE: &str = "application/x-pem-file";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    pub classification: ClassificationResult,
    pub crl: Crl,
    /// Issuer certificate the signature was verified against.
    pub issuer_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_as: Option<String>,
}

/// Accepts uploaded CRLs and files them under their canonical keys.
#[derive(Clone)]
pub struct CrlPublisher {
    pki: Arc<Pki>,
    store: Arc<dyn BlobStore>,
    authorities: CaDirectory,
}

impl CrlPublisher {
    pub fn new(pki: Arc<Pki>, store: Arc<dyn BlobStore>, authorities: CaDirectory) -> Self {
        Self {
            pki,
            store,
            authorities,
        }
    }

    /// Validates `bytes` (DER or PEM) against the stored CAs and, when it
    /// supersedes the stored version, archives that version and writes the
    /// new one.
    pub async fn publish(&self, bytes: &[u8]) -> CrlResult<PublishReceipt> {
        let der = pem::der_or_pem(bytes, CRL_LABEL)?;
        let crl = self.pki.build_crl_details(&der)?;

        let candidates = self.authorities.candidates(&self.pki).await?;
        let issuer = validation::resolve_issuer(&crl, &candidates).ok_or_else(|| {
            CrlError::IssuerNotFound {
                issuer: crl.issuer.rendered.clone(),
                authority_key_identifier: crl.authority_key_identifier.clone(),
            }
        })?;

        if !validation::verify(&self.pki, &der, &issuer.der) {
            return Err(CrlError::SignatureInvalid {
                issuer: crl.issuer.rendered.clone(),
                candidate_key: issuer.storage_key.clone(),
            });
        }

        let classification = lifecycle::classify(&crl, &issuer.certificate);
        let archived_as = self.archive_existing(&crl, &classification).await?;

        let metadata = publish_metadata(&crl, &classification);
        self.store
            .put(
                &classification.canonical_der_key,
                der.clone(),
                with_content_type(&metadata, CRL_CONTENT_TYPE),
            )
            .await?;
        self.store
            .put(
                &classification.canonical_pem_key,
                pem::encode(&der, CRL_LABEL).into_bytes(),
                with_content_type(&metadata, PEM_CONTENT_TYPE),
            )
            .await?;
        if let Some(alias) = &classification.aki_alias_key {
            self.store
                .put(alias, der, with_content_type(&metadata, CRL_CONTENT_TYPE))
                .await?;
        }

        info!(
            "Published CRL from {} at {}",
            classification.friendly_issuer_name, classification.canonical_der_key
        );
        Ok(PublishReceipt {
            classification,
            crl,
            issuer_key: issuer.storage_key.clone(),
            archived_as,
        })
    }

    /// Preserves the stored CRL before it is replaced, or rejects `incoming`
    /// when it does not supersede it.
    async fn archive_existing(
        &self,
        incoming: &Crl,
        classification: &ClassificationResult,
    ) -> CrlResult<Option<String>> {
        let Some(existing) = self.store.get(&classification.canonical_der_key).await? else {
            return Ok(None);
        };

        let archive_key = match self.pki.build_crl_details(&existing.bytes) {
            Ok(existing_crl) => {
                if !lifecycle::is_newer(incoming, Some(&existing_crl)) {
                    return Err(CrlError::StaleVersion {
                        incoming: CrlVersion::from(incoming),
                        existing: CrlVersion::from(&existing_crl),
                    });
                }
                lifecycle::archive(&existing_crl, classification)
            }
            Err(e) => {
                warn!(
                    "Stored CRL at {} no longer decodes ({}); archiving and replacing it",
                    existing.key, e
                );
                let digest = hex::encode(self.pki.crypto().sha256(&existing.bytes));
                lifecycle::archive_key(classification, &digest[..16])
            }
        };

        self.store
            .put(&archive_key, existing.bytes, existing.metadata)
            .await?;
        info!("Archived {} as {}", existing.key, archive_key);
        Ok(Some(archive_key))
    }
}

fn publish_metadata(crl: &Crl, classification: &ClassificationResult) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(
        "issuer".to_string(),
        classification.friendly_issuer_name.clone(),
    );
    if let Some(number) = &crl.crl_number {
        metadata.insert("crlNumber".to_string(), number.decimal.clone());
    }
    if let Some(this_update) = crl.this_update {
        metadata.insert("thisUpdate".to_string(), this_update.to_rfc3339());
    }
    if let Some(next_update) = crl.next_update {
        metadata.insert("nextUpdate".to_string(), next_update.to_rfc3339());
    }
    metadata.insert("isDelta".to_string(), crl.is_delta.to_string());
    metadata
}

fn with_content_type(metadata: &Metadata, content_type: &str) -> Metadata {
    let mut metadata = metadata.clone();
    metadata.insert("contentType".to_string(), content_type.to_string());
    metadata
}
