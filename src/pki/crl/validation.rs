use tracing::{debug, warn};
use x509_parser::prelude::{CertificateRevocationList, FromDer, X509Certificate};

use super::types::Crl;
use crate::pki::Pki;
use crate::pki::trust_store::CaCandidate;

/// Finds the CA certificate that issued `crl` among `candidates`.
///
/// A CRL authority key identifier is matched against candidate subject key
/// identifiers first; the issuer name is the fallback.
pub fn resolve_issuer<'a>(crl: &Crl, candidates: &'a [CaCandidate]) -> Option<&'a CaCandidate> {
    if let Some(aki) = &crl.authority_key_identifier
        && let Some(candidate) = candidates.iter().find(|candidate| {
            candidate
                .certificate
                .subject_key_identifier
                .as_deref()
                .is_some_and(|ski| ski.eq_ignore_ascii_case(aki))
        })
    {
        debug!(
            "Resolved CRL issuer {} by key identifier {}",
            candidate.storage_key, aki
        );
        return Some(candidate);
    }

    let found = candidates
        .iter()
        .find(|candidate| candidate.certificate.subject.rendered == crl.issuer.rendered);
    match found {
        Some(candidate) => debug!(
            "Resolved CRL issuer {} by subject name",
            candidate.storage_key
        ),
        None => warn!(
            "No issuer found for CRL from {} among {} candidates",
            crl.issuer.rendered,
            candidates.len()
        ),
    }
    found
}

/// Checks the CRL signature with the issuer's public key.
///
/// Any failure, including undecodable input, yields `false`.
pub fn verify(pki: &Pki, crl_der: &[u8], issuer_der: &[u8]) -> bool {
    let crl = match CertificateRevocationList::from_der(crl_der) {
        Ok((_, crl)) => crl,
        Err(e) => {
            debug!("Cannot verify undecodable CRL: {}", e);
            return false;
        }
    };
    let issuer = match X509Certificate::from_der(issuer_der) {
        Ok((_, issuer)) => issuer,
        Err(e) => {
            debug!("Cannot verify CRL with undecodable issuer: {}", e);
            return false;
        }
    };

    match pki.crypto().verify_signature(
        &issuer.tbs_certificate.subject_pki,
        &crl.signature_algorithm,
        &crl.signature_value,
        crl.tbs_cert_list.as_ref(),
    ) {
        Ok(()) => true,
        Err(e) => {
            debug!(
                "CRL signature verification against {} failed: {}",
                issuer.subject(),
                e
            );
            false
        }
    }
}
