//! X.509 object model and CRL lifecycle.
//!
//! [`Pki`] is the engine context: it owns the crypto provider and the
//! extension decoder registries, and every decode or verification call goes
//! through it.

pub mod certificate;
pub mod codec;
pub mod crl;
pub mod crypto;
pub mod errors;
pub mod extensions;
pub mod kind;
pub mod name;
pub mod oid;
pub mod pem;
pub mod trust_store;

use std::sync::Arc;

use crypto::{CryptoProvider, RingCrypto};
use extensions::{ExtensionOwner, ExtensionRegistry};

pub use certificate::Certificate;
pub use crl::{ClassificationResult, Crl, CrlError, CrlPublisher, PublishReceipt, RevokedEntry};
pub use errors::{PkiError, PkiResult};
pub use trust_store::{CaCandidate, CaDirectory};

#[derive(Debug, Clone)]
pub struct Pki {
    crypto: Arc<dyn CryptoProvider>,
    certificate_extensions: ExtensionRegistry,
    crl_extensions: ExtensionRegistry,
    entry_extensions: ExtensionRegistry,
}

impl Default for Pki {
    fn default() -> Self {
        Self::new(Arc::new(RingCrypto))
    }
}

impl Pki {
    /// Creates a context with the standard extension decoders.
    pub fn new(crypto: Arc<dyn CryptoProvider>) -> Self {
        Self {
            crypto,
            certificate_extensions: ExtensionRegistry::for_owner(ExtensionOwner::Certificate),
            crl_extensions: ExtensionRegistry::for_owner(ExtensionOwner::Crl),
            entry_extensions: ExtensionRegistry::for_owner(ExtensionOwner::CrlEntry),
        }
    }

    pub fn crypto(&self) -> &dyn CryptoProvider {
        self.crypto.as_ref()
    }

    pub fn registry(&self, owner: ExtensionOwner) -> &ExtensionRegistry {
        match owner {
            ExtensionOwner::Certificate => &self.certificate_extensions,
            ExtensionOwner::Crl => &self.crl_extensions,
            ExtensionOwner::CrlEntry => &self.entry_extensions,
        }
    }

    /// Mutable access for registering additional decoders.
    pub fn registry_mut(&mut self, owner: ExtensionOwner) -> &mut ExtensionRegistry {
        match owner {
            ExtensionOwner::Certificate => &mut self.certificate_extensions,
            ExtensionOwner::Crl => &mut self.crl_extensions,
            ExtensionOwner::CrlEntry => &mut self.entry_extensions,
        }
    }

    pub fn build_certificate_details(&self, der: &[u8]) -> PkiResult<Certificate> {
        certificate::build_certificate_details(self, der)
    }

    pub fn build_crl_details(&self, der: &[u8]) -> PkiResult<Crl> {
        crl::build_crl_details(self, der)
    }

    pub fn resolve_issuer<'a>(
        &self,
        crl: &Crl,
        candidates: &'a [CaCandidate],
    ) -> Option<&'a CaCandidate> {
        crl::resolve_issuer(crl, candidates)
    }

    pub fn verify(&self, crl_der: &[u8], issuer_der: &[u8]) -> bool {
        crl::verify(self, crl_der, issuer_der)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pki::extensions::{ExtensionDecodeError, ExtensionStatus, ExtensionValue};
    use x509_parser::extensions::X509Extension;

    #[derive(Debug)]
    struct RejectingCrypto;

    impl CryptoProvider for RejectingCrypto {
        fn sha1(&self, data: &[u8]) -> Vec<u8> {
            RingCrypto.sha1(data)
        }

        fn sha256(&self, data: &[u8]) -> Vec<u8> {
            RingCrypto.sha256(data)
        }

        fn verify_signature(
            &self,
            _: &x509_parser::prelude::SubjectPublicKeyInfo<'_>,
            _: &x509_parser::prelude::AlgorithmIdentifier<'_>,
            _: &crypto::BitString<'_>,
            _: &[u8],
        ) -> Result<(), String> {
            Err("rejected".to_string())
        }
    }

    fn custom(_: &X509Extension<'_>) -> Result<ExtensionValue, ExtensionDecodeError> {
        Ok(ExtensionValue::SubjectKeyIdentifier("custom".to_string()))
    }

    const RSA_CA: &[u8] = include_bytes!("../test_data/pki/rsa_ca.der");
    const RSA_CRL: &[u8] = include_bytes!("../test_data/pki/rsa_crl_5.der");
    const LEAF: &[u8] = include_bytes!("../test_data/pki/leaf.der");

    #[test]
    fn test_verification_goes_through_provider() {
        assert!(Pki::default().verify(RSA_CRL, RSA_CA));
        assert!(!Pki::new(Arc::new(RejectingCrypto)).verify(RSA_CRL, RSA_CA));
    }

    #[test]
    fn test_additional_decoder_can_be_registered() {
        let mut pki = Pki::default();
        pki.registry_mut(ExtensionOwner::Certificate)
            .register("1.3.6.1.4.1.99999.3", "exampleExtension", custom);

        let certificate = pki.build_certificate_details(LEAF).unwrap();
        let extension = certificate
            .extensions
            .iter()
            .find(|extension| extension.oid == "1.3.6.1.4.1.99999.3")
            .unwrap();
        assert_eq!(extension.status, ExtensionStatus::Parsed);
        assert_eq!(extension.name.as_deref(), Some("exampleExtension"));
    }
}
