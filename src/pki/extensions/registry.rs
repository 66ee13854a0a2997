use std::collections::HashMap;

use tracing::warn;
use x509_parser::extensions::X509Extension;

use super::errors::ExtensionDecodeError;
use super::{
    Extension, ExtensionStatus, ExtensionValue, access, constraints, names, policies, revocation,
};
use crate::pki::oid;

pub type DecoderFn = fn(&X509Extension<'_>) -> Result<ExtensionValue, ExtensionDecodeError>;

/// The kind of object whose extensions a registry decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionOwner {
    Certificate,
    Crl,
    CrlEntry,
}

#[derive(Clone, Copy)]
struct RegisteredDecoder {
    name: &'static str,
    decode: DecoderFn,
}

/// Maps extension OIDs to their decoders for one kind of owner.
#[derive(Clone)]
pub struct ExtensionRegistry {
    owner: ExtensionOwner,
    decoders: HashMap<String, RegisteredDecoder>,
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut oids: Vec<&String> = self.decoders.keys().collect();
        oids.sort();
        f.debug_struct("ExtensionRegistry")
            .field("owner", &self.owner)
            .field("oids", &oids)
            .finish()
    }
}

impl ExtensionRegistry {
    /// An empty registry: every extension resolves as unparsed.
    pub fn empty(owner: ExtensionOwner) -> Self {
        Self {
            owner,
            decoders: HashMap::new(),
        }
    }

    /// The standard decoders for `owner`.
    pub fn for_owner(owner: ExtensionOwner) -> Self {
        let mut registry = Self::empty(owner);
        match owner {
            ExtensionOwner::Certificate => {
                registry.register(
                    oid::EXT_BASIC_CONSTRAINTS,
                    "basicConstraints",
                    constraints::decode_basic_constraints,
                );
                registry.register(oid::EXT_KEY_USAGE, "keyUsage", constraints::decode_key_usage);
                registry.register(
                    oid::EXT_EXTENDED_KEY_USAGE,
                    "extKeyUsage",
                    constraints::decode_extended_key_usage,
                );
                registry.register(
                    oid::EXT_SUBJECT_ALT_NAME,
                    "subjectAltName",
                    names::decode_subject_alt_name,
                );
                registry.register(
                    oid::EXT_ISSUER_ALT_NAME,
                    "issuerAltName",
                    names::decode_issuer_alt_name,
                );
                registry.register(
                    oid::EXT_AUTHORITY_KEY_IDENTIFIER,
                    "authorityKeyIdentifier",
                    names::decode_authority_key_identifier,
                );
                registry.register(
                    oid::EXT_SUBJECT_KEY_IDENTIFIER,
                    "subjectKeyIdentifier",
                    names::decode_subject_key_identifier,
                );
                registry.register(
                    oid::EXT_AUTHORITY_INFO_ACCESS,
                    "authorityInfoAccess",
                    access::decode_authority_info_access,
                );
                registry.register(
                    oid::EXT_CRL_DISTRIBUTION_POINTS,
                    "cRLDistributionPoints",
                    access::decode_crl_distribution_points,
                );
                registry.register(
                    oid::EXT_CERTIFICATE_POLICIES,
                    "certificatePolicies",
                    policies::decode_certificate_policies,
                );
            }
            ExtensionOwner::Crl => {
                registry.register(
                    oid::EXT_AUTHORITY_KEY_IDENTIFIER,
                    "authorityKeyIdentifier",
                    names::decode_authority_key_identifier,
                );
                registry.register(
                    oid::EXT_ISSUER_ALT_NAME,
                    "issuerAltName",
                    names::decode_issuer_alt_name,
                );
                registry.register(
                    oid::EXT_AUTHORITY_INFO_ACCESS,
                    "authorityInfoAccess",
                    access::decode_authority_info_access,
                );
                registry.register(oid::EXT_CRL_NUMBER, "cRLNumber", revocation::decode_crl_number);
                registry.register(
                    oid::EXT_DELTA_CRL_INDICATOR,
                    "deltaCRLIndicator",
                    revocation::decode_delta_crl_indicator,
                );
            }
            ExtensionOwner::CrlEntry => {
                registry.register(oid::EXT_CRL_REASON, "cRLReason", revocation::decode_crl_reason);
                registry.register(
                    oid::EXT_INVALIDITY_DATE,
                    "invalidityDate",
                    revocation::decode_invalidity_date,
                );
            }
        }
        registry
    }

    pub fn owner(&self) -> ExtensionOwner {
        self.owner
    }

    /// Registers (or replaces) the decoder for `oid`.
    pub fn register(&mut self, oid: &str, name: &'static str, decode: DecoderFn) {
        self.decoders
            .insert(oid.to_string(), RegisteredDecoder { name, decode });
    }

    pub fn is_registered(&self, oid: &str) -> bool {
        self.decoders.contains_key(oid)
    }

    /// Decodes the extension registered under `oid`.
    ///
    /// An absent extension, or one without a registered decoder, is `Ok(None)`.
    pub fn decode(
        &self,
        oid: &str,
        extension: Option<&X509Extension<'_>>,
    ) -> Result<Option<ExtensionValue>, ExtensionDecodeError> {
        let (Some(extension), Some(decoder)) = (extension, self.decoders.get(oid)) else {
            return Ok(None);
        };
        (decoder.decode)(extension).map(Some)
    }

    /// Resolves one present extension into its reported form.
    pub fn resolve(&self, extension: &X509Extension<'_>) -> Extension {
        let oid = extension.oid.to_id_string();
        let registered = self.decoders.get(&oid);
        let name = registered
            .map(|decoder| decoder.name)
            .or_else(|| oid::extension_name(&oid))
            .map(str::to_string);

        let Some(decoder) = registered else {
            return Extension {
                oid,
                name,
                critical: extension.critical,
                status: ExtensionStatus::Unparsed,
                value: None,
                raw_hex: Some(hex::encode(extension.value)),
                error: None,
            };
        };

        match (decoder.decode)(extension) {
            Ok(value) => Extension {
                oid,
                name,
                critical: extension.critical,
                status: ExtensionStatus::Parsed,
                value: Some(value),
                raw_hex: None,
                error: None,
            },
            Err(e) => {
                warn!("Failed to decode extension {} ({}): {}", oid, decoder.name, e);
                Extension {
                    oid,
                    name,
                    critical: extension.critical,
                    status: ExtensionStatus::Error,
                    value: None,
                    raw_hex: Some(hex::encode(extension.value)),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Resolves every extension in wire order.
    pub fn resolve_all(&self, extensions: &[X509Extension<'_>]) -> Vec<Extension> {
        extensions.iter().map(|extension| self.resolve(extension)).collect()
    }
}
