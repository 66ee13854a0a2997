//! X.509 v3 certificate and CRL extensions.
//!
//! Each supported extension has a decoder registered by OID in an
//! [`ExtensionRegistry`]. Builders resolve every extension present on an
//! object through the registry; a failing decoder degrades only its own
//! entry.

mod access;
mod constraints;
mod errors;
mod names;
mod policies;
mod registry;
mod revocation;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::codec::IntegerValue;

pub use access::{
    AccessMethodLocations, AuthorityInfoAccess, CrlDistributionPoints, DistributionPointSummary,
};
pub use constraints::{BasicConstraints, KEY_USAGE_NAMES, KeyUsage};
pub use errors::ExtensionDecodeError;
pub use names::{AuthorityKeyIdentifier, GeneralNames, OtherName, render_general_name};
pub use policies::{PolicyInformation, PolicyQualifier};
pub use registry::{DecoderFn, ExtensionOwner, ExtensionRegistry};
pub use revocation::{REASON_NAMES, reason_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtensionStatus {
    Parsed,
    Unparsed,
    Error,
}

/// Decoded content of a supported extension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ExtensionValue {
    BasicConstraints(BasicConstraints),
    KeyUsage(KeyUsage),
    ExtendedKeyUsage(Vec<String>),
    SubjectAltName(GeneralNames),
    IssuerAltName(GeneralNames),
    AuthorityInfoAccess(AuthorityInfoAccess),
    CrlDistributionPoints(CrlDistributionPoints),
    CertificatePolicies(Vec<PolicyInformation>),
    AuthorityKeyIdentifier(AuthorityKeyIdentifier),
    SubjectKeyIdentifier(String),
    CrlNumber(IntegerValue),
    DeltaCrlIndicator(IntegerValue),
    CrlReason(String),
    InvalidityDate(DateTime<Utc>),
}

/// One extension as present on a certificate, CRL or CRL entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub oid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub critical: bool,
    pub status: ExtensionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ExtensionValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Extension {
    pub fn is_parsed(&self) -> bool {
        self.status == ExtensionStatus::Parsed
    }
}

/// Finds the decoded value of the first successfully parsed extension with `oid`.
pub fn find_value<'a>(extensions: &'a [Extension], oid: &str) -> Option<&'a ExtensionValue> {
    extensions
        .iter()
        .find(|extension| extension.oid == oid && extension.is_parsed())
        .and_then(|extension| extension.value.as_ref())
}
