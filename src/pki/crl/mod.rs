//! Certificate Revocation List (CRL) handling
//!
//! # Features
//! - Decoding CRLs into a semantic model with a bounded revoked-entry sample
//! - Resolving the issuing CA among stored certificates and verifying the signature
//! - Ordering CRL versions and deriving their storage keys
//! - Publishing uploaded CRLs with archival of the superseded version

mod errors;
pub mod lifecycle;
mod parser;
mod publisher;
mod types;
pub mod validation;

pub use errors::{CrlError, CrlResult};
pub use lifecycle::{ClassificationResult, Freshness, archive, classify, is_newer};
pub use parser::build_crl_details;
pub use publisher::{CRL_CONTENT_TYPE, CrlPublisher, PEM_CONTENT_TYPE, PublishReceipt};
pub use types::{Crl, CrlVersion, REVOKED_SAMPLE_SIZE, RevokedEntry};
pub use validation::{resolve_issuer, verify};
