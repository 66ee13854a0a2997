use x509_parser::der_parser::der::parse_der;
use x509_parser::prelude::{CertificateRevocationList, FromDer, X509Certificate};

use super::errors::PkiError;

/// The kind of object a DER blob holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Certificate,
    Crl,
    /// Valid DER that is neither a certificate nor a CRL.
    Other,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Certificate => "certificate",
            ObjectKind::Crl => "CRL",
            ObjectKind::Other => "unrecognized DER object",
        }
    }
}

/// Detects what `der` holds, or `None` when it is not valid DER at all.
pub fn detect(der: &[u8]) -> Option<ObjectKind> {
    if X509Certificate::from_der(der).is_ok() {
        Some(ObjectKind::Certificate)
    } else if CertificateRevocationList::from_der(der).is_ok() {
        Some(ObjectKind::Crl)
    } else if parse_der(der).is_ok() {
        Some(ObjectKind::Other)
    } else {
        None
    }
}

/// Builds the error for a blob that failed to parse as `expected`.
pub(crate) fn rejection(der: &[u8], expected: ObjectKind, reason: impl ToString) -> PkiError {
    match detect(der) {
        Some(found) if found != expected => PkiError::UnsupportedObjectType {
            expected: expected.as_str(),
            found: found.as_str(),
        },
        _ => PkiError::MalformedDer(reason.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_generic_der() {
        assert_eq!(detect(&[0x02, 0x01, 0x05]), Some(ObjectKind::Other));
        assert_eq!(detect(&[0x30, 0x05, 0x02]), None);
    }

    #[test]
    fn test_rejection_of_non_certificate_der() {
        let err = rejection(&[0x02, 0x01, 0x05], ObjectKind::Certificate, "bad");
        assert_eq!(
            err,
            PkiError::UnsupportedObjectType {
                expected: "certificate",
                found: "unrecognized DER object",
            }
        );
        let err = rejection(&[0xff], ObjectKind::Crl, "truncated");
        assert_eq!(err, PkiError::MalformedDer("truncated".to_string()));
    }
}
