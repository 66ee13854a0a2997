use x509_parser::der_parser::ber::BerObjectContent;
use x509_parser::der_parser::der::{parse_der_enum, parse_der_integer};
use x509_parser::extensions::{ParsedExtension, X509Extension};

use super::ExtensionValue;
use super::errors::ExtensionDecodeError;
use crate::pki::codec::{IntegerValue, to_datetime};

/// CRLReason codes and names. Code 7 is not assigned.
pub const REASON_NAMES: [(u64, &str); 10] = [
    (0, "unspecified"),
    (1, "keyCompromise"),
    (2, "caCompromise"),
    (3, "affiliationChanged"),
    (4, "superseded"),
    (5, "cessationOfOperation"),
    (6, "certificateHold"),
    (8, "removeFromCRL"),
    (9, "privilegeWithdrawn"),
    (10, "aaCompromise"),
];

pub fn reason_name(code: u64) -> String {
    REASON_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or_else(|| format!("reason_{code}"), |(_, name)| name.to_string())
}

fn decode_unsigned_integer(value: &[u8]) -> Result<IntegerValue, ExtensionDecodeError> {
    let (_, object) = parse_der_integer(value)?;
    match object.content {
        BerObjectContent::Integer(bytes) => {
            if bytes.first().is_some_and(|first| first & 0x80 != 0) {
                return Err(ExtensionDecodeError::Malformed(
                    "negative integer".to_string(),
                ));
            }
            Ok(IntegerValue::from_be_bytes(bytes))
        }
        _ => Err(ExtensionDecodeError::UnexpectedStructure("INTEGER")),
    }
}

pub(super) fn decode_crl_number(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    decode_unsigned_integer(extension.value).map(ExtensionValue::CrlNumber)
}

pub(super) fn decode_delta_crl_indicator(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    decode_unsigned_integer(extension.value).map(ExtensionValue::DeltaCrlIndicator)
}

pub(super) fn decode_crl_reason(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    let (_, object) = parse_der_enum(extension.value)?;
    match object.content {
        BerObjectContent::Enum(code) => Ok(ExtensionValue::CrlReason(reason_name(code))),
        _ => Err(ExtensionDecodeError::UnexpectedStructure("ENUMERATED")),
    }
}

pub(super) fn decode_invalidity_date(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    match extension.parsed_extension() {
        ParsedExtension::InvalidityDate(time) => to_datetime(*time)
            .map(ExtensionValue::InvalidityDate)
            .ok_or_else(|| ExtensionDecodeError::Malformed("date out of range".to_string())),
        other => Err(ExtensionDecodeError::from_parsed(other, "GeneralizedTime")),
    }
}
