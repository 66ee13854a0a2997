use std::collections::BTreeMap;

use serde::Serialize;
use x509_parser::der_parser::ber::BerObjectContent;
use x509_parser::der_parser::der::{parse_der_bitstring, parse_der_sequence};
use x509_parser::extensions::{ParsedExtension, X509Extension};

use super::ExtensionValue;
use super::errors::ExtensionDecodeError;
use crate::pki::oid;

/// Key usage bit names, indexed by bit position.
pub const KEY_USAGE_NAMES: [&str; 9] = [
    "digitalSignature",
    "nonRepudiation",
    "keyEncipherment",
    "dataEncipherment",
    "keyAgreement",
    "keyCertSign",
    "cRLSign",
    "encipherOnly",
    "decipherOnly",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicConstraints {
    pub is_ca: bool,
    pub path_len_constraint: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyUsage {
    pub total_bits: usize,
    pub unused_bits: u8,
    /// Only bits inside the encoded length appear here.
    pub flags: BTreeMap<String, bool>,
    pub enabled: Vec<String>,
}

impl KeyUsage {
    /// Interprets BIT STRING content, most significant bit first.
    pub fn from_bits(unused_bits: u8, data: &[u8]) -> Self {
        let total_bits = (data.len() * 8).saturating_sub(usize::from(unused_bits));
        let mut flags = BTreeMap::new();
        let mut enabled = Vec::new();
        for (bit, name) in KEY_USAGE_NAMES.iter().enumerate().take(total_bits) {
            let set = data[bit / 8] & (0x80 >> (bit % 8)) != 0;
            flags.insert(name.to_string(), set);
            if set {
                enabled.push(name.to_string());
            }
        }
        Self {
            total_bits,
            unused_bits,
            flags,
            enabled,
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }
}

pub(super) fn decode_basic_constraints(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    match extension.parsed_extension() {
        ParsedExtension::BasicConstraints(constraints) => {
            Ok(ExtensionValue::BasicConstraints(BasicConstraints {
                is_ca: constraints.ca,
                path_len_constraint: constraints.path_len_constraint,
            }))
        }
        other => Err(ExtensionDecodeError::from_parsed(other, "BasicConstraints")),
    }
}

pub(super) fn decode_key_usage(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    let (_, object) = parse_der_bitstring(extension.value)?;
    match object.content {
        BerObjectContent::BitString(unused_bits, bits) => {
            if unused_bits > 7 {
                return Err(ExtensionDecodeError::Malformed(format!(
                    "invalid unused bit count {unused_bits}"
                )));
            }
            Ok(ExtensionValue::KeyUsage(KeyUsage::from_bits(
                unused_bits,
                bits.data,
            )))
        }
        _ => Err(ExtensionDecodeError::UnexpectedStructure("BIT STRING")),
    }
}

pub(super) fn decode_extended_key_usage(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    let (_, object) = parse_der_sequence(extension.value)?;
    let items = object
        .as_sequence()
        .map_err(|_| ExtensionDecodeError::UnexpectedStructure("SEQUENCE OF KeyPurposeId"))?;

    items
        .iter()
        .map(|item| -> Result<String, ExtensionDecodeError> {
            let purpose = item
                .as_oid()
                .map_err(|_| ExtensionDecodeError::UnexpectedStructure("KeyPurposeId"))?
                .to_id_string();
            Ok(oid::extended_key_usage_name(&purpose)
                .map(str::to_string)
                .unwrap_or(purpose))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(ExtensionValue::ExtendedKeyUsage)
}
