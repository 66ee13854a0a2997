//! Primitive conversions shared by the certificate and CRL builders.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use x509_parser::num_bigint::BigUint;
use x509_parser::time::ASN1Time;

/// An arbitrary-precision unsigned integer rendered as lowercase hex and decimal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegerValue {
    pub hex: String,
    pub decimal: String,
    #[serde(skip)]
    value: BigUint,
}

impl IntegerValue {
    /// Builds a value from the content bytes of a DER INTEGER.
    ///
    /// A leading zero sign byte is dropped from the hex form, so the result
    /// never carries padding that is not part of the magnitude.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self::from_biguint(BigUint::from_bytes_be(bytes))
    }

    pub fn from_biguint(value: BigUint) -> Self {
        Self {
            hex: hex::encode(value.to_bytes_be()),
            decimal: value.to_str_radix(10),
            value,
        }
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }
}

impl PartialEq for IntegerValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for IntegerValue {}

impl PartialOrd for IntegerValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IntegerValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for IntegerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.decimal)
    }
}

/// Converts an ASN.1 time into a UTC instant. Out-of-range values yield `None`.
pub fn to_datetime(time: ASN1Time) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(time.timestamp(), 0)
}

/// Lowercase path-safe label: ASCII alphanumerics kept, every other run
/// collapsed to a single `-`.
pub fn slug(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            label.push(c.to_ascii_lowercase());
        } else if !label.is_empty() && !label.ends_with('-') {
            label.push('-');
        }
    }
    label.trim_end_matches('-').to_string()
}

/// Formats the content of an iPAddress GeneralName.
///
/// Name constraints carry an address followed by a mask of the same length,
/// which is rendered as `address/mask`. Unknown lengths fall back to hex.
pub fn format_ip(bytes: &[u8]) -> String {
    match bytes.len() {
        4 => format_ipv4(bytes),
        16 => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(bytes);
            format_ipv6(&octets)
        }
        8 | 32 => {
            let (address, mask) = bytes.split_at(bytes.len() / 2);
            format!("{}/{}", format_ip(address), format_ip(mask))
        }
        _ => hex::encode(bytes),
    }
}

fn format_ipv4(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// RFC 5952 text form: lowercase groups without leading zeros, and the
/// longest run (at least two) of zero groups collapsed to `::`. The leftmost
/// run wins a tie.
pub fn format_ipv6(octets: &[u8; 16]) -> String {
    let groups: Vec<u16> = octets
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();

    let mut best: Option<(usize, usize)> = None;
    let mut index = 0;
    while index < groups.len() {
        if groups[index] != 0 {
            index += 1;
            continue;
        }
        let start = index;
        while index < groups.len() && groups[index] == 0 {
            index += 1;
        }
        let len = index - start;
        if len >= 2 && best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
    }

    let render = |slice: &[u16]| {
        slice
            .iter()
            .map(|group| format!("{group:x}"))
            .collect::<Vec<_>>()
            .join(":")
    };

    match best {
        Some((start, len)) => format!(
            "{}::{}",
            render(&groups[..start]),
            render(&groups[start + len..])
        ),
        None => render(&groups),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v6(groups: [u16; 8]) -> [u8; 16] {
        let mut octets = [0u8; 16];
        for (i, group) in groups.iter().enumerate() {
            octets[i * 2..i * 2 + 2].copy_from_slice(&group.to_be_bytes());
        }
        octets
    }

    #[test]
    fn test_ipv6_loopback_and_unspecified() {
        assert_eq!(format_ipv6(&v6([0, 0, 0, 0, 0, 0, 0, 1])), "::1");
        assert_eq!(format_ipv6(&v6([0; 8])), "::");
        assert_eq!(format_ipv6(&v6([0xfe80, 0, 0, 0, 0, 0, 0, 1])), "fe80::1");
    }

    #[test]
    fn test_ipv6_prefers_leftmost_longest_run() {
        assert_eq!(
            format_ipv6(&v6([0x2001, 0xdb8, 0, 0, 1, 0, 0, 1])),
            "2001:db8::1:0:0:1"
        );
        assert_eq!(
            format_ipv6(&v6([0x2001, 0, 0, 1, 0, 0, 0, 1])),
            "2001:0:0:1::1"
        );
    }

    #[test]
    fn test_ipv6_single_zero_group_is_not_compressed() {
        assert_eq!(
            format_ipv6(&v6([0x2001, 0xdb8, 0, 1, 1, 1, 1, 1])),
            "2001:db8:0:1:1:1:1:1"
        );
    }

    #[test]
    fn test_ipv6_trailing_run() {
        assert_eq!(format_ipv6(&v6([0x2001, 0xdb8, 0, 0, 0, 0, 0, 0])), "2001:db8::");
    }

    #[test]
    fn test_format_ip_variants() {
        assert_eq!(format_ip(&[192, 0, 2, 10]), "192.0.2.10");
        assert_eq!(
            format_ip(&[10, 0, 0, 0, 255, 0, 0, 0]),
            "10.0.0.0/255.0.0.0"
        );
        assert_eq!(format_ip(&[1, 2, 3]), "010203");
    }

    #[test]
    fn test_integer_value_strips_sign_byte() {
        let value = IntegerValue::from_be_bytes(&[0x00, 0xf1, 0xe2]);
        assert_eq!(value.hex, "f1e2");
        assert_eq!(value.decimal, "61922");
    }

    #[test]
    fn test_integer_value_beyond_u64() {
        let bytes = hex::decode("f1e2d3c4b5a6978877665544332211").unwrap();
        let value = IntegerValue::from_be_bytes(&bytes);
        assert_eq!(value.hex, "f1e2d3c4b5a6978877665544332211");
        assert_eq!(value.decimal, "1255944145498273452228727601622098449");
    }

    #[test]
    fn test_integer_value_zero_and_ordering() {
        let zero = IntegerValue::from_be_bytes(&[0x00]);
        assert_eq!(zero.hex, "00");
        assert_eq!(zero.decimal, "0");

        let five = IntegerValue::from_be_bytes(&[5]);
        let three = IntegerValue::from_be_bytes(&[0, 3]);
        assert!(five > three);
        assert_eq!(three, IntegerValue::from_be_bytes(&[3]));
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Example Root CA"), "example-root-ca");
        assert_eq!(slug("  ACME // Issuing CA 2 "), "acme-issuing-ca-2");
        assert_eq!(slug("ÄÖÜ"), "");
    }
}
