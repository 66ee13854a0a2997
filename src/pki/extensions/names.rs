use serde::Serialize;
use tracing::debug;
use x509_parser::extensions::{GeneralName, ParsedExtension, X509Extension};

use super::ExtensionValue;
use super::errors::ExtensionDecodeError;
use crate::pki::codec::format_ip;
use crate::pki::name::DistinguishedName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherName {
    pub oid: String,
    pub value_hex: String,
}

/// GeneralName values grouped by choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralNames {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dns: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uri: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ip: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directory_names: Vec<DistinguishedName>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_names: Vec<OtherName>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub registered_ids: Vec<String>,
}

impl GeneralNames {
    pub fn from_names<'a, 'b: 'a>(names: impl IntoIterator<Item = &'a GeneralName<'b>>) -> Self {
        let mut collected = Self::default();
        for name in names {
            collected.push(name);
        }
        collected
    }

    pub fn push(&mut self, name: &GeneralName<'_>) {
        match name {
            GeneralName::RFC822Name(email) => self.email.push(email.to_string()),
            GeneralName::DNSName(dns) => self.dns.push(dns.to_string()),
            GeneralName::URI(uri) => self.uri.push(uri.to_string()),
            GeneralName::IPAddress(bytes) => self.ip.push(format_ip(bytes)),
            GeneralName::DirectoryName(name) => {
                self.directory_names.push(DistinguishedName::from_x509(name))
            }
            GeneralName::OtherName(oid, value) => self.other_names.push(OtherName {
                oid: oid.to_id_string(),
                value_hex: hex::encode(value),
            }),
            GeneralName::RegisteredID(oid) => self.registered_ids.push(oid.to_id_string()),
            GeneralName::X400Address(_) | GeneralName::EDIPartyName(_) => {
                debug!("Skipping unsupported GeneralName {}", render_general_name(name));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_empty()
            && self.dns.is_empty()
            && self.uri.is_empty()
            && self.ip.is_empty()
            && self.directory_names.is_empty()
            && self.other_names.is_empty()
            && self.registered_ids.is_empty()
    }
}

/// Single-line rendering of a GeneralName, prefixed by its choice.
pub fn render_general_name(name: &GeneralName<'_>) -> String {
    match name {
        GeneralName::RFC822Name(email) => format!("email:{email}"),
        GeneralName::DNSName(dns) => format!("DNS:{dns}"),
        GeneralName::URI(uri) => format!("URI:{uri}"),
        GeneralName::IPAddress(bytes) => format!("IP:{}", format_ip(bytes)),
        GeneralName::DirectoryName(name) => {
            format!("DirName:{}", DistinguishedName::from_x509(name).rendered)
        }
        GeneralName::OtherName(oid, value) => {
            format!("othername:{}:{}", oid.to_id_string(), hex::encode(value))
        }
        GeneralName::RegisteredID(oid) => format!("RID:{}", oid.to_id_string()),
        GeneralName::X400Address(any) => format!("X400Address:{}", hex::encode(any.data)),
        GeneralName::EDIPartyName(any) => format!("EdiPartyName:{}", hex::encode(any.data)),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityKeyIdentifier {
    pub key_identifier: Option<String>,
    pub authority_cert_issuer: Option<Vec<String>>,
    pub authority_cert_serial_number: Option<String>,
}

pub(super) fn decode_subject_alt_name(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    match extension.parsed_extension() {
        ParsedExtension::SubjectAlternativeName(san) => Ok(ExtensionValue::SubjectAltName(
            GeneralNames::from_names(&san.general_names),
        )),
        other => Err(ExtensionDecodeError::from_parsed(other, "GeneralNames")),
    }
}

pub(super) fn decode_issuer_alt_name(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    match extension.parsed_extension() {
        ParsedExtension::IssuerAlternativeName(ian) => Ok(ExtensionValue::IssuerAltName(
            GeneralNames::from_names(&ian.general_names),
        )),
        other => Err(ExtensionDecodeError::from_parsed(other, "GeneralNames")),
    }
}

pub(super) fn decode_authority_key_identifier(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    match extension.parsed_extension() {
        ParsedExtension::AuthorityKeyIdentifier(aki) => {
            Ok(ExtensionValue::AuthorityKeyIdentifier(AuthorityKeyIdentifier {
                key_identifier: aki.key_identifier.as_ref().map(|id| hex::encode(id.0)),
                authority_cert_issuer: aki
                    .authority_cert_issuer
                    .as_ref()
                    .map(|names| names.iter().map(render_general_name).collect()),
                authority_cert_serial_number: aki.authority_cert_serial.map(hex::encode),
            }))
        }
        other => Err(ExtensionDecodeError::from_parsed(other, "AuthorityKeyIdentifier")),
    }
}

pub(super) fn decode_subject_key_identifier(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    match extension.parsed_extension() {
        ParsedExtension::SubjectKeyIdentifier(id) => {
            Ok(ExtensionValue::SubjectKeyIdentifier(hex::encode(id.0)))
        }
        other => Err(ExtensionDecodeError::from_parsed(other, "KeyIdentifier")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x509_parser::der_parser::Oid;

    #[test]
    fn test_general_names_are_grouped() {
        let rid: Oid<'static> = "1.2.3.4".parse().unwrap();
        let names = vec![
            GeneralName::DNSName("a.example"),
            GeneralName::RFC822Name("ops@example.com"),
            GeneralName::IPAddress(&[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]),
            GeneralName::RegisteredID(rid),
            GeneralName::DNSName("b.example"),
        ];
        let grouped = GeneralNames::from_names(&names);
        assert_eq!(grouped.dns, vec!["a.example", "b.example"]);
        assert_eq!(grouped.email, vec!["ops@example.com"]);
        assert_eq!(grouped.ip, vec!["2001:db8::1"]);
        assert_eq!(grouped.registered_ids, vec!["1.2.3.4"]);
        assert!(grouped.uri.is_empty());
    }

    #[test]
    fn test_render_general_name() {
        assert_eq!(render_general_name(&GeneralName::URI("http://x")), "URI:http://x");
        assert_eq!(
            render_general_name(&GeneralName::IPAddress(&[127, 0, 0, 1])),
            "IP:127.0.0.1"
        );
    }

    #[test]
    fn test_truncated_san_is_reported_as_malformed() {
        let oid: Oid<'static> = "2.5.29.17".parse().unwrap();
        let truncated = [0x30, 0x10, 0x82, 0x03, b'a', b'b', b'c'];
        let parsed = ParsedExtension::ParseError {
            error: x509_parser::nom::Err::Error(
                x509_parser::der_parser::error::BerError::InvalidLength,
            ),
        };
        let extension = X509Extension::new(oid, false, &truncated, parsed);
        assert!(matches!(
            decode_subject_alt_name(&extension),
            Err(ExtensionDecodeError::Malformed(_))
        ));
    }
}
