use serde::Serialize;
use x509_parser::prelude::{AttributeTypeAndValue, RelativeDistinguishedName, X509Name};

use super::oid;

/// One `type=value` component of a distinguished name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameAttribute {
    pub oid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: String,
}

impl NameAttribute {
    fn from_attribute(attribute: &AttributeTypeAndValue<'_>) -> Self {
        let oid = attribute.attr_type().to_id_string();
        let (short_name, name) = match oid::attribute_names(&oid) {
            Some((short, long)) => (short.map(str::to_string), Some(long.to_string())),
            None => (None, None),
        };
        Self {
            value: attribute_value(attribute),
            oid,
            short_name,
            name,
        }
    }

    /// Label used when rendering: short name, then long name, then the OID.
    pub fn label(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.oid)
    }
}

/// An ordered distinguished name, as found in the wire encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistinguishedName {
    pub attributes: Vec<NameAttribute>,
    pub rendered: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
}

impl DistinguishedName {
    pub fn from_x509(name: &X509Name<'_>) -> Self {
        Self::from_attributes(
            name.iter_attributes()
                .map(NameAttribute::from_attribute)
                .collect(),
        )
    }

    pub fn from_rdn(rdn: &RelativeDistinguishedName<'_>) -> Self {
        Self::from_attributes(rdn.iter().map(NameAttribute::from_attribute).collect())
    }

    pub fn from_attributes(attributes: Vec<NameAttribute>) -> Self {
        let rendered = attributes
            .iter()
            .map(|attribute| format!("{}={}", attribute.label(), attribute.value))
            .collect::<Vec<_>>()
            .join(", ");
        let common_name = attributes
            .iter()
            .find(|attribute| {
                attribute.short_name.as_deref() == Some("CN")
                    || attribute.name.as_deref() == Some("commonName")
            })
            .map(|attribute| attribute.value.clone());
        Self {
            attributes,
            rendered,
            common_name,
        }
    }
}

/// Directory strings other than the UTF-8 compatible ones are decoded where
/// the encoding is known, otherwise shown as `#<hex>`.
fn attribute_value(attribute: &AttributeTypeAndValue<'_>) -> String {
    if let Ok(value) = attribute.as_str() {
        return value.to_string();
    }
    let raw = attribute.as_slice();
    let tag = attribute.attr_value().header.tag().0;
    match tag {
        // BMPString
        30 if raw.len() % 2 == 0 => {
            let units: Vec<u16> = raw
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16(&units).unwrap_or_else(|_| format!("#{}", hex::encode(raw)))
        }
        // TeletexString, VisibleString
        20 | 26 => match std::str::from_utf8(raw) {
            Ok(value) => value.to_string(),
            Err(_) => raw.iter().map(|&b| char::from(b)).collect(),
        },
        _ => format!("#{}", hex::encode(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(oid: &str, value: &str) -> NameAttribute {
        let (short_name, name) = oid::attribute_names(oid)
            .map(|(short, long)| (short.map(str::to_string), Some(long.to_string())))
            .unwrap_or((None, None));
        NameAttribute {
            oid: oid.to_string(),
            short_name,
            name,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_rendering_keeps_wire_order() {
        let dn = DistinguishedName::from_attributes(vec![
            attribute("2.5.4.6", "DE"),
            attribute("2.5.4.10", "Example PKI"),
            attribute("2.5.4.3", "Example Root CA"),
        ]);
        assert_eq!(dn.rendered, "C=DE, O=Example PKI, CN=Example Root CA");
        assert_eq!(dn.common_name.as_deref(), Some("Example Root CA"));
    }

    #[test]
    fn test_unknown_attribute_falls_back_to_oid() {
        let dn = DistinguishedName::from_attributes(vec![
            attribute("1.2.3.4", "custom"),
            attribute("2.5.4.5", "42"),
        ]);
        assert_eq!(dn.rendered, "1.2.3.4=custom, serialNumber=42");
        assert_eq!(dn.common_name, None);
    }
}
