use serde::Serialize;
use x509_parser::extensions::{DistributionPointName, GeneralName, ParsedExtension, X509Extension};

use super::ExtensionValue;
use super::errors::ExtensionDecodeError;
use super::names::GeneralNames;
use crate::pki::name::DistinguishedName;
use crate::pki::oid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessMethodLocations {
    pub method: String,
    pub locations: GeneralNames,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityInfoAccess {
    pub ocsp: GeneralNames,
    pub ca_issuers: GeneralNames,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<AccessMethodLocations>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionPointSummary {
    pub urls: Vec<String>,
    pub directory_names: Vec<String>,
}

impl DistributionPointSummary {
    fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.directory_names.is_empty()
    }
}

/// URLs and directory names across all points, each listed once, plus the
/// points that contributed at least one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrlDistributionPoints {
    pub urls: Vec<String>,
    pub directory_names: Vec<String>,
    pub points: Vec<DistributionPointSummary>,
}

pub(super) fn decode_authority_info_access(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    let ParsedExtension::AuthorityInfoAccess(aia) = extension.parsed_extension() else {
        return Err(ExtensionDecodeError::from_parsed(
            extension.parsed_extension(),
            "AuthorityInfoAccessSyntax",
        ));
    };

    let mut access = AuthorityInfoAccess::default();
    for description in aia.iter() {
        let method = description.access_method.to_id_string();
        match method.as_str() {
            oid::ACCESS_OCSP => access.ocsp.push(&description.access_location),
            oid::ACCESS_CA_ISSUERS => access.ca_issuers.push(&description.access_location),
            _ => match access.other.iter_mut().find(|entry| entry.method == method) {
                Some(entry) => entry.locations.push(&description.access_location),
                None => {
                    let mut locations = GeneralNames::default();
                    locations.push(&description.access_location);
                    access.other.push(AccessMethodLocations { method, locations });
                }
            },
        }
    }
    Ok(ExtensionValue::AuthorityInfoAccess(access))
}

pub(super) fn decode_crl_distribution_points(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    let ParsedExtension::CRLDistributionPoints(points) = extension.parsed_extension() else {
        return Err(ExtensionDecodeError::from_parsed(
            extension.parsed_extension(),
            "CRLDistributionPoints",
        ));
    };

    let mut decoded = CrlDistributionPoints::default();
    for point in points.iter() {
        let mut summary = DistributionPointSummary::default();
        match &point.distribution_point {
            Some(DistributionPointName::FullName(names)) => {
                for name in names {
                    match name {
                        GeneralName::URI(uri) => summary.urls.push(uri.to_string()),
                        GeneralName::DirectoryName(dn) => summary
                            .directory_names
                            .push(DistinguishedName::from_x509(dn).rendered),
                        _ => {}
                    }
                }
            }
            Some(DistributionPointName::NameRelativeToCRLIssuer(rdn)) => {
                summary
                    .directory_names
                    .push(DistinguishedName::from_rdn(rdn).rendered);
            }
            None => {}
        }

        for url in &summary.urls {
            push_unique(&mut decoded.urls, url);
        }
        for name in &summary.directory_names {
            push_unique(&mut decoded.directory_names, name);
        }
        if !summary.is_empty() {
            decoded.points.push(summary);
        }
    }
    Ok(ExtensionValue::CrlDistributionPoints(decoded))
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}
