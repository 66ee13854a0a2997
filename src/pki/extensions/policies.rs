use serde::Serialize;
use x509_parser::der_parser::der::parse_der;
use x509_parser::extensions::{ParsedExtension, PolicyQualifierInfo, X509Extension};

use super::ExtensionValue;
use super::errors::ExtensionDecodeError;
use crate::pki::oid;

const USER_NOTICE_MARKER: &str = "userNotice";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyQualifier {
    pub oid: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInformation {
    pub oid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub qualifiers: Vec<PolicyQualifier>,
}

pub(super) fn decode_certificate_policies(
    extension: &X509Extension<'_>,
) -> Result<ExtensionValue, ExtensionDecodeError> {
    let ParsedExtension::CertificatePolicies(policies) = extension.parsed_extension() else {
        return Err(ExtensionDecodeError::from_parsed(
            extension.parsed_extension(),
            "CertificatePolicies",
        ));
    };

    policies
        .iter()
        .map(|policy| -> Result<PolicyInformation, ExtensionDecodeError> {
            let policy_oid = policy.policy_id.to_id_string();
            let qualifiers = policy
                .policy_qualifiers
                .iter()
                .flatten()
                .map(decode_qualifier)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(PolicyInformation {
                name: oid::policy_name(&policy_oid).map(str::to_string),
                oid: policy_oid,
                qualifiers,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(ExtensionValue::CertificatePolicies)
}

/// CPS pointers carry their URI; user notices are only marked, not decoded.
fn decode_qualifier(
    info: &PolicyQualifierInfo<'_>,
) -> Result<PolicyQualifier, ExtensionDecodeError> {
    let qualifier_oid = info.policy_qualifier_id.to_id_string();
    let value = match qualifier_oid.as_str() {
        oid::QUALIFIER_CPS => {
            let (_, object) = parse_der(info.qualifier)?;
            let uri = object
                .as_str()
                .map_err(|_| ExtensionDecodeError::UnexpectedStructure("CPSuri"))?;
            Some(uri.to_string())
        }
        oid::QUALIFIER_USER_NOTICE => Some(USER_NOTICE_MARKER.to_string()),
        _ => None,
    };
    Ok(PolicyQualifier {
        oid: qualifier_oid,
        value,
    })
}
