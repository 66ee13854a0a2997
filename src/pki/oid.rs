//! Static OID name tables.
//!
//! Lookups take the dotted-decimal form so they can be used for OIDs coming
//! from any parser. Unknown OIDs return `None` and callers keep the OID itself
//! as the display value.

pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";

pub const EXT_SUBJECT_KEY_IDENTIFIER: &str = "2.5.29.14";
pub const EXT_KEY_USAGE: &str = "2.5.29.15";
pub const EXT_SUBJECT_ALT_NAME: &str = "2.5.29.17";
pub const EXT_ISSUER_ALT_NAME: &str = "2.5.29.18";
pub const EXT_BASIC_CONSTRAINTS: &str = "2.5.29.19";
pub const EXT_CRL_NUMBER: &str = "2.5.29.20";
pub const EXT_CRL_REASON: &str = "2.5.29.21";
pub const EXT_INVALIDITY_DATE: &str = "2.5.29.24";
pub const EXT_DELTA_CRL_INDICATOR: &str = "2.5.29.27";
pub const EXT_CRL_DISTRIBUTION_POINTS: &str = "2.5.29.31";
pub const EXT_CERTIFICATE_POLICIES: &str = "2.5.29.32";
pub const EXT_AUTHORITY_KEY_IDENTIFIER: &str = "2.5.29.35";
pub const EXT_EXTENDED_KEY_USAGE: &str = "2.5.29.37";
pub const EXT_AUTHORITY_INFO_ACCESS: &str = "1.3.6.1.5.5.7.1.1";

pub const ACCESS_OCSP: &str = "1.3.6.1.5.5.7.48.1";
pub const ACCESS_CA_ISSUERS: &str = "1.3.6.1.5.5.7.48.2";

pub const QUALIFIER_CPS: &str = "1.3.6.1.5.5.7.2.1";
pub const QUALIFIER_USER_NOTICE: &str = "1.3.6.1.5.5.7.2.2";

pub fn signature_algorithm_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        "1.2.840.113549.1.1.2" => "md2WithRSAEncryption",
        "1.2.840.113549.1.1.4" => "md5WithRSAEncryption",
        "1.2.840.113549.1.1.5" => "sha1WithRSAEncryption",
        "1.2.840.113549.1.1.10" => "rsassaPss",
        "1.2.840.113549.1.1.11" => "sha256WithRSAEncryption",
        "1.2.840.113549.1.1.12" => "sha384WithRSAEncryption",
        "1.2.840.113549.1.1.13" => "sha512WithRSAEncryption",
        "1.2.840.113549.1.1.14" => "sha224WithRSAEncryption",
        "1.2.840.10045.4.1" => "ecdsaWithSHA1",
        "1.2.840.10045.4.3.1" => "ecdsaWithSHA224",
        "1.2.840.10045.4.3.2" => "ecdsaWithSHA256",
        "1.2.840.10045.4.3.3" => "ecdsaWithSHA384",
        "1.2.840.10045.4.3.4" => "ecdsaWithSHA512",
        "1.2.840.10040.4.3" => "dsaWithSHA1",
        "2.16.840.1.101.3.4.3.2" => "dsaWithSHA256",
        "1.3.101.112" => "Ed25519",
        "1.3.101.113" => "Ed448",
        _ => return None,
    };
    Some(name)
}

pub fn key_algorithm_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        RSA_ENCRYPTION => "rsaEncryption",
        "1.2.840.113549.1.1.10" => "rsassaPss",
        EC_PUBLIC_KEY => "ecPublicKey",
        "1.2.840.10040.4.1" => "dsa",
        "1.2.840.10046.2.1" => "dhPublicNumber",
        _ => return curve_name(oid),
    };
    Some(name)
}

/// Named curves, plus the algorithms whose OID names the curve directly.
pub fn curve_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        "1.2.840.10045.3.1.1" => "P-192",
        "1.3.132.0.33" => "P-224",
        "1.2.840.10045.3.1.7" => "P-256",
        "1.3.132.0.34" => "P-384",
        "1.3.132.0.35" => "P-521",
        "1.3.132.0.10" => "secp256k1",
        "1.3.36.3.3.2.8.1.1.7" => "brainpoolP256r1",
        "1.3.36.3.3.2.8.1.1.11" => "brainpoolP384r1",
        "1.3.36.3.3.2.8.1.1.13" => "brainpoolP512r1",
        "1.3.101.110" => "X25519",
        "1.3.101.111" => "X448",
        "1.3.101.112" => "Ed25519",
        "1.3.101.113" => "Ed448",
        _ => return None,
    };
    Some(name)
}

/// Short name and long name of a distinguished-name attribute type.
pub fn attribute_names(oid: &str) -> Option<(Option<&'static str>, &'static str)> {
    let names = match oid {
        "2.5.4.3" => (Some("CN"), "commonName"),
        "2.5.4.4" => (Some("SN"), "surname"),
        "2.5.4.5" => (None, "serialNumber"),
        "2.5.4.6" => (Some("C"), "countryName"),
        "2.5.4.7" => (Some("L"), "localityName"),
        "2.5.4.8" => (Some("ST"), "stateOrProvinceName"),
        "2.5.4.9" => (Some("STREET"), "streetAddress"),
        "2.5.4.10" => (Some("O"), "organizationName"),
        "2.5.4.11" => (Some("OU"), "organizationalUnitName"),
        "2.5.4.12" => (Some("T"), "title"),
        "2.5.4.42" => (Some("GN"), "givenName"),
        "2.5.4.43" => (None, "initials"),
        "2.5.4.46" => (None, "dnQualifier"),
        "2.5.4.65" => (None, "pseudonym"),
        "2.5.4.97" => (None, "organizationIdentifier"),
        "0.9.2342.19200300.100.1.1" => (Some("UID"), "userId"),
        "0.9.2342.19200300.100.1.25" => (Some("DC"), "domainComponent"),
        "1.2.840.113549.1.9.1" => (Some("E"), "emailAddress"),
        _ => return None,
    };
    Some(names)
}

pub fn extended_key_usage_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        "2.5.29.37.0" => "anyExtendedKeyUsage",
        "1.3.6.1.5.5.7.3.1" => "serverAuth",
        "1.3.6.1.5.5.7.3.2" => "clientAuth",
        "1.3.6.1.5.5.7.3.3" => "codeSigning",
        "1.3.6.1.5.5.7.3.4" => "emailProtection",
        "1.3.6.1.5.5.7.3.8" => "timeStamping",
        "1.3.6.1.5.5.7.3.9" => "OCSPSigning",
        "1.3.6.1.4.1.311.20.2.2" => "smartcardLogon",
        "1.3.6.1.5.2.3.5" => "kdcAuth",
        _ => return None,
    };
    Some(name)
}

pub fn extension_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        EXT_SUBJECT_KEY_IDENTIFIER => "subjectKeyIdentifier",
        EXT_KEY_USAGE => "keyUsage",
        "2.5.29.16" => "privateKeyUsagePeriod",
        EXT_SUBJECT_ALT_NAME => "subjectAltName",
        EXT_ISSUER_ALT_NAME => "issuerAltName",
        EXT_BASIC_CONSTRAINTS => "basicConstraints",
        EXT_CRL_NUMBER => "cRLNumber",
        EXT_CRL_REASON => "cRLReason",
        EXT_INVALIDITY_DATE => "invalidityDate",
        EXT_DELTA_CRL_INDICATOR => "deltaCRLIndicator",
        "2.5.29.28" => "issuingDistributionPoint",
        "2.5.29.29" => "certificateIssuer",
        "2.5.29.30" => "nameConstraints",
        EXT_CRL_DISTRIBUTION_POINTS => "cRLDistributionPoints",
        EXT_CERTIFICATE_POLICIES => "certificatePolicies",
        "2.5.29.33" => "policyMappings",
        EXT_AUTHORITY_KEY_IDENTIFIER => "authorityKeyIdentifier",
        "2.5.29.36" => "policyConstraints",
        EXT_EXTENDED_KEY_USAGE => "extKeyUsage",
        "2.5.29.46" => "freshestCRL",
        "2.5.29.54" => "inhibitAnyPolicy",
        EXT_AUTHORITY_INFO_ACCESS => "authorityInfoAccess",
        "1.3.6.1.5.5.7.1.11" => "subjectInfoAccess",
        "1.3.6.1.5.5.7.48.1.2" => "ocspNonce",
        "1.3.6.1.5.5.7.48.1.5" => "ocspNoCheck",
        "1.3.6.1.4.1.11129.2.4.2" => "ctPrecertificateSCTs",
        "2.16.840.1.113730.1.1" => "nsCertType",
        "2.16.840.1.113730.1.13" => "nsComment",
        _ => return None,
    };
    Some(name)
}

pub fn policy_name(oid: &str) -> Option<&'static str> {
    let name = match oid {
        "2.5.29.32.0" => "anyPolicy",
        "2.23.140.1.1" => "extendedValidation",
        "2.23.140.1.2.1" => "domainValidated",
        "2.23.140.1.2.2" => "organizationValidated",
        "2.23.140.1.2.3" => "individualValidated",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        assert_eq!(
            signature_algorithm_name("1.2.840.113549.1.1.11"),
            Some("sha256WithRSAEncryption")
        );
        assert_eq!(key_algorithm_name(EC_PUBLIC_KEY), Some("ecPublicKey"));
        assert_eq!(key_algorithm_name("1.3.101.112"), Some("Ed25519"));
        assert_eq!(curve_name("1.2.840.10045.3.1.7"), Some("P-256"));
        assert_eq!(attribute_names("2.5.4.3"), Some((Some("CN"), "commonName")));
        assert_eq!(extended_key_usage_name("1.3.6.1.5.5.7.3.1"), Some("serverAuth"));
        assert_eq!(extension_name(EXT_DELTA_CRL_INDICATOR), Some("deltaCRLIndicator"));
    }

    #[test]
    fn test_unknown_oids_are_not_named() {
        assert_eq!(signature_algorithm_name("1.2.3.4"), None);
        assert_eq!(extension_name("1.3.6.1.4.1.99999.3"), None);
        assert_eq!(attribute_names("1.2.3"), None);
    }
}
