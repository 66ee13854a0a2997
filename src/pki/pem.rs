use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::errors::{PkiError, PkiResult};

pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";
pub const CRL_LABEL: &str = "X509 CRL";

/// Extracts the DER payload of the first `label` block found in `text`.
///
/// All whitespace inside the base64 body is ignored.
pub fn extract(text: &str, label: &str) -> PkiResult<Vec<u8>> {
    let begin = format!("-----BEGIN {label}-----");
    let end = format!("-----END {label}-----");

    let start = text
        .find(&begin)
        .ok_or_else(|| PkiError::MalformedPem(format!("missing '{begin}' delimiter")))?
        + begin.len();
    let stop = text[start..]
        .find(&end)
        .ok_or_else(|| PkiError::MalformedPem(format!("missing '{end}' delimiter")))?
        + start;

    let body: String = text[start..stop]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if body.is_empty() {
        return Err(PkiError::MalformedPem(format!("empty {label} block")));
    }

    STANDARD
        .decode(body.as_bytes())
        .map_err(|e| PkiError::MalformedPem(format!("invalid base64 body: {e}")))
}

/// Wraps DER bytes in a PEM block with 64-column base64 lines.
pub fn encode(der: &[u8], label: &str) -> String {
    let body = STANDARD.encode(der);
    let mut pem = format!("-----BEGIN {label}-----\n");
    for line in body.as_bytes().chunks(64) {
        // base64 output is ASCII
        pem.push_str(&String::from_utf8_lossy(line));
        pem.push('\n');
    }
    pem.push_str(&format!("-----END {label}-----\n"));
    pem
}

/// Returns DER bytes for input that is either raw DER or a PEM `label` block.
pub fn der_or_pem(bytes: &[u8], label: &str) -> PkiResult<Vec<u8>> {
    if looks_like_pem(bytes) {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| PkiError::MalformedPem("PEM input is not valid UTF-8".to_string()))?;
        extract(text, label)
    } else {
        Ok(bytes.to_vec())
    }
}

fn looks_like_pem(bytes: &[u8]) -> bool {
    let trimmed = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map_or(&[][..], |start| &bytes[start..]);
    trimmed.starts_with(b"-----BEGIN ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DER: &[u8] = &[0x30, 0x03, 0x02, 0x01, 0x05];

    #[test]
    fn test_round_trip() {
        let der: Vec<u8> = (0..=255u8).cycle().take(700).collect();
        let pem = encode(&der, CRL_LABEL);
        let first = extract(&pem, CRL_LABEL).unwrap();
        let second = extract(&encode(&first, CRL_LABEL), CRL_LABEL).unwrap();
        assert_eq!(first, der);
        assert_eq!(second, der);
        assert!(pem.lines().all(|line| line.len() <= 64 || line.starts_with("-----")));
    }

    #[test]
    fn test_extract_ignores_whitespace_and_surrounding_text() {
        let pem = "junk before\n-----BEGIN CERTIFICATE-----\r\n MAMC\n AQU= \n\
                   -----END CERTIFICATE-----\ntrailer";
        assert_eq!(extract(pem, CERTIFICATE_LABEL).unwrap(), SAMPLE_DER);
    }

    #[test]
    fn test_missing_delimiters() {
        let err = extract("MAMCAQU=", CERTIFICATE_LABEL).unwrap_err();
        assert!(matches!(err, PkiError::MalformedPem(_)));

        let err = extract("-----BEGIN X509 CRL-----\nMAMCAQU=\n", CRL_LABEL).unwrap_err();
        assert!(matches!(err, PkiError::MalformedPem(msg) if msg.contains("END")));
    }

    #[test]
    fn test_wrong_label_is_rejected() {
        let pem = encode(SAMPLE_DER, CERTIFICATE_LABEL);
        assert!(matches!(
            extract(&pem, CRL_LABEL),
            Err(PkiError::MalformedPem(_))
        ));
    }

    #[test]
    fn test_invalid_base64() {
        let pem = "-----BEGIN X509 CRL-----\n@@@@\n-----END X509 CRL-----\n";
        assert!(matches!(
            extract(pem, CRL_LABEL),
            Err(PkiError::MalformedPem(_))
        ));
    }

    #[test]
    fn test_der_or_pem_passes_der_through() {
        assert_eq!(der_or_pem(SAMPLE_DER, CRL_LABEL).unwrap(), SAMPLE_DER);
        let pem = encode(SAMPLE_DER, CRL_LABEL);
        assert_eq!(der_or_pem(pem.as_bytes(), CRL_LABEL).unwrap(), SAMPLE_DER);
    }
}
