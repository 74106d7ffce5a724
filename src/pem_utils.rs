use crate::error::{BundleError, Result};

/// PEM label for a DER-encoded X.509 certificate.
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";
/// PEM label for a DER-encoded SEC1 `ECPrivateKey`.
pub const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";

/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(
        &pem,
        pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
    )
}

/// Convert a PEM‑encoded string to DER‑encoded bytes.
///
/// The input must hold exactly one block, labelled `label`, with nothing but whitespace
/// around it.
pub fn pem_to_der(pem_str: &str, label: &str) -> Result<Vec<u8>> {
    let mut blocks = pem::parse_many(pem_str).map_err(|e| BundleError::Pem(e.to_string()))?;
    if blocks.len() != 1 {
        return Err(BundleError::Pem(format!(
            "expected one PEM block, found {}",
            blocks.len()
        )));
    }
    let pem = blocks.remove(0);
    if pem.tag() != label {
        return Err(BundleError::Pem(format!(
            "expected {label}, found {}",
            pem.tag()
        )));
    }

    let trimmed = pem_str.trim();
    if !trimmed.starts_with(&format!("-----BEGIN {label}-----"))
        || !trimmed.ends_with(&format!("-----END {label}-----"))
    {
        return Err(BundleError::Pem(
            "unexpected text around PEM block".to_string(),
        ));
    }
    Ok(pem.into_contents())
}
