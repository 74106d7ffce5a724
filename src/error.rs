//! Errors returned while parsing, encoding and self-issuing bundles.

use std::fmt;

use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, BundleError>;

/// Represents errors that can occur while building, decoding or encoding a bundle.
///
/// Every failure is returned to the caller; nothing in this crate aborts the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BundleError {
    /// The key buffer is not a DER-encoded P-521 private key.
    #[error("Failed parsing private key: {0}")]
    KeyParse(String),

    /// The certificate buffer is not a DER-encoded X.509 certificate.
    #[error("Failed parsing certificate: {0}")]
    CertificateParse(String),

    /// An in-memory key could not be re-encoded to DER.
    #[error("Unable to marshal EC private key: {0}")]
    KeySerialize(String),

    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    Encoding(String),

    /// PEM armour was malformed or carried an unexpected label.
    #[error("Invalid PEM: {0}")]
    Pem(String),

    /// Error due to invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error while signing a certificate body.
    #[error("Signing error: {0}")]
    Signing(String),
}

impl BundleError {
    /// Which half of the key/certificate pair failed to parse, if this is a parse error.
    pub fn stage(&self) -> Option<ParseStage> {
        match self {
            BundleError::KeyParse(_) => Some(ParseStage::Key),
            BundleError::CertificateParse(_) => Some(ParseStage::Certificate),
            _ => None,
        }
    }
}

/// The half of a key/certificate pair a parse failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseStage {
    Key,
    Certificate,
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStage::Key => f.write_str("key"),
            ParseStage::Certificate => f.write_str("certificate"),
        }
    }
}

impl From<der::Error> for BundleError {
    /// Converts a `der::Error` into a `BundleError`.
    fn from(err: der::Error) -> Self {
        BundleError::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_is_reported_for_parse_errors_only() {
        assert_eq!(
            BundleError::KeyParse("short".into()).stage(),
            Some(ParseStage::Key)
        );
        assert_eq!(
            BundleError::CertificateParse("short".into()).stage(),
            Some(ParseStage::Certificate)
        );
        assert_eq!(BundleError::KeySerialize("x".into()).stage(), None);
    }

    #[test]
    fn messages_name_the_failing_half() {
        let err = BundleError::KeyParse("unexpected end".into());
        assert_eq!(err.to_string(), "Failed parsing private key: unexpected end");
        assert_eq!(ParseStage::Certificate.to_string(), "certificate");
    }
}
