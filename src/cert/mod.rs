pub mod extensions;
pub mod params;

use der::{Decode, Encode};
use params::{CertificateParams, DistinguishedName, ExtensionParam, Validity};
use time::OffsetDateTime;
use x509_cert::certificate::CertificateInner;

use crate::error::{BundleError, Result};
use crate::issuer::SelfIssuer;
use crate::key::PrivateKey;
use crate::pem_utils::{CERTIFICATE_LABEL, der_to_pem, pem_to_der};

/// A parsed X.509 certificate together with the exact DER it was read from.
///
/// The DER is kept so that encoding a certificate hands back the bytes it was
/// parsed from, byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    inner: CertificateInner,
    raw: Vec<u8>,
}

impl Certificate {
    /// Parses a single DER-encoded certificate.
    ///
    /// Trailing bytes after the certificate are an error.
    pub fn from_der(der_bytes: &[u8]) -> Result<Self> {
        let inner = x509_cert::Certificate::from_der(der_bytes)
            .map_err(|e| BundleError::CertificateParse(e.to_string()))?;
        Ok(Self {
            inner,
            raw: der_bytes.to_vec(),
        })
    }

    /// Wraps an already-built certificate structure, encoding it once.
    pub fn from_x509(inner: CertificateInner) -> Result<Self> {
        let raw = inner
            .to_der()
            .map_err(|e| BundleError::Encoding(e.to_string()))?;
        Ok(Self { inner, raw })
    }

    /// Parses a PEM `CERTIFICATE` block.
    pub fn from_pem(pem: &str) -> Result<Self> {
        Self::from_der(&pem_to_der(pem, CERTIFICATE_LABEL)?)
    }

    /// Creates a new self-signed certificate for `params.subject`, signed by `key`.
    pub fn new_self_signed(params: &CertificateParams, key: &PrivateKey) -> Result<Self> {
        SelfIssuer::new(key).issue(params)
    }

    pub fn inner(&self) -> &CertificateInner {
        &self.inner
    }

    /// The DER this certificate was parsed from.
    pub fn as_der(&self) -> &[u8] {
        &self.raw
    }

    pub fn into_der(self) -> Vec<u8> {
        self.raw
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> String {
        der_to_pem(&self.raw, CERTIFICATE_LABEL)
    }

    pub fn subject(&self) -> DistinguishedName {
        DistinguishedName::from_x509_name(&self.inner.tbs_certificate.subject)
    }

    pub fn issuer(&self) -> DistinguishedName {
        DistinguishedName::from_x509_name(&self.inner.tbs_certificate.issuer)
    }

    pub fn serial_number(&self) -> &[u8] {
        self.inner.tbs_certificate.serial_number.as_bytes()
    }

    pub fn validity(&self) -> Validity {
        let validity = &self.inner.tbs_certificate.validity;
        Validity {
            not_before: OffsetDateTime::from(validity.not_before.to_system_time()),
            not_after: OffsetDateTime::from(validity.not_after.to_system_time()),
        }
    }

    /// The certificate's extensions in encounter order; empty when it carries none.
    pub fn extensions(&self) -> Vec<ExtensionParam> {
        self.inner
            .tbs_certificate
            .extensions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|ext| ExtensionParam {
                oid: ext.extn_id,
                critical: ext.critical,
                value: ext.extn_value.as_bytes().to_vec(),
            })
            .collect()
    }

    /// Whether the certificate's subject public key is the public half of `key`.
    ///
    /// This is a query only; nothing in this crate requires it to hold.
    pub fn matches_key(&self, key: &PrivateKey) -> bool {
        match key.to_spki() {
            Ok(spki) => spki == self.inner.tbs_certificate.subject_public_key_info,
            Err(_) => false,
        }
    }
}
