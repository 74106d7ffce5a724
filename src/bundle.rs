use p521::elliptic_curve::zeroize::Zeroizing;

use crate::cert::Certificate;
use crate::cert::params::{CertificateParams, DistinguishedName};
use crate::codec;
use crate::error::Result;
use crate::key::PrivateKey;

/// A named pairing of a P-521 private key and its certificate.
///
/// A bundle only ever holds a key and a certificate that parsed successfully, and it
/// offers no way to change either once built, so it can be shared freely between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    name: String,
    key: PrivateKey,
    cert: Certificate,
}

impl Bundle {
    /// Pairs an already-parsed key and certificate under `name`.
    ///
    /// The name is opaque. Whether `cert` actually certifies `key` is not checked here,
    /// see [`Bundle::key_matches_certificate`].
    pub fn new(name: impl Into<String>, key: PrivateKey, cert: Certificate) -> Self {
        Self {
            name: name.into(),
            key,
            cert,
        }
    }

    /// Builds a bundle around a self-signed certificate for `key`, with `name` as the
    /// subject common name and the default one-year validity.
    pub fn self_signed(name: impl Into<String>, key: PrivateKey) -> Result<Self> {
        let name = name.into();
        let params = CertificateParams::builder()
            .subject(DistinguishedName::common_name(name.clone()))
            .build();
        let cert = Certificate::new_self_signed(&params, &key)?;
        Ok(Self::new(name, key, cert))
    }

    /// Parses a DER key and certificate into a bundle. See [`codec::decode`].
    pub fn decode(name: impl Into<String>, key_der: &[u8], cert_der: &[u8]) -> Result<Self> {
        codec::decode(name, key_der, cert_der)
    }

    /// Returns the DER key and certificate. See [`codec::encode`].
    pub fn encode(&self) -> Result<(Zeroizing<Vec<u8>>, Vec<u8>)> {
        codec::encode(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &PrivateKey {
        &self.key
    }

    pub fn cert(&self) -> &Certificate {
        &self.cert
    }

    pub fn into_parts(self) -> (String, PrivateKey, Certificate) {
        (self.name, self.key, self.cert)
    }

    /// Whether the certificate's public key belongs to the bundled private key.
    pub fn key_matches_certificate(&self) -> bool {
        self.cert.matches_key(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_signed_bundle_names_its_subject() {
        let bundle = Bundle::self_signed("alice", PrivateKey::generate()).unwrap();
        assert_eq!(bundle.name(), "alice");
        assert_eq!(bundle.cert().subject().common_name, "alice");
        assert!(bundle.key_matches_certificate());
    }

    #[test]
    fn name_is_not_interpreted() {
        let key = PrivateKey::generate();
        let cert = Bundle::self_signed("alice", key.clone())
            .unwrap()
            .into_parts()
            .2;

        let bundle = Bundle::new("", key, cert);
        assert_eq!(bundle.name(), "");
        assert_eq!(bundle.cert().subject().common_name, "alice");
    }

    #[test]
    fn mismatched_pair_is_still_constructible() {
        let cert = Bundle::self_signed("alice", PrivateKey::generate())
            .unwrap()
            .into_parts()
            .2;
        let bundle = Bundle::new("alice", PrivateKey::generate(), cert);
        assert!(!bundle.key_matches_certificate());
    }

    #[test]
    fn bundles_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Bundle>();
    }
}
