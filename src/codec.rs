//! Conversion between a [`Bundle`] and the two DER buffers it is stored as.
//!
//! The key travels as a SEC1 `ECPrivateKey`, the certificate as X.509 DER. The two
//! buffers are always separate; there is no combined format.

use p521::elliptic_curve::zeroize::Zeroizing;

use crate::bundle::Bundle;
use crate::cert::Certificate;
use crate::error::{BundleError, Result};
use crate::key::PrivateKey;
use crate::pem_utils::{CERTIFICATE_LABEL, EC_PRIVATE_KEY_LABEL, der_to_pem, pem_to_der};

/// Returns `(key_der, cert_der)` for `bundle`.
///
/// The certificate bytes are the ones the certificate was parsed from. Fails with
/// [`BundleError::KeySerialize`] if the key cannot be re-encoded.
pub fn encode(bundle: &Bundle) -> Result<(Zeroizing<Vec<u8>>, Vec<u8>)> {
    let key_der = bundle.key().to_sec1_der().inspect_err(|e| {
        log::debug!("bundle {}: {e}", bundle.name());
    })?;
    log::debug!("encoded bundle {}", bundle.name());
    Ok((key_der, bundle.cert().as_der().to_vec()))
}

/// Parses `key_der` and `cert_der` into a bundle named `name`.
///
/// The key must be a P-521 SEC1 `ECPrivateKey` naming its curve; anything else fails
/// with [`BundleError::KeyParse`]. The certificate must be exactly one DER certificate;
/// anything else fails with [`BundleError::CertificateParse`]. The key is parsed first.
pub fn decode(name: impl Into<String>, key_der: &[u8], cert_der: &[u8]) -> Result<Bundle> {
    let name = name.into();
    let key = PrivateKey::from_sec1_der(key_der).inspect_err(|e| {
        log::debug!("bundle {name}: {e}");
    })?;
    let cert = Certificate::from_der(cert_der).inspect_err(|e| {
        log::debug!("bundle {name}: {e}");
    })?;
    log::debug!("decoded bundle {name}");
    Ok(Bundle::new(name, key, cert))
}

/// [`encode`], armoured as `EC PRIVATE KEY` and `CERTIFICATE` PEM blocks.
pub fn encode_pem(bundle: &Bundle) -> Result<(Zeroizing<String>, String)> {
    let (key_der, cert_der) = encode(bundle)?;
    Ok((
        Zeroizing::new(der_to_pem(&key_der, EC_PRIVATE_KEY_LABEL)),
        der_to_pem(&cert_der, CERTIFICATE_LABEL),
    ))
}

/// [`decode`] from PEM blocks. Malformed armour is reported against the half it
/// belongs to.
pub fn decode_pem(name: impl Into<String>, key_pem: &str, cert_pem: &str) -> Result<Bundle> {
    let key_der = Zeroizing::new(
        pem_to_der(key_pem, EC_PRIVATE_KEY_LABEL)
            .map_err(|e| BundleError::KeyParse(e.to_string()))?,
    );
    let cert_der = pem_to_der(cert_pem, CERTIFICATE_LABEL)
        .map_err(|e| BundleError::CertificateParse(e.to_string()))?;
    decode(name, &key_der, &cert_der)
}
