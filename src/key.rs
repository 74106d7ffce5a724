use const_oid::ObjectIdentifier;
use der::{Decode, Encode};
use ecdsa::signature::Signer;
use p521::ecdsa::{Signature, SigningKey};
use p521::elliptic_curve::sec1::ToEncodedPoint;
use p521::elliptic_curve::zeroize::Zeroizing;
use x509_cert::spki::SubjectPublicKeyInfoOwned;

use crate::error::{BundleError, Result};

/// The one curve this crate accepts and produces: NIST P-521 (secp521r1).
pub const CURVE_OID: ObjectIdentifier = const_oid::db::rfc5912::SECP_521_R_1;

/// An elliptic-curve private key on [`CURVE_OID`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    secret: p521::SecretKey,
}

impl PrivateKey {
    /// Generate a fresh P-521 private key.
    pub fn generate() -> Self {
        let mut rng = rand_core::OsRng;
        Self {
            secret: p521::SecretKey::random(&mut rng),
        }
    }

    /// Parses a SEC1 `ECPrivateKey` structure.
    ///
    /// The encoding must name the curve in its parameters and that curve must be P-521.
    /// An embedded public key, when present, must match the private scalar.
    pub fn from_sec1_der(der_bytes: &[u8]) -> Result<Self> {
        let parsed = sec1::EcPrivateKey::from_der(der_bytes)
            .map_err(|e| BundleError::KeyParse(e.to_string()))?;

        match parsed.parameters.and_then(|params| params.named_curve()) {
            Some(oid) if oid == CURVE_OID => {}
            Some(oid) => {
                return Err(BundleError::KeyParse(format!("unsupported curve {oid}")));
            }
            None => {
                return Err(BundleError::KeyParse(
                    "missing named curve parameters".to_string(),
                ));
            }
        }

        let secret = p521::SecretKey::from_sec1_der(der_bytes)
            .map_err(|e| BundleError::KeyParse(e.to_string()))?;
        Ok(Self { secret })
    }

    /// Encodes the key as a SEC1 `ECPrivateKey` with named-curve parameters and the
    /// uncompressed public key.
    pub fn to_sec1_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let private_key = Zeroizing::new(self.secret.to_bytes());
        let public_key = self.public_key_bits();
        let ec_private_key = sec1::EcPrivateKey {
            private_key: &private_key,
            parameters: Some(sec1::EcParameters::NamedCurve(CURVE_OID)),
            public_key: Some(&public_key),
        };
        ec_private_key
            .to_der()
            .map(Zeroizing::new)
            .map_err(|e| BundleError::KeySerialize(e.to_string()))
    }

    pub fn as_secret_key(&self) -> &p521::SecretKey {
        &self.secret
    }

    pub fn public_key(&self) -> p521::PublicKey {
        self.secret.public_key()
    }

    /// The uncompressed SEC1 point, as it appears in a certificate's public key bit string.
    pub fn public_key_bits(&self) -> Vec<u8> {
        self.public_key().to_encoded_point(false).as_bytes().to_vec()
    }

    /// The public half as an X.509 `SubjectPublicKeyInfo`.
    pub fn to_spki(&self) -> Result<SubjectPublicKeyInfoOwned> {
        SubjectPublicKeyInfoOwned::from_key(self.public_key())
            .map_err(|e| BundleError::Encoding(e.to_string()))
    }

    /// Signs `data` with ECDSA (SHA-512) and returns the DER-encoded signature.
    pub fn sign_data(&self, data: &[u8]) -> Result<Vec<u8>> {
        let signing_key = SigningKey::from_bytes(&self.secret.to_bytes())
            .map_err(|e| BundleError::Signing(e.to_string()))?;
        let signature: Signature = signing_key
            .try_sign(data)
            .map_err(|e| BundleError::Signing(e.to_string()))?;
        Ok(signature.to_der().as_bytes().to_vec())
    }
}

impl From<p521::SecretKey> for PrivateKey {
    fn from(secret: p521::SecretKey) -> Self {
        Self { secret }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sec1_encoding_names_the_curve() {
        let key = PrivateKey::generate();
        let der_bytes = key.to_sec1_der().unwrap();

        let parsed = sec1::EcPrivateKey::from_der(&der_bytes).unwrap();
        assert_eq!(
            parsed.parameters.and_then(|p| p.named_curve()),
            Some(CURVE_OID)
        );
        assert_eq!(parsed.public_key, Some(key.public_key_bits().as_slice()));
    }

    #[test]
    fn sec1_decoding_restores_the_same_key() {
        let key = PrivateKey::generate();
        let der_bytes = key.to_sec1_der().unwrap();
        let decoded = PrivateKey::from_sec1_der(&der_bytes).unwrap();
        assert_eq!(key, decoded);
        assert_eq!(key.public_key(), decoded.public_key());
    }

    #[test]
    fn missing_curve_parameters_are_rejected() {
        let key = PrivateKey::generate();
        let scalar = key.as_secret_key().to_bytes();
        let bare = sec1::EcPrivateKey {
            private_key: &scalar,
            parameters: None,
            public_key: None,
        };
        let der_bytes = der::Encode::to_der(&bare).unwrap();

        let err = PrivateKey::from_sec1_der(&der_bytes).unwrap_err();
        assert!(matches!(err, BundleError::KeyParse(_)));
    }

    #[test]
    fn foreign_curve_is_rejected() {
        let key = PrivateKey::generate();
        let scalar = key.as_secret_key().to_bytes();
        let foreign = sec1::EcPrivateKey {
            private_key: &scalar,
            parameters: Some(sec1::EcParameters::NamedCurve(
                const_oid::db::rfc5912::SECP_384_R_1,
            )),
            public_key: None,
        };
        let der_bytes = der::Encode::to_der(&foreign).unwrap();

        let err = PrivateKey::from_sec1_der(&der_bytes).unwrap_err();
        assert_eq!(
            err,
            BundleError::KeyParse(format!(
                "unsupported curve {}",
                const_oid::db::rfc5912::SECP_384_R_1
            ))
        );
    }

    #[test]
    fn signatures_are_der_encoded() {
        let key = PrivateKey::generate();
        let signature = key.sign_data(b"to be signed").unwrap();
        // SEQUENCE { INTEGER r, INTEGER s }
        assert_eq!(signature[0], 0x30);
        assert!(Signature::from_der(&signature).is_ok());
    }
}
