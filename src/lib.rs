//! # certbundle - P-521 Key and Certificate Bundles
//!
//! certbundle pairs an elliptic-curve private key with its X.509 certificate and converts
//! that pairing to and from the DER buffers it is stored or transported as. It is built
//! entirely with rustcrypto libraries.
//!
//! ## Curve
//!
//! Exactly one curve is supported: **NIST P-521** (secp521r1). Keys on any other curve are
//! rejected when decoded, and every key this crate generates is a P-521 key.
//!
//! ## Formats
//!
//! - **Key**: SEC1 `ECPrivateKey` DER, with named-curve parameters and the public key
//! - **Certificate**: X.509 DER, handed back byte for byte as it was parsed
//! - **PEM**: `EC PRIVATE KEY` and `CERTIFICATE` armour over the same two buffers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use certbundle::{bundle::Bundle, codec, key::PrivateKey};
//!
//! # fn main() -> Result<(), certbundle::error::BundleError> {
//! // A fresh key with a self-signed certificate whose subject is CN=alice
//! let bundle = Bundle::self_signed("alice", PrivateKey::generate())?;
//!
//! // Two separate buffers, ready for whatever stores them
//! let (key_der, cert_der) = codec::encode(&bundle)?;
//!
//! let restored = codec::decode("alice", &key_der, &cert_der)?;
//! assert_eq!(restored.name(), "alice");
//! assert_eq!(restored.cert().as_der(), cert_der.as_slice());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Nothing in this crate prints or exits. Parse failures say which half of the pair was
//! malformed:
//!
//! ```rust
//! use certbundle::{codec, error::{BundleError, ParseStage}};
//!
//! match codec::decode("alice", &[], &[]) {
//!     Ok(_) => unreachable!(),
//!     Err(e) => {
//!         assert_eq!(e.stage(), Some(ParseStage::Key));
//!         assert!(matches!(e, BundleError::KeyParse(_)));
//!     }
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`bundle`]: The named key/certificate pairing
//! - [`codec`]: DER and PEM encoding and decoding of bundles
//! - [`key`]: The P-521 private key
//! - [`cert`]: Certificate parsing, inspection and self-signed generation
//! - [`state`]: Certificate lifecycle labels
//! - [`error`]: Error types

pub mod bundle;
pub mod cert;
pub mod codec;
pub mod error;
mod issuer;
pub mod key;
pub mod pem_utils;
pub mod state;
mod tbs_certificate;

pub use bundle::Bundle;
pub use error::{BundleError, ParseStage};
pub use state::CertificateState;
