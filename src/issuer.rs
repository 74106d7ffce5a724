use der::Encode;
use der::asn1::BitString;
use rand_core::RngCore;
use x509_cert::certificate::CertificateInner;

use crate::cert::Certificate;
use crate::cert::extensions::{BasicConstraints, KeyUsage, KeyUsages, SubjectKeyIdentifier};
use crate::cert::params::{CertificateParams, ExtensionParam};
use crate::error::Result;
use crate::key::PrivateKey;
use crate::tbs_certificate::{TbsCertificate, signature_algorithm};

const SERIAL_NUMBER_LEN: usize = 16;

/// Issues end-entity certificates whose issuer is their own subject, signed by the
/// subject's key.
pub(crate) struct SelfIssuer<'a> {
    key: &'a PrivateKey,
}

impl<'a> SelfIssuer<'a> {
    pub(crate) fn new(key: &'a PrivateKey) -> Self {
        Self { key }
    }

    /// Issues a self-signed certificate for `params.subject` carrying BasicConstraints
    /// (not a CA), KeyUsage (digitalSignature) and SubjectKeyIdentifier.
    pub(crate) fn issue(&self, params: &CertificateParams) -> Result<Certificate> {
        let subject_public_key = self.key.to_spki()?;
        let key_id = SubjectKeyIdentifier::from_public_key_bits(&self.key.public_key_bits());

        let extensions = vec![
            ExtensionParam::from_extension(
                BasicConstraints {
                    is_ca: false,
                    max_path_length: None,
                },
                true,
            )?,
            ExtensionParam::from_extension(KeyUsage(KeyUsages::DigitalSignature.into()), true)?,
            ExtensionParam::from_extension(key_id, false)?,
        ];

        let serial_number = params
            .serial_number
            .clone()
            .unwrap_or_else(random_serial_number);

        let tbs_cert = TbsCertificate {
            serial_number,
            issuer: params.subject.clone(),
            validity: params.validity.clone(),
            subject: params.subject.clone(),
            subject_public_key,
            extensions,
        };

        let tbs_cert_inner = tbs_cert.to_tbs_certificate_inner()?;
        let signature = self.key.sign_data(&tbs_cert_inner.to_der()?)?;

        let cert_inner = CertificateInner {
            tbs_certificate: tbs_cert_inner,
            signature_algorithm: signature_algorithm(),
            signature: BitString::from_bytes(&signature)?,
        };

        log::debug!(
            "issued self-signed certificate for CN={}",
            params.subject.common_name
        );
        Certificate::from_x509(cert_inner)
    }
}

/// A positive serial number with its top byte set, so the encoding keeps its full length.
fn random_serial_number() -> Vec<u8> {
    let mut serial = vec![0u8; SERIAL_NUMBER_LEN];
    rand_core::OsRng.fill_bytes(&mut serial);
    serial[0] = (serial[0] & 0x7f) | 0x40;
    serial
}
