use certbundle::bundle::Bundle;
use certbundle::cert::Certificate;
use certbundle::cert::params::{CertificateParams, DistinguishedName, Validity};
use certbundle::key::PrivateKey;

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fresh P-521 key with a self-signed certificate for CN=`name`.
#[allow(dead_code)]
pub fn generate_bundle(name: &str) -> Bundle {
    let key = PrivateKey::generate();

    let params = CertificateParams::builder()
        .subject(
            DistinguishedName::builder()
                .common_name(name.to_string())
                .organization("Example Corp".to_string())
                .build(),
        )
        .validity(Validity::for_days(365))
        .serial_number(vec![0x01])
        .build();

    let cert = Certificate::new_self_signed(&params, &key).unwrap();
    Bundle::new(name, key, cert)
}
