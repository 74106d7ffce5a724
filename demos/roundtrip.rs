use certbundle::bundle::Bundle;
use certbundle::codec;
use certbundle::key::PrivateKey;
use certbundle::state::CertificateState;

fn main() -> Result<(), certbundle::error::BundleError> {
    env_logger::init();

    // Generate a P-521 key and a self-signed certificate for it
    let bundle = Bundle::self_signed("alice", PrivateKey::generate())?;

    let (key_pem, cert_pem) = codec::encode_pem(&bundle)?;
    println!("Certificate PEM:\n{}", cert_pem);

    // The key and certificate come back as two independent buffers.
    let (key_der, cert_der) = codec::encode(&bundle)?;
    println!(
        "Key: {} bytes DER, {} bytes PEM; certificate: {} bytes DER",
        key_der.len(),
        key_pem.len(),
        cert_der.len()
    );

    let restored = codec::decode(bundle.name(), &key_der, &cert_der)?;
    let state = CertificateState::default();
    println!(
        "Restored bundle {:?} (CN={}), state {}",
        restored.name(),
        restored.cert().subject().common_name,
        state
    );

    Ok(())
}
