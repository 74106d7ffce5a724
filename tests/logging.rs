mod util;

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

use certbundle::codec;

/// Keeps every record emitted by this crate so the test can inspect them.
struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if !record.target().starts_with("certbundle") {
            return;
        }
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

// One test per binary: the logger is process-global.
#[test]
fn codec_logs_only_debug_records_without_key_material() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let bundle = util::generate_bundle("alice");
    let scalar = bundle.key().as_secret_key().to_bytes();
    let scalar_hex: String = scalar.iter().map(|b| format!("{b:02x}")).collect();

    let (key_der, cert_der) = codec::encode(&bundle).unwrap();
    codec::decode("alice", &key_der, &cert_der).unwrap();
    codec::encode_pem(&bundle).unwrap();

    let mut corrupted = key_der.to_vec();
    corrupted[20] ^= 0xff;
    let key_err = codec::decode("alice", &corrupted, &cert_der).unwrap_err();
    let cert_err = codec::decode("alice", &key_der, &cert_der[1..]).unwrap_err();

    let records = LOGGER.records.lock().unwrap().clone();
    assert!(!records.is_empty());

    for (level, message) in &records {
        assert_eq!(*level, Level::Debug, "{message}");
        assert!(!message.contains(&scalar_hex), "{message}");
        assert!(!message.contains(&scalar_hex.to_uppercase()), "{message}");
    }

    let messages: Vec<&str> = records.iter().map(|(_, m)| m.as_str()).collect();
    assert!(messages.iter().any(|m| m.contains(&key_err.to_string())));
    assert!(messages.iter().any(|m| m.contains(&cert_err.to_string())));
    assert!(messages.contains(&"encoded bundle alice"));
    assert!(messages.contains(&"decoded bundle alice"));
}
