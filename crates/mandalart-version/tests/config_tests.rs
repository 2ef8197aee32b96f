use mandalart_version::{ConfigError, ServiceConfig};
use std::io::Write;

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "create_note = \"first draft\"").unwrap();
    writeln!(file, "skip_identity_reorder = false").unwrap();

    let config = ServiceConfig::load(file.path()).unwrap();
    assert_eq!(config.create_note, "first draft");
    assert_eq!(config.reorder_note, ServiceConfig::default().reorder_note);
    assert!(!config.skip_identity_reorder);
}

#[test]
fn wrong_field_type_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "reorder_note = 3").unwrap();

    let err = ServiceConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
