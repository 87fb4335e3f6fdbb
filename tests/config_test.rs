//! Server configuration loading tests.

use std::io::Write;
use tictactoe_engine::Mark;
use tictactoe_minimax::ServerConfig;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.port(), 3000);
    assert_eq!(*config.engine_mark(), Mark::X);
    assert_eq!(config.human_mark(), Mark::O);
    assert!(config.static_dir().is_none());
}

#[test]
fn test_file_values_override_defaults() {
    let file = write_config(
        r#"
host = "0.0.0.0"
port = 8080
engine_mark = "O"
static_dir = "static"
"#,
    );
    let config = ServerConfig::from_file(file.path()).unwrap();

    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 8080);
    assert_eq!(*config.engine_mark(), Mark::O);
    assert_eq!(config.human_mark(), Mark::X);
    assert_eq!(
        config.static_dir().as_deref(),
        Some(std::path::Path::new("static"))
    );
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let file = write_config("port = 9000\n");
    let config = ServerConfig::from_file(file.path()).unwrap();

    assert_eq!(*config.port(), 9000);
    assert_eq!(config.host(), "127.0.0.1");
    assert_eq!(*config.engine_mark(), Mark::X);
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, ServerConfig::default());

    assert!(ServerConfig::from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_malformed_file_is_error() {
    let file = write_config("port = \"not a number\"\n");
    let err = ServerConfig::load_or_default(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"), "{err}");
    assert!(err.line > 0);

    let file = write_config("engine_mark = \"Z\"\n");
    assert!(ServerConfig::from_file(file.path()).is_err());
}

#[test]
fn test_cli_overrides_replace_file_values() {
    let file = write_config("host = \"0.0.0.0\"\nport = 8080\n");
    let config = ServerConfig::from_file(file.path())
        .unwrap()
        .with_host(None)
        .with_port(Some(4000));

    assert_eq!(config.host(), "0.0.0.0");
    assert_eq!(*config.port(), 4000);
}
