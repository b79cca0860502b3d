use std::fs;
use tempfile::tempdir;
use valida_kernel::config::{ConfigError, load_config};
use valida_kernel::domain::config::{ApiConfig, RuntimeProfile};

#[test]
fn loads_toml_file_over_defaults() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8081

[cpf]
max_body_bytes = 1024

[runtime]
profile = "memory_efficient"
"#,
    )
    .expect("write config");

    let cfg: ApiConfig = load_config(Some(&path)).expect("config should load");

    assert_eq!(cfg.server.port, 8081);
    assert_eq!(cfg.cpf.max_body_bytes, 1024);
    assert_eq!(cfg.runtime.profile, RuntimeProfile::MemoryEfficient);
    assert_eq!(cfg.logging.level, "info", "missing sections keep their defaults");
}

#[test]
fn missing_file_is_an_error_with_context() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let err = load_config::<ApiConfig>(Some(&path)).expect_err("missing file must fail");

    let ConfigError::Config { context, .. } = &err;
    assert_eq!(context.as_deref(), Some("Failed to build config"));
    assert!(err.to_string().starts_with("Config error (Failed to build config)"));
}

#[test]
fn malformed_values_fail_deserialization() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("server.toml");
    fs::write(&path, "[server]\nport = \"not-a-port\"\n").expect("write config");

    let err = load_config::<ApiConfig>(Some(&path)).expect_err("bad port must fail");

    assert!(err.to_string().contains("Failed to deserialize config"));
}
