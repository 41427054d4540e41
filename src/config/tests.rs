use super::load_config;
use super::settings::Settings;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.server.address(), "0.0.0.0:8000");
    assert_eq!(settings.relay.message_prefix, "📦 ");
    assert_eq!(settings.log.level, "info");
}

#[test]
#[serial]
fn test_load_config_without_sources_uses_defaults() {
    // empty cwd: no .env and no config/default.*
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    let cfg = temp_env::with_vars_unset(
        [
            "WSRELAY__SERVER__HOST",
            "WSRELAY__SERVER__PORT",
            "WSRELAY__RELAY__MESSAGE_PREFIX",
            "WSRELAY__LOG__LEVEL",
        ],
        load_config,
    );

    env::set_current_dir(orig).expect("restore cwd");

    let cfg = cfg.expect("load_config failed");
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 8000);
    assert_eq!(cfg.relay.message_prefix, "📦 ");
    assert_eq!(cfg.log.level, "info");
}

#[test]
fn test_address_brackets_ipv6_hosts() {
    let mut server = Settings::default().server;
    server.host = "::1".to_string();
    server.port = 9000;
    assert_eq!(server.address(), "[::1]:9000");
    assert!(server.address().parse::<std::net::SocketAddr>().is_ok());

    server.host = "127.0.0.1".to_string();
    assert_eq!(server.address(), "127.0.0.1:9000");

    server.host = "localhost".to_string();
    assert_eq!(server.address(), "localhost:9000");
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    temp_env::with_vars(
        [
            ("WSRELAY__SERVER__PORT", Some("9100")),
            ("WSRELAY__LOG__LEVEL", Some("debug")),
        ],
        || {
            let cfg = load_config().expect("load_config failed");
            assert_eq!(cfg.server.port, 9100);
            assert_eq!(cfg.server.host, "0.0.0.0");
            assert_eq!(cfg.log.level, "debug");
        },
    );
}

#[test]
#[serial]
fn test_load_config_from_file_overrides_defaults() {
    // load_config reads config/default.toml relative to the current dir
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    let toml = r#"
        [server]
        host = "127.0.0.1"
        port = 9000

        [relay]
        message_prefix = ">> "
    "#;
    fs::write("config/default.toml", toml).expect("write config file");

    let cfg = load_config();

    // restore cwd before asserting so a failure doesn't leak into other tests
    env::set_current_dir(orig).expect("restore cwd");

    let cfg = cfg.expect("load_config failed");
    assert_eq!(cfg.server.host, "127.0.0.1");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.relay.message_prefix, ">> ");
    assert_eq!(cfg.log.level, "info");
}
