use super::load_config;
use super::settings::Settings;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.simulator.queue_capacity, 10_000);
    assert_eq!(settings.simulator.max_message_size, 10 * 1024 * 1024);
    assert_eq!(settings.simulator.max_batch_size, 100);
    assert_eq!(settings.simulator.dead_letter_capacity, 1000);
    assert_eq!(settings.simulator.retention_seconds, 604_800);
    assert_eq!(settings.simulator.ack_deadline_seconds, 60);
    assert_eq!(settings.logging.level, "info");
}

#[test]
#[serial]
fn load_config_reads_env_overrides() {
    temp_env::with_vars(
        [
            ("PUBSIM_SIMULATOR__QUEUE_CAPACITY", Some("5")),
            ("PUBSIM_LOGGING__LEVEL", Some("debug")),
        ],
        || {
            let cfg = load_config().expect("load_config failed");
            assert_eq!(cfg.simulator.queue_capacity, 5);
            assert_eq!(cfg.logging.level, "debug");
            // untouched values keep their defaults
            assert_eq!(cfg.simulator.max_batch_size, 100);
        },
    );
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    let toml = r#"
        [simulator]
        max_batch_size = 10
        dead_letter_capacity = 3

        [logging]
        level = "warn"
    "#;
    fs::write("config/default.toml", toml).expect("write config file");

    let cfg = load_config();

    env::set_current_dir(orig).expect("restore cwd");

    let cfg = cfg.expect("load_config failed");
    assert_eq!(cfg.simulator.max_batch_size, 10);
    assert_eq!(cfg.simulator.dead_letter_capacity, 3);
    assert_eq!(cfg.simulator.queue_capacity, 10_000);
    assert_eq!(cfg.logging.level, "warn");
}
