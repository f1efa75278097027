use std::fs;

use snippets::error::{ConfigError, Error};
use snippets::infrastructure::config::Config;

fn write_temp_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("snippets.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(
        &dir,
        r#"
[logging]
level = "warn"

[watcher]
polling_interval_ms = 1000
timeout_ms = 30000

[storage]
path = "steps.sqlite"

[session]
scope = "staking-e2e"
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.watcher.polling_interval().as_secs(), 1);
    assert_eq!(config.watcher.timeout().as_secs(), 30);
    assert_eq!(config.storage.path, "steps.sqlite");
    assert_eq!(config.storage.busy_timeout_ms, 5000);
}

#[test]
fn config_rejects_zero_pool_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(
        &dir,
        r#"
[storage]
pool_size = 0

[session]
scope = "s"
"#,
    );

    let result = Config::load(&path);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "pool_size",
            ..
        }))
    ));
}

#[test]
fn config_rejects_timeout_shorter_than_interval() {
    let toml = r#"
[watcher]
polling_interval_ms = 6000
timeout_ms = 3000
"#;
    let result = Config::parse_toml_with(toml, |_| None);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "timeout_ms",
            ..
        }))
    ));
}
