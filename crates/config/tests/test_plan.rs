//! Test plan for the `waypost-config` crate.
//!
//! These tests exercise the configuration loader across default handling,
//! file discovery, and environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::TempDir;

use waypost_config::{load, AppConfig};

const ENV_VARS_TO_RESET: &[&str] = &[
    "WAYPOST_CONFIG",
    "WAYPOST__DATABASE__MAX_CONNECTIONS",
    "WAYPOST__DATABASE__URL",
    "WAYPOST__HTTP__ADDRESS",
    "WAYPOST__HTTP__PORT",
    "WAYPOST__OPAQUE_ID__ALPHABET",
    "WAYPOST__OPAQUE_ID__MIN_LENGTH",
    "WAYPOST__OPAQUE_ID__SALT",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        Self {
            vars: Vec::new(),
            original_dir: None,
        }
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn set_current_dir(&mut self, dir: &Path) {
        if self.original_dir.is_none() {
            self.original_dir =
                Some(std::env::current_dir().expect("failed to capture current directory"));
        }
        std::env::set_current_dir(dir).expect("failed to set current directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(original) = self.original_dir.take() {
            let _ = std::env::set_current_dir(original);
        }

        while let Some((key, value)) = self.vars.pop() {
            match value {
                Some(val) => std::env::set_var(&key, val),
                None => std::env::remove_var(&key),
            }
        }
    }
}

fn write_config_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create config directories");
    }
    fs::write(path, contents).expect("failed to write config file");
}

#[test]
#[serial]
fn load_uses_default_values_when_no_files_found() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();
    ctx.set_current_dir(temp_dir.path());

    let config = load().expect("configuration load should succeed without files");
    let defaults = AppConfig::default();

    assert_eq!(config.http.address, defaults.http.address);
    assert_eq!(config.http.port, defaults.http.port);
    assert_eq!(config.database.url, defaults.database.url);
    assert_eq!(config.opaque_id.salt, defaults.opaque_id.salt);
    assert_eq!(config.opaque_id.min_length, defaults.opaque_id.min_length);
    assert_eq!(config.opaque_id.alphabet, defaults.opaque_id.alphabet);
}

#[test]
#[serial]
fn load_discovers_config_file_in_working_directory() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();

    write_config_file(
        temp_dir.path(),
        "waypost.toml",
        r#"
[http]
address = "0.0.0.0"
port = 9000

[opaque_id]
salt = "file-salt"
min_length = 12
"#,
    );

    ctx.set_current_dir(temp_dir.path());

    let config = load().expect("configuration load should succeed with file");

    assert_eq!(config.http.address, "0.0.0.0");
    assert_eq!(config.http.port, 9000);
    assert_eq!(config.opaque_id.salt, "file-salt");
    assert_eq!(config.opaque_id.min_length, 12);
    // Untouched sections keep their defaults.
    assert_eq!(config.database.url, AppConfig::default().database.url);
}

#[test]
#[serial]
fn load_respects_explicit_config_path() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();

    write_config_file(
        temp_dir.path(),
        "custom/location.toml",
        r#"
[database]
url = "sqlite://custom.db"
max_connections = 3
"#,
    );

    ctx.set_var(
        "WAYPOST_CONFIG",
        temp_dir.path().join("custom/location.toml").to_string_lossy(),
    );

    let config = load().expect("configuration load should succeed with explicit path");

    assert_eq!(config.database.url, "sqlite://custom.db");
    assert_eq!(config.database.max_connections, 3);
}

#[test]
#[serial]
fn environment_overrides_take_precedence_over_files() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut ctx = TestContext::new();
    ctx.reset_environment();

    write_config_file(
        temp_dir.path(),
        "waypost.toml",
        r#"
[opaque_id]
salt = "file-salt"
"#,
    );

    ctx.set_current_dir(temp_dir.path());
    ctx.set_var("WAYPOST__OPAQUE_ID__SALT", "env-salt");
    ctx.set_var("WAYPOST__HTTP__PORT", "8123");

    let config = load().expect("configuration load should succeed");

    assert_eq!(config.opaque_id.salt, "env-salt");
    assert_eq!(config.http.port, 8123);
}
