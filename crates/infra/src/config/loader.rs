//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Environment variables, when the required ones are present
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//! 3. JSON and TOML are both accepted; every section is optional
//!
//! ## Environment Variables
//! Required:
//! - `GEMINI_API_KEY`: AI gateway key (also overlaid onto file configs)
//! - `HEALTHPROD_DB_PATH`: SQLite file for the key-value store
//!
//! Optional:
//! - `HEALTHPROD_AI_MODEL`, `HEALTHPROD_AI_API_URL`
//! - `HEALTHPROD_AI_TIMEOUT_SECS`, `HEALTHPROD_AI_MAX_RETRIES`
//! - `HEALTHPROD_ONLINE`: start in online mode (true/false)
//! - `HEALTHPROD_DB_POOL_SIZE`
//! - `HEALTHPROD_REMINDER_INTERVAL`: reminder poll interval in seconds
//! - `HEALTHPROD_REMINDERS_ENABLED`
//! - `HEALTHPROD_WAKE_PHRASE`, `HEALTHPROD_VOICE_ENABLED`
//! - `HEALTHPROD_STARTING_COINS`, `HEALTHPROD_COINS_PER_ACTIVITY`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}` then `./healthprod.{json,toml}`
//! 2. `../config.{json,toml}` and `../../config.{json,toml}`
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use healthprod_domain::{Config, HealthProdError, Result};

const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `HealthProdError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            let mut config = load_from_file(None)?;
            overlay_api_key(&mut config);
            Ok(config)
        }
    }
}

/// Like [`load`], but falls back to defaults (plus `GEMINI_API_KEY`) when no
/// source is usable. Invalid files are still logged.
pub fn load_or_default() -> Config {
    load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Using default configuration");
        let mut config = Config::default();
        overlay_api_key(&mut config);
        config
    })
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `HealthProdError::Config` if required variables are missing
/// or any variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.ai.api_key = Some(env_var(API_KEY_VAR)?);
    config.storage.path = env_var("HEALTHPROD_DB_PATH")?;

    if let Some(model) = env_opt("HEALTHPROD_AI_MODEL") {
        config.ai.model = model;
    }
    if let Some(url) = env_opt("HEALTHPROD_AI_API_URL") {
        config.ai.api_url = url;
    }
    if let Some(timeout) = env_parse("HEALTHPROD_AI_TIMEOUT_SECS", "AI timeout")? {
        config.ai.timeout_secs = timeout;
    }
    if let Some(retries) = env_parse("HEALTHPROD_AI_MAX_RETRIES", "AI retry count")? {
        config.ai.max_retries = retries;
    }
    config.ai.online = env_bool("HEALTHPROD_ONLINE", config.ai.online);

    if let Some(size) = env_parse("HEALTHPROD_DB_POOL_SIZE", "pool size")? {
        config.storage.pool_size = size;
    }

    if let Some(interval) = env_parse("HEALTHPROD_REMINDER_INTERVAL", "reminder interval")? {
        config.reminders.poll_interval_secs = interval;
    }
    config.reminders.enabled = env_bool("HEALTHPROD_REMINDERS_ENABLED", config.reminders.enabled);

    if let Some(phrase) = env_opt("HEALTHPROD_WAKE_PHRASE") {
        config.voice.wake_phrase = phrase;
    }
    config.voice.enabled = env_bool("HEALTHPROD_VOICE_ENABLED", config.voice.enabled);

    if let Some(coins) = env_parse("HEALTHPROD_STARTING_COINS", "starting coins")? {
        config.rewards.starting_coins = coins;
    }
    if let Some(coins) = env_parse("HEALTHPROD_COINS_PER_ACTIVITY", "coins per activity")? {
        config.rewards.coins_per_activity = coins;
    }

    validate(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is picked by
/// file extension.
///
/// # Errors
/// Returns `HealthProdError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(HealthProdError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            HealthProdError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| HealthProdError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path).and_then(validate)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| HealthProdError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| HealthProdError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(HealthProdError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Values serde accepts but the runtime cannot use.
fn validate(config: Config) -> Result<Config> {
    if config.reminders.poll_interval_secs == 0 {
        return Err(HealthProdError::Config("reminder poll interval must be positive".into()));
    }
    if config.voice.wake_phrase.trim().is_empty() {
        return Err(HealthProdError::Config("wake phrase must not be empty".into()));
    }
    if config.storage.path.trim().is_empty() {
        return Err(HealthProdError::Config("storage path must not be empty".into()));
    }
    Ok(config)
}

fn overlay_api_key(config: &mut Config) {
    if config.ai.api_key.is_none() {
        config.ai.api_key = env_opt(API_KEY_VAR);
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| {
            [
                root.join("config.json"),
                root.join("config.toml"),
                root.join("healthprod.json"),
                root.join("healthprod.toml"),
                root.join("../config.json"),
                root.join("../config.toml"),
                root.join("../../config.json"),
                root.join("../../config.toml"),
            ]
        })
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `HealthProdError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        HealthProdError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Non-blank value of an optional variable.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| HealthProdError::Config(format!("Invalid {what}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const OPTIONAL_VARS: [&str; 11] = [
        "HEALTHPROD_AI_MODEL",
        "HEALTHPROD_AI_API_URL",
        "HEALTHPROD_AI_TIMEOUT_SECS",
        "HEALTHPROD_AI_MAX_RETRIES",
        "HEALTHPROD_ONLINE",
        "HEALTHPROD_DB_POOL_SIZE",
        "HEALTHPROD_REMINDER_INTERVAL",
        "HEALTHPROD_REMINDERS_ENABLED",
        "HEALTHPROD_WAKE_PHRASE",
        "HEALTHPROD_VOICE_ENABLED",
        "HEALTHPROD_STARTING_COINS",
    ];

    fn clear_env() {
        for key in OPTIONAL_VARS {
            std::env::remove_var(key);
        }
        std::env::remove_var("HEALTHPROD_COINS_PER_ACTIVITY");
        std::env::remove_var("HEALTHPROD_DB_PATH");
        std::env::remove_var(API_KEY_VAR);
    }

    fn write_with_extension(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for (value, expected) in
            [("1", true), ("TRUE", true), ("yes", true), ("on", true), ("0", false), ("off", false)]
        {
            std::env::set_var("HEALTHPROD_TEST_BOOL", value);
            assert_eq!(env_bool("HEALTHPROD_TEST_BOOL", !expected), expected, "value {value}");
        }

        std::env::remove_var("HEALTHPROD_TEST_BOOL");
        assert!(env_bool("HEALTHPROD_TEST_BOOL", true));
        assert!(!env_bool("HEALTHPROD_TEST_BOOL", false));
    }

    #[test]
    fn load_from_env_reads_all_sections() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(API_KEY_VAR, "test-key");
        std::env::set_var("HEALTHPROD_DB_PATH", "/tmp/healthprod-test.db");
        std::env::set_var("HEALTHPROD_AI_MODEL", "gemini-test");
        std::env::set_var("HEALTHPROD_ONLINE", "false");
        std::env::set_var("HEALTHPROD_DB_POOL_SIZE", "8");
        std::env::set_var("HEALTHPROD_REMINDER_INTERVAL", "15");
        std::env::set_var("HEALTHPROD_WAKE_PHRASE", "ok coach");
        std::env::set_var("HEALTHPROD_STARTING_COINS", "0");

        let result = load_from_env();
        clear_env();

        let config = result.expect("config from env");
        assert_eq!(config.ai.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.ai.model, "gemini-test");
        assert!(!config.ai.online);
        assert_eq!(config.storage.path, "/tmp/healthprod-test.db");
        assert_eq!(config.storage.pool_size, 8);
        assert_eq!(config.reminders.poll_interval_secs, 15);
        assert!(config.reminders.enabled);
        assert_eq!(config.voice.wake_phrase, "ok coach");
        assert_eq!(config.rewards.starting_coins, 0);
        assert_eq!(config.rewards.coins_per_activity, 10);
    }

    #[test]
    fn load_from_env_requires_api_key() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var("HEALTHPROD_DB_PATH", "/tmp/healthprod-test.db");

        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(HealthProdError::Config(msg)) if msg.contains(API_KEY_VAR)));
    }

    #[test]
    fn load_from_env_rejects_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var(API_KEY_VAR, "test-key");
        std::env::set_var("HEALTHPROD_DB_PATH", "/tmp/healthprod-test.db");
        std::env::set_var("HEALTHPROD_DB_POOL_SIZE", "lots");

        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(HealthProdError::Config(msg)) if msg.contains("pool size")));
    }

    #[test]
    fn load_from_env_rejects_zero_poll_interval() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var(API_KEY_VAR, "test-key");
        std::env::set_var("HEALTHPROD_DB_PATH", "/tmp/healthprod-test.db");
        std::env::set_var("HEALTHPROD_REMINDER_INTERVAL", "0");

        let result = load_from_env();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    fn load_from_file_json_with_partial_sections() {
        let path = write_with_extension(
            r#"{ "storage": { "path": "data/app.db" }, "voice": { "wake_phrase": "hey coach" } }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("json config");
        assert_eq!(config.storage.path, "data/app.db");
        assert_eq!(config.storage.pool_size, 4);
        assert_eq!(config.voice.wake_phrase, "hey coach");
        assert_eq!(config.ai.model, "gemini-2.5-flash");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn load_from_file_toml() {
        let path = write_with_extension(
            r#"
[ai]
model = "gemini-2.0-flash"
online = false

[reminders]
poll_interval_secs = 10
enabled = false
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("toml config");
        assert_eq!(config.ai.model, "gemini-2.0-flash");
        assert!(!config.ai.online);
        assert_eq!(config.reminders.poll_interval_secs, 10);
        assert!(!config.reminders.enabled);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/healthprod.json")));
        assert!(matches!(result, Err(HealthProdError::Config(_))));
    }

    #[test]
    fn load_from_file_invalid_json() {
        let path = write_with_extension(r#"{ "ai": { "model": "#, "json");
        let result = load_from_file(Some(path.clone()));
        assert!(matches!(result, Err(HealthProdError::Config(msg)) if msg.contains("JSON")));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn parse_config_unsupported_format() {
        let result = parse_config("a: b", &PathBuf::from("config.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn file_config_picks_up_api_key_from_env() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        std::env::set_var(API_KEY_VAR, "from-env");

        let mut config = parse_config("{}", Path::new("c.json")).unwrap();
        overlay_api_key(&mut config);
        clear_env();

        assert_eq!(config.ai.api_key.as_deref(), Some("from-env"));
    }
}
