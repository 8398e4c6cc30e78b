//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `CAMPUS_API_BASE_URL`: Backend base URL (required)
//! - `CAMPUS_API_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `CAMPUS_OFFLINE`: Serve fixtures instead of the backend (true/false)
//!
//! ## File Locations
//! The loader probes `campus.json` / `campus.toml` in the working
//! directory, its parents, and next to the executable.

use std::path::{Path, PathBuf};

use campus_domain::{ClientConfig, DEFAULT_TIMEOUT_SECS};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(String),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    #[error("config file not found: {0}")]
    FileNotFound(String),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config format: {0}")]
    Format(String),
}

/// Load configuration with automatic fallback strategy
///
/// Environment variables win; a config file is only consulted when the
/// environment is incomplete.
///
/// # Errors
/// Returns `ConfigError` if neither source yields a usable configuration.
pub fn load() -> Result<ClientConfig, ConfigError> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "environment incomplete, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `CAMPUS_API_BASE_URL` must be set; the other variables fall back to
/// their defaults.
pub fn load_from_env() -> Result<ClientConfig, ConfigError> {
    let base_url = env_var("CAMPUS_API_BASE_URL")?;
    let timeout_secs = match std::env::var("CAMPUS_API_TIMEOUT_SECS") {
        Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
            key: "CAMPUS_API_TIMEOUT_SECS".to_string(),
            message: e.to_string(),
        })?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };
    let offline = env_bool("CAMPUS_OFFLINE", false);

    Ok(ClientConfig { base_url, timeout_secs, offline })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is
/// detected by extension (`.json` or `.toml`).
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::FileNotFound(p.display().to_string()));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ConfigError::FileNotFound("no config file found in any standard location".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)?;
    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig, ConfigError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ConfigError::Format(format!("invalid TOML: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ConfigError::Format(format!("invalid JSON: {}", e))),
        _ => Err(ConfigError::Format(format!("unsupported extension: {}", extension))),
    }
}

/// Probe the standard locations for a config file
///
/// Checks the working directory, up to two parent directories, and the
/// executable's directory. Returns the first file that exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("campus.json"),
            cwd.join("campus.toml"),
            cwd.join("../campus.json"),
            cwd.join("../campus.toml"),
            cwd.join("../../campus.json"),
            cwd.join("../../campus.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![exe_dir.join("campus.json"), exe_dir.join("campus.toml")]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
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

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("CAMPUS_TEST_BOOL", "yes");
        assert!(env_bool("CAMPUS_TEST_BOOL", false));
        std::env::set_var("CAMPUS_TEST_BOOL", "OFF");
        assert!(!env_bool("CAMPUS_TEST_BOOL", true));
        std::env::remove_var("CAMPUS_TEST_BOOL");
        assert!(env_bool("CAMPUS_TEST_BOOL", true));
        assert!(!env_bool("CAMPUS_TEST_BOOL", false));
    }

    #[test]
    fn test_load_from_env_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("CAMPUS_API_BASE_URL", "https://api.campus.test/api");
        std::env::remove_var("CAMPUS_API_TIMEOUT_SECS");
        std::env::remove_var("CAMPUS_OFFLINE");

        let config = load_from_env().unwrap();
        assert_eq!(config.base_url, "https://api.campus.test/api");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(!config.offline);

        std::env::remove_var("CAMPUS_API_BASE_URL");
    }

    #[test]
    fn test_load_from_env_missing_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::remove_var("CAMPUS_API_BASE_URL");
        let err = load_from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }

    #[test]
    fn test_load_from_env_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("CAMPUS_API_BASE_URL", "https://api.campus.test/api");
        std::env::set_var("CAMPUS_API_TIMEOUT_SECS", "soon");

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        std::env::remove_var("CAMPUS_API_BASE_URL");
        std::env::remove_var("CAMPUS_API_TIMEOUT_SECS");
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
base_url = "https://api.campus.test/api"
timeout_secs = 10
offline = true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("toml");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).unwrap();
        assert_eq!(config.base_url, "https://api.campus.test/api");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.offline);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_json_with_defaults() {
        let json_content = r#"{ "base_url": "http://localhost:5000/api" }"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let config = load_from_file(Some(path.clone())).unwrap();
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(!config.offline);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Some(PathBuf::from("/nonexistent/campus.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(br#"{ "base_url": "#).unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::copy(temp_file.path(), &path).unwrap();

        let err = load_from_file(Some(path.clone())).unwrap_err();
        assert!(matches!(err, ConfigError::Format(_)));

        std::fs::remove_file(path).ok();
    }
}
