//! Client configuration structures
//!
//! Loaded by `campus-client` from environment variables or a config file;
//! kept here so composition code can pass configuration around without
//! depending on the I/O crate.

use serde::{Deserialize, Serialize};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Facade configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend API, e.g. `https://api.campus.example/api`
    pub base_url: String,
    /// Wall-clock limit for every request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Serve fixture data instead of performing network I/O
    #[serde(default)]
    pub offline: bool,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            offline: false,
        }
    }
}
