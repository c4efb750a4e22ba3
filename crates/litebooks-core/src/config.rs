//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/litebooks/config.toml)
//! 3. Environment variables (LITEBOOKS_* prefix)
//!
//! Environment variables take precedence over config file values. A missing
//! or unreadable configuration never fails the application: without a remote
//! endpoint and key the client runs in local-only mode.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "LITEBOOKS";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote store endpoint URL
    #[serde(default)]
    pub remote_url: Option<String>,

    /// Remote store access key
    #[serde(default)]
    pub remote_key: Option<String>,

    /// Directory for local state (debug log)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log file override (defaults to {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_url: None,
            remote_key: None,
            data_dir: default_data_dir(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (LITEBOOKS_REMOTE_URL, LITEBOOKS_REMOTE_KEY,
    ///    LITEBOOKS_DATA_DIR)
    /// 2. Config file (~/.config/litebooks/config.toml or LITEBOOKS_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, swallowing every failure into the default.
    ///
    /// A broken config file degrades to local-only mode instead of aborting.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Whether the remote store is reachable in principle: both the endpoint
    /// URL and the access key are present and non-empty.
    pub fn is_configured(&self) -> bool {
        matches!(
            (&self.remote_url, &self.remote_key),
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty()
        )
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // LITEBOOKS_REMOTE_URL
        if let Ok(val) = std::env::var(format!("{}_REMOTE_URL", ENV_PREFIX)) {
            self.remote_url = if val.is_empty() { None } else { Some(val) };
        }

        // LITEBOOKS_REMOTE_KEY
        if let Ok(val) = std::env::var(format!("{}_REMOTE_KEY", ENV_PREFIX)) {
            self.remote_key = if val.is_empty() { None } else { Some(val) };
        }

        // LITEBOOKS_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }
    }

    /// Get the config file path
    ///
    /// Can be overridden with the LITEBOOKS_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("litebooks")
            .join("config.toml")
    }

    /// Path of the TUI debug log
    pub fn log_file_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("litebooks")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "LITEBOOKS_REMOTE_URL",
        "LITEBOOKS_REMOTE_KEY",
        "LITEBOOKS_DATA_DIR",
        "LITEBOOKS_CONFIG",
    ];

    #[test]
    fn test_default_config_is_unconfigured() {
        let config = Config::default();
        assert!(config.remote_url.is_none());
        assert!(config.remote_key.is_none());
        assert!(!config.is_configured());
        assert!(config.data_dir.ends_with("litebooks"));
    }

    #[test]
    fn test_is_configured_requires_both_values() {
        let mut config = Config::default();
        config.remote_url = Some("https://demo.example.co".to_string());
        assert!(!config.is_configured());

        config.remote_key = Some(String::new());
        assert!(!config.is_configured());

        config.remote_key = Some("anon-key".to_string());
        assert!(config.is_configured());

        config.remote_url = Some(String::new());
        assert!(!config.is_configured());
    }

    #[test]
    fn test_env_override_remote_values() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LITEBOOKS_REMOTE_URL", "https://demo.example.co");
        env::set_var("LITEBOOKS_REMOTE_KEY", "anon-key");
        config.apply_env_overrides();

        assert_eq!(
            config.remote_url,
            Some("https://demo.example.co".to_string())
        );
        assert_eq!(config.remote_key, Some("anon-key".to_string()));
        assert!(config.is_configured());

        // Empty string clears the value
        env::set_var("LITEBOOKS_REMOTE_KEY", "");
        config.apply_env_overrides();
        assert!(config.remote_key.is_none());
        assert!(!config.is_configured());
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("LITEBOOKS_DATA_DIR", "/tmp/litebooks-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/litebooks-test"));
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            remote_url = "https://demo.example.co"
            remote_key = "anon-key"
            data_dir = "/custom/data"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert!(config.is_configured());
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        // Should return defaults when file doesn't exist
        assert!(!config.is_configured());
    }

    #[test]
    fn test_load_or_default_swallows_parse_errors() {
        let _guard = EnvGuard::new(ENV_VARS);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "remote_url = [this is not toml").unwrap();

        env::set_var("LITEBOOKS_CONFIG", &path);
        let config = Config::load_or_default();
        assert!(!config.is_configured());
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            remote_url: Some("https://demo.example.co".to_string()),
            remote_key: Some("anon-key".to_string()),
            data_dir: PathBuf::from("/data/litebooks"),
            log_file: None,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("remote_url"));
        assert!(toml_str.contains("remote_key"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.remote_url, config.remote_url);
        assert_eq!(parsed.remote_key, config.remote_key);
        assert_eq!(parsed.data_dir, config.data_dir);
    }

    #[test]
    fn test_log_file_path() {
        let config = Config {
            data_dir: PathBuf::from("/data/litebooks"),
            ..Config::default()
        };
        assert_eq!(
            config.log_file_path(),
            PathBuf::from("/data/litebooks/debug.log")
        );

        let config = Config {
            log_file: Some(PathBuf::from("/tmp/lb.log")),
            ..Config::default()
        };
        assert_eq!(config.log_file_path(), PathBuf::from("/tmp/lb.log"));
    }
}
