use ::config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::client::{ClientConfig, GENERATE_PATH};
use crate::error::{HukukError, Result};

const CONFIG_DIR_NAME: &str = ".hukuk";
const CONFIG_FILE_NAME: &str = "config.yaml";
/// Overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "HUKUK_CONFIG_DIR";
const ENV_PREFIX: &str = "HUKUK";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    /// Document service root
    pub base_url: String,
    /// Path of the generate endpoint
    pub generate_path: String,
    /// Request timeout in seconds, 0 means none
    pub timeout: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            generate_path: GENERATE_PATH.to_string(),
            timeout: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiSettings {
    /// Seconds a notification stays up
    pub notification_seconds: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            notification_seconds: 5,
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|e| HukukError::Config(format!("Failed to set permissions on {}: {}", path.display(), e)))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

impl Config {
    /// Get the configuration directory
    pub fn config_path() -> Result<PathBuf> {
        if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        let home_dir = dirs::home_dir()
            .ok_or_else(|| HukukError::Config("Could not determine home directory".to_string()))?;

        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file full path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Initialize configuration directory and file
    pub fn initialize() -> Result<()> {
        Self::initialize_at(&Self::config_file_path()?)
    }

    /// Create the directory and a default file at `config_file` if missing
    pub fn initialize_at(config_file: &Path) -> Result<()> {
        if let Some(config_dir) = config_file.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)
                    .map_err(|e| HukukError::Config(format!("Failed to create config directory: {}", e)))?;
                restrict_permissions(config_dir, 0o700)?;
            }
        }

        if !config_file.exists() {
            Self::default().save_to(config_file)?;
        }

        Ok(())
    }

    /// Load configuration from the default file plus environment overrides
    pub fn load() -> Result<Self> {
        let config_file = Self::config_file_path()?;
        Self::initialize_at(&config_file)?;
        Self::load_from(&config_file)
    }

    /// Load configuration from a file; `HUKUK_*` environment variables win
    pub fn load_from(config_file: &Path) -> Result<Self> {
        ::config::Config::builder()
            .add_source(File::from(config_file).format(FileFormat::Yaml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|built| built.try_deserialize())
            .map_err(|e| HukukError::Config(format!("Failed to load config: {}", e)))
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        let config_file = Self::config_file_path()?;
        Self::initialize_at(&config_file)?;
        self.save_to(&config_file)
    }

    pub fn save_to(&self, config_file: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| HukukError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_file, yaml)
            .map_err(|e| HukukError::Config(format!("Failed to write config file: {}", e)))?;

        restrict_permissions(config_file, 0o600)
    }

    /// Client settings for the document service
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            generate_path: self.api.generate_path.clone(),
            timeout: self.api.timeout,
            ..Default::default()
        }
    }

    /// Set a configuration value by key path (does not save)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parse_seconds = |value: &str| {
            value
                .parse::<u64>()
                .map_err(|_| HukukError::Config(format!("'{}' expects a number of seconds, got '{}'", key, value)))
        };

        match key {
            "api.base_url" => {
                url::Url::parse(value)
                    .map_err(|e| HukukError::Config(format!("Invalid URL '{}': {}", value, e)))?;
                self.api.base_url = value.to_string();
            }
            "api.generate_path" => {
                self.api.generate_path = value.to_string();
            }
            "api.timeout" => {
                self.api.timeout = parse_seconds(value)?;
            }
            "ui.notification_seconds" => {
                self.ui.notification_seconds = parse_seconds(value)?;
            }
            _ => {
                return Err(HukukError::Config(format!("Unknown configuration key: {}", key)));
            }
        }

        Ok(())
    }

    /// Get a configuration value by key path
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.generate_path" => Some(self.api.generate_path.clone()),
            "api.timeout" => Some(self.api.timeout.to_string()),
            "ui.notification_seconds" => Some(self.ui.notification_seconds.to_string()),
            _ => None,
        }
    }

    /// All known configuration keys
    pub fn keys() -> &'static [&'static str] {
        &["api.base_url", "api.generate_path", "api.timeout", "ui.notification_seconds"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.ui.notification_seconds, 5);
    }

    #[test]
    #[serial]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        Config::initialize_at(&path).unwrap();

        let mut config = Config::load_from(&path).unwrap();
        config.set("api.base_url", "https://hukuk.example.com").unwrap();
        config.set("api.timeout", "30").unwrap();
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.api.base_url, "https://hukuk.example.com");
        assert_eq!(reloaded.client_config().timeout, 30);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        Config::default().save_to(&path).unwrap();

        env::set_var("HUKUK_API__BASE_URL", "http://10.0.0.5:9000");
        let config = Config::load_from(&path);
        env::remove_var("HUKUK_API__BASE_URL");

        assert_eq!(config.unwrap().api.base_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("api.timeout", "soon").is_err());
        assert!(config.set("api.base_url", "not a url").is_err());
        assert!(config.set("law.key", "x").is_err());
    }

    #[test]
    fn test_get_known_keys() {
        let config = Config::default();
        for key in Config::keys() {
            assert!(config.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(config.get("api.generate_path").as_deref(), Some("/api/documents/ai-generate"));
        assert_eq!(config.get("nope"), None);
    }
}
