use super::Result;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Environment variables consulted by [`ProcessEnv::load`].
pub const ENV_API_URL: &str = "GESTOCK_API_URL";
pub const ENV_BASE_URL: &str = "GESTOCK_BASE_URL";
pub const ENV_AUTH_URL: &str = "GESTOCK_AUTH_URL";
pub const ENV_AUTH_SECRET: &str = "GESTOCK_AUTH_SECRET";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub default_profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Profile {
    pub api_url: String,
    pub email: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub cache_enabled: Option<bool>,
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: e.to_string(),
            })?;

        Ok(config)
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|_| StorageError::ConfigSaveFailed)?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join("gestock-cli").join("config.toml"))
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }
}

/// Process-environment configuration: base URLs and the auth secret.
///
/// Missing values are logged as warnings and never fatal; the TOML
/// profile supplies fallbacks for the API URL.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv {
    pub api_url: Option<String>,
    pub base_url: Option<String>,
    pub auth_url: Option<String>,
    pub auth_secret: Option<String>,
}

impl ProcessEnv {
    pub fn load() -> Self {
        Self {
            api_url: Self::var(ENV_API_URL),
            base_url: Self::var(ENV_BASE_URL),
            auth_url: Self::var(ENV_AUTH_URL),
            auth_secret: Self::var(ENV_AUTH_SECRET),
        }
    }

    fn var(name: &str) -> Option<String> {
        match std::env::var(name) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => {
                log::warn!("Environment variable {} is missing or empty", name);
                None
            }
        }
    }

    /// Effective API URL: environment wins over the profile.
    pub fn resolve_api_url(&self, profile: &Profile) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| profile.api_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_profile() -> Profile {
        Profile {
            api_url: "http://localhost:8080".to_string(),
            email: Some("alice@example.test".to_string()),
            timeout_seconds: Some(30),
            cache_enabled: Some(true),
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_profile, None);
        assert_eq!(config.profiles.len(), 0);
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();
        config.set_profile("test".to_string(), sample_profile());

        let retrieved = config.get_profile("test");
        assert!(retrieved.is_some());
        if let Some(retrieved) = retrieved {
            assert_eq!(retrieved.api_url, "http://localhost:8080");
            assert_eq!(retrieved.timeout_seconds, Some(30));
            assert_eq!(retrieved.cache_enabled, Some(true));
        }
        assert!(config.get_profile("nonexistent").is_none());
    }

    #[test]
    fn test_config_load_save() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.default_profile = Some("test".to_string());
        config.profiles.insert("test".to_string(), sample_profile());

        config
            .save(Some(config_path.clone()))
            .expect("Failed to save config");

        let loaded_config = Config::load(Some(config_path)).expect("Failed to load config");

        assert_eq!(loaded_config.default_profile, config.default_profile);
        assert_eq!(loaded_config.profiles.len(), 1);
        assert!(loaded_config.get_profile("test").is_some());
    }

    #[test]
    fn test_load_nonexistent_file_yields_default() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load(Some(temp_dir.path().join("missing.toml")));
        assert!(config.is_ok());
        assert_eq!(config.unwrap().profiles.len(), 0);
    }

    #[test]
    fn test_load_invalid_toml_is_parse_error() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "not [valid toml").expect("write failed");

        let result = Config::load(Some(config_path));
        assert!(matches!(
            result,
            Err(StorageError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_env_overrides_profile_api_url() {
        let env = ProcessEnv {
            api_url: Some("http://override.test".to_string()),
            ..Default::default()
        };
        assert_eq!(env.resolve_api_url(&sample_profile()), "http://override.test");

        let env = ProcessEnv::default();
        assert_eq!(env.resolve_api_url(&sample_profile()), "http://localhost:8080");
    }
}
