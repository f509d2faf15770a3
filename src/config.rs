use std::path::{Path, PathBuf};

use compact_str::CompactString;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::{
    client::config::DEFAULT_BASE_URL,
    result::{Result, VibeError},
};

/// Persisted user settings, stored as TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VibeConfig {
    pub api_url: CompactString,
    pub timeout_secs: u64,
    /// Tracing filter for the log file, e.g. `debug` or `vibecheck=trace`; `off` disables it
    pub log_level: Option<CompactString>,
    pub log_dir: Option<PathBuf>,
}

impl Default for VibeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.into(),
            timeout_secs: 30,
            log_level: None,
            log_dir: None,
        }
    }
}

impl VibeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(VibeError::config_validation_error(
                "timeout_secs",
                "timeout must be greater than zero",
            ));
        }

        if url::Url::parse(&self.api_url).is_err() {
            return Err(VibeError::config_validation_error(
                "api_url",
                "api_url is not a valid URL",
            ));
        }

        Ok(())
    }

    pub fn logging_disabled(&self) -> bool {
        self.log_level
            .as_deref()
            .is_some_and(|l| l.eq_ignore_ascii_case("off"))
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dirs) = BaseDirs::new() {
        dirs.config_dir().join("vibecheck.toml")
    } else {
        PathBuf::from("vibecheck.toml")
    }
}

/// Default directory for the rolling log file
pub fn default_log_dir() -> PathBuf {
    if let Some(dirs) = BaseDirs::new() {
        dirs.cache_dir().join("vibecheck")
    } else {
        PathBuf::from("vibecheck-logs")
    }
}

/// Load the config file, falling back to defaults when it does not exist yet
pub fn load_config(config_file: &Path) -> Result<VibeConfig> {
    if !config_file.exists() {
        return Ok(VibeConfig::default());
    }

    let config: VibeConfig = confy::load_path(config_file)
        .map_err(|e| VibeError::config_load_error(config_file.to_path_buf(), e))?;
    config.validate()?;

    Ok(config)
}

pub fn save_config(config_file: &Path, config: &VibeConfig) -> Result<()> {
    confy::store_path(config_file, config)
        .map_err(|e| VibeError::config_save_error(config_file.to_path_buf(), e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("vibecheck-does-not-exist/vibecheck.toml");
        assert_eq!(load_config(&path).unwrap(), VibeConfig::default());
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = std::env::temp_dir().join(format!("vibecheck-config-{}", std::process::id()));
        let path = dir.join("vibecheck.toml");
        let config = VibeConfig {
            api_url: "http://localhost:8080".into(),
            timeout_secs: 10,
            log_level: Some("debug".into()),
            log_dir: None,
        };

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let config = VibeConfig { timeout_secs: 0, ..VibeConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(VibeError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn off_disables_logging() {
        let config = VibeConfig { log_level: Some("Off".into()), ..VibeConfig::default() };
        assert!(config.logging_disabled());
        assert!(!VibeConfig::default().logging_disabled());
    }
}
