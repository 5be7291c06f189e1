//! Configuration handling for the planner

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the estimation service base URL
pub const API_URL_ENV: &str = "BUILDPLAN_API_URL";

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_SERVICE_ORIGIN: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(30_000);

const LOG_FILE: &str = "buildplan.log";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "buildplan", "buildplan-tui")
}

/// Where the log file goes; `None` when no home directory is known
pub fn log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(LOG_FILE))
}

/// User configuration, every key optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Base URL of the estimation service, absolute or a path like `/api`
    pub api_url: Option<String>,
    /// Origin a path-only base is resolved against
    pub service_origin: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

impl PlannerConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load the user configuration, writing the defaults on first run so
    /// the file is there to edit
    pub fn load_or_init() -> Result<Self> {
        match Self::config_path() {
            Some(path) if !path.exists() => {
                let config = Self::default();
                config.save_to(&path)?;
                Ok(config)
            }
            _ => Self::load(),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Absolute base URL of the estimation service, honoring
    /// [`API_URL_ENV`]
    pub fn base_url(&self) -> String {
        self.base_url_with(std::env::var(API_URL_ENV).ok().as_deref())
    }

    /// Base URL with an explicit override in place of the environment
    pub fn base_url_with(&self, env_override: Option<&str>) -> String {
        let base = env_override
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or(self.api_url.as_deref().map(str::trim).filter(|s| !s.is_empty()))
            .unwrap_or(DEFAULT_API_BASE);
        let origin = self
            .service_origin
            .as_deref()
            .unwrap_or(DEFAULT_SERVICE_ORIGIN);
        resolve_base(base, origin)
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
    }
}

/// Join a path-only base onto `origin`; absolute URLs pass through
fn resolve_base(base: &str, origin: &str) -> String {
    if base.starts_with("http://") || base.starts_with("https://") {
        return base.trim_end_matches('/').to_string();
    }
    let origin = origin.trim_end_matches('/');
    let path = base.trim_matches('/');
    if path.is_empty() {
        origin.to_string()
    } else {
        format!("{origin}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("buildplan-config-{}", uuid::Uuid::new_v4()))
            .join("config.json")
    }

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert!(config.api_url.is_none());
        assert!(config.service_origin.is_none());
        assert!(config.request_timeout_ms.is_none());
    }

    #[test]
    fn test_default_base_resolves_against_local_origin() {
        let config = PlannerConfig::default();
        assert_eq!(config.base_url_with(None), "http://127.0.0.1:8000/api");
    }

    #[test]
    fn test_absolute_api_url_is_used_as_is() {
        let config = PlannerConfig {
            api_url: Some("https://plans.example.com/v2/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.base_url_with(None), "https://plans.example.com/v2");
    }

    #[test]
    fn test_env_override_beats_file() {
        let config = PlannerConfig {
            api_url: Some("https://file.example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.base_url_with(Some("http://env.example.com:9000")),
            "http://env.example.com:9000"
        );
    }

    #[test]
    fn test_blank_env_override_is_ignored() {
        let config = PlannerConfig::default();
        assert_eq!(config.base_url_with(Some("  ")), "http://127.0.0.1:8000/api");
    }

    #[test]
    fn test_path_base_uses_configured_origin() {
        let config = PlannerConfig {
            api_url: Some("/backend/".to_string()),
            service_origin: Some("http://10.0.0.5:8080/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.base_url_with(None), "http://10.0.0.5:8080/backend");
    }

    #[test]
    fn test_request_timeout() {
        assert_eq!(
            PlannerConfig::default().request_timeout(),
            Duration::from_secs(30)
        );
        let config = PlannerConfig {
            request_timeout_ms: Some(5_000),
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        let config = PlannerConfig {
            request_timeout_ms: Some(0),
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: PlannerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, PlannerConfig::default());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"api_url": "/api", "theme": "dark"}"#;
        let parsed: PlannerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.api_url, Some("/api".to_string()));
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let config = PlannerConfig::load_from(&scratch_path()).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path();
        let config = PlannerConfig {
            api_url: Some("https://plans.example.com".to_string()),
            service_origin: None,
            request_timeout_ms: Some(12_000),
        };
        config.save_to(&path).unwrap();

        let loaded = PlannerConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let path = scratch_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        assert!(PlannerConfig::load_from(&path).is_err());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
