//! File-based configuration loading

use crate::config::settings::Settings;
use crate::error::{SteadyError, SteadyResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file location: `<config dir>/steady/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("steady").join("config.toml"))
}

/// Load settings from a TOML file.
///
/// Returns defaults if the file doesn't exist.
pub fn load_from_file(path: &Path) -> SteadyResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        SteadyError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    toml::from_str(&content).map_err(|e| {
        SteadyError::config_with_context(
            format!("Failed to parse TOML config: {}", e),
            format!("Deserializing TOML configuration from '{}'", path.display()),
        )
    })
}

/// Load settings from `path` (or the default location), then overlay the
/// environment
pub fn load_settings(path: Option<&Path>) -> SteadyResult<Settings> {
    let mut settings = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_from_file(&path)?,
        None => Settings::default(),
    };
    super::env_loader::apply_env(&mut settings)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = load_from_file(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_toml = r#"
[api]
base_url = "https://api.example.com"
token = "file-token"
timeout = "10s"

[retry]
enabled = true
max_retries = 5
retryable_statuses = [429, 503]
base_delay = "250ms"
max_delay = "5s"

[circuit_breaker]
enabled = true
failure_threshold = 3
cooldown = "1m"
"#;
        fs::write(&config_path, config_toml).unwrap();

        let settings = load_from_file(&config_path).unwrap();
        assert_eq!(settings.api.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(settings.api.timeout, Duration::from_secs(10));
        assert_eq!(settings.retry.max_retries, 5);
        assert_eq!(settings.retry.retryable_statuses, vec![429, 503]);
        assert_eq!(settings.retry.backoff.base_delay, Duration::from_millis(250));
        assert_eq!(settings.retry.backoff.max_delay, Duration::from_secs(5));
        assert_eq!(settings.retry.backoff.multiplier, 2);
        assert!(settings.circuit_breaker.enabled);
        assert_eq!(settings.circuit_breaker.config.failure_threshold, 3);
        assert_eq!(settings.circuit_breaker.config.cooldown, Duration::from_secs(60));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[retry]\nenabled = false\n").unwrap();

        let settings = load_from_file(&config_path).unwrap();
        assert!(!settings.retry.enabled);
        assert_eq!(settings.retry.max_retries, 3);
        assert_eq!(settings.api.timeout, Duration::from_secs(30));
        assert!(!settings.circuit_breaker.enabled);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[api\nbase_url = ").unwrap();

        let err = load_from_file(&config_path).unwrap_err();
        assert!(matches!(err, SteadyError::Config { .. }));
    }
}
