//! Environment variable-based configuration loading

use crate::config::settings::Settings;
use crate::error::{SteadyError, SteadyResult};
use std::env;
use std::time::Duration;

/// Auto-attach a default circuit breaker when truthy
pub const CIRCUIT_BREAKER_VAR: &str = "STEADY_CIRCUIT_BREAKER";
pub const API_URL_VAR: &str = "STEADY_API_URL";
pub const API_TOKEN_VAR: &str = "STEADY_API_TOKEN";
pub const MAX_RETRIES_VAR: &str = "STEADY_MAX_RETRIES";
pub const TIMEOUT_SECS_VAR: &str = "STEADY_TIMEOUT_SECS";

/// `1`, `true`, `yes` and `on` (any case) are truthy; everything else is not
pub fn parse_bool_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Whether the circuit breaker toggle is set in the process environment
pub fn circuit_breaker_enabled() -> bool {
    env::var(CIRCUIT_BREAKER_VAR)
        .map(|value| parse_bool_flag(&value))
        .unwrap_or(false)
}

/// Overlay `STEADY_*` variables from the process environment onto `settings`
pub fn apply_env(settings: &mut Settings) -> SteadyResult<()> {
    apply_overrides(settings, |name| env::var(name).ok())
}

/// Overlay values produced by `lookup` onto `settings`.
///
/// Unset variables leave the corresponding setting alone.
pub fn apply_overrides<F>(settings: &mut Settings, lookup: F) -> SteadyResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_VAR) {
        settings.api.base_url = Some(url);
    }

    if let Some(token) = lookup(API_TOKEN_VAR) {
        settings.api.token = Some(token);
    }

    if let Some(max_retries) = lookup(MAX_RETRIES_VAR) {
        settings.retry.max_retries = max_retries.trim().parse().map_err(|_| {
            SteadyError::config_with_context(
                format!("Invalid {} value", MAX_RETRIES_VAR),
                format!("Parsing retry count '{}'", max_retries),
            )
        })?;
    }

    if let Some(timeout) = lookup(TIMEOUT_SECS_VAR) {
        let secs: u64 = timeout.trim().parse().map_err(|_| {
            SteadyError::config_with_context(
                format!("Invalid {} value", TIMEOUT_SECS_VAR),
                format!("Parsing timeout seconds '{}'", timeout),
            )
        })?;
        settings.api.timeout = Duration::from_secs(secs);
    }

    if let Some(flag) = lookup(CIRCUIT_BREAKER_VAR) {
        settings.circuit_breaker.enabled = parse_bool_flag(&flag);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_parse_bool_flag() {
        for value in ["1", "true", "TRUE", "Yes", " on "] {
            assert!(parse_bool_flag(value), "{value} should be truthy");
        }
        for value in ["", "0", "false", "off", "no", "enabled"] {
            assert!(!parse_bool_flag(value), "{value} should be falsy");
        }
    }

    #[test]
    fn test_overrides_applied() {
        let mut settings = Settings::default();
        apply_overrides(
            &mut settings,
            lookup_from(&[
                (API_URL_VAR, "https://env.example.com"),
                (API_TOKEN_VAR, "env-token"),
                (MAX_RETRIES_VAR, "7"),
                (TIMEOUT_SECS_VAR, "12"),
                (CIRCUIT_BREAKER_VAR, "yes"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.api.base_url.as_deref(), Some("https://env.example.com"));
        assert_eq!(settings.api.token.as_deref(), Some("env-token"));
        assert_eq!(settings.retry.max_retries, 7);
        assert_eq!(settings.api.timeout, Duration::from_secs(12));
        assert!(settings.circuit_breaker.enabled);
    }

    #[test]
    fn test_unset_variables_keep_file_values() {
        let mut settings = Settings::default();
        settings.api.base_url = Some("https://file.example.com".to_string());
        settings.circuit_breaker.enabled = true;

        apply_overrides(&mut settings, lookup_from(&[])).unwrap();

        assert_eq!(settings.api.base_url.as_deref(), Some("https://file.example.com"));
        assert!(settings.circuit_breaker.enabled);
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let mut settings = Settings::default();
        let result = apply_overrides(&mut settings, lookup_from(&[(MAX_RETRIES_VAR, "many")]));
        assert!(matches!(result, Err(SteadyError::Config { .. })));

        let result = apply_overrides(&mut settings, lookup_from(&[(TIMEOUT_SECS_VAR, "-1")]));
        assert!(result.is_err());
    }
}
