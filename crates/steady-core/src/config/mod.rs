//! Configuration management for Steady

pub mod client_config;
pub mod env_loader;
pub mod file_loader;
pub mod settings;
pub mod timeouts;

pub use client_config::{ClientConfig, DEFAULT_USER_AGENT};
pub use env_loader::{circuit_breaker_enabled, parse_bool_flag};
pub use file_loader::{default_config_path, load_from_file, load_settings};
pub use settings::{ApiSettings, BreakerSettings, RetrySettings, Settings};
