//! CLI argument definitions using clap
//!
//! - steady request GET /users            # One resilient call, pretty JSON out
//! - steady request POST /users -d '{..}' # With a JSON body
//! - steady config show                   # Effective configuration

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "steady")]
#[command(about = "Steady - resilient JSON-over-HTTP client")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, env = "STEADY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging for the client
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Issue one request and print the JSON response
    Request(RequestArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: String,

    /// Path relative to the base URL, or an absolute URL
    pub path: String,

    /// JSON request body
    #[arg(long, short)]
    pub data: Option<String>,

    /// Make exactly one attempt
    #[arg(long, conflicts_with = "max_retries")]
    pub no_retry: bool,

    /// Retries after the first attempt
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Attach a circuit breaker with default settings
    #[arg(long)]
    pub circuit_breaker: bool,

    /// Override the API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Bearer token
    #[arg(long, env = "STEADY_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration (token redacted)
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let cli = Cli::try_parse_from([
            "steady",
            "--verbose",
            "request",
            "post",
            "/items",
            "--data",
            r#"{"name":"x"}"#,
            "--max-retries",
            "5",
            "--circuit-breaker",
            "--token",
            "t0k",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Commands::Request(args) = cli.command else {
            panic!("expected request command");
        };
        assert_eq!(args.method, "post");
        assert_eq!(args.path, "/items");
        assert_eq!(args.data.as_deref(), Some(r#"{"name":"x"}"#));
        assert_eq!(args.max_retries, Some(5));
        assert!(args.circuit_breaker);
        assert_eq!(args.token.as_deref(), Some("t0k"));
    }

    #[test]
    fn test_no_retry_conflicts_with_max_retries() {
        let result = Cli::try_parse_from([
            "steady", "request", "GET", "/", "--no-retry", "--max-retries", "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["steady", "config", "show", "--config", "/tmp/s.toml"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Show
            }
        ));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.toml")));
    }
}
