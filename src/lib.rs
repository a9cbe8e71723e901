//! Steady: a resilient JSON-over-HTTP API client
//!
//! This crate re-exports [`steady_core`]; see [`Client`] for the entry point.
//!
//! ```no_run
//! use steady::{CancellationToken, Client, ClientConfig};
//!
//! # async fn example() -> steady::SteadyResult<()> {
//! let client = Client::new(ClientConfig::new("https://api.example.com", "token"))?;
//! let user: Option<serde_json::Value> = client.get(&CancellationToken::new(), "/me").await?;
//! # Ok(())
//! # }
//! ```

pub use steady_core::*;
