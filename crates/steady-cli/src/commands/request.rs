//! `steady request`: one logical call through the resilient client

use crate::args::RequestArgs;
use crate::console::CliConsole;
use anyhow::Context;
use serde_json::Value;
use std::path::Path;
use steady_core::config::{Settings, load_settings};
use steady_core::{CancellationToken, Client, Method};

/// Build a client from config, environment and flags, then issue the request
pub async fn execute(config_path: Option<&Path>, args: RequestArgs, verbose: bool) -> anyhow::Result<()> {
    let console = CliConsole::new(verbose);

    let mut settings = load_settings(config_path)?;
    apply_flags(&mut settings, &args);

    let method = parse_method(&args.method)?;
    let body = parse_body(args.data.as_deref())?;
    let client = Client::new(settings.to_client_config()?)?;

    console.info(&format!("{} {}", method, client.config().url_for(&args.path)));

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("interrupt received, cancelling request");
                cancel.cancel();
            }
        })
    };

    let result = client.do_raw(&cancel, method, &args.path, body.as_ref()).await;
    interrupt.abort();
    let raw = result?;

    if raw.is_empty() {
        console.info("(empty response)");
        return Ok(());
    }
    println!("{}", render_body(&raw));
    Ok(())
}

/// Flags win over the environment and the config file
fn apply_flags(settings: &mut Settings, args: &RequestArgs) {
    if let Some(base_url) = &args.base_url {
        settings.api.base_url = Some(base_url.clone());
    }
    if let Some(token) = &args.token {
        settings.api.token = Some(token.clone());
    }
    if args.no_retry {
        settings.retry.enabled = false;
    }
    if let Some(max_retries) = args.max_retries {
        settings.retry.enabled = true;
        settings.retry.max_retries = max_retries;
    }
    if args.circuit_breaker {
        settings.circuit_breaker.enabled = true;
    }
}

fn parse_method(method: &str) -> anyhow::Result<Method> {
    let upper = method.to_ascii_uppercase();
    Method::from_bytes(upper.as_bytes()).with_context(|| format!("Invalid HTTP method '{}'", method))
}

fn parse_body(data: Option<&str>) -> anyhow::Result<Option<Value>> {
    data.map(serde_json::from_str::<Value>)
        .transpose()
        .context("--data is not valid JSON")
}

/// Pretty JSON when the body parses, raw text otherwise
fn render_body(raw: &[u8]) -> String {
    match serde_json::from_slice::<Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| String::from_utf8_lossy(raw).into_owned()),
        Err(_) => String::from_utf8_lossy(raw).into_owned(),
    }
}
