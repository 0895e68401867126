//! Native-messaging entry point for tabtint.

mod cli;

use clap::Parser;
use std::sync::Arc;
use tabtint::config::load_config;
use tabtint::dispatcher::Dispatcher;
use tabtint::host::stdio::spawn_stdio_host;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if let Some(rules) = &args.rules {
        config.rules_resource = rules.clone();
    }
    if let Some(filter) = &args.log_filter {
        config.log_filter = filter.clone();
    }

    // stdout carries native-messaging frames; diagnostics go to stderr.
    let filter = EnvFilter::try_from_env("TABTINT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(rules = %config.rules_resource, "tabtint native host starting");

    let (host, events) = spawn_stdio_host();
    let dispatcher = Dispatcher::new(host, Arc::new(config));
    dispatcher.run(events).await;

    tracing::info!("browser disconnected, exiting");
}
