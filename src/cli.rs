//! CLI argument parsing via clap.
//!
//! The browser launches the binary without arguments; the flags exist for
//! manual runs against a shim and for pointing at a non-default config.

use clap::Parser;

/// Native-messaging host that syncs the browser chrome color with the
/// active tab.
#[derive(Debug, Parser)]
#[command(name = "tabtint", version)]
pub struct Args {
    /// Path to config file (default: ./tabtint.toml or
    /// ~/.config/tabtint/tabtint.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override the bundled rules resource name.
    #[arg(long = "rules")]
    pub rules: Option<String>,

    /// Override the log filter (TABTINT_LOG takes precedence over both).
    #[arg(long = "log-filter")]
    pub log_filter: Option<String>,
}
