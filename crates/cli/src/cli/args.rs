pub use clap::Parser;

use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "oxbin")]
#[command(about = "Create and read pastes stored on the 0xBin contracts")]
pub struct Args {
    /// Path to the oxbin config directory (defaults to ~/.oxbin)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Network name or chain id to use instead of the configured one
    #[arg(long, global = true)]
    pub network: Option<String>,

    /// Wallet JSON-RPC endpoint to use instead of the configured one
    #[arg(long, global = true)]
    pub wallet: Option<Url>,

    /// Log level for this invocation (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    #[command(subcommand)]
    pub command: crate::Command,
}
