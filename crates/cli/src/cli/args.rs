pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "boxkey")]
#[command(about = "Generate curve25519 box keys and decrypt files sealed to them")]
pub struct Args {
    /// Path to the boxkey config directory (defaults to ~/.boxkey)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level (overrides the config file; RUST_LOG overrides both)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    #[command(subcommand)]
    pub command: crate::Command,
}
