// CLI modules
mod cli;

mod logging;
mod state;
mod version;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, Decrypt, Encrypt, Init, Keygen, Pubkey, Version};

command_enum! {
    (Decrypt, Decrypt),
    (Encrypt, Encrypt),
    (Init, Init),
    (Keygen, Keygen),
    (Pubkey, Pubkey),
    (Version, Version),
}

fn main() {
    let args = Args::parse();

    let ctx = match cli::op::OpContext::new(args.config_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    // Explicit flag > config file; RUST_LOG is applied on top by the filter
    let log_level = match args.log_level {
        Some(level) => level,
        None => match ctx.state.config.log_level() {
            Ok(level) => level,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    };
    logging::init_logging(log_level);

    match args.command.execute(&ctx) {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
