// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! rets-parse CLI
//!
//! Command-line interface for decoding saved RETS reply bodies

use clap::Parser;
use rets_parse::cli::{Cli, Runner};

fn main() {
    let cli = Cli::parse();
    let config = match Runner::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level.map_or(tracing::Level::INFO, Into::into)
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = Runner::new(cli, config).run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
