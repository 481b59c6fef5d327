// src/bin/msgscan.rs
use clap::Parser;
use tracing_subscriber::EnvFilter;

use msgscan_core::cli::{self, Cli};
use msgscan_core::exit::MsgscanExit;

fn main() -> MsgscanExit {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    MsgscanExit::from(cli::dispatch(&cli))
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}
