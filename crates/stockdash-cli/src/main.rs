//! stockdash command-line interface
//!
//! Reads a daily OHLCV CSV export and writes chart-ready indicator series.
//! Diagnostics go to stderr; set `RUST_LOG` to change their verbosity.

use stockdash_cli::args::Args;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse_args();
    if let Err(e) = stockdash_cli::run::run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
