//! CLI argument parsing module.
//!
//! The CLI follows the pattern: `stockdash <command> <input.csv> [params] [-o output]`
//!
//! # Examples
//!
//! ```bash
//! # Chart bundle with the default overlays (MA20, MA50) and RSI14, as CSV
//! stockdash plot prices.csv
//!
//! # Three months of history, MA20/50/200, JSON bundle to a file
//! stockdash plot prices.csv --ma 20,50,200 --period 3mo --format json -o bundle.json
//!
//! # Settings from a JSON file, with a flag overriding one of them
//! stockdash plot prices.csv --config chart.json --rsi 9
//!
//! # Single indicators
//! stockdash sma prices.csv 50
//! stockdash rsi prices.csv 14 --naive
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use stockdash::window::HistoryWindow;

use crate::error::{CliError, Result};

/// stockdash: chart-ready moving averages and RSI from daily price bars
#[derive(Parser, Debug)]
#[command(name = "stockdash")]
#[command(author, version, about = "Chart-ready moving averages and RSI from daily price bars")]
#[command(long_about = "stockdash cleans a daily OHLCV CSV export and derives the series a \
    stock chart needs: moving-average overlays and an RSI panel with 30/70 guide lines. \
    Output is written as CSV or JSON to a file or stdout. Set RUST_LOG=debug for \
    normalization details.")]
pub struct Args {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Output encodings for the chart bundle.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One row per bar: OHLCV followed by every line.
    #[default]
    Csv,
    /// The full bundle, absent values as null.
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Full chart bundle: bars, moving-average overlays, RSI panel
    #[command(about = "Chart bundle: bars, moving averages and RSI panel")]
    Plot {
        /// Input CSV file
        input: String,

        /// Moving-average overlay windows, comma-separated [default: 20,50]
        #[arg(long)]
        ma: Option<String>,

        /// RSI window [default: 14]
        #[arg(long)]
        rsi: Option<usize>,

        /// Trailing history window: 5d, 1mo, 3mo, 6mo, 1y or 5y [default: all bars]
        #[arg(long)]
        period: Option<String>,

        /// Also draw the simple-average RSI next to the Wilder RSI
        #[arg(long)]
        naive_rsi: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// JSON file with pipeline settings; flags override it
        #[arg(short, long)]
        config: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Simple Moving Average of closes
    #[command(about = "Simple Moving Average (SMA)")]
    Sma {
        /// Input CSV file
        input: String,

        /// Window for the moving average
        #[arg(default_value = "20")]
        period: usize,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Relative Strength Index of closes
    #[command(about = "Relative Strength Index (RSI, Wilder smoothing)")]
    Rsi {
        /// Input CSV file
        input: String,

        /// Window for RSI calculation
        #[arg(default_value = "14")]
        period: usize,

        /// Use simple rolling means instead of Wilder smoothing
        #[arg(long)]
        naive: bool,

        /// Output CSV file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Args {
    /// Parse command-line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the output file path from the command, if specified.
    #[must_use]
    pub fn output_path(&self) -> Option<&str> {
        match &self.command {
            Command::Plot { output, .. }
            | Command::Sma { output, .. }
            | Command::Rsi { output, .. } => output.as_deref(),
        }
    }
}

/// Parse moving-average windows from a string like "20,50,200".
///
/// An empty string or `none` means no overlays.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` for entries that are not positive integers.
pub fn parse_windows(windows: &str) -> Result<Vec<usize>> {
    let trimmed = windows.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }

    trimmed
        .split(',')
        .map(|part| {
            let part = part.trim();
            let window = part.parse::<usize>().map_err(|_| CliError::InvalidArgument {
                argument: "ma".to_string(),
                reason: format!("cannot parse '{part}' as integer"),
                suggestion: Some("Use comma-separated windows like 20,50,200".to_string()),
            })?;
            if window == 0 {
                return Err(CliError::InvalidArgument {
                    argument: "ma".to_string(),
                    reason: "windows must be positive".to_string(),
                    suggestion: Some("Use comma-separated windows like 20,50,200".to_string()),
                });
            }
            Ok(window)
        })
        .collect()
}

/// Parse a trailing history window like "3mo".
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` listing the accepted values.
pub fn parse_history_window(period: &str) -> Result<HistoryWindow> {
    period.parse().map_err(|_| CliError::InvalidArgument {
        argument: "period".to_string(),
        reason: format!("unknown history window '{}'", period.trim()),
        suggestion: Some(format!(
            "Use one of: {}",
            HistoryWindow::ALL.map(HistoryWindow::as_str).join(", ")
        )),
    })
}

/// Check that a single-indicator window is positive.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if `period` is zero.
pub fn validate_window(period: usize, example: usize) -> Result<usize> {
    if period == 0 {
        return Err(CliError::InvalidArgument {
            argument: "period".to_string(),
            reason: "period must be positive".to_string(),
            suggestion: Some(format!("Use a positive integer like {example}")),
        });
    }
    Ok(period)
}
