//! Command dispatch: read the CSV, run the pipeline, write the output.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use stockdash::engine::IndicatorEngine;
use stockdash::normalize::BarNormalizer;
use stockdash::pipeline::{Pipeline, PipelineConfig};

use crate::args::{parse_history_window, parse_windows, validate_window, Args, Command, OutputFormat};
use crate::csv_parser::parse_csv;
use crate::csv_writer::{write_bundle, write_indicator, OutputDest};
use crate::error::{CliError, Result};
use crate::json_writer::write_bundle_json;

/// Load pipeline settings from a JSON file.
///
/// Keys left out of the file keep their defaults.
///
/// # Errors
///
/// Returns `CliError::IoError` if the file cannot be opened and
/// `CliError::InvalidArgument` if it is not a valid settings object.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CliError::IoError {
        source: e,
        path: Some(path.display().to_string()),
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| CliError::InvalidArgument {
        argument: "config".to_string(),
        reason: e.to_string(),
        suggestion: Some(
            "Expected keys: overlay_windows, rsi_window, history_window, naive_rsi".to_string(),
        ),
    })
}

/// Apply command-line flags on top of a base configuration.
///
/// # Errors
///
/// Returns `CliError::InvalidArgument` if a flag value cannot be parsed.
pub fn apply_overrides(
    mut config: PipelineConfig,
    ma: Option<&str>,
    rsi: Option<usize>,
    period: Option<&str>,
    naive_rsi: bool,
) -> Result<PipelineConfig> {
    if let Some(ma) = ma {
        config = config.overlay_windows(parse_windows(ma)?);
    }
    if let Some(rsi) = rsi {
        config = config.rsi_window(validate_window(rsi, 14)?);
    }
    if let Some(period) = period {
        config = config.history_window(Some(parse_history_window(period)?));
    }
    if naive_rsi {
        config = config.naive_rsi(true);
    }
    Ok(config)
}

/// Run the command described by `args`.
///
/// # Errors
///
/// Returns the first error from argument validation, CSV parsing, the
/// pipeline or output.
pub fn run(args: &Args) -> Result<()> {
    let dest = OutputDest::from_path(args.output_path());

    match &args.command {
        Command::Plot {
            input,
            ma,
            rsi,
            period,
            naive_rsi,
            format,
            config,
            ..
        } => {
            let base = match config {
                Some(path) => load_config(path)?,
                None => PipelineConfig::default(),
            };
            let config =
                apply_overrides(base, ma.as_deref(), *rsi, period.as_deref(), *naive_rsi)?;
            tracing::debug!(?config, "resolved configuration");

            let raw = parse_csv(input)?;
            let bundle = Pipeline::new(config).run(&raw)?;

            match format {
                OutputFormat::Csv => write_bundle(&bundle, &dest),
                OutputFormat::Json => write_bundle_json(&bundle, &dest),
            }
        }
        Command::Sma { input, period, .. } => {
            let period = validate_window(*period, 20)?;
            let bars = BarNormalizer::new().normalize(&parse_csv(input)?)?;
            let series = IndicatorEngine::new().moving_average(&bars, period)?;
            if let Some(shortfall) = series.shortfall() {
                tracing::warn!("{shortfall}");
            }
            write_indicator(&bars, &series, &dest)
        }
        Command::Rsi {
            input,
            period,
            naive,
            ..
        } => {
            let period = validate_window(*period, 14)?;
            let bars = BarNormalizer::new().normalize(&parse_csv(input)?)?;
            let engine = IndicatorEngine::new();
            let series = if *naive {
                engine.rsi_sma(&bars, period)?
            } else {
                engine.rsi(&bars, period)?
            };
            if let Some(shortfall) = series.shortfall() {
                tracing::warn!("{shortfall}");
            }
            write_indicator(&bars, &series, &dest)
        }
    }
}
