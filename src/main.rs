// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point for the wave flume analyzer

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use wave_spectra::acquisition::load_delimited;
use wave_spectra::config::{self, Config};
use wave_spectra::report;

/// Wave flume analyzer: spectra, significant wave height, peak period and wavelength
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Recorder export to analyze (delimited text)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Samples per spectral block
    #[arg(long)]
    block_length: Option<usize>,

    /// Sample rate in Hz
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Water depth in metres
    #[arg(long)]
    depth: Option<f64>,

    /// Calibration factor converting recorder units to metres
    #[arg(long)]
    calibration: Option<f64>,

    /// Estimate the channels in parallel (`--parallel` alone means true)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    parallel: Option<bool>,

    /// Output file for the report (JSON)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output the configuration schema as JSON and exit
    #[arg(long)]
    show_config_schema: bool,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if args.show_config_schema {
        return config::output_config_schema();
    }

    let mut config = Config::from_file(&args.config)?;
    config.apply_args(
        args.block_length,
        args.sample_rate,
        args.depth,
        args.input.clone(),
        args.calibration,
        args.parallel,
    );
    config.validate()?;

    let input = config
        .input
        .file
        .clone()
        .context("No input file given, use --input or set input.file in the configuration")?;
    info!("Analyzing {}", input);

    let record = load_delimited(&input, &config.input, config.analysis.sample_rate)?;
    let site_report = report::analyze(&record, &config)?;

    if let Some(output_path) = args.output {
        info!("Saving report to: {}", output_path.display());
        std::fs::write(&output_path, site_report.to_json()?)
            .with_context(|| format!("Failed to write report to {:?}", output_path))?;
    } else {
        println!("Wave Flume Analyzer");
        println!("-------------------");
        print!("{}", site_report);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_flag_forms() {
        let bare = Args::try_parse_from(["wave_spectra", "--parallel"]).unwrap();
        assert_eq!(bare.parallel, Some(true));

        let explicit = Args::try_parse_from(["wave_spectra", "--parallel", "false"]).unwrap();
        assert_eq!(explicit.parallel, Some(false));

        let absent = Args::try_parse_from(["wave_spectra", "-v"]).unwrap();
        assert_eq!(absent.parallel, None);
    }
}
