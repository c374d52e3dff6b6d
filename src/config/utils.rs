// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema management.

use anyhow::{Context, Result};
use log::{debug, warn};

use super::{Config, CONFIG_SCHEMA};

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./wave_spectra --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Validates the configuration against additional rules that aren't covered by the JSON schema.
///
/// # Validation Rules
///
/// - **Block length**: at least 2 samples once reduced to an even value
/// - **Sample rate, depth, gravity, tolerance**: strictly positive and finite
/// - **Confidence level**: strictly between 0 and 1
/// - **Iteration cap**: at least one iteration
/// - **Gauges**: when locations are configured, one per channel column
/// - **Calibration**: non-zero
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    let analysis = &config.analysis;
    if analysis.block_length < 2 {
        anyhow::bail!(
            "Block length must be at least 2 samples, got {}",
            analysis.block_length
        );
    }
    if analysis.block_length % 2 != 0 {
        warn!(
            "Odd block length {} will be reduced to {}",
            analysis.block_length,
            analysis.block_length - 1
        );
    }
    ensure_positive("sample rate", analysis.sample_rate)?;
    if !(analysis.confidence_level > 0.0 && analysis.confidence_level < 1.0) {
        anyhow::bail!(
            "Confidence level must be strictly between 0 and 1, got {}",
            analysis.confidence_level
        );
    }

    let dispersion = &config.dispersion;
    ensure_positive("gravity", dispersion.gravity)?;
    ensure_positive("tolerance", dispersion.tolerance)?;
    if dispersion.max_iterations == 0 {
        anyhow::bail!("Wavelength solver needs at least one iteration");
    }

    ensure_positive("depth", config.site.depth)?;

    let input = &config.input;
    if input.channel_columns.is_empty() {
        anyhow::bail!("At least one channel column is required");
    }
    if !config.site.sensor_locations.is_empty()
        && config.site.sensor_locations.len() != input.channel_columns.len()
    {
        anyhow::bail!(
            "{} sensor locations configured for {} channel columns",
            config.site.sensor_locations.len(),
            input.channel_columns.len()
        );
    }
    if input.calibration == 0.0 || !input.calibration.is_finite() {
        anyhow::bail!("Invalid calibration factor: {}", input.calibration);
    }

    Ok(())
}

fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        anyhow::bail!("Invalid {}: {} (must be positive)", name, value);
    }
    Ok(())
}
