// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the wave analysis application
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings. The configuration is backed by a YAML file and
//! validated against a JSON schema for robustness.
//!
//! ## Configuration Structure
//!
//! The configuration is organized as a nested structure with sections:
//! - `analysis`: Block length, sample rate and confidence level of the spectra
//! - `dispersion`: Gravity and iteration bounds of the wavelength solver
//! - `site`: Water depth and gauge positions
//! - `input`: Layout of the recorder text export
//!
//! ## Usage
//!
//! ```no_run
//! use wave_spectra::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("config.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(
//!     Some(2048),                          // Block length
//!     Some(50.0),                          // Sample rate
//!     Some(0.35),                          // Depth
//!     Some("Measure_02.txt".into()),       // Input file
//!     None,                                // Calibration
//!     Some(true),                          // Parallel estimation
//! );
//!
//! println!("Frequency resolution: {} Hz", config.analysis.frequency_resolution());
//! ```

pub mod analysis;
pub mod dispersion;
pub mod input;
pub mod site;
pub mod utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

// Re-export all types for public API
pub use analysis::AnalysisConfig;
pub use dispersion::DispersionConfig;
pub use input::InputConfig;
pub use site::SiteConfig;
pub use utils::{output_config_schema, validate_specific_rules};

/// Embedded JSON schema of the configuration file
pub(crate) const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Root configuration structure for the wave analysis application.
///
/// The configuration is deserialized from and serialized to YAML using the
/// serde framework. Before deserialization the document is validated against
/// a JSON schema so that missing or mistyped fields are reported with a
/// precise location.
///
/// Each section falls back to its default values when it is absent from the
/// file, so an empty file is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Spectral analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Wavelength solver settings.
    #[serde(default)]
    pub dispersion: DispersionConfig,

    /// Depth and gauge positions of the measurement site.
    #[serde(default)]
    pub site: SiteConfig,

    /// Layout of the recorder export to analyze.
    #[serde(default)]
    pub input: InputConfig,
}

impl Config {
    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Original path: {:?}, Sample path: {:?}", path, sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// A missing file is replaced by the default configuration, which is also
    /// written to `path`. When the file fails schema validation,
    /// deserialization or the specific rules, a `<name>.sample.yaml` file with
    /// the defaults is written next to it and the error is returned.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        // An empty document parses as null; treat it as an empty mapping
        let yaml_value: serde_yml::Value = match serde_yml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML configuration from {:?}", path))?
        {
            serde_yml::Value::Null => serde_yml::Value::Mapping(Default::default()),
            value => value,
        };

        let json_value = serde_json::to_value(&yaml_value).with_context(|| {
            format!("Failed to convert YAML to JSON for validation: {:?}", path)
        })?;

        let schema: serde_json::Value =
            serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;
        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)?;

        debug!("Validating {} configuration against schema", path.display());
        if let Err(error) = validator.validate(&json_value) {
            error!("Configuration validation error before deserialization");
            Self::create_sample_config(path)?;
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        debug!("Schema validation passed, deserializing into Config structure");
        let config: Config = match serde_yml::from_value(yaml_value) {
            Ok(config) => config,
            Err(err) => {
                error!("Configuration deserialization error: {}", err);
                if let Err(e) = Self::create_sample_config(path) {
                    error!("Failed to create sample config: {}", e);
                }
                return Err(anyhow::anyhow!(
                    "Failed to deserialize configuration from {}: {}",
                    path.display(),
                    err
                ));
            }
        };

        if let Err(err) = validate_specific_rules(&config) {
            error!("Configuration specific validation error: {}", err);
            Self::create_sample_config(path)?;
            return Err(err);
        }

        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Validate the configuration against the rules the schema cannot express.
    pub fn validate(&self) -> Result<()> {
        validate_specific_rules(self)
    }

    /// Apply command line arguments to override configuration values.
    ///
    /// Only explicitly provided values override the existing configuration.
    ///
    /// # Parameters
    ///
    /// * `block_length` - Samples per Fourier block
    /// * `sample_rate` - Sampling frequency in Hz
    /// * `depth` - Still water depth in metres
    /// * `input_file` - Recording to analyze
    /// * `calibration` - Recorder unit to metre factor
    /// * `parallel` - Estimate channels in parallel
    pub fn apply_args(
        &mut self,
        block_length: Option<usize>,
        sample_rate: Option<f64>,
        depth: Option<f64>,
        input_file: Option<PathBuf>,
        calibration: Option<f64>,
        parallel: Option<bool>,
    ) {
        if let Some(block_length) = block_length {
            debug!("Overriding block length from command line: {}", block_length);
            self.analysis.block_length = block_length;
        }
        if let Some(sample_rate) = sample_rate {
            debug!("Overriding sample rate from command line: {}", sample_rate);
            self.analysis.sample_rate = sample_rate;
        }
        if let Some(parallel) = parallel {
            debug!("Overriding parallel estimation from command line: {}", parallel);
            self.analysis.parallel = parallel;
        }
        if let Some(depth) = depth {
            debug!("Overriding depth from command line: {}", depth);
            self.site.depth = depth;
        }
        if let Some(file) = input_file {
            debug!("Overriding input file from command line: {:?}", file);
            self.input.file = Some(file.to_string_lossy().to_string());
        }
        if let Some(calibration) = calibration {
            debug!("Overriding calibration from command line: {}", calibration);
            self.input.calibration = calibration;
        }
    }
}
