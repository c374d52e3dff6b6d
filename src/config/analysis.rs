// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Spectral analysis configuration
//!
//! Parameters of the block-averaged periodogram shared by every channel of a
//! record.

use serde::{Deserialize, Serialize};

/// Configuration for the spectral analysis of a record.
///
/// # Signal Processing Parameters
///
/// * `block_length` - Number of samples per Fourier block. Odd values are
///   reduced by one before use so that the Nyquist bin is well defined.
/// * `sample_rate` - Sampling frequency of the recorder in Hz
/// * `confidence_level` - Confidence level of the chi-squared bounds (0.9 = 90%)
/// * `parallel` - Estimate channels concurrently on the rayon thread pool
///
/// # Example
///
/// ```
/// use wave_spectra::config::AnalysisConfig;
///
/// let analysis = AnalysisConfig {
///     block_length: 2000,
///     sample_rate: 100.0,
///     confidence_level: 0.9,
///     parallel: false,
/// };
/// assert_eq!(analysis.frequency_resolution(), 0.05);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Samples per Fourier block
    pub block_length: usize,

    /// Sampling frequency in Hz
    pub sample_rate: f64,

    /// Confidence level of the spectral bounds
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,

    /// Estimate channels in parallel
    #[serde(default)]
    pub parallel: bool,
}

fn default_confidence_level() -> f64 {
    0.9
}

impl AnalysisConfig {
    /// Frequency resolution of the spectra produced with these settings
    pub fn frequency_resolution(&self) -> f64 {
        let effective = self.block_length - self.block_length % 2;
        self.sample_rate / effective as f64
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            block_length: 2000, // 20 s blocks at 100 Hz
            sample_rate: 100.0,
            confidence_level: default_confidence_level(),
            parallel: false,
        }
    }
}
