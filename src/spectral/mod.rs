// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//!
//! Spectral analysis module
//!
//! This module turns a surface elevation series into a variance density
//! spectrum and derives the spectral moments used by the wave statistics.

pub mod confidence;
pub mod detrend;
pub mod moment;
mod periodogram;

use serde::Serialize;

use crate::error::Result;

pub use confidence::{ConfidenceInterval, DEFAULT_CONFIDENCE_LEVEL};
pub use moment::{significant_height, spectral_moment, trapezoid, SpectralPeriods};
pub use periodogram::BlockPeriodogram;

/// Trait for implementing variance density estimation
pub trait SpectrumEstimator: Send + Sync {
    /// Estimate the density spectrum of `series` sampled at `sample_rate` Hz
    fn estimate(&self, series: &[f64], sample_rate: f64) -> Result<SpectrumEstimate>;

    /// Number of samples per block actually used
    fn block_length(&self) -> usize;
}

/// One-sided variance density spectrum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumEstimate {
    /// Frequency axis in Hz, from 0 to Nyquist with uniform spacing
    pub frequencies: Vec<f64>,
    /// Variance density in unit²/Hz, one value per frequency
    pub density: Vec<f64>,
    pub confidence: ConfidenceInterval,
    /// Even block length used
    pub block_length: usize,
    /// Number of averaged blocks
    pub blocks: usize,
    pub sample_rate: f64,
}

impl SpectrumEstimate {
    /// Frequency resolution `df = sample_rate / block_length`
    pub fn resolution(&self) -> f64 {
        self.sample_rate / self.block_length as f64
    }

    /// Index of the largest density, the first one on ties
    pub fn peak_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &e) in self.density.iter().enumerate() {
            match best {
                Some((_, max)) if e <= max => {}
                _ => best = Some((i, e)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Frequency and density of the spectral peak
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.peak_index()
            .map(|i| (self.frequencies[i], self.density[i]))
    }

    pub fn confidence_low(&self) -> f64 {
        self.confidence.low
    }

    pub fn confidence_high(&self) -> f64 {
        self.confidence.high
    }

    /// Moment of the given order over the whole frequency axis
    pub fn moment(&self, order: i32) -> Result<f64> {
        let f_min = self.frequencies.first().copied().unwrap_or(0.0);
        let f_max = self.frequencies.last().copied().unwrap_or(0.0);
        spectral_moment(&self.frequencies, &self.density, f_min, f_max, order)
    }

    /// Moment of the given order restricted to `[f_min, f_max]`
    pub fn band_moment(&self, f_min: f64, f_max: f64, order: i32) -> Result<f64> {
        spectral_moment(&self.frequencies, &self.density, f_min, f_max, order)
    }
}

/// Create a new spectrum estimator with the given block length and confidence level
pub fn create_spectrum_estimator(
    block_length: usize,
    confidence_level: f64,
) -> Box<dyn SpectrumEstimator> {
    Box::new(BlockPeriodogram::new(block_length).with_confidence_level(confidence_level))
}

/// Estimate a spectrum with the default 90% confidence level
pub fn wave_spectrum(
    series: &[f64],
    block_length: usize,
    sample_rate: f64,
) -> Result<SpectrumEstimate> {
    BlockPeriodogram::new(block_length).estimate(series, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate_with(density: Vec<f64>) -> SpectrumEstimate {
        let frequencies = (0..density.len()).map(|k| k as f64 * 0.5).collect();
        SpectrumEstimate {
            frequencies,
            density,
            confidence: ConfidenceInterval::chi_squared(2, 0.9).unwrap(),
            block_length: 4,
            blocks: 1,
            sample_rate: 2.0,
        }
    }

    #[test]
    fn test_peak_takes_first_maximum() {
        let spectrum = estimate_with(vec![0.0, 3.0, 1.0, 3.0, 2.0]);
        assert_eq!(spectrum.peak_index(), Some(1));
        assert_eq!(spectrum.peak(), Some((0.5, 3.0)));
        assert_eq!(estimate_with(vec![]).peak_index(), None);
    }

    #[test]
    fn test_factory_uses_even_block_length() {
        let estimator = create_spectrum_estimator(101, 0.95);
        assert_eq!(estimator.block_length(), 100);
    }

    #[test]
    fn test_constant_series_has_flat_zero_spectrum() {
        let spectrum = wave_spectrum(&vec![1.25; 512], 128, 8.0).unwrap();
        assert!(spectrum.density.iter().all(|&e| e.abs() < 1e-20));
        assert!(spectrum.moment(0).unwrap().abs() < 1e-20);
    }
}
