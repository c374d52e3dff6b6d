// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Block-averaged periodogram
//!
//! The variance density spectrum of a surface elevation record is estimated
//! by cutting the detrended record into non-overlapping blocks, Fourier
//! transforming every block and averaging the one-sided variance per
//! frequency bin. No window is applied, so the zeroth moment of the result
//! equals the variance of the analysed samples.
//!
//! # Example
//!
//! ```
//! use wave_spectra::spectral::{BlockPeriodogram, SpectrumEstimator};
//!
//! // 60 s of a 0.5 Hz wave sampled at 100 Hz
//! let sample_rate = 100.0;
//! let series: Vec<f64> = (0..6000)
//!     .map(|i| (2.0 * std::f64::consts::PI * 0.5 * i as f64 / sample_rate).sin())
//!     .collect();
//!
//! let estimator = BlockPeriodogram::new(2000);
//! let spectrum = estimator.estimate(&series, sample_rate).unwrap();
//!
//! assert_eq!(spectrum.blocks, 3);
//! assert_eq!(spectrum.frequencies.len(), 1001);
//! let (peak_frequency, _) = spectrum.peak().unwrap();
//! assert!((peak_frequency - 0.5).abs() < 1e-9);
//! ```

use log::{debug, warn};
use rustfft::{num_complex::Complex64, FftPlanner};

use super::confidence::{ConfidenceInterval, DEFAULT_CONFIDENCE_LEVEL};
use super::detrend::detrend_linear;
use super::{SpectrumEstimate, SpectrumEstimator};
use crate::error::{Result, WaveError};

/// Variance density estimator averaging the periodograms of contiguous blocks
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPeriodogram {
    block_length: usize,
    confidence_level: f64,
}

impl BlockPeriodogram {
    /// Create an estimator using blocks of `block_length` samples.
    ///
    /// An odd block length is reduced by one when estimating.
    pub fn new(block_length: usize) -> Self {
        Self {
            block_length,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
        }
    }

    /// Set the confidence level of the chi-squared bounds
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// Block length actually used, forced to an even value
    pub fn effective_block_length(&self) -> usize {
        self.block_length - self.block_length % 2
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Sum of the one-sided block variances per bin
    fn accumulate_blocks(&self, detrended: &[f64], nfft: usize) -> Vec<f64> {
        let bins = nfft / 2 + 1;
        let scale = 2.0 / nfft as f64;

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(nfft);
        let mut buffer = vec![Complex64::new(0.0, 0.0); nfft];
        let mut scratch = vec![Complex64::new(0.0, 0.0); fft.get_inplace_scratch_len()];
        let mut power = vec![0.0; bins];

        for block in detrended.chunks_exact(nfft) {
            for (slot, &sample) in buffer.iter_mut().zip(block) {
                *slot = Complex64::new(sample, 0.0);
            }
            fft.process_with_scratch(&mut buffer, &mut scratch);

            for (acc, coefficient) in power.iter_mut().zip(&buffer[..bins]) {
                let a = scale * coefficient.re;
                let b = scale * coefficient.im;
                *acc += (a * a + b * b) / 2.0;
            }
        }

        power
    }
}

impl SpectrumEstimator for BlockPeriodogram {
    fn estimate(&self, series: &[f64], sample_rate: f64) -> Result<SpectrumEstimate> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(WaveError::invalid(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }

        let nfft = self.effective_block_length();
        if nfft == 0 {
            return Err(WaveError::invalid(format!(
                "block length must be at least 2, got {}",
                self.block_length
            )));
        }
        if nfft != self.block_length {
            warn!(
                "Odd block length {} reduced to {}",
                self.block_length, nfft
            );
        }

        let n_blocks = series.len() / nfft;
        if n_blocks == 0 {
            return Err(WaveError::InsufficientData {
                samples: series.len(),
                block_length: nfft,
            });
        }
        if let Some(position) = series.iter().position(|x| !x.is_finite()) {
            return Err(WaveError::invalid(format!(
                "sample {} is not a finite number",
                position
            )));
        }

        let remainder = series.len() % nfft;
        if remainder > 0 {
            debug!("Discarding {} trailing samples", remainder);
        }

        let detrended = detrend_linear(series);
        let power = self.accumulate_blocks(&detrended, nfft);

        let df = sample_rate / nfft as f64;
        let normalization = n_blocks as f64 * df;
        let density: Vec<f64> = power.iter().map(|p| p / normalization).collect();
        let frequencies: Vec<f64> = (0..density.len()).map(|k| k as f64 * df).collect();

        let confidence = ConfidenceInterval::chi_squared(2 * n_blocks, self.confidence_level)?;
        debug!(
            "Spectrum: {} blocks of {} samples, df = {:.5} Hz, {} bins, {} dof",
            n_blocks,
            nfft,
            df,
            density.len(),
            confidence.degrees_of_freedom
        );

        Ok(SpectrumEstimate {
            frequencies,
            density,
            confidence,
            block_length: nfft,
            blocks: n_blocks,
            sample_rate,
        })
    }

    fn block_length(&self) -> usize {
        self.effective_block_length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    fn sine(num_samples: usize, sample_rate: f64, frequency: f64, amplitude: f64) -> Vec<f64> {
        (0..num_samples)
            .map(|i| amplitude * (2.0 * PI * frequency * i as f64 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_axis_and_shape() {
        let spectrum = BlockPeriodogram::new(64)
            .estimate(&sine(200, 10.0, 1.0, 1.0), 10.0)
            .unwrap();

        assert_eq!(spectrum.blocks, 3);
        assert_eq!(spectrum.block_length, 64);
        assert_eq!(spectrum.frequencies.len(), 33);
        assert_eq!(spectrum.density.len(), 33);
        assert_eq!(spectrum.frequencies[0], 0.0);
        assert_relative_eq!(*spectrum.frequencies.last().unwrap(), 5.0);
        assert_relative_eq!(spectrum.resolution(), 10.0 / 64.0);
        assert_eq!(spectrum.confidence.degrees_of_freedom, 6);
    }

    #[test]
    fn test_odd_block_length_reduced() {
        let series = sine(300, 20.0, 2.0, 1.0);
        let odd = BlockPeriodogram::new(101).estimate(&series, 20.0).unwrap();
        let even = BlockPeriodogram::new(100).estimate(&series, 20.0).unwrap();

        assert_eq!(odd.block_length, 100);
        assert_eq!(odd, even);
    }

    #[test]
    fn test_insufficient_data() {
        let err = BlockPeriodogram::new(128)
            .estimate(&sine(100, 10.0, 1.0, 1.0), 10.0)
            .unwrap_err();
        assert_eq!(
            err,
            WaveError::InsufficientData {
                samples: 100,
                block_length: 128
            }
        );
    }

    #[test]
    fn test_invalid_parameters() {
        let series = sine(100, 10.0, 1.0, 1.0);
        assert!(matches!(
            BlockPeriodogram::new(1).estimate(&series, 10.0),
            Err(WaveError::InvalidInput(_))
        ));
        assert!(matches!(
            BlockPeriodogram::new(10).estimate(&series, 0.0),
            Err(WaveError::InvalidInput(_))
        ));

        let mut gappy = series.clone();
        gappy[17] = f64::NAN;
        assert!(matches!(
            BlockPeriodogram::new(10).estimate(&gappy, 10.0),
            Err(WaveError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sine_variance_lands_in_its_bin() {
        // 0.5 Hz with df = 0.05 Hz sits exactly on bin 10
        let amplitude = 0.035;
        let spectrum = BlockPeriodogram::new(2000)
            .estimate(&sine(6000, 100.0, 0.5, amplitude), 100.0)
            .unwrap();

        let variance_in_bin = spectrum.density[10] * spectrum.resolution();
        assert_relative_eq!(variance_in_bin, amplitude * amplitude / 2.0, max_relative = 1e-2);
        assert_eq!(spectrum.peak_index(), Some(10));
    }

    #[test]
    fn test_density_is_non_negative() {
        let series: Vec<f64> = (0..1000)
            .map(|i| ((i * 7919) % 113) as f64 / 113.0 - 0.5)
            .collect();
        let spectrum = BlockPeriodogram::new(250).estimate(&series, 4.0).unwrap();
        assert!(spectrum.density.iter().all(|&e| e >= 0.0));
        assert_abs_diff_eq!(spectrum.frequencies[1], 4.0 / 250.0, epsilon = 1e-15);
    }
}
