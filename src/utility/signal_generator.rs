// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Synthetic Surface Elevation
//!
//! This module generates reproducible surface elevation signals used to
//! exercise the spectral analysis without a flume recording:
//!
//! - Regular waves (pure sinusoids)
//! - Gaussian white noise standing in for gauge noise
//! - Multi-gauge records of a regular wave travelling along the flume
//!
//! The generator is a seeded XORShift with a Box-Muller transform, so the
//! same seed always yields the same record.
//!
//! ## Examples
//!
//! ```rust
//! use wave_spectra::utility::signal_generator::SignalGenerator;
//!
//! let mut generator = SignalGenerator::new(42);
//!
//! // 60 s of a 5 cm, 0.5 Hz wave at 100 Hz with 1 mm of noise
//! let elevation = generator.noisy_sinusoid(6000, 100.0, 0.5, 0.05, 0.001);
//! assert_eq!(elevation.len(), 6000);
//! ```

use std::f64::consts::PI;
use std::time::SystemTime;

use ndarray::Array2;

use crate::acquisition::MultiChannelRecord;
use crate::error::Result;

/// Random number generator using XORShift algorithm for synthetic signals.
///
/// Not suitable for cryptographic purposes.
pub struct SignalGenerator {
    rng_state: u64,
}

impl SignalGenerator {
    /// Creates a new generator with a given seed.
    ///
    /// A zero seed would lock XORShift at zero, so it is replaced by one.
    pub fn new(seed: u64) -> Self {
        Self {
            rng_state: seed.max(1),
        }
    }

    /// Creates a new generator seeded from the system time
    pub fn new_from_system_time() -> Self {
        let seed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(1);
        Self::new(seed)
    }

    /// Uniform value in the open interval (0, 1)
    pub fn random_uniform(&mut self) -> f64 {
        self.rng_state ^= self.rng_state << 13;
        self.rng_state ^= self.rng_state >> 7;
        self.rng_state ^= self.rng_state << 17;

        // 53 random bits, offset by half a step to stay off both bounds
        ((self.rng_state >> 11) as f64 + 0.5) / (1u64 << 53) as f64
    }

    /// Standard normal value using the Box-Muller transform.
    ///
    /// ```text
    /// z = sqrt(-2 * ln(u1)) * cos(2 * π * u2)
    /// ```
    pub fn random_gaussian(&mut self) -> f64 {
        let u1 = self.random_uniform();
        let u2 = self.random_uniform();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// White noise with standard deviation `sigma`
    pub fn gaussian_noise(&mut self, num_samples: usize, sigma: f64) -> Vec<f64> {
        (0..num_samples)
            .map(|_| sigma * self.random_gaussian())
            .collect()
    }

    /// Regular wave `amplitude · sin(2π f t)`
    pub fn sinusoid(
        num_samples: usize,
        sample_rate: f64,
        frequency: f64,
        amplitude: f64,
    ) -> Vec<f64> {
        Self::travelling_wave(num_samples, sample_rate, frequency, amplitude, 0.0)
    }

    fn travelling_wave(
        num_samples: usize,
        sample_rate: f64,
        frequency: f64,
        amplitude: f64,
        phase: f64,
    ) -> Vec<f64> {
        (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                amplitude * (2.0 * PI * frequency * t - phase).sin()
            })
            .collect()
    }

    /// Regular wave with additive white noise
    pub fn noisy_sinusoid(
        &mut self,
        num_samples: usize,
        sample_rate: f64,
        frequency: f64,
        amplitude: f64,
        noise_sigma: f64,
    ) -> Vec<f64> {
        Self::sinusoid(num_samples, sample_rate, frequency, amplitude)
            .into_iter()
            .map(|x| x + noise_sigma * self.random_gaussian())
            .collect()
    }

    /// Record of a regular wave seen by gauges at `locations` metres.
    ///
    /// Each gauge sees the wave delayed by its distance over `wavelength`
    /// and its own independent noise.
    #[allow(clippy::too_many_arguments)]
    pub fn gauge_array(
        &mut self,
        num_samples: usize,
        sample_rate: f64,
        frequency: f64,
        amplitude: f64,
        wavelength: f64,
        locations: &[f64],
        noise_sigma: f64,
    ) -> Result<MultiChannelRecord> {
        let mut samples = Array2::<f64>::zeros((num_samples, locations.len()));
        for (channel, &x) in locations.iter().enumerate() {
            let phase = 2.0 * PI * x / wavelength;
            let wave = Self::travelling_wave(num_samples, sample_rate, frequency, amplitude, phase);
            for (slot, value) in samples.column_mut(channel).iter_mut().zip(wave) {
                *slot = value + noise_sigma * self.random_gaussian();
            }
        }
        MultiChannelRecord::new(samples, sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_same_seed_same_sequence() {
        let a = SignalGenerator::new(7).gaussian_noise(100, 1.0);
        let b = SignalGenerator::new(7).gaussian_noise(100, 1.0);
        let c = SignalGenerator::new(8).gaussian_noise(100, 1.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let noise = SignalGenerator::new(0).gaussian_noise(10, 1.0);
        assert!(noise.iter().any(|&x| x != 0.0));
    }

    #[test]
    fn test_uniform_bounds() {
        let mut generator = SignalGenerator::new(12345);
        for _ in 0..10_000 {
            let u = generator.random_uniform();
            assert!(u > 0.0 && u < 1.0);
        }
    }

    #[test]
    fn test_noise_statistics() {
        let noise = SignalGenerator::new(2024).gaussian_noise(50_000, 2.0);
        let mean = noise.iter().sum::<f64>() / noise.len() as f64;
        let variance = noise.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / noise.len() as f64;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 0.05);
        assert_abs_diff_eq!(variance.sqrt(), 2.0, epsilon = 0.05);
    }

    #[test]
    fn test_gauge_array_shape_and_phase() {
        let record = SignalGenerator::new(1)
            .gauge_array(400, 10.0, 0.5, 1.0, 4.0, &[0.0, 1.0], 0.0)
            .unwrap();
        assert_eq!(record.channel_count(), 2);
        assert_eq!(record.len(), 400);
        // A quarter wavelength away the second gauge lags by a quarter period
        assert_abs_diff_eq!(record.channel(1)[5], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(record.channel(0)[5], 1.0, epsilon = 1e-12);
    }
}
