// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use approx::assert_relative_eq;
use wave_spectra::spectral::detrend::detrend_linear;
use wave_spectra::spectral::{
    create_spectrum_estimator, spectral_moment, wave_spectrum, BlockPeriodogram,
    SpectrumEstimator,
};
use wave_spectra::utility::SignalGenerator;
use wave_spectra::WaveError;

#[test]
fn test_constant_series_gives_zero_density() {
    let spectrum = wave_spectrum(&vec![0.37; 3000], 1000, 50.0).unwrap();
    assert!(spectrum.density.iter().all(|&e| e.abs() < 1e-20));
}

#[test]
fn test_trend_is_removed() {
    let mut generator = SignalGenerator::new(11);
    let noise = generator.gaussian_noise(4000, 0.01);
    let drifting: Vec<f64> = noise
        .iter()
        .enumerate()
        .map(|(i, x)| x + 0.5 + 1e-4 * i as f64)
        .collect();

    let clean = wave_spectrum(&noise, 1000, 20.0).unwrap();
    let drifted = wave_spectrum(&drifting, 1000, 20.0).unwrap();
    for (a, b) in clean.density.iter().zip(&drifted.density) {
        assert_relative_eq!(a, b, epsilon = 1e-12, max_relative = 1e-6);
    }
}

#[test]
fn test_sinusoid_peak_within_one_bin() {
    let sample_rate = 32.0;
    for &frequency in &[0.3, 1.7, 4.05, 9.9] {
        let series = SignalGenerator::sinusoid(4096, sample_rate, frequency, 1.0);
        let spectrum = wave_spectrum(&series, 1024, sample_rate).unwrap();
        let (peak, _) = spectrum.peak().unwrap();
        assert!(
            (peak - frequency).abs() <= spectrum.resolution(),
            "peak {} for a {} Hz sinusoid",
            peak,
            frequency
        );
    }
}

#[test]
fn test_zeroth_moment_equals_variance_of_analysed_samples() {
    let mut generator = SignalGenerator::new(99);
    let series = generator.noisy_sinusoid(5300, 25.0, 0.8, 0.05, 0.01);
    let block_length = 1000;

    let spectrum = wave_spectrum(&series, block_length, 25.0).unwrap();
    let m0 = spectrum.moment(0).unwrap();

    // Variance of the detrended series restricted to the complete blocks
    let detrended = detrend_linear(&series);
    let analysed = &detrended[..spectrum.blocks * block_length];
    let mean_square = analysed.iter().map(|x| x * x).sum::<f64>() / analysed.len() as f64;

    assert_eq!(spectrum.blocks, 5);
    assert_relative_eq!(m0, mean_square, max_relative = 1e-9);
}

#[test]
fn test_frequency_axis_invariants() {
    let series = SignalGenerator::new(5).gaussian_noise(999, 1.0);
    let spectrum = BlockPeriodogram::new(333).estimate(&series, 12.0).unwrap();

    // 333 is reduced to 332, three blocks fit
    assert_eq!(spectrum.block_length, 332);
    assert_eq!(spectrum.blocks, 3);
    assert_eq!(spectrum.frequencies.len(), spectrum.density.len());
    assert_eq!(spectrum.frequencies.len(), 167);
    assert_eq!(spectrum.frequencies[0], 0.0);
    assert_relative_eq!(*spectrum.frequencies.last().unwrap(), 6.0, max_relative = 1e-12);

    let df = spectrum.resolution();
    for pair in spectrum.frequencies.windows(2) {
        assert_relative_eq!(pair[1] - pair[0], df, max_relative = 1e-9);
    }
    assert!(spectrum.density.iter().all(|&e| e >= 0.0));
}

#[test]
fn test_estimate_is_deterministic() {
    let series = SignalGenerator::new(17).noisy_sinusoid(6000, 100.0, 0.5, 0.03, 0.002);
    let estimator = create_spectrum_estimator(2000, 0.9);
    let first = estimator.estimate(&series, 100.0).unwrap();
    let second = estimator.estimate(&series, 100.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_confidence_bounds_for_three_blocks() {
    let series = SignalGenerator::sinusoid(6000, 100.0, 0.5, 1.0);
    let spectrum = wave_spectrum(&series, 2000, 100.0).unwrap();

    assert_eq!(spectrum.confidence.degrees_of_freedom, 6);
    assert_relative_eq!(spectrum.confidence_low(), 6.0 / 12.591587, max_relative = 1e-3);
    assert_relative_eq!(spectrum.confidence_high(), 6.0 / 1.635383, max_relative = 1e-3);
}

#[test]
fn test_block_longer_than_series() {
    // 101 is reduced to 100, which does not fit in 99 samples
    let err = wave_spectrum(&[0.0; 99], 101, 10.0).unwrap_err();
    assert_eq!(
        err,
        WaveError::InsufficientData {
            samples: 99,
            block_length: 100
        }
    );

    // Exactly one block is enough
    let spectrum = wave_spectrum(&[0.0; 100], 101, 10.0).unwrap();
    assert_eq!(spectrum.blocks, 1);
    assert_eq!(spectrum.confidence.degrees_of_freedom, 2);
}

#[test]
fn test_band_moments() {
    let series = SignalGenerator::sinusoid(6000, 100.0, 0.5, 0.04);
    let spectrum = wave_spectrum(&series, 2000, 100.0).unwrap();

    let total = spectrum.moment(0).unwrap();
    let around_peak = spectrum.band_moment(0.4, 0.6, 0).unwrap();
    let far_band =
        spectral_moment(&spectrum.frequencies, &spectrum.density, 10.0, 20.0, 0).unwrap();

    assert!(around_peak > 0.95 * total);
    assert!(far_band < 1e-3 * total);
    assert_eq!(spectrum.band_moment(0.6, 0.4, 0).unwrap(), 0.0);
}
