// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Trend removal
//!
//! Wave gauges drift and carry a set-up offset. Subtracting the least-squares
//! line keeps that energy out of the lowest frequency bins.

/// Least-squares line through a uniformly sampled series.
///
/// Returns `(slope, intercept)` with the abscissa being the sample index.
pub fn linear_fit(series: &[f64]) -> (f64, f64) {
    let n = series.len();
    if n == 0 {
        return (0.0, 0.0);
    }

    let t_mean = (n - 1) as f64 / 2.0;
    let y_mean = series.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, &y) in series.iter().enumerate() {
        let dt = i as f64 - t_mean;
        sxy += dt * (y - y_mean);
        sxx += dt * dt;
    }

    // A single sample has no slope
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    (slope, y_mean - slope * t_mean)
}

/// Copy of `series` with its least-squares line removed.
pub fn detrend_linear(series: &[f64]) -> Vec<f64> {
    let (slope, intercept) = linear_fit(series);
    series
        .iter()
        .enumerate()
        .map(|(i, &y)| y - (intercept + slope * i as f64))
        .collect()
}
