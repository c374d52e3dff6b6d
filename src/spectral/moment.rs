// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Spectral moments
//!
//! The moment of order `n` of a density spectrum `E(f)` over a band is
//! `mn = ∫ E(f) fⁿ df`, integrated here with the trapezoidal rule on the
//! discrete frequency axis.

use serde::{Deserialize, Serialize};

use super::SpectrumEstimate;
use crate::error::{Result, WaveError};

/// Trapezoidal integral of `y` over the abscissa `x`
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}

/// Moment of order `order` of `density` between `f_min` and `f_max`.
///
/// Bins with `f_min <= f <= f_max` are kept. For negative orders the zero
/// frequency bin is also dropped since `0ⁿ` is undefined there. When fewer
/// than two bins remain the band carries no area and `0.0` is returned.
///
/// # Errors
///
/// [`WaveError::InvalidInput`] when the two slices differ in length.
pub fn spectral_moment(
    frequencies: &[f64],
    density: &[f64],
    f_min: f64,
    f_max: f64,
    order: i32,
) -> Result<f64> {
    if frequencies.len() != density.len() {
        return Err(WaveError::invalid(format!(
            "{} frequencies for {} density values",
            frequencies.len(),
            density.len()
        )));
    }

    let (x, y): (Vec<f64>, Vec<f64>) = frequencies
        .iter()
        .zip(density)
        .filter(|&(&f, _)| f >= f_min && f <= f_max && !(order < 0 && f == 0.0))
        .map(|(&f, &e)| (f, e * f.powi(order)))
        .unzip();

    if x.len() < 2 {
        return Ok(0.0);
    }
    Ok(trapezoid(&x, &y))
}

/// Significant wave height `Hm0 = 4 √m0`
pub fn significant_height(m0: f64) -> f64 {
    4.0 * m0.max(0.0).sqrt()
}

/// Mean periods derived from the low order moments of a spectrum.
///
/// A period is `None` when its denominator moment vanishes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpectralPeriods {
    /// Mean period `m0 / m1`
    pub tm01: Option<f64>,
    /// Zero crossing period `√(m0 / m2)`
    pub tm02: Option<f64>,
    /// Energy period `m-1 / m0`
    pub tm_10: Option<f64>,
}

impl SpectralPeriods {
    pub fn from_moments(m_1: f64, m0: f64, m1: f64, m2: f64) -> Self {
        Self {
            tm01: ratio(m0, m1),
            tm02: ratio(m0, m2).map(f64::sqrt),
            tm_10: ratio(m_1, m0),
        }
    }

    /// Periods of a full-band spectrum
    pub fn from_spectrum(spectrum: &SpectrumEstimate) -> Result<Self> {
        Ok(Self::from_moments(
            spectrum.moment(-1)?,
            spectrum.moment(0)?,
            spectrum.moment(1)?,
            spectrum.moment(2)?,
        ))
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}
