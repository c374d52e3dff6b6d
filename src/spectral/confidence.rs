// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Confidence bounds of averaged spectra
//!
//! A density estimate averaged over `n` independent blocks follows a
//! chi-squared distribution with `2n` degrees of freedom. The bounds are
//! multiplicative factors applied to the estimate.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::{Result, WaveError};

/// Default confidence level of the spectral bounds (90%)
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.9;

/// Chi-squared confidence interval of a spectral density estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Confidence level, e.g. 0.9
    pub level: f64,
    /// Equivalent degrees of freedom
    pub degrees_of_freedom: usize,
    /// Lower multiplicative bound
    pub low: f64,
    /// Upper multiplicative bound
    pub high: f64,
}

impl ConfidenceInterval {
    /// Bounds for `degrees_of_freedom` at the given confidence level.
    ///
    /// `low = edf / χ²(1 - α/2)` and `high = edf / χ²(α/2)` with
    /// `α = 1 - level`.
    pub fn chi_squared(degrees_of_freedom: usize, level: f64) -> Result<Self> {
        if degrees_of_freedom == 0 {
            return Err(WaveError::invalid("degrees of freedom must be positive"));
        }
        if !(level > 0.0 && level < 1.0) {
            return Err(WaveError::invalid(format!(
                "confidence level must be in (0, 1), got {}",
                level
            )));
        }

        let edf = degrees_of_freedom as f64;
        let distribution = ChiSquared::new(edf)
            .map_err(|e| WaveError::invalid(format!("chi-squared distribution: {}", e)))?;
        let alpha = 1.0 - level;

        Ok(Self {
            level,
            degrees_of_freedom,
            low: edf / distribution.inverse_cdf(1.0 - alpha / 2.0),
            high: edf / distribution.inverse_cdf(alpha / 2.0),
        })
    }

    /// Absolute bounds around one density value
    pub fn bounds(&self, density: f64) -> (f64, f64) {
        (self.low * density, self.high * density)
    }
}
