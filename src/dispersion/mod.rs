// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Linear wave dispersion
//!
//! The wavelength `L` of a wave of period `T` over a depth `d` satisfies
//! `L = L0 tanh(2π d / L)` with the deep water length `L0 = g T² / 2π`.
//! The relation is inverted with a damped fixed-point iteration.
//!
//! # Example
//!
//! ```
//! use wave_spectra::dispersion::WavelengthSolver;
//!
//! let result = WavelengthSolver::default().solve(2.4, 0.2).unwrap();
//! assert!((result.deep_water_length - 8.99).abs() < 0.01);
//! assert!(result.actual_length < result.deep_water_length);
//! ```

use std::f64::consts::PI;
use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::DispersionConfig;
use crate::error::{Result, WaveError};

/// Standard gravity used by default (m/s²)
pub const DEFAULT_GRAVITY: f64 = 9.81;
/// Default convergence tolerance on the wavelength (m)
pub const DEFAULT_TOLERANCE: f64 = 0.01;
/// Default iteration cap of the solver
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Depth classification from the relative depth `d / L`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthRegime {
    Deep,
    Intermediate,
    Shallow,
}

impl DepthRegime {
    pub fn from_relative_depth(relative_depth: f64) -> Self {
        if relative_depth > 0.5 {
            DepthRegime::Deep
        } else if relative_depth < 0.05 {
            DepthRegime::Shallow
        } else {
            DepthRegime::Intermediate
        }
    }
}

impl fmt::Display for DepthRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DepthRegime::Deep => "deep",
            DepthRegime::Intermediate => "intermediate",
            DepthRegime::Shallow => "shallow",
        };
        write!(f, "{}", name)
    }
}

/// Wavelength of one (period, depth) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavelengthResult {
    /// Wave period (s)
    pub period: f64,
    /// Water depth (m)
    pub depth: f64,
    /// `L0 = g T² / 2π` (m)
    pub deep_water_length: f64,
    /// Wavelength at the given depth (m)
    pub actual_length: f64,
    /// Iterations spent by the solver
    pub iterations: usize,
}

impl WavelengthResult {
    /// Wave number `k = 2π / L` (rad/m)
    pub fn wave_number(&self) -> f64 {
        2.0 * PI / self.actual_length
    }

    /// Phase speed `c = L / T` (m/s)
    pub fn celerity(&self) -> f64 {
        self.actual_length / self.period
    }

    /// `d / L`
    pub fn relative_depth(&self) -> f64 {
        self.depth / self.actual_length
    }

    pub fn regime(&self) -> DepthRegime {
        DepthRegime::from_relative_depth(self.relative_depth())
    }
}

/// Fixed-point solver of the dispersion relation
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthSolver {
    gravity: f64,
    tolerance: f64,
    max_iterations: usize,
}

impl Default for WavelengthSolver {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl WavelengthSolver {
    pub fn from_config(config: &DispersionConfig) -> Self {
        Self {
            gravity: config.gravity,
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
        }
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// `L0 = g T² / 2π`
    pub fn deep_water_length(&self, period: f64) -> f64 {
        self.gravity * period * period / (2.0 * PI)
    }

    /// Solve for the wavelength of a wave of `period` seconds over `depth` metres.
    ///
    /// Each step evaluates `L = L0 tanh(2π d / guess)` and stops once
    /// `|L - guess|` is within the tolerance. Otherwise the next guess is
    /// `L + |L - guess| / 2`.
    ///
    /// # Errors
    ///
    /// - [`WaveError::InvalidInput`] for a non-positive or non-finite period or depth
    /// - [`WaveError::Convergence`] when the iteration cap is reached
    pub fn solve(&self, period: f64, depth: f64) -> Result<WavelengthResult> {
        if !(period.is_finite() && period > 0.0) {
            return Err(WaveError::invalid(format!(
                "period must be positive, got {}",
                period
            )));
        }
        if !(depth.is_finite() && depth > 0.0) {
            return Err(WaveError::invalid(format!(
                "depth must be positive, got {}",
                depth
            )));
        }

        let l0 = self.deep_water_length(period);
        let mut guess = l0;
        let mut diff = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            let length = l0 * (2.0 * PI * depth / guess).tanh();
            diff = (length - guess).abs();
            trace!(
                "Iteration {}: L = {:.6} m, diff = {:.6} m",
                iteration,
                length,
                diff
            );

            if diff <= self.tolerance {
                debug!(
                    "T = {} s, d = {} m: L0 = {:.4} m, L = {:.4} m after {} iterations",
                    period, depth, l0, length, iteration
                );
                return Ok(WavelengthResult {
                    period,
                    depth,
                    deep_water_length: l0,
                    actual_length: length,
                    iterations: iteration,
                });
            }
            guess = length + 0.5 * diff;
        }

        Err(WaveError::Convergence {
            iterations: self.max_iterations,
            last_diff: diff,
        })
    }
}

/// Solve the dispersion relation with the default gravity and tolerance
pub fn wavelength(period: f64, depth: f64) -> Result<WavelengthResult> {
    WavelengthSolver::default().solve(period, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flume_reference_case() {
        let result = wavelength(2.4, 0.2).unwrap();
        assert_relative_eq!(result.deep_water_length, 8.9934, epsilon = 1e-3);
        assert!((result.actual_length - 3.283).abs() < 0.02);
        assert!(result.actual_length < result.deep_water_length);
        assert_eq!(result.regime(), DepthRegime::Intermediate);
    }

    #[test]
    fn test_deep_water_converges_immediately() {
        let result = wavelength(1.0, 100.0).unwrap();
        assert_eq!(result.iterations, 1);
        assert_relative_eq!(
            result.actual_length,
            result.deep_water_length,
            max_relative = 1e-3
        );
        assert_eq!(result.regime(), DepthRegime::Deep);
    }

    #[test]
    fn test_invalid_inputs() {
        for (period, depth) in [(0.0, 1.0), (-1.0, 1.0), (1.0, 0.0), (1.0, -2.0), (f64::NAN, 1.0)] {
            assert!(matches!(
                wavelength(period, depth),
                Err(WaveError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_iteration_cap() {
        let err = WavelengthSolver::default()
            .with_max_iterations(1)
            .with_tolerance(1e-12)
            .solve(2.4, 0.2)
            .unwrap_err();
        match err {
            WaveError::Convergence {
                iterations,
                last_diff,
            } => {
                assert_eq!(iterations, 1);
                assert!(last_diff > 1e-12);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_derived_quantities() {
        let result = WavelengthResult {
            period: 2.0,
            depth: 0.5,
            deep_water_length: 6.245,
            actual_length: 4.0,
            iterations: 3,
        };
        assert_relative_eq!(result.wave_number(), PI / 2.0);
        assert_relative_eq!(result.celerity(), 2.0);
        assert_relative_eq!(result.relative_depth(), 0.125);
        assert_eq!(DepthRegime::from_relative_depth(0.01).to_string(), "shallow");
    }

    #[test]
    fn test_custom_gravity() {
        let solver = WavelengthSolver::default().with_gravity(2.0 * PI);
        assert_relative_eq!(solver.deep_water_length(3.0), 9.0);
    }
}
