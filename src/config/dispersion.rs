// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Dispersion relation solver configuration

use serde::{Deserialize, Serialize};

/// Physical constant and iteration bounds of the wavelength solver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispersionConfig {
    /// Gravitational acceleration in m/s²
    #[serde(default = "default_gravity")]
    pub gravity: f64,

    /// Absolute convergence tolerance in metres
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration cap of the fixed-point solve
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_gravity() -> f64 {
    9.81
}

fn default_tolerance() -> f64 {
    0.01
}

fn default_max_iterations() -> usize {
    1000
}

impl Default for DispersionConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}
