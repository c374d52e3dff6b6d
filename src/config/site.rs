// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Measurement site configuration
//!
//! Describes the flume where the record was taken: the still water depth and
//! the position of every wave gauge along the flume.

use serde::{Deserialize, Serialize};

/// Flume geometry used to label channels and to solve wavelengths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    /// Still water depth in metres
    pub depth: f64,

    /// Horizontal position of each gauge in metres, one per channel
    #[serde(default)]
    pub sensor_locations: Vec<f64>,
}

impl SiteConfig {
    /// Location of a channel, if one is configured
    pub fn location(&self, channel: usize) -> Option<f64> {
        self.sensor_locations.get(channel).copied()
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            depth: 0.2,
            // Six gauges in front of the fence, three behind it
            sensor_locations: vec![19.2, 19.5, 19.9, 24.8, 25.1, 25.5, 30.0, 30.4, 30.7],
        }
    }
}
