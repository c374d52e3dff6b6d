// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Recorder export configuration
//!
//! Describes how a delimited text export of the gauge recorder maps onto a
//! multi-channel record.

use serde::{Deserialize, Serialize};

/// Layout of a delimited text recording.
///
/// # Example
///
/// ```
/// use wave_spectra::config::InputConfig;
///
/// let input = InputConfig {
///     file: Some("Measure_01.txt".to_string()),
///     delimiter: "\t".to_string(),
///     skip_rows: 0,
///     channel_columns: vec![1, 2, 3],
///     calibration: 0.01,
/// };
/// assert_eq!(input.channel_columns.len(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Path of the recording
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Column separator. A blank separator splits on any whitespace.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Header lines to skip
    #[serde(default)]
    pub skip_rows: usize,

    /// Zero-based columns holding gauge signals, in channel order
    pub channel_columns: Vec<usize>,

    /// Factor converting recorder units to metres
    #[serde(default = "default_calibration")]
    pub calibration: f64,
}

fn default_delimiter() -> String {
    "\t".to_string()
}

fn default_calibration() -> f64 {
    0.010 // volt to metre
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            file: None,
            delimiter: default_delimiter(),
            skip_rows: 0,
            // Column 0 is time, 1..=9 are the wave gauges, 10 and 11 velocities
            channel_columns: (1..=9).collect(),
            calibration: default_calibration(),
        }
    }
}
