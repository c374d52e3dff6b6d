// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Error types for the wave analysis core
//!
//! Every numerical operation of the crate reports failures through
//! [`WaveError`]. Errors are raised where they are detected and are never
//! used for normal control flow.

use thiserror::Error;

/// Errors raised by spectrum estimation, moment integration, statistics
/// aggregation and wavelength solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaveError {
    /// The series does not contain a single complete block.
    #[error("Insufficient data: {samples} samples, need at least one block of {block_length}")]
    InsufficientData { samples: usize, block_length: usize },

    /// The spectral peak sits on the zero-frequency bin, so no period can be derived.
    #[error("Division by zero: peak frequency of channel {channel} is 0 Hz")]
    DivisionByZero { channel: usize },

    /// An argument is outside the domain of the operation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The dispersion relation fixed-point iteration hit its iteration cap.
    #[error("Wavelength iteration did not converge after {iterations} iterations (last difference {last_diff:.6} m)")]
    Convergence { iterations: usize, last_diff: f64 },

    /// A failure attributed to one channel of a multi-channel record.
    #[error("Channel {channel}: {source}")]
    Channel {
        channel: usize,
        #[source]
        source: Box<WaveError>,
    },
}

impl WaveError {
    /// Shorthand for [`WaveError::InvalidInput`].
    pub fn invalid(message: impl Into<String>) -> Self {
        WaveError::InvalidInput(message.into())
    }

    /// Attach the index of the channel that produced this error.
    pub fn in_channel(self, channel: usize) -> Self {
        match self {
            // Already attributed, or carries its own channel index
            WaveError::Channel { .. } | WaveError::DivisionByZero { .. } => self,
            other => WaveError::Channel {
                channel,
                source: Box::new(other),
            },
        }
    }

    /// The error with any channel attribution removed.
    pub fn root(&self) -> &WaveError {
        match self {
            WaveError::Channel { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result alias used throughout the analysis core
pub type Result<T> = std::result::Result<T, WaveError>;
