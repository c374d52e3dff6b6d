// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Surface elevation records
//!
//! This module holds the multi-channel record consumed by the analysis core
//! and a thin loader turning delimited text exports of wave gauge recorders
//! into such records.
//!
//! A record stores its samples as a two dimensional array with one row per
//! time step and one column per gauge, the same layout the recorder writes.

pub mod text;

pub use text::load_delimited;

use ndarray::{Array2, ArrayView1, Axis};

use crate::error::{Result, WaveError};

/// Uniformly sampled surface elevation recorded at several gauges.
///
/// All channels share the same length and sample rate. The analysis core
/// only ever reads a record; detrending works on private copies.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiChannelRecord {
    samples: Array2<f64>,
    sample_rate: f64,
}

impl MultiChannelRecord {
    /// Create a record from a `(samples, channels)` array.
    pub fn new(samples: Array2<f64>, sample_rate: f64) -> Result<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(WaveError::invalid(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }
        if samples.ncols() == 0 {
            return Err(WaveError::invalid("record has no channels"));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create a record from one vector per channel.
    pub fn from_channels(channels: &[Vec<f64>], sample_rate: f64) -> Result<Self> {
        let Some(first) = channels.first() else {
            return Err(WaveError::invalid("record has no channels"));
        };
        let length = first.len();
        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, channel)| channel.len() != length)
        {
            return Err(WaveError::invalid(format!(
                "channel {} has {} samples, expected {}",
                index,
                channel.len(),
                length
            )));
        }

        let samples = Array2::from_shape_fn((length, channels.len()), |(row, col)| {
            channels[col][row]
        });
        Self::new(samples, sample_rate)
    }

    /// Number of gauges in the record
    pub fn channel_count(&self) -> usize {
        self.samples.ncols()
    }

    /// Number of samples per channel
    pub fn len(&self) -> usize {
        self.samples.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.nrows() == 0
    }

    /// Sampling frequency in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Time series of one gauge
    ///
    /// # Panics
    ///
    /// Panics if `index >= channel_count()`.
    pub fn channel(&self, index: usize) -> ArrayView1<'_, f64> {
        self.samples.index_axis(Axis(1), index)
    }

    /// Raw `(samples, channels)` array
    pub fn samples(&self) -> &Array2<f64> {
        &self.samples
    }

    /// Measurement duration in seconds, from the first to the last sample.
    pub fn duration(&self) -> f64 {
        self.len().saturating_sub(1) as f64 / self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_record_from_channels() {
        let record =
            MultiChannelRecord::from_channels(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], 100.0)
                .unwrap();

        assert_eq!(record.channel_count(), 2);
        assert_eq!(record.len(), 3);
        assert_eq!(record.channel(1).to_vec(), vec![4.0, 5.0, 6.0]);
        assert_relative_eq!(record.duration(), 0.02);
    }

    #[test]
    fn test_record_rejects_ragged_channels() {
        let err = MultiChannelRecord::from_channels(&[vec![1.0, 2.0], vec![1.0]], 10.0)
            .unwrap_err();
        assert!(matches!(err, WaveError::InvalidInput(_)));
    }

    #[test]
    fn test_record_rejects_bad_sample_rate() {
        assert!(MultiChannelRecord::from_channels(&[vec![1.0]], 0.0).is_err());
        assert!(MultiChannelRecord::from_channels(&[vec![1.0]], f64::NAN).is_err());
        assert!(MultiChannelRecord::from_channels(&[], 10.0).is_err());
    }
}
