// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Multi-channel wave statistics
//!
//! The aggregator estimates the spectrum of every gauge of a record and
//! derives the peak frequency, peak period and significant wave height of
//! each one. All channels share the same frequency axis, so the densities
//! are collected as the columns of one matrix.
//!
//! Failures are not recovered: the error of the lowest-indexed failing
//! channel is returned and no partial statistics are produced.

use log::{debug, info};
use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;
use serde::Serialize;

use crate::acquisition::MultiChannelRecord;
use crate::config::AnalysisConfig;
use crate::error::{Result, WaveError};
use crate::spectral::{
    create_spectrum_estimator, significant_height, ConfidenceInterval, SpectralPeriods,
    SpectrumEstimate, SpectrumEstimator, DEFAULT_CONFIDENCE_LEVEL,
};

/// Round to two decimals, halves away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Statistics derived from the spectrum of one gauge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelStatistics {
    pub channel: usize,
    /// Frequency of maximal density (Hz)
    pub peak_frequency: f64,
    /// `1 / peak_frequency` rounded to 0.01 s
    pub peak_period: f64,
    /// `Hm0 = 4 √m0` (m)
    pub significant_height: f64,
    /// Density at the peak (m²/Hz)
    pub max_density: f64,
    pub periods: SpectralPeriods,
}

impl ChannelStatistics {
    /// Derive the statistics of `channel` from its spectrum.
    ///
    /// # Errors
    ///
    /// [`WaveError::DivisionByZero`] when the peak sits on the 0 Hz bin.
    pub fn from_spectrum(channel: usize, spectrum: &SpectrumEstimate) -> Result<Self> {
        let (peak_frequency, max_density) = spectrum
            .peak()
            .ok_or_else(|| WaveError::invalid("spectrum has no frequency bins"))?;
        if peak_frequency == 0.0 {
            return Err(WaveError::DivisionByZero { channel });
        }

        let m0 = spectrum.moment(0)?;
        Ok(Self {
            channel,
            peak_frequency,
            peak_period: round2(1.0 / peak_frequency),
            significant_height: significant_height(m0),
            max_density,
            periods: SpectralPeriods::from_spectrum(spectrum)?,
        })
    }
}

/// Statistics of every channel of a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveStatistics {
    /// Shared frequency axis (Hz)
    pub frequencies: Vec<f64>,
    /// Densities with one row per frequency and one column per channel
    pub density: Array2<f64>,
    pub channels: Vec<ChannelStatistics>,
    /// Mean of the channel peak periods rounded to 0.01 s
    pub mean_peak_period: f64,
    pub confidence: ConfidenceInterval,
    pub block_length: usize,
    pub blocks: usize,
    pub sample_rate: f64,
}

impl WaveStatistics {
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn resolution(&self) -> f64 {
        self.sample_rate / self.block_length as f64
    }

    /// Density column of one channel
    pub fn channel_density(&self, channel: usize) -> Option<ArrayView1<'_, f64>> {
        (channel < self.density.ncols()).then(|| self.density.column(channel))
    }

    pub fn peak_frequencies(&self) -> Vec<f64> {
        self.channels.iter().map(|c| c.peak_frequency).collect()
    }

    pub fn peak_periods(&self) -> Vec<f64> {
        self.channels.iter().map(|c| c.peak_period).collect()
    }

    pub fn significant_heights(&self) -> Vec<f64> {
        self.channels.iter().map(|c| c.significant_height).collect()
    }

    pub fn max_densities(&self) -> Vec<f64> {
        self.channels.iter().map(|c| c.max_density).collect()
    }
}

/// Runs a spectrum estimator over every channel of a record
pub struct WaveStatisticsAggregator {
    estimator: Box<dyn SpectrumEstimator>,
    parallel: bool,
}

impl WaveStatisticsAggregator {
    /// Aggregator using a block periodogram at the default confidence level
    pub fn new(block_length: usize) -> Self {
        Self {
            estimator: create_spectrum_estimator(block_length, DEFAULT_CONFIDENCE_LEVEL),
            parallel: false,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            estimator: create_spectrum_estimator(config.block_length, config.confidence_level),
            parallel: config.parallel,
        }
    }

    /// Aggregator driving a custom estimator
    pub fn with_estimator(estimator: Box<dyn SpectrumEstimator>) -> Self {
        Self {
            estimator,
            parallel: false,
        }
    }

    /// Estimate the channels on the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn analyze_channel(
        &self,
        record: &MultiChannelRecord,
        channel: usize,
    ) -> Result<(SpectrumEstimate, ChannelStatistics)> {
        let series = record.channel(channel).to_vec();
        let spectrum = self
            .estimator
            .estimate(&series, record.sample_rate())
            .map_err(|e| e.in_channel(channel))?;
        let statistics = ChannelStatistics::from_spectrum(channel, &spectrum)
            .map_err(|e| e.in_channel(channel))?;
        Ok((spectrum, statistics))
    }

    /// Compute the statistics of every channel of `record`.
    ///
    /// # Errors
    ///
    /// The error of the lowest-indexed channel that failed, attributed to
    /// that channel.
    pub fn aggregate(&self, record: &MultiChannelRecord) -> Result<WaveStatistics> {
        let channel_count = record.channel_count();
        debug!(
            "Aggregating {} channels of {} samples (parallel: {})",
            channel_count,
            record.len(),
            self.parallel
        );

        let results: Vec<Result<(SpectrumEstimate, ChannelStatistics)>> = if self.parallel {
            (0..channel_count)
                .into_par_iter()
                .map(|channel| self.analyze_channel(record, channel))
                .collect()
        } else {
            (0..channel_count)
                .map(|channel| self.analyze_channel(record, channel))
                .collect()
        };

        let mut analyzed = Vec::with_capacity(channel_count);
        for result in results {
            analyzed.push(result?);
        }

        let Some((first, _)) = analyzed.first() else {
            return Err(WaveError::invalid("record has no channels"));
        };
        let frequencies = first.frequencies.clone();
        let confidence = first.confidence;
        let block_length = first.block_length;
        let blocks = first.blocks;

        let mut density = Array2::<f64>::zeros((frequencies.len(), channel_count));
        let mut channels = Vec::with_capacity(channel_count);
        for (channel, (spectrum, statistics)) in analyzed.into_iter().enumerate() {
            if spectrum.frequencies != frequencies || spectrum.density.len() != frequencies.len() {
                return Err(WaveError::invalid(format!(
                    "frequency axis of {} bins does not match the {} bins of channel 0",
                    spectrum.frequencies.len(),
                    frequencies.len()
                ))
                .in_channel(channel));
            }
            density
                .column_mut(channel)
                .assign(&ArrayView1::from(&spectrum.density[..]));
            info!(
                "Channel {}: fp = {:.3} Hz, Tp = {:.2} s, Hm0 = {:.4} m, Emax = {:.3e} m²/Hz",
                channel,
                statistics.peak_frequency,
                statistics.peak_period,
                statistics.significant_height,
                statistics.max_density
            );
            channels.push(statistics);
        }

        let mean_peak_period = round2(
            channels.iter().map(|c| c.peak_period).sum::<f64>() / channels.len() as f64,
        );
        info!("Mean peak period: {:.2} s", mean_peak_period);

        Ok(WaveStatistics {
            frequencies,
            density,
            channels,
            mean_peak_period,
            confidence,
            block_length,
            blocks,
            sample_rate: record.sample_rate(),
        })
    }
}

/// Aggregate a record sequentially at the default confidence level
pub fn aggregate(record: &MultiChannelRecord, block_length: usize) -> Result<WaveStatistics> {
    WaveStatisticsAggregator::new(block_length).aggregate(record)
}
