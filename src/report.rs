// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Site report
//!
//! Collects the wave statistics of a record together with the site metadata
//! and the wavelength of every gauge's peak period. The report serializes to
//! JSON and prints as a plain text table.

use std::fmt;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Serialize;

use crate::acquisition::MultiChannelRecord;
use crate::config::Config;
use crate::dispersion::{WavelengthResult, WavelengthSolver};
use crate::spectral::{ConfidenceInterval, SpectralPeriods};
use crate::statistics::{WaveStatistics, WaveStatisticsAggregator};

/// One gauge row of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelReport {
    pub channel: usize,
    /// Position along the flume (m), when configured
    pub location: Option<f64>,
    pub max_density: f64,
    pub peak_frequency: f64,
    pub peak_period: f64,
    pub significant_height: f64,
    pub periods: SpectralPeriods,
    /// `None` when the peak period rounds to zero
    pub wavelength: Option<WavelengthResult>,
}

/// Analysis summary of one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteReport {
    pub timestamp: DateTime<Utc>,
    /// Measurement duration (s)
    pub duration: f64,
    pub samples: usize,
    pub sample_rate: f64,
    pub block_length: usize,
    pub frequency_resolution: f64,
    pub blocks: usize,
    pub confidence: ConfidenceInterval,
    /// Water depth (m)
    pub depth: f64,
    pub mean_peak_period: f64,
    /// Wavelength of the mean peak period
    pub mean_wavelength: Option<WavelengthResult>,
    pub channels: Vec<ChannelReport>,
}

/// Solve the wavelength of a rounded peak period, skipping periods that
/// round to zero (peaks above 200 Hz)
fn solve_rounded(
    solver: &WavelengthSolver,
    period: f64,
    depth: f64,
) -> crate::error::Result<Option<WavelengthResult>> {
    if period == 0.0 {
        return Ok(None);
    }
    solver.solve(period, depth).map(Some)
}

impl SiteReport {
    /// Assemble a report from already computed statistics
    pub fn build(
        record: &MultiChannelRecord,
        statistics: &WaveStatistics,
        config: &Config,
    ) -> Result<Self> {
        let solver = WavelengthSolver::from_config(&config.dispersion);
        let depth = config.site.depth;

        let channels = statistics
            .channels
            .iter()
            .map(|c| {
                let wavelength =
                    solve_rounded(&solver, c.peak_period, depth).with_context(|| {
                        format!("Failed to solve the wavelength of channel {}", c.channel)
                    })?;
                if wavelength.is_none() {
                    warn!(
                        "Channel {}: peak at {:.1} Hz rounds to a zero period, no wavelength",
                        c.channel, c.peak_frequency
                    );
                }
                Ok(ChannelReport {
                    channel: c.channel,
                    location: config.site.location(c.channel),
                    max_density: c.max_density,
                    peak_frequency: c.peak_frequency,
                    peak_period: c.peak_period,
                    significant_height: c.significant_height,
                    periods: c.periods,
                    wavelength,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mean_wavelength = solve_rounded(&solver, statistics.mean_peak_period, depth)
            .context("Failed to solve the wavelength of the mean peak period")?;
        if let Some(mean) = &mean_wavelength {
            debug!(
                "Mean wavelength {:.3} m at depth {} m",
                mean.actual_length, depth
            );
        }

        Ok(Self {
            timestamp: Utc::now(),
            duration: record.duration(),
            samples: record.len(),
            sample_rate: record.sample_rate(),
            block_length: statistics.block_length,
            frequency_resolution: statistics.resolution(),
            blocks: statistics.blocks,
            confidence: statistics.confidence,
            depth,
            mean_peak_period: statistics.mean_peak_period,
            mean_wavelength,
            channels,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

/// Run the full analysis of `record` with the given configuration
pub fn analyze(record: &MultiChannelRecord, config: &Config) -> Result<SiteReport> {
    let statistics = WaveStatisticsAggregator::from_config(&config.analysis)
        .aggregate(record)
        .context("Spectral analysis failed")?;
    SiteReport::build(record, &statistics, config)
}

fn optional(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

impl fmt::Display for SiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis time:         {}", self.timestamp.to_rfc3339())?;
        writeln!(
            f,
            "Duration:              {:.2} s ({} samples at {} Hz)",
            self.duration, self.samples, self.sample_rate
        )?;
        writeln!(
            f,
            "Blocks:                {} x {} samples, df = {:.4} Hz",
            self.blocks, self.block_length, self.frequency_resolution
        )?;
        writeln!(
            f,
            "Confidence ({:.0}%):     [{:.3}, {:.3}] x E(f), {} dof",
            self.confidence.level * 100.0,
            self.confidence.low,
            self.confidence.high,
            self.confidence.degrees_of_freedom
        )?;
        writeln!(f, "Depth:                 {} m", self.depth)?;
        writeln!(f, "Mean peak period:      {:.2} s", self.mean_peak_period)?;
        match &self.mean_wavelength {
            Some(wavelength) => writeln!(
                f,
                "Wavelength:            L0 = {:.3} m, L = {:.3} m ({} water)",
                wavelength.deep_water_length,
                wavelength.actual_length,
                wavelength.regime()
            )?,
            None => writeln!(f, "Wavelength:            -")?,
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>4} {:>8} {:>12} {:>8} {:>7} {:>8} {:>7} {:>7} {:>8}",
            "ch", "x (m)", "Emax (m²/Hz)", "fp (Hz)", "Tp (s)", "Hm0 (m)", "Tm01", "Tm02", "L (m)"
        )?;
        for c in &self.channels {
            writeln!(
                f,
                "{:>4} {:>8} {:>12.4e} {:>8.3} {:>7.2} {:>8.4} {:>7} {:>7} {:>8}",
                c.channel,
                optional(c.location, 2),
                c.max_density,
                c.peak_frequency,
                c.peak_period,
                c.significant_height,
                optional(c.periods.tm01, 2),
                optional(c.periods.tm02, 2),
                optional(c.wavelength.map(|w| w.actual_length), 3)
            )?;
        }
        Ok(())
    }
}
