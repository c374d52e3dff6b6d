// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Wave spectra library
//!
//! This library computes wave statistics from surface elevation records of
//! a wave flume: variance density spectra with confidence bounds, peak
//! frequency and period, significant wave height and the wavelength at a
//! given depth.

pub mod acquisition;
pub mod config;
pub mod dispersion;
pub mod error;
pub mod report;
pub mod spectral;
pub mod statistics;
pub mod utility;

pub use acquisition::MultiChannelRecord;
pub use dispersion::{wavelength, WavelengthResult, WavelengthSolver};
pub use error::{Result, WaveError};
pub use report::SiteReport;
pub use spectral::{spectral_moment, wave_spectrum, SpectrumEstimate, SpectrumEstimator};
pub use statistics::{aggregate, WaveStatistics, WaveStatisticsAggregator};
