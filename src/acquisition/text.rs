// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Delimited text recordings
//!
//! Wave gauge recorders export one line per time step with one numeric
//! column per sensor. This loader keeps the configured gauge columns and
//! converts them to metres with the calibration factor.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use ndarray::Array2;

use super::MultiChannelRecord;
use crate::config::InputConfig;

/// Load a recording from a delimited text file.
pub fn load_delimited<P: AsRef<Path>>(
    path: P,
    input: &InputConfig,
    sample_rate: f64,
) -> Result<MultiChannelRecord> {
    let path = path.as_ref();
    debug!("Loading recording from {:?}", path);
    let file =
        File::open(path).with_context(|| format!("Failed to open recording {:?}", path))?;
    parse_delimited(BufReader::new(file), input, sample_rate)
        .with_context(|| format!("Failed to load recording {:?}", path))
}

/// Parse a delimited recording from any buffered reader.
///
/// Blank lines and lines starting with `#` are ignored, as are the first
/// `skip_rows` lines.
pub fn parse_delimited<R: BufRead>(
    reader: R,
    input: &InputConfig,
    sample_rate: f64,
) -> Result<MultiChannelRecord> {
    let delimiter = input.delimiter.trim();
    let columns = &input.channel_columns;
    let mut values: Vec<f64> = Vec::new();
    let mut rows = 0usize;

    for (line_index, line) in reader.lines().enumerate().skip(input.skip_rows) {
        let line = line.with_context(|| format!("Failed to read line {}", line_index + 1))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = if delimiter.is_empty() {
            line.split_whitespace().collect()
        } else {
            line.split(delimiter).map(str::trim).collect()
        };

        for &column in columns {
            let field = fields.get(column).with_context(|| {
                format!(
                    "Line {} has {} columns, column {} requested",
                    line_index + 1,
                    fields.len(),
                    column
                )
            })?;
            let value: f64 = field.parse().with_context(|| {
                format!(
                    "Line {}, column {}: '{}' is not a number",
                    line_index + 1,
                    column,
                    field
                )
            })?;
            values.push(value * input.calibration);
        }
        rows += 1;
    }

    if rows == 0 {
        anyhow::bail!("Recording contains no samples");
    }
    debug!("Read {} samples for {} channels", rows, columns.len());

    let samples = Array2::from_shape_vec((rows, columns.len()), values)
        .context("Failed to shape recording")?;
    Ok(MultiChannelRecord::new(samples, sample_rate)?)
}
