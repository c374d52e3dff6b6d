// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Load a configuration file and print how it validates
use anyhow::Result;
use std::path::PathBuf;
use wave_spectra::config::Config;

fn main() -> Result<()> {
    env_logger::init();
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.yaml"));

    println!("Testing file: {:?}", path);
    println!("File exists: {}", path.exists());

    match Config::from_file(&path) {
        Ok(config) => {
            println!("Validation succeeded");
            println!(
                "Block length {} at {} Hz: df = {} Hz",
                config.analysis.block_length,
                config.analysis.sample_rate,
                config.analysis.frequency_resolution()
            );
            println!("Depth {} m, {} channels", config.site.depth, config.input.channel_columns.len());
        }
        Err(e) => println!("Validation failed: {:#}", e),
    }

    Ok(())
}
