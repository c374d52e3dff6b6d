// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the wave-spectra project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use std::fs;
use std::path::Path;
use std::sync::Once;
use tempfile::tempdir;
use wave_spectra::config::Config;

static INIT: Once = Once::new();

// Setup logger for tests
fn setup() {
    INIT.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .init();
    });
}

fn assert_sample_created(config_path: &Path) -> Result<()> {
    let sample_path = config_path.with_extension("sample.yaml");
    assert!(sample_path.exists(), "Sample config file was not created");

    // Load and verify the sample file is valid
    let sample_config = Config::from_file(&sample_path)?;
    assert_eq!(sample_config, Config::default());
    Ok(())
}

#[test]
fn test_schema_error_creates_sample_file() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");

    // Valid YAML with type mismatches the schema rejects
    let invalid_yaml = r#"
analysis:
  block_length: "two thousand"
  sample_rate: 100.0
site:
  depth: [0.2]
"#;
    fs::write(&config_path, invalid_yaml)?;

    let result = Config::from_file(&config_path);
    assert!(result.is_err(), "Config loading should have failed");
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Configuration validation failed"));

    assert_sample_created(&config_path)
}

#[test]
fn test_unknown_section_creates_sample_file() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");

    fs::write(&config_path, "plotting:\n  dpi: 300\n")?;

    assert!(Config::from_file(&config_path).is_err());
    assert_sample_created(&config_path)
}

#[test]
fn test_specific_rule_error_creates_sample_file() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");

    // Passes the schema but three locations for two gauges
    let invalid_config = r#"
site:
  depth: 0.2
  sensor_locations: [19.2, 19.5, 19.9]
input:
  channel_columns: [1, 2]
"#;
    fs::write(&config_path, invalid_config)?;

    let err = Config::from_file(&config_path).unwrap_err();
    assert!(err.to_string().contains("sensor locations"));

    assert_sample_created(&config_path)
}

#[test]
fn test_malformed_yaml_is_reported() -> Result<()> {
    setup();
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.yaml");

    fs::write(&config_path, "analysis: [unclosed\n")?;

    let err = Config::from_file(&config_path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse YAML"));
    Ok(())
}
