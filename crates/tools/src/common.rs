//! Common utilities for tools: logging, config files and WAV I/O

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Initialize logging from the global verbosity flags
pub fn init_logging(verbose: bool, debug: bool) {
    let log_level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();
}

/// Load configuration from file
pub fn load_config<T: for<'a> Deserialize<'a>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    // Try JSON first, then TOML
    if let Ok(config) = serde_json::from_str(&content) {
        return Ok(config);
    }

    toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Save configuration to file, as JSON for `.json` paths and TOML otherwise
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let content = if path.extension().and_then(|s| s.to_str()) == Some("json") {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;
    Ok(())
}

/// Mono audio read from a WAV file, normalized to [-1, 1]
#[derive(Debug, Clone)]
pub struct MonoAudio {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

/// Read a mono WAV file
pub fn read_wav_mono(path: &Path) -> Result<MonoAudio> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {:?}", path))?;

    let spec = reader.spec();
    if spec.channels != 1 {
        anyhow::bail!(
            "Only mono WAV input is supported, {:?} has {} channels",
            path,
            spec.channels
        );
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<Vec<_>, _>>(),
        hound::SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / full_scale))
                .collect::<Result<Vec<_>, _>>()
        }
    }
    .with_context(|| "Failed to read audio samples")?;

    info!("Read {} samples from {:?}", samples.len(), path);
    Ok(MonoAudio {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Write samples to a 32-bit float mono WAV file
pub fn write_wav_mono(samples: &[f64], path: &Path, sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {:?}", path))?;

    for &sample in samples {
        writer.write_sample(sample as f32)?;
    }

    writer.finalize()?;
    info!("Wrote {} samples to {:?}", samples.len(), path);
    Ok(())
}
