//! Magnitude spectrum of a block of audio

use anyhow::Result;
use clap::Parser;
use radix_dsp_core::{
    fft::{fft, is_power_of_two},
    Complex, CoreError,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::common::read_wav_mono;

/// Largest FFT size accepted from the command line
pub const MAX_SPECTRUM_SIZE: usize = 1 << 24;

/// Spectrum configuration
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
pub struct SpectrumConfig {
    /// Input mono WAV file
    #[arg(short, long)]
    pub input: PathBuf,

    /// FFT size (power of 2)
    #[arg(long, default_value_t = 1024)]
    pub size: usize,

    /// Print the bins as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// One spectrum bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumBin {
    pub frequency: f64,
    pub magnitude: f64,
}

/// Computes the positive-frequency magnitude spectrum of the first `size`
/// samples, zero-padding shorter input.
pub fn compute_spectrum(samples: &[f64], sample_rate: f64, size: usize) -> Result<Vec<SpectrumBin>> {
    if !(sample_rate > 0.0) {
        anyhow::bail!("Invalid sample rate: {}", sample_rate);
    }

    // Validated before the block is allocated
    if !is_power_of_two(size) || size > MAX_SPECTRUM_SIZE {
        return Err(CoreError::InvalidLength { len: size }.into());
    }

    let mut block = vec![Complex::ZERO; size];
    for (slot, &sample) in block.iter_mut().zip(samples) {
        *slot = Complex::from(sample);
    }

    let spectrum = fft(&block)?;

    let resolution = sample_rate / size as f64;
    Ok(spectrum[..=size / 2]
        .iter()
        .enumerate()
        .map(|(bin, c)| SpectrumBin {
            frequency: bin as f64 * resolution,
            magnitude: c.magnitude(),
        })
        .collect())
}

/// Read the configured WAV file and compute its spectrum
pub fn run(config: &SpectrumConfig) -> Result<Vec<SpectrumBin>> {
    let audio = read_wav_mono(&config.input)?;
    info!(
        "Computing {}-point spectrum of {:?} at {} Hz",
        config.size, config.input, audio.sample_rate
    );
    compute_spectrum(&audio.samples, audio.sample_rate as f64, config.size)
}

/// Format bins as `frequency magnitude` lines, or as JSON
pub fn format_bins(bins: &[SpectrumBin], json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(bins)?)
    } else {
        Ok(bins
            .iter()
            .map(|bin| format!("{:.3} {:.6}", bin.frequency, bin.magnitude))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
