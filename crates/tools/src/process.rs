//! Streaming a WAV file through a FIR filter

use anyhow::Result;
use clap::Parser;
use radix_dsp_core::filter::FirFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::common::{read_wav_mono, write_wav_mono};
use crate::config::FilterArgs;

/// Filter run configuration
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
pub struct ProcessConfig {
    /// Input mono WAV file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output WAV file (32-bit float)
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Summary of a completed filter run
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessReport {
    pub samples: usize,
    pub sample_rate: u32,
    pub peak_in: f64,
    pub peak_out: f64,
}

fn peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0, f64::max)
}

/// Filter `config.input` into `config.output`
pub fn run(config: &ProcessConfig) -> Result<ProcessReport> {
    let audio = read_wav_mono(&config.input)?;
    let wav_rate = audio.sample_rate as f64;

    let spec = config.filter.to_spec(Some(wav_rate))?;
    if spec.sample_rate != wav_rate {
        anyhow::bail!(
            "Filter sample rate {} Hz does not match input sample rate {} Hz",
            spec.sample_rate,
            wav_rate
        );
    }

    let mut filter = FirFilter::new(spec)?;
    info!("Filtering {} samples with {}", audio.samples.len(), spec.kind);

    let filtered = filter.do_sample_all(&audio.samples);
    write_wav_mono(&filtered, &config.output, audio.sample_rate)?;

    Ok(ProcessReport {
        samples: filtered.len(),
        sample_rate: audio.sample_rate,
        peak_in: peak(&audio.samples),
        peak_out: peak(&filtered),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::save_config;
    use crate::config::ResponseType;
    use radix_dsp_core::filter::{FilterKind, FilterSpec};
    use std::f64::consts::PI;
    use tempfile::tempdir;

    fn tone(freq: f64, rate: f64, len: usize) -> Vec<f64> {
        (0..len).map(|n| 0.5 * (2.0 * PI * freq * n as f64 / rate).sin()).collect()
    }

    #[test]
    fn test_lowpass_attenuates_high_tone() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");
        write_wav_mono(&tone(3500.0, 8000.0, 2000), &input, 8000).unwrap();

        let config = ProcessConfig {
            input,
            output: output.clone(),
            filter: FilterArgs {
                kind: Some(ResponseType::Lpf),
                taps: 101,
                cutoff: Some(500.0),
                ..Default::default()
            },
        };

        let report = run(&config).unwrap();
        assert_eq!(report.samples, 2000);
        assert_eq!(report.sample_rate, 8000);
        assert!((report.peak_in - 0.5).abs() < 1e-3);

        // Skip the start-up transient while the history fills
        let written = crate::common::read_wav_mono(&output).unwrap();
        assert_eq!(written.samples.len(), 2000);
        assert!(peak(&written.samples[200..]) < 0.05);
    }

    #[test]
    fn test_sample_rate_mismatch() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let filter_path = dir.path().join("filter.toml");
        write_wav_mono(&tone(440.0, 8000.0, 64), &input, 8000).unwrap();

        let spec = FilterSpec::new(FilterKind::LowPass { cutoff: 1000.0 }, 21, 16000.0);
        save_config(&spec, &filter_path).unwrap();

        let config = ProcessConfig {
            input,
            output: dir.path().join("out.wav"),
            filter: FilterArgs {
                config: Some(filter_path),
                ..Default::default()
            },
        };
        assert!(run(&config).is_err());
    }

    #[test]
    fn test_invalid_filter_is_reported() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.wav");
        write_wav_mono(&tone(440.0, 8000.0, 64), &input, 8000).unwrap();

        let config = ProcessConfig {
            input,
            output: dir.path().join("out.wav"),
            filter: FilterArgs {
                kind: Some(ResponseType::Hpf),
                taps: 21,
                cutoff: Some(4000.0),
                ..Default::default()
            },
        };
        assert!(run(&config).is_err());
    }
}
