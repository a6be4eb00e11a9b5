//! Filter configuration from command line flags or a config file

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use radix_dsp_core::filter::{FilterKind, FilterSpec};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::common::load_config;

/// Filter response selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum ResponseType {
    Lpf,
    Hpf,
    Bpf,
}

/// Filter design arguments
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct FilterArgs {
    /// Filter config file (TOML or JSON); overrides the flags below
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Filter response
    #[arg(long, value_enum)]
    pub kind: Option<ResponseType>,

    /// Number of taps
    #[arg(long, default_value_t = 101)]
    pub taps: usize,

    /// Sampling frequency in Hz
    #[arg(long)]
    pub sample_rate: Option<f64>,

    /// Cutoff frequency in Hz (lpf, hpf)
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// Lower band edge in Hz (bpf)
    #[arg(long)]
    pub lower: Option<f64>,

    /// Upper band edge in Hz (bpf)
    #[arg(long)]
    pub upper: Option<f64>,
}

impl Default for FilterArgs {
    fn default() -> Self {
        Self {
            config: None,
            kind: None,
            taps: 101,
            sample_rate: None,
            cutoff: None,
            lower: None,
            upper: None,
        }
    }
}

impl FilterArgs {
    /// Resolve the filter spec, using `default_rate` when no sample rate is given
    pub fn to_spec(&self, default_rate: Option<f64>) -> Result<FilterSpec> {
        if let Some(path) = &self.config {
            return load_config(path);
        }

        let kind = match self.kind.context("Either --config or --kind must be specified")? {
            ResponseType::Lpf => FilterKind::LowPass {
                cutoff: self.cutoff.context("--cutoff is required for lpf")?,
            },
            ResponseType::Hpf => FilterKind::HighPass {
                cutoff: self.cutoff.context("--cutoff is required for hpf")?,
            },
            ResponseType::Bpf => FilterKind::BandPass {
                lower: self.lower.context("--lower is required for bpf")?,
                upper: self.upper.context("--upper is required for bpf")?,
            },
        };

        let sample_rate = self
            .sample_rate
            .or(default_rate)
            .context("--sample-rate is required")?;

        Ok(FilterSpec::new(kind, self.taps, sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::save_config;
    use tempfile::NamedTempFile;

    #[test]
    fn test_spec_from_flags() {
        let args = FilterArgs {
            kind: Some(ResponseType::Bpf),
            taps: 65,
            sample_rate: Some(8000.0),
            lower: Some(300.0),
            upper: Some(3400.0),
            ..Default::default()
        };

        let spec = args.to_spec(None).unwrap();
        assert_eq!(spec.kind, FilterKind::BandPass { lower: 300.0, upper: 3400.0 });
        assert_eq!(spec.num_taps, 65);
        assert_eq!(spec.sample_rate, 8000.0);
    }

    #[test]
    fn test_spec_uses_default_rate() {
        let args = FilterArgs {
            kind: Some(ResponseType::Lpf),
            taps: 11,
            cutoff: Some(1000.0),
            ..Default::default()
        };

        assert_eq!(args.to_spec(Some(44100.0)).unwrap().sample_rate, 44100.0);
        assert!(args.to_spec(None).is_err());
    }

    #[test]
    fn test_default_matches_command_line() {
        #[derive(clap::Parser)]
        struct Cli {
            #[command(flatten)]
            filter: FilterArgs,
        }

        let parsed = <Cli as clap::Parser>::parse_from(["radix-dsp", "--kind", "lpf"]).filter;
        assert_eq!(parsed.taps, FilterArgs::default().taps);
        assert_eq!(FilterArgs::default().taps, 101);

        let args = FilterArgs {
            kind: Some(ResponseType::Lpf),
            cutoff: Some(1000.0),
            ..Default::default()
        };
        assert_eq!(args.to_spec(Some(8000.0)).unwrap().num_taps, 101);
    }

    #[test]
    fn test_missing_flags() {
        assert!(FilterArgs::default().to_spec(Some(8000.0)).is_err());

        let args = FilterArgs {
            kind: Some(ResponseType::Hpf),
            ..Default::default()
        };
        assert!(args.to_spec(Some(8000.0)).is_err());
    }

    #[test]
    fn test_spec_from_file() {
        let spec = FilterSpec::new(FilterKind::LowPass { cutoff: 3000.0 }, 31, 48000.0);
        let temp_file = NamedTempFile::new().unwrap();
        save_config(&spec, temp_file.path()).unwrap();

        let args = FilterArgs {
            config: Some(temp_file.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(args.to_spec(None).unwrap(), spec);
    }
}
