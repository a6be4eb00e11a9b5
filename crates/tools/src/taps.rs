//! Filter tap listing

use anyhow::Result;
use clap::Parser;
use radix_dsp_core::filter::FirFilter;
use serde::{Deserialize, Serialize};

use crate::config::FilterArgs;

/// Tap listing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
pub struct TapsConfig {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print the taps as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Design the configured filter and format its taps
pub fn run(config: &TapsConfig) -> Result<String> {
    let spec = config.filter.to_spec(None)?;
    let filter = FirFilter::new(spec)?;

    if config.json {
        Ok(serde_json::to_string_pretty(filter.taps())?)
    } else {
        Ok(filter
            .taps()
            .iter()
            .map(|tap| tap.to_string())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}
