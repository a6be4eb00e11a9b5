//! radix-dsp - FIR filtering and spectrum tool
//!
//! Thin command-line host around the radix-dsp core library

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use radix_dsp_tools::{init_logging, process, spectrum, taps};
use radix_dsp_tools::{ProcessConfig, SpectrumConfig, TapsConfig};

/// radix-dsp command-line tool
#[derive(Parser)]
#[command(name = "radix-dsp")]
#[command(about = "Windowed-sinc FIR filtering and radix-2 FFT spectra")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Design a filter and print its taps
    Taps(TapsConfig),
    /// Filter a mono WAV file
    Filter(ProcessConfig),
    /// Print the magnitude spectrum of a mono WAV file
    Spectrum(SpectrumConfig),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Commands::Taps(config) => {
            println!("{}", taps::run(&config)?);
        }

        Commands::Filter(config) => {
            info!("Filtering {:?} into {:?}", config.input, config.output);

            let report = process::run(&config)?;
            println!(
                "✓ Filtered {} samples at {} Hz (peak {:.4} -> {:.4}), written to {:?}",
                report.samples, report.sample_rate, report.peak_in, report.peak_out, config.output
            );
        }

        Commands::Spectrum(config) => {
            let bins = spectrum::run(&config)?;
            println!("{}", spectrum::format_bins(&bins, config.json)?);
        }
    }

    Ok(())
}
