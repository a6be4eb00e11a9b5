//! radix-dsp tools library

pub mod common;
pub mod config;
pub mod process;
pub mod spectrum;
pub mod taps;

pub use common::{init_logging, load_config, save_config, read_wav_mono, write_wav_mono, MonoAudio};
pub use config::{FilterArgs, ResponseType};
pub use process::{ProcessConfig, ProcessReport};
pub use spectrum::{SpectrumBin, SpectrumConfig};
pub use taps::TapsConfig;
