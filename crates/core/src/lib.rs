//! radix-dsp core - DSP primitives
//!
//! This crate provides a recursive radix-2 FFT and its inverse, circular and
//! linear convolution built on top of it, and windowed-sinc FIR filters
//! (low-pass, high-pass, band-pass) evaluated one sample at a time.

pub mod complex;
pub mod error;
pub mod fft;
pub mod filter;

pub use complex::Complex;
pub use error::{CoreError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        complex::Complex,
        error::{CoreError, Result},
        fft::{add, cconvolve, convolve, fft, ifft, is_power_of_two},
        filter::{Filter, FilterKind, FilterSpec, FirFilter, MAX_NUM_TAPS},
    };
}
