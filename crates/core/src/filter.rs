//! Windowed-sinc FIR filter design and streaming evaluation
//!
//! Taps are the ideal low-pass, high-pass or band-pass impulse response,
//! truncated to `num_taps` samples and shifted to be causal. No smoothing
//! window is applied on top of the rectangular truncation.

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use tracing::debug;

/// Upper bound on the number of filter taps
pub const MAX_NUM_TAPS: usize = 1000;

/// Generic streaming filter trait
pub trait Filter {
    /// Process a single sample, updating the filter history
    fn do_sample(&mut self, sample: f64) -> f64;

    /// Process a sequence of samples in order
    ///
    /// History carries over exactly as if `do_sample` had been called once
    /// per element.
    fn do_sample_all(&mut self, samples: &[f64]) -> Vec<f64> {
        samples.iter().map(|&sample| self.do_sample(sample)).collect()
    }

    /// Reset the filter state
    fn reset(&mut self);
}

/// Filter response and its cutoff frequencies in Hz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterKind {
    LowPass { cutoff: f64 },
    HighPass { cutoff: f64 },
    BandPass { lower: f64, upper: f64 },
}

impl FilterKind {
    /// Short name of the response type
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::LowPass { .. } => "LPF",
            FilterKind::HighPass { .. } => "HPF",
            FilterKind::BandPass { .. } => "BPF",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::LowPass { cutoff } | FilterKind::HighPass { cutoff } => {
                write!(f, "{} {} Hz", self.name(), cutoff)
            }
            FilterKind::BandPass { lower, upper } => {
                write!(f, "{} {}-{} Hz", self.name(), lower, upper)
            }
        }
    }
}

/// Complete description of a filter to design
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(flatten)]
    pub kind: FilterKind,
    pub num_taps: usize,
    pub sample_rate: f64,
}

impl FilterSpec {
    pub fn new(kind: FilterKind, num_taps: usize, sample_rate: f64) -> Self {
        Self {
            kind,
            num_taps,
            sample_rate,
        }
    }

    /// Check every design constraint, failing on the first violation
    pub fn validate(&self) -> Result<()> {
        if !(self.sample_rate > 0.0) {
            return Err(CoreError::invalid_parameter(format!(
                "sample rate must be greater than zero, got {}",
                self.sample_rate
            )));
        }

        if self.num_taps == 0 || self.num_taps > MAX_NUM_TAPS {
            return Err(CoreError::invalid_parameter(format!(
                "number of taps must be between 1 and {}, got {}",
                MAX_NUM_TAPS, self.num_taps
            )));
        }

        let nyquist = self.sample_rate / 2.0;
        match self.kind {
            FilterKind::LowPass { cutoff } | FilterKind::HighPass { cutoff } => {
                check_below_nyquist("cutoff", cutoff, nyquist)
            }
            FilterKind::BandPass { lower, upper } => {
                if !(upper > lower) {
                    return Err(CoreError::invalid_parameter(format!(
                        "upper cutoff {} must be greater than lower cutoff {}",
                        upper, lower
                    )));
                }
                check_below_nyquist("lower cutoff", lower, nyquist)?;
                check_below_nyquist("upper cutoff", upper, nyquist)
            }
        }
    }

    /// Synthesize the tap array for this spec
    ///
    /// Assumes the spec has been validated.
    fn design(&self) -> Vec<f64> {
        let nyquist = self.sample_rate / 2.0;
        let angular = |freq: f64| PI * freq / nyquist;

        (0..self.num_taps)
            .map(|n| {
                // floor(n - (N - 1) / 2)
                let m = n as i64 - (self.num_taps / 2) as i64;
                let mf = m as f64;

                match self.kind {
                    FilterKind::LowPass { cutoff } => {
                        let lambda = angular(cutoff);
                        if m == 0 {
                            lambda / PI
                        } else {
                            (mf * lambda).sin() / (mf * PI)
                        }
                    }
                    FilterKind::HighPass { cutoff } => {
                        let lambda = angular(cutoff);
                        if m == 0 {
                            1.0 - lambda / PI
                        } else {
                            -(mf * lambda).sin() / (mf * PI)
                        }
                    }
                    FilterKind::BandPass { lower, upper } => {
                        let lambda = angular(lower);
                        let phi = angular(upper);
                        if m == 0 {
                            (phi - lambda) / PI
                        } else {
                            ((mf * phi).sin() - (mf * lambda).sin()) / (mf * PI)
                        }
                    }
                }
            })
            .collect()
    }
}

fn check_below_nyquist(label: &str, freq: f64, nyquist: f64) -> Result<()> {
    if freq > 0.0 && freq < nyquist {
        Ok(())
    } else {
        Err(CoreError::invalid_parameter(format!(
            "{} must be greater than zero and less than {} Hz (Fs / 2), got {}",
            label, nyquist, freq
        )))
    }
}

/// Finite Impulse Response (FIR) filter with a circular history buffer
#[derive(Debug, Clone)]
pub struct FirFilter {
    spec: FilterSpec,
    taps: Vec<f64>,
    history: Vec<f64>,
    // Slot holding the most recent sample
    index: usize,
}

impl FirFilter {
    /// Design a new filter from a validated spec
    pub fn new(spec: FilterSpec) -> Result<Self> {
        spec.validate()?;

        let taps = spec.design();
        debug!(
            "Designed {} filter: {} taps at {} Hz",
            spec.kind, spec.num_taps, spec.sample_rate
        );

        Ok(Self {
            spec,
            history: vec![0.0; taps.len()],
            taps,
            index: 0,
        })
    }

    /// Create a low-pass filter
    pub fn lowpass(num_taps: usize, sample_rate: f64, cutoff: f64) -> Result<Self> {
        Self::new(FilterSpec::new(FilterKind::LowPass { cutoff }, num_taps, sample_rate))
    }

    /// Create a high-pass filter
    pub fn highpass(num_taps: usize, sample_rate: f64, cutoff: f64) -> Result<Self> {
        Self::new(FilterSpec::new(FilterKind::HighPass { cutoff }, num_taps, sample_rate))
    }

    /// Create a band-pass filter passing `lower..upper` Hz
    pub fn bandpass(num_taps: usize, sample_rate: f64, lower: f64, upper: f64) -> Result<Self> {
        Self::new(FilterSpec::new(
            FilterKind::BandPass { lower, upper },
            num_taps,
            sample_rate,
        ))
    }

    /// The designed filter taps
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Streams `sample` through the filter; see [`Filter::do_sample`]
    pub fn do_sample(&mut self, sample: f64) -> f64 {
        Filter::do_sample(self, sample)
    }

    /// Streams every sample through the filter; see [`Filter::do_sample_all`]
    pub fn do_sample_all(&mut self, samples: &[f64]) -> Vec<f64> {
        Filter::do_sample_all(self, samples)
    }

    /// Clears the history; see [`Filter::reset`]
    pub fn reset(&mut self) {
        Filter::reset(self)
    }
}

impl Filter for FirFilter {
    fn do_sample(&mut self, sample: f64) -> f64 {
        let len = self.history.len();

        // Overwrite the oldest sample
        self.index = (self.index + len - 1) % len;
        self.history[self.index] = sample;

        // taps[i] weights the sample from i steps ago
        self.taps
            .iter()
            .enumerate()
            .map(|(i, &tap)| tap * self.history[(self.index + i) % len])
            .sum()
    }

    fn reset(&mut self) {
        self.history.fill(0.0);
        self.index = 0;
    }
}
