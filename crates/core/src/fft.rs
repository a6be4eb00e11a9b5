//! Recursive radix-2 FFT and FFT-based convolution
//!
//! All transforms take a slice and return a freshly allocated signal of the
//! same length. Lengths must be a power of two; a single-sample signal is
//! also accepted since it is its own transform.

use crate::{complex::Complex, CoreError, Result};
use std::f64::consts::PI;
use tracing::trace;

/// Returns true if `n` is a power of two greater than one.
///
/// Returns false for `1`; single-sample signals are accepted by the
/// transform base case instead.
pub fn is_power_of_two(n: usize) -> bool {
    n > 1 && n.is_power_of_two()
}

/// Lengths the transforms accept
fn check_length(len: usize) -> Result<()> {
    if len == 1 || is_power_of_two(len) {
        Ok(())
    } else {
        Err(CoreError::InvalidLength { len })
    }
}

fn check_same_length(x: &[Complex], y: &[Complex]) -> Result<()> {
    if x.len() != y.len() {
        return Err(CoreError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    check_length(x.len())?;
    check_length(y.len())
}

/// Forward FFT using the recursive Cooley-Tukey radix-2 decomposition.
pub fn fft(x: &[Complex]) -> Result<Vec<Complex>> {
    let n = x.len();
    if n == 1 {
        return Ok(vec![x[0]]);
    }

    // Checked at every level of the recursion
    if !is_power_of_two(n) {
        return Err(CoreError::InvalidLength { len: n });
    }

    let half = n / 2;
    let even: Vec<Complex> = x.iter().step_by(2).copied().collect();
    let odd: Vec<Complex> = x.iter().skip(1).step_by(2).copied().collect();

    let p = fft(&even)?;
    let q = fft(&odd)?;

    let mut y = vec![Complex::ZERO; n];
    for i in 0..half {
        let theta = -2.0 * PI * i as f64 / n as f64;
        let wq = Complex::from_polar(1.0, theta) * q[i];
        y[i] = p[i] + wq;
        y[i + half] = p[i] - wq;
    }

    Ok(y)
}

/// Inverse FFT, computed as `conj(fft(conj(x))) / n`.
pub fn ifft(x: &[Complex]) -> Result<Vec<Complex>> {
    check_length(x.len())?;

    let n = x.len() as f64;
    let conjugated: Vec<Complex> = x.iter().map(Complex::conj).collect();
    let y = fft(&conjugated)?;

    Ok(y.iter().map(|c| c.conj() / n).collect())
}

/// Circular convolution of two equal-length signals.
///
/// Computed as the inverse transform of the point-wise product of both
/// spectra, so indices wrap modulo the signal length.
pub fn cconvolve(x: &[Complex], y: &[Complex]) -> Result<Vec<Complex>> {
    check_same_length(x, y)?;

    let a = fft(x)?;
    let b = fft(y)?;
    let product: Vec<Complex> = a.iter().zip(b.iter()).map(|(&a, &b)| a * b).collect();

    ifft(&product)
}

/// Linear convolution of two equal-length signals.
///
/// Both inputs are zero-padded to twice their length before the circular
/// convolution, which is enough room for the full `2n - 1` result. The
/// returned signal has length `2n`; its last sample is zero up to rounding.
pub fn convolve(x: &[Complex], y: &[Complex]) -> Result<Vec<Complex>> {
    check_same_length(x, y)?;

    let padded_len = 2 * x.len();
    debug_assert!(is_power_of_two(padded_len));
    trace!("linear convolution of {} samples, padded to {}", x.len(), padded_len);

    let a = zero_pad(x, padded_len);
    let b = zero_pad(y, padded_len);

    cconvolve(&a, &b)
}

fn zero_pad(x: &[Complex], len: usize) -> Vec<Complex> {
    let mut padded = Vec::with_capacity(len);
    padded.extend_from_slice(x);
    padded.resize(len, Complex::ZERO);
    padded
}

/// Element-wise sum of equal-length real signals.
///
/// An empty list of signals sums to an empty signal.
pub fn add<S: AsRef<[f64]>>(signals: &[S]) -> Result<Vec<f64>> {
    for pair in signals.windows(2) {
        let (left, right) = (pair[0].as_ref().len(), pair[1].as_ref().len());
        if left != right {
            return Err(CoreError::LengthMismatch { left, right });
        }
    }

    let len = signals.first().map_or(0, |s| s.as_ref().len());
    let mut sum = vec![0.0; len];
    for signal in signals {
        for (acc, &value) in sum.iter_mut().zip(signal.as_ref()) {
            *acc += value;
        }
    }

    Ok(sum)
}
