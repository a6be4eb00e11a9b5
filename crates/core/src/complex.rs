//! Complex number value type

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Complex number with double-precision real and imaginary parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub real: f64,
    pub imag: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { real: 0.0, imag: 0.0 };

    pub fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    /// Value with magnitude `radius` at angle `theta` (radians)
    pub fn from_polar(radius: f64, theta: f64) -> Self {
        Self::new(radius * theta.cos(), radius * theta.sin())
    }

    pub fn conj(&self) -> Self {
        Self::new(self.real, -self.imag)
    }

    pub fn magnitude(&self) -> f64 {
        self.real.hypot(self.imag)
    }

    pub fn norm_sqr(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }

    pub fn phase(&self) -> f64 {
        self.imag.atan2(self.real)
    }
}

impl From<f64> for Complex {
    fn from(real: f64) -> Self {
        Complex::new(real, 0.0)
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Self::Output {
        Complex::new(self.real + rhs.real, self.imag + rhs.imag)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Self::Output {
        Complex::new(self.real - rhs.real, self.imag - rhs.imag)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Self::Output {
        Complex::new(
            self.real * rhs.real - self.imag * rhs.imag,
            self.real * rhs.imag + self.imag * rhs.real,
        )
    }
}

impl Div for Complex {
    type Output = Complex;

    fn div(self, rhs: Complex) -> Self::Output {
        let denom = rhs.norm_sqr();
        Complex::new(
            (self.real * rhs.real + self.imag * rhs.imag) / denom,
            (self.imag * rhs.real - self.real * rhs.imag) / denom,
        )
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Self::Output {
        Complex::new(-self.real, -self.imag)
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;

    fn mul(self, rhs: f64) -> Self::Output {
        Complex::new(self.real * rhs, self.imag * rhs)
    }
}

impl Div<f64> for Complex {
    type Output = Complex;

    fn div(self, rhs: f64) -> Self::Output {
        Complex::new(self.real / rhs, self.imag / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_operations() {
        let c = Complex::new(3.0, 4.0);
        assert_eq!(c.magnitude(), 5.0);
        assert_eq!(c.norm_sqr(), 25.0);
        assert!((c.phase() - 0.9272952180016122).abs() < 1e-10);
        assert_eq!(c.conj(), Complex::new(3.0, -4.0));
    }

    #[test]
    fn test_complex_arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);

        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        assert_eq!(a * b, Complex::new(5.0, 5.0));
        assert_eq!(-a, Complex::new(-1.0, -2.0));
        assert_eq!(a * 2.0, Complex::new(2.0, 4.0));
        assert_eq!(a / 2.0, Complex::new(0.5, 1.0));

        let q = (a * b) / b;
        assert!((q.real - a.real).abs() < 1e-12);
        assert!((q.imag - a.imag).abs() < 1e-12);
    }

    #[test]
    fn test_from_polar() {
        let w = Complex::from_polar(1.0, -std::f64::consts::FRAC_PI_2);
        assert!(w.real.abs() < 1e-15);
        assert!((w.imag + 1.0).abs() < 1e-15);
        assert_eq!(Complex::from(2.5), Complex::new(2.5, 0.0));
    }
}
