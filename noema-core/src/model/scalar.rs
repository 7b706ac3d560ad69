use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A real number clamped to `[0.0, 1.0]`.
///
/// Shared by every `[0,1]`-bounded scalar in the data model: strength,
/// activation, confidence, abstraction, difficulty, volatility, salary
/// weight, interview frequency, and the edge/weight/vector confidences.
/// Construction always clamps, so a `Unit` is never out of range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Unit(f64);

impl Unit {
    /// Clamp `value` into `[0.0, 1.0]`.
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// The zero value.
    pub const ZERO: Unit = Unit(0.0);
    /// The one value.
    pub const ONE: Unit = Unit(1.0);

    /// Raw `f64` value, guaranteed to be in `[0.0, 1.0]`.
    pub fn value(self) -> f64 {
        self.0
    }

    /// `clamp01(x) = max(0, min(1, x))`, applied again defensively after
    /// arithmetic that may have been done in raw `f64` space.
    pub fn clamp01(x: f64) -> f64 {
        x.max(0.0).min(1.0)
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl From<f64> for Unit {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Unit> for f64 {
    fn from(u: Unit) -> Self {
        u.0
    }
}

impl Add for Unit {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl Sub for Unit {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.0 - rhs.0)
    }
}

impl Mul<f64> for Unit {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_above_one() {
        assert_eq!(Unit::new(1.5).value(), 1.0);
    }

    #[test]
    fn clamps_below_zero() {
        assert_eq!(Unit::new(-0.5).value(), 0.0);
    }

    #[test]
    fn arithmetic_clamps() {
        let a = Unit::new(0.9);
        let b = Unit::new(0.5);
        assert_eq!((a + b).value(), 1.0);
        assert_eq!((a - Unit::new(2.0)).value(), 0.0);
    }

    #[test]
    fn display_is_fixed_precision() {
        assert_eq!(Unit::new(0.5).to_string(), "0.5000");
    }
}
