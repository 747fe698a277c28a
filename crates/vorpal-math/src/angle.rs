//! Angles tagged with their unit, and scalar range helpers.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Unit an [`Angle`] value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnit {
    Degrees,
    Radians,
}

/// An angle value paired with its unit.
///
/// Trigonometric functions always evaluate through radians, so the unit only
/// matters for display and normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub value: f64,
    pub unit: AngleUnit,
}

impl Angle {
    /// Full turn in radians.
    pub const TWO_PI: f64 = TAU;

    pub fn new(value: f64, unit: AngleUnit) -> Self {
        Self { value, unit }
    }

    pub fn degrees(value: f64) -> Self {
        Self::new(value, AngleUnit::Degrees)
    }

    pub fn radians(value: f64) -> Self {
        Self::new(value, AngleUnit::Radians)
    }

    /// Arcsine of `x`, in radians.
    pub fn asin(x: f64) -> Self {
        Self::radians(x.asin())
    }

    /// Arccosine of `x`, in radians.
    pub fn acos(x: f64) -> Self {
        Self::radians(x.acos())
    }

    /// Arctangent of `x`, in radians.
    pub fn atan(x: f64) -> Self {
        Self::radians(x.atan())
    }

    /// Angle of the point `(x, y)` measured from the positive x axis.
    pub fn atan2(y: f64, x: f64) -> Self {
        Self::radians(y.atan2(x))
    }

    /// The same angle expressed in degrees.
    pub fn to_degrees(self) -> Self {
        match self.unit {
            AngleUnit::Degrees => self,
            AngleUnit::Radians => Self::degrees(self.value * 180.0 / PI),
        }
    }

    /// The same angle expressed in radians.
    pub fn to_radians(self) -> Self {
        match self.unit {
            AngleUnit::Degrees => Self::radians(self.value * PI / 180.0),
            AngleUnit::Radians => self,
        }
    }

    /// Wrap into `[0, 360)` degrees or `[0, 2π)` radians, keeping the unit.
    pub fn normalize(self) -> Self {
        let period = match self.unit {
            AngleUnit::Degrees => 360.0,
            AngleUnit::Radians => TAU,
        };
        if (0.0..period).contains(&self.value) {
            return self;
        }
        let wrapped = self.value.rem_euclid(period);
        // rem_euclid can round up to exactly `period` for tiny negative inputs
        let wrapped = if wrapped >= period { 0.0 } else { wrapped };
        Self::new(wrapped, self.unit)
    }

    pub fn sin(self) -> f64 {
        self.to_radians().value.sin()
    }

    pub fn cos(self) -> f64 {
        self.to_radians().value.cos()
    }

    pub fn tan(self) -> f64 {
        self.to_radians().value.tan()
    }
}

/// Map `value` from the range `[from_min, from_max]` onto `[to_min, to_max]`.
///
/// Values outside the source range extrapolate linearly.
pub fn remap(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    (value - from_min) * (to_max - to_min) / (from_max - from_min) + to_min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        let right = Angle::degrees(90.0).to_radians();
        assert_eq!(right.unit, AngleUnit::Radians);
        assert!((right.value - PI / 2.0).abs() < 1e-12);

        let half = Angle::radians(PI).to_degrees();
        assert_eq!(half.unit, AngleUnit::Degrees);
        assert!((half.value - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(Angle::degrees(-90.0).normalize().value, 270.0);
        assert_eq!(Angle::degrees(720.0).normalize().value, 0.0);
        assert_eq!(Angle::degrees(45.0).normalize().value, 45.0);
    }

    #[test]
    fn test_normalize_radians() {
        let a = Angle::radians(-PI / 2.0).normalize();
        assert!((a.value - 1.5 * PI).abs() < 1e-12);
        assert_eq!(Angle::radians(TAU).normalize().value, 0.0);
    }

    #[test]
    fn test_trig_uses_radians() {
        assert!((Angle::degrees(30.0).sin() - 0.5).abs() < 1e-12);
        assert!((Angle::radians(0.0).cos() - 1.0).abs() < 1e-12);
        assert!((Angle::degrees(45.0).tan() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_remap() {
        assert_eq!(remap(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
        assert_eq!(remap(0.0, -1.0, 1.0, 0.0, 255.0), 127.5);
        assert_eq!(remap(20.0, 0.0, 10.0, 0.0, 1.0), 2.0);
    }
}
