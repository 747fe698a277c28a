use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::{impl_vector_ops, Vector, Vector3D};
use crate::angle::Angle;
use crate::distribution::{
    Distribution, DistributionError, UniformDoubleDistribution, UniformIntDistribution,
};
use crate::rng::with_global_rng;

/// Immutable 2D vector with a cached magnitude.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vector2D {
    x: f64,
    y: f64,
    magnitude: f64,
}

impl_vector_ops!(Vector2D { x, y });

impl Vector2D {
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        magnitude: 1.0,
    };
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        magnitude: 1.0,
    };

    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            magnitude: x.hypot(y),
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// A vector perpendicular to this one (rotated a quarter turn
    /// counter-clockwise). The zero vector has no perpendicular.
    pub fn perpendicular(self) -> Option<Self> {
        if self == Self::ZERO {
            None
        } else {
            Some(Self::new(-self.y, self.x))
        }
    }

    /// Rotate counter-clockwise by `angle`.
    pub fn rotate(self, angle: Angle) -> Self {
        let (s, c) = (angle.sin(), angle.cos());
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// Lift into 3D at height `z`.
    pub fn lift(self, z: f64) -> Vector3D {
        Vector3D::new(self.x, self.y, z)
    }

    /// Angle between this vector and the positive x axis.
    pub fn heading(self) -> Angle {
        Angle::atan2(self.y, self.x)
    }

    /// Reverse the x component, as when bouncing off a vertical wall.
    pub fn bounce_x(self) -> Self {
        Self::new(-self.x, self.y)
    }

    /// Reverse the y component, as when bouncing off a horizontal wall.
    pub fn bounce_y(self) -> Self {
        Self::new(self.x, -self.y)
    }

    /// Both components drawn uniformly from `[min, max)`.
    pub fn random_range(min: f64, max: f64) -> Result<Self, DistributionError> {
        let mut d = UniformDoubleDistribution::new(min, max)?;
        Ok(Self::random_from(&mut d))
    }

    /// Components drawn uniformly from `[min_x, max_x)` and `[min_y, max_y)`.
    pub fn random_in_rect(
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
    ) -> Result<Self, DistributionError> {
        let mut dx = UniformDoubleDistribution::new(min_x, max_x)?;
        let mut dy = UniformDoubleDistribution::new(min_y, max_y)?;
        Ok(Self::random_with(&mut dx, &mut dy))
    }

    /// Both components drawn as integers from `[min, max)`.
    pub fn random_int_range(min: i64, max: i64) -> Result<Self, DistributionError> {
        let mut d = UniformIntDistribution::new(min, max)?;
        let x = d.sample();
        let y = d.sample();
        Ok(Self::new(x as f64, y as f64))
    }

    /// Components drawn from separate distributions.
    pub fn random_with(dx: &mut impl Distribution<f64>, dy: &mut impl Distribution<f64>) -> Self {
        let x = dx.sample();
        let y = dy.sample();
        Self::new(x, y)
    }

    /// Both components drawn from the same distribution.
    pub fn random_from(d: &mut impl Distribution<f64>) -> Self {
        let x = d.sample();
        let y = d.sample();
        Self::new(x, y)
    }

    /// A unit vector pointing in a uniformly random direction.
    pub fn random_unit() -> Self {
        let theta = with_global_rng(|rng| rng.gen_f64() * TAU);
        Self::new(theta.cos(), theta.sin())
    }
}

impl Vector for Vector2D {
    const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        magnitude: 0.0,
    };

    fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    fn hadamard(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.magnitude
    }
}

impl Default for Vector2D {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[f64; 2]> for Vector2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2D> for [f64; 2] {
    fn from(v: Vector2D) -> Self {
        [v.x, v.y]
    }
}
