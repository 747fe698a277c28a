use serde::{Deserialize, Serialize};

use super::{impl_vector_ops, Vector, Vector2D};
use crate::distribution::{
    gaussian_with, Distribution, DistributionError, UniformDoubleDistribution,
    UniformIntDistribution,
};
use crate::rng::with_global_rng;

/// Immutable 3D vector with a cached magnitude.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vector3D {
    x: f64,
    y: f64,
    z: f64,
    magnitude: f64,
}

impl_vector_ops!(Vector3D { x, y, z });

impl Vector3D {
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
        magnitude: 1.0,
    };
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
        magnitude: 1.0,
    };
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
        magnitude: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            magnitude: (x * x + y * y + z * z).sqrt(),
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

    #[inline]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// Right-handed cross product.
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn project_to_xy(self) -> Vector2D {
        Vector2D::new(self.x, self.y)
    }

    pub fn project_to_xz(self) -> Vector2D {
        Vector2D::new(self.x, self.z)
    }

    pub fn project_to_yz(self) -> Vector2D {
        Vector2D::new(self.y, self.z)
    }

    /// All components drawn uniformly from `[min, max)`.
    pub fn random_range(min: f64, max: f64) -> Result<Self, DistributionError> {
        let mut d = UniformDoubleDistribution::new(min, max)?;
        Ok(Self::random_from(&mut d))
    }

    /// All components drawn as integers from `[min, max)`.
    pub fn random_int_range(min: i64, max: i64) -> Result<Self, DistributionError> {
        let mut d = UniformIntDistribution::new(min, max)?;
        let x = d.sample();
        let y = d.sample();
        let z = d.sample();
        Ok(Self::new(x as f64, y as f64, z as f64))
    }

    /// Components drawn from separate distributions.
    pub fn random_with(
        dx: &mut impl Distribution<f64>,
        dy: &mut impl Distribution<f64>,
        dz: &mut impl Distribution<f64>,
    ) -> Self {
        let x = dx.sample();
        let y = dy.sample();
        let z = dz.sample();
        Self::new(x, y, z)
    }

    /// All components drawn from the same distribution.
    pub fn random_from(d: &mut impl Distribution<f64>) -> Self {
        let x = d.sample();
        let y = d.sample();
        let z = d.sample();
        Self::new(x, y, z)
    }

    /// A unit vector pointing in a uniformly random direction on the sphere.
    pub fn random_unit() -> Self {
        with_global_rng(|rng| loop {
            let v = Self::new(gaussian_with(rng), gaussian_with(rng), gaussian_with(rng));
            if v.magnitude > 0.0 {
                return v.normalized();
            }
        })
    }
}

impl Vector for Vector3D {
    const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        magnitude: 0.0,
    };

    fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    fn hadamard(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.magnitude
    }
}

impl Default for Vector3D {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[f64; 3]> for Vector3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3D> for [f64; 3] {
    fn from(v: Vector3D) -> Self {
        [v.x, v.y, v.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_cross_of_axes() {
        assert_eq!(Vector3D::X.cross(Vector3D::Y), Vector3D::Z);
        assert_eq!(Vector3D::Y.cross(Vector3D::X), -Vector3D::Z);
    }

    #[test]
    fn test_cross_is_orthogonal() {
        let a = Vector3D::new(1.0, 2.0, 3.0);
        let b = Vector3D::new(-4.0, 0.5, 2.0);
        let c = a.cross(b);
        assert!(c.dot(a).abs() < EPS);
        assert!(c.dot(b).abs() < EPS);
    }

    #[test]
    fn test_projections() {
        let v = Vector3D::new(1.0, 2.0, 3.0);
        assert_eq!(v.project_to_xy(), Vector2D::new(1.0, 2.0));
        assert_eq!(v.project_to_xz(), Vector2D::new(1.0, 3.0));
        assert_eq!(v.project_to_yz(), Vector2D::new(2.0, 3.0));
    }

    #[test]
    fn test_hadamard() {
        let v = Vector3D::new(1.0, 2.0, 3.0).hadamard(Vector3D::new(2.0, 0.0, -1.0));
        assert_eq!(v, Vector3D::new(2.0, 0.0, -3.0));
    }

    #[test]
    fn test_random_unit_has_unit_length() {
        for _ in 0..100 {
            assert!((Vector3D::random_unit().magnitude() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sum() {
        let total: Vector3D = [Vector3D::X, Vector3D::Y, Vector3D::Z].into_iter().sum();
        assert_eq!(total, Vector3D::new(1.0, 1.0, 1.0));
    }
}
