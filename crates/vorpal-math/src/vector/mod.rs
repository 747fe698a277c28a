//! 2D and 3D vector algebra.
//!
//! Vectors are immutable `Copy` values. Every operation returns a new vector;
//! the Euclidean magnitude is computed once at construction and cached.
//! Shared geometry (projection, reflection, angle, magnitude limiting) lives
//! as provided methods on the [`Vector`] trait.

mod vector2;
mod vector3;

use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::angle::Angle;

pub use vector2::Vector2D;
pub use vector3::Vector3D;

/// Operations shared by [`Vector2D`] and [`Vector3D`].
pub trait Vector:
    Copy
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// The zero vector.
    const ZERO: Self;

    /// Dot product.
    fn dot(self, other: Self) -> f64;

    /// Hadamard (component-wise) product.
    fn hadamard(self, other: Self) -> Self;

    /// Euclidean norm.
    fn magnitude(self) -> f64;

    /// Multiply every component by `scalar`.
    fn scale(self, scalar: f64) -> Self {
        self * scalar
    }

    fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    /// Unit vector in the same direction. The zero vector normalizes to
    /// itself.
    fn normalized(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            self
        } else {
            self / magnitude
        }
    }

    /// Project `a` onto `self`. Projecting onto the zero vector yields zero.
    fn project(self, a: Self) -> Self {
        let denom = self.dot(self);
        if denom == 0.0 {
            return Self::ZERO;
        }
        self * (a.dot(self) / denom)
    }

    /// Reflect across the hyperplane with normal `n`. `n` does not need to
    /// be normalized; a zero normal leaves the vector unchanged.
    fn reflect(self, n: Self) -> Self {
        let n = n.normalized();
        self - n * (2.0 * self.dot(n))
    }

    /// Unsigned angle between `self` and `other`, in radians.
    ///
    /// The angle involving a zero vector is reported as zero.
    fn angle(self, other: Self) -> Angle {
        let denom = self.magnitude() * other.magnitude();
        if denom == 0.0 {
            return Angle::radians(0.0);
        }
        Angle::acos((self.dot(other) / denom).clamp(-1.0, 1.0))
    }

    /// Distance between the points `self` and `other`.
    fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }

    /// Shorten the vector to at most `max` length, keeping its direction.
    fn limit_magnitude(self, max: f64) -> Self {
        if self.magnitude() <= max {
            self
        } else {
            self.normalized() * max
        }
    }

    /// Keep the length within `[min, max]`, keeping the direction. A zero
    /// vector has no direction and stays zero.
    fn clamp_magnitude(self, min: f64, max: f64) -> Self {
        let magnitude = self.magnitude();
        if magnitude < min {
            self.normalized() * min
        } else if magnitude > max {
            self.normalized() * max
        } else {
            self
        }
    }

    /// Same direction with length `magnitude`. Zero stays zero.
    fn set_magnitude(self, magnitude: f64) -> Self {
        self.normalized() * magnitude
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    /// Values outside `[0, 1]` extrapolate.
    fn lerp(self, other: Self, t: f64) -> Self {
        self * (1.0 - t) + other * t
    }
}

/// Implements the arithmetic operators for a vector type with the given
/// component fields.
macro_rules! impl_vector_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl std::ops::Add for $ty {
            type Output = Self;
            fn add(self, other: Self) -> Self {
                Self::new($(self.$field + other.$field),+)
            }
        }

        impl std::ops::Sub for $ty {
            type Output = Self;
            fn sub(self, other: Self) -> Self {
                Self::new($(self.$field - other.$field),+)
            }
        }

        impl std::ops::Neg for $ty {
            type Output = Self;
            fn neg(self) -> Self {
                Self::new($(-self.$field),+)
            }
        }

        impl std::ops::Mul<f64> for $ty {
            type Output = Self;
            fn mul(self, scalar: f64) -> Self {
                Self::new($(self.$field * scalar),+)
            }
        }

        impl std::ops::Mul<$ty> for f64 {
            type Output = $ty;
            fn mul(self, vector: $ty) -> $ty {
                vector * self
            }
        }

        impl std::ops::Div<f64> for $ty {
            type Output = Self;
            fn div(self, scalar: f64) -> Self {
                Self::new($(self.$field / scalar),+)
            }
        }

        impl std::ops::AddAssign for $ty {
            fn add_assign(&mut self, other: Self) {
                *self = *self + other;
            }
        }

        impl std::ops::SubAssign for $ty {
            fn sub_assign(&mut self, other: Self) {
                *self = *self - other;
            }
        }

        impl std::iter::Sum for $ty {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(<Self as $crate::vector::Vector>::ZERO, |acc, v| acc + v)
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $(self.$field == other.$field)&&+
            }
        }
    };
}

pub(crate) use impl_vector_ops;
