//! Noise generation primitives.
//!
//! All noise functions are pure Rust and produce deterministic output given
//! the same coordinates and construction parameters.

mod fbm;
mod perlin;
mod simplex;
mod worley;

use thiserror::Error;

pub use fbm::Fbm;
pub use perlin::PerlinNoise;
pub use simplex::SimplexNoise;
pub use worley::WorleyNoise;

/// Errors from noise generator construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    #[error("Invalid noise parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Trait for noise generators, one method per input dimensionality.
///
/// Perlin and Simplex return values in roughly `[-1, 1]`; Worley returns a
/// non-negative nearest-feature distance.
pub trait Noise {
    /// Sample the noise at a 1D coordinate.
    fn noise1(&self, x: f64) -> f64;

    /// Sample the noise at a 2D coordinate.
    fn noise2(&self, x: f64, y: f64) -> f64;

    /// Sample the noise at a 3D coordinate.
    fn noise3(&self, x: f64, y: f64, z: f64) -> f64;

    /// Sample the noise at a 4D coordinate.
    fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64;

    /// Map a raw sample of this generator onto `[0, 1]`. The default
    /// remaps the gradient-noise range `[-1, 1]`.
    fn to_unit(&self, value: f64) -> f64 {
        (value + 1.0) * 0.5
    }

    /// Sample 2D noise mapped onto `[0, 1]`.
    fn noise2_01(&self, x: f64, y: f64) -> f64 {
        self.to_unit(self.noise2(x, y))
    }
}

impl<N: Noise + ?Sized> Noise for &N {
    fn noise1(&self, x: f64) -> f64 {
        (**self).noise1(x)
    }

    fn noise2(&self, x: f64, y: f64) -> f64 {
        (**self).noise2(x, y)
    }

    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).noise3(x, y, z)
    }

    fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        (**self).noise4(x, y, z, w)
    }

    fn to_unit(&self, value: f64) -> f64 {
        (**self).to_unit(value)
    }
}

impl<N: Noise + ?Sized> Noise for Box<N> {
    fn noise1(&self, x: f64) -> f64 {
        (**self).noise1(x)
    }

    fn noise2(&self, x: f64, y: f64) -> f64 {
        (**self).noise2(x, y)
    }

    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).noise3(x, y, z)
    }

    fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        (**self).noise4(x, y, z, w)
    }

    fn to_unit(&self, value: f64) -> f64 {
        (**self).to_unit(value)
    }
}

/// Make coordinates tileable by wrapping.
#[inline]
pub fn tile_coord(coord: f64, period: f64) -> f64 {
    coord - (coord / period).floor() * period
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub fn quintic(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Floor toward negative infinity as an integer lattice coordinate.
#[inline]
pub(crate) fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < xi as f64 {
        xi - 1
    } else {
        xi
    }
}
