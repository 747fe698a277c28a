//! Perlin noise implementation.
//!
//! Classic gradient noise in 1 to 4 dimensions over the shared permutation
//! table, with an optional repeat period for tileable output.

use super::{fast_floor, lerp, quintic, Noise, NoiseError};
use crate::permutation::perm;

/// Perlin noise generator.
///
/// Without a repeat period the lattice is unbounded (the permutation table
/// itself repeats every 256 cells). With a period `r`, every axis satisfies
/// `noise(x) == noise(x + r)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerlinNoise {
    /// Optional wrap period in lattice cells.
    repeat: Option<u32>,
}

/// Lattice corners and fractional offset along one axis.
#[derive(Clone, Copy)]
struct Axis {
    lo: i32,
    hi: i32,
    frac: f64,
}

impl PerlinNoise {
    /// Create a Perlin noise generator with an unbounded lattice.
    pub fn new() -> Self {
        Self { repeat: None }
    }

    /// Create a Perlin noise generator that tiles every `period` cells.
    pub fn with_repeat(period: u32) -> Result<Self, NoiseError> {
        if period == 0 {
            return Err(NoiseError::InvalidParameter {
                name: "repeat",
                reason: "period must be positive".to_string(),
            });
        }
        tracing::debug!(period, "perlin noise with repeat period");
        Ok(Self {
            repeat: Some(period),
        })
    }

    /// The configured repeat period, if any.
    pub fn repeat(&self) -> Option<u32> {
        self.repeat
    }

    /// Locate the lattice cell containing `coord`.
    #[inline]
    fn axis(&self, coord: f64) -> Axis {
        match self.repeat {
            Some(period) => {
                let period_f = period as f64;
                let coord = coord.rem_euclid(period_f);
                // rem_euclid can round up to exactly `period` for tiny negative inputs
                let coord = if coord >= period_f { 0.0 } else { coord };
                let lo = fast_floor(coord);
                Axis {
                    lo,
                    hi: (lo + 1) % period as i32,
                    frac: coord - lo as f64,
                }
            }
            None => {
                let lo = fast_floor(coord);
                Axis {
                    lo,
                    hi: lo.wrapping_add(1),
                    frac: coord - lo as f64,
                }
            }
        }
    }

    #[inline]
    fn lattice(v: i32) -> usize {
        (v & 255) as usize
    }

    #[inline]
    fn hash1(x: i32) -> usize {
        perm(Self::lattice(x))
    }

    #[inline]
    fn hash2(x: i32, y: i32) -> usize {
        perm(perm(Self::lattice(x)) + Self::lattice(y))
    }

    #[inline]
    fn hash3(x: i32, y: i32, z: i32) -> usize {
        perm(Self::hash2(x, y) + Self::lattice(z))
    }

    #[inline]
    fn hash4(x: i32, y: i32, z: i32, w: i32) -> usize {
        perm(Self::hash3(x, y, z) + Self::lattice(w))
    }

    #[inline]
    fn grad1(hash: usize, x: f64) -> f64 {
        if hash & 1 == 0 {
            x
        } else {
            -x
        }
    }

    #[inline]
    fn grad2(hash: usize, x: f64, y: f64) -> f64 {
        let u = if hash & 1 == 0 { x } else { -x };
        let v = if hash & 2 == 0 { y } else { -y };
        u + v
    }

    /// Ken Perlin's 12 edge gradients, selected by the low four hash bits.
    #[inline]
    fn grad3(hash: usize, x: f64, y: f64, z: f64) -> f64 {
        let h = hash & 15;
        let u = if h < 8 { x } else { y };
        let v = if h < 4 {
            y
        } else if h == 12 || h == 14 {
            x
        } else {
            z
        };
        (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
    }

    #[inline]
    fn grad4(hash: usize, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let h = hash & 31;
        let u = if h < 24 { x } else { y };
        let v = if h < 16 { y } else { z };
        let s = if h < 8 { z } else { w };
        (if h & 1 == 0 { u } else { -u })
            + (if h & 2 == 0 { v } else { -v })
            + (if h & 4 == 0 { s } else { -s })
    }

    /// Brings 4D output into `[-1, 1]`. Unnormalized 4D gradients can reach
    /// about 1.54 in the worst case.
    const SCALE4: f64 = 0.65;

    /// Trilinear blend of the eight corners of the cube at a fixed `w` corner.
    #[allow(clippy::too_many_arguments)]
    fn cube4(ax: Axis, ay: Axis, az: Axis, w: i32, fw: f64, u: f64, v: f64, t: f64) -> f64 {
        let (fx, fy, fz) = (ax.frac, ay.frac, az.frac);

        let x1 = lerp(
            Self::grad4(Self::hash4(ax.lo, ay.lo, az.lo, w), fx, fy, fz, fw),
            Self::grad4(Self::hash4(ax.hi, ay.lo, az.lo, w), fx - 1.0, fy, fz, fw),
            u,
        );
        let x2 = lerp(
            Self::grad4(Self::hash4(ax.lo, ay.hi, az.lo, w), fx, fy - 1.0, fz, fw),
            Self::grad4(Self::hash4(ax.hi, ay.hi, az.lo, w), fx - 1.0, fy - 1.0, fz, fw),
            u,
        );
        let y1 = lerp(x1, x2, v);

        let x3 = lerp(
            Self::grad4(Self::hash4(ax.lo, ay.lo, az.hi, w), fx, fy, fz - 1.0, fw),
            Self::grad4(Self::hash4(ax.hi, ay.lo, az.hi, w), fx - 1.0, fy, fz - 1.0, fw),
            u,
        );
        let x4 = lerp(
            Self::grad4(Self::hash4(ax.lo, ay.hi, az.hi, w), fx, fy - 1.0, fz - 1.0, fw),
            Self::grad4(
                Self::hash4(ax.hi, ay.hi, az.hi, w),
                fx - 1.0,
                fy - 1.0,
                fz - 1.0,
                fw,
            ),
            u,
        );
        let y2 = lerp(x3, x4, v);

        lerp(y1, y2, t)
    }
}

impl Noise for PerlinNoise {
    fn noise1(&self, x: f64) -> f64 {
        let ax = self.axis(x);
        let u = quintic(ax.frac);

        let a = Self::grad1(Self::hash1(ax.lo), ax.frac);
        let b = Self::grad1(Self::hash1(ax.hi), ax.frac - 1.0);
        lerp(a, b, u)
    }

    fn noise2(&self, x: f64, y: f64) -> f64 {
        let ax = self.axis(x);
        let ay = self.axis(y);
        let (fx, fy) = (ax.frac, ay.frac);

        let u = quintic(fx);
        let v = quintic(fy);

        // Gradient dot products at the four corners
        let n00 = Self::grad2(Self::hash2(ax.lo, ay.lo), fx, fy);
        let n10 = Self::grad2(Self::hash2(ax.hi, ay.lo), fx - 1.0, fy);
        let n01 = Self::grad2(Self::hash2(ax.lo, ay.hi), fx, fy - 1.0);
        let n11 = Self::grad2(Self::hash2(ax.hi, ay.hi), fx - 1.0, fy - 1.0);

        let nx0 = lerp(n00, n10, u);
        let nx1 = lerp(n01, n11, u);
        lerp(nx0, nx1, v)
    }

    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let ax = self.axis(x);
        let ay = self.axis(y);
        let az = self.axis(z);
        let (fx, fy, fz) = (ax.frac, ay.frac, az.frac);

        let u = quintic(fx);
        let v = quintic(fy);
        let w = quintic(fz);

        let aaa = Self::grad3(Self::hash3(ax.lo, ay.lo, az.lo), fx, fy, fz);
        let baa = Self::grad3(Self::hash3(ax.hi, ay.lo, az.lo), fx - 1.0, fy, fz);
        let aba = Self::grad3(Self::hash3(ax.lo, ay.hi, az.lo), fx, fy - 1.0, fz);
        let bba = Self::grad3(Self::hash3(ax.hi, ay.hi, az.lo), fx - 1.0, fy - 1.0, fz);
        let aab = Self::grad3(Self::hash3(ax.lo, ay.lo, az.hi), fx, fy, fz - 1.0);
        let bab = Self::grad3(Self::hash3(ax.hi, ay.lo, az.hi), fx - 1.0, fy, fz - 1.0);
        let abb = Self::grad3(Self::hash3(ax.lo, ay.hi, az.hi), fx, fy - 1.0, fz - 1.0);
        let bbb = Self::grad3(
            Self::hash3(ax.hi, ay.hi, az.hi),
            fx - 1.0,
            fy - 1.0,
            fz - 1.0,
        );

        let y1 = lerp(lerp(aaa, baa, u), lerp(aba, bba, u), v);
        let y2 = lerp(lerp(aab, bab, u), lerp(abb, bbb, u), v);
        lerp(y1, y2, w)
    }

    fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let ax = self.axis(x);
        let ay = self.axis(y);
        let az = self.axis(z);
        let aw = self.axis(w);

        let u = quintic(ax.frac);
        let v = quintic(ay.frac);
        let t = quintic(az.frac);
        let s = quintic(aw.frac);

        // Blend the near and far cubes of the 16-corner hypercube along w
        let near = Self::cube4(ax, ay, az, aw.lo, aw.frac, u, v, t);
        let far = Self::cube4(ax, ay, az, aw.hi, aw.frac - 1.0, u, v, t);
        lerp(near, far, s) * Self::SCALE4
    }
}
