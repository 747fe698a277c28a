//! Worley (Voronoi/Cellular) noise implementation.
//!
//! Each unit cell of the integer grid owns `feature_density` feature points
//! whose positions come from an integer hash of the seed, the cell
//! coordinates, the point index and the axis. The noise value is the
//! Euclidean distance from the query point to the nearest feature point in
//! the surrounding 3^N block of cells.

use super::{fast_floor, Noise, NoiseError};

/// Multipliers mixing each cell coordinate into the hash.
const AXIS_PRIMES: [i32; 4] = [374_761_393, 668_265_263, 1_376_312_589, 1_577_334_179];
/// Multiplier mixing the seed into the hash.
const SEED_PRIME: i32 = 918_273_645;
/// Multiplier mixing the point index and axis into the hash.
const SALT_PRIME: i32 = 123_456_789;

/// Worley (cellular) noise generator in 1 to 4 dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorleyNoise {
    /// Feature points per grid cell.
    feature_density: u32,
    /// Base seed for generating feature points.
    seed: i32,
}

impl Default for WorleyNoise {
    fn default() -> Self {
        Self {
            feature_density: 1,
            seed: 0,
        }
    }
}

impl WorleyNoise {
    /// Create a Worley noise generator with `feature_density` points per cell.
    pub fn new(feature_density: u32, seed: i32) -> Result<Self, NoiseError> {
        if feature_density == 0 {
            return Err(NoiseError::InvalidParameter {
                name: "feature_density",
                reason: "at least one feature point per cell is required".to_string(),
            });
        }
        tracing::debug!(feature_density, seed, "worley noise");
        Ok(Self {
            feature_density,
            seed,
        })
    }

    /// Create a Worley noise generator with one feature point per cell.
    pub fn with_seed(seed: i32) -> Self {
        Self {
            feature_density: 1,
            seed,
        }
    }

    /// Feature points per grid cell.
    pub fn feature_density(&self) -> u32 {
        self.feature_density
    }

    /// The seed feature points are derived from.
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Hash a cell coordinate and salt to a value in `[0, 1]`.
    fn hash_unit(&self, cell: &[i32], salt: i32) -> f64 {
        let mut n = self.seed.wrapping_mul(SEED_PRIME);
        for (c, prime) in cell.iter().zip(AXIS_PRIMES) {
            n = n.wrapping_add(c.wrapping_mul(prime));
        }
        n = n.wrapping_add(salt.wrapping_mul(SALT_PRIME));
        n = (n ^ (n << 13)).wrapping_mul(1_274_126_177);
        n ^= n >> 16;
        (n & 0x7fff_ffff) as f64 / i32::MAX as f64
    }

    /// Position of feature point `index` inside `cell`.
    fn feature_point<const N: usize>(&self, cell: [i32; N], index: u32) -> [f64; N] {
        let mut point = [0.0; N];
        for (axis, p) in point.iter_mut().enumerate() {
            let salt = (index as i32).wrapping_mul(N as i32).wrapping_add(axis as i32);
            *p = cell[axis] as f64 + self.hash_unit(&cell, salt);
        }
        point
    }

    /// Distance to the nearest feature point in the 3^N neighbourhood.
    fn nearest<const N: usize>(&self, query: [f64; N]) -> f64 {
        let base = query.map(fast_floor);
        let neighbours = 3usize.pow(N as u32);
        let mut min_dist_sq = f64::MAX;

        for n in 0..neighbours {
            // Decode `n` as N base-3 digits, each an offset in -1..=1
            let mut cell = base;
            let mut digits = n;
            for c in cell.iter_mut() {
                *c = c.wrapping_add((digits % 3) as i32 - 1);
                digits /= 3;
            }

            for index in 0..self.feature_density {
                let point = self.feature_point(cell, index);
                let dist_sq: f64 = point
                    .iter()
                    .zip(query.iter())
                    .map(|(p, q)| (p - q) * (p - q))
                    .sum();
                min_dist_sq = min_dist_sq.min(dist_sq);
            }
        }

        min_dist_sq.sqrt()
    }
}

impl Noise for WorleyNoise {
    fn noise1(&self, x: f64) -> f64 {
        self.nearest([x])
    }

    fn noise2(&self, x: f64, y: f64) -> f64 {
        self.nearest([x, y])
    }

    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.nearest([x, y, z])
    }

    fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.nearest([x, y, z, w])
    }

    /// Distances are already non-negative; anything past one cell is clamped.
    fn to_unit(&self, value: f64) -> f64 {
        value.clamp(0.0, 1.0)
    }
}
