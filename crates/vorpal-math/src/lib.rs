//! Vorpal Procedural Math Core
//!
//! This crate provides the numeric building blocks used by Vorpal sketches:
//! gradient noise, 2D/3D vector algebra, and a library of probability
//! distributions. Noise output is a pure function of its inputs and a fixed
//! permutation table, so the same coordinates always produce the same value.
//!
//! # Features
//!
//! - **Noise Engine**: Perlin, Simplex, and Worley noise in 1 to 4 dimensions,
//!   plus fractal layering (FBM)
//! - **Vector Algebra**: Immutable `Vector2D` / `Vector3D` with projection,
//!   reflection, angle, and magnitude limiting
//! - **Distributions**: Uniform, Gaussian, exponential, Poisson, Bernoulli,
//!   binomial, beta, gamma, weighted, and collection sampling
//!
//! # Example
//!
//! ```
//! use vorpal_math::noise::{Noise, PerlinNoise, SimplexNoise};
//! use vorpal_math::distribution::{Distribution, UniformDoubleDistribution};
//! use vorpal_math::vector::{Vector, Vector2D};
//!
//! let perlin = PerlinNoise::new();
//! let height = perlin.noise2(0.25, 0.75);
//! assert!((-1.0..=1.0).contains(&height));
//! assert_eq!(SimplexNoise.noise3(1.5, 2.5, 3.5), SimplexNoise.noise3(1.5, 2.5, 3.5));
//!
//! let mut spread = UniformDoubleDistribution::new(-1.0, 1.0).unwrap();
//! let velocity = Vector2D::random_from(&mut spread).limit_magnitude(0.5);
//! assert!(velocity.magnitude() <= 0.5 + 1e-12);
//! ```
//!
//! # Determinism
//!
//! - Noise generators are deterministic: same coordinates + same construction
//!   parameters = bit-identical output
//! - Distributions draw from a process-wide PCG32 source that can be reseeded
//!   as a whole with [`rng::reseed`]; every distribution also accepts an
//!   explicit generator through `sample_with`

pub mod angle;
pub mod distribution;
pub mod noise;
pub mod permutation;
pub mod rng;
pub mod vector;

// Re-export main types for convenience
pub use angle::{remap, Angle, AngleUnit};
pub use distribution::{Distribution, DistributionError, SizedDistribution};
pub use noise::{Fbm, Noise, NoiseError, PerlinNoise, SimplexNoise, WorleyNoise};
pub use rng::DeterministicRng;
pub use vector::{Vector, Vector2D, Vector3D};
