//! Fractal layering of any [`Noise`].

use super::{Noise, NoiseError};

fn positive(name: &'static str, value: f64) -> Result<f64, NoiseError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(NoiseError::InvalidParameter {
            name,
            reason: format!("must be finite and > 0, got {}", value),
        })
    }
}

/// Sums `octaves` copies of a base generator. Each copy is sampled at
/// `lacunarity` times the previous frequency and weighted by `persistence`
/// times the previous amplitude. The sum is divided by the total weight, so
/// a generator bounded by `[-1, 1]` stays bounded.
#[derive(Debug, Clone)]
pub struct Fbm<N: Noise> {
    base: N,
    octaves: u8,
    persistence: f64,
    lacunarity: f64,
}

impl<N: Noise> Fbm<N> {
    /// Four octaves, persistence 0.5, lacunarity 2.
    pub fn new(base: N) -> Self {
        Self {
            base,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }

    /// At least one octave is always evaluated.
    pub fn with_octaves(self, octaves: u8) -> Self {
        Self {
            octaves: octaves.max(1),
            ..self
        }
    }

    /// Amplitude ratio between octaves. Must be finite and positive, which
    /// keeps the total weight nonzero.
    pub fn with_persistence(self, persistence: f64) -> Result<Self, NoiseError> {
        Ok(Self {
            persistence: positive("persistence", persistence)?,
            ..self
        })
    }

    /// Frequency ratio between octaves. Must be finite and positive.
    pub fn with_lacunarity(self, lacunarity: f64) -> Result<Self, NoiseError> {
        Ok(Self {
            lacunarity: positive("lacunarity", lacunarity)?,
            ..self
        })
    }

    pub fn octaves(&self) -> u8 {
        self.octaves
    }

    /// The wrapped base noise.
    pub fn inner(&self) -> &N {
        &self.base
    }

    /// Weighted mean of `at(frequency)` over the octaves.
    fn layered(&self, at: impl Fn(f64) -> f64) -> f64 {
        let (mut sum, mut weight) = (0.0, 0.0);
        let (mut amplitude, mut frequency) = (1.0, 1.0);
        for _ in 0..self.octaves {
            sum += amplitude * at(frequency);
            weight += amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }
        sum / weight
    }
}

impl<N: Noise> Noise for Fbm<N> {
    fn noise1(&self, x: f64) -> f64 {
        self.layered(|f| self.base.noise1(x * f))
    }

    fn noise2(&self, x: f64, y: f64) -> f64 {
        self.layered(|f| self.base.noise2(x * f, y * f))
    }

    fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.layered(|f| self.base.noise3(x * f, y * f, z * f))
    }

    fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.layered(|f| self.base.noise4(x * f, y * f, z * f, w * f))
    }

    /// A weighted mean of base samples shares the base range.
    fn to_unit(&self, value: f64) -> f64 {
        self.base.to_unit(value)
    }
}
