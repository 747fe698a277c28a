use rand::{Rng, RngCore};

use super::{gaussian_with, Distribution, DistributionError};

fn require_positive(name: &'static str, value: f64) -> Result<(), DistributionError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DistributionError::invalid(
            name,
            format!("must be finite and > 0, got {}", value),
        ))
    }
}

/// Normal distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianDistribution {
    mean: f64,
    stdev: f64,
}

impl GaussianDistribution {
    /// Requires a finite mean and a finite, non-negative standard deviation.
    /// A zero deviation always yields `mean`.
    pub fn new(mean: f64, stdev: f64) -> Result<Self, DistributionError> {
        if !mean.is_finite() {
            return Err(DistributionError::invalid(
                "mean",
                format!("must be finite, got {}", mean),
            ));
        }
        if !stdev.is_finite() || stdev < 0.0 {
            return Err(DistributionError::invalid(
                "stdev",
                format!("must be finite and >= 0, got {}", stdev),
            ));
        }
        Ok(Self { mean, stdev })
    }

    /// Mean 0, standard deviation 1.
    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            stdev: 1.0,
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stdev(&self) -> f64 {
        self.stdev
    }
}

impl Default for GaussianDistribution {
    fn default() -> Self {
        Self::standard()
    }
}

impl Distribution<f64> for GaussianDistribution {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> f64 {
        gaussian_with(rng) * self.stdev + self.mean
    }
}

/// Exponential distribution with the given rate (mean `1 / rate`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDistribution {
    rate: f64,
}

impl ExponentialDistribution {
    pub fn new(rate: f64) -> Result<Self, DistributionError> {
        require_positive("rate", rate)?;
        Ok(Self { rate })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Distribution<f64> for ExponentialDistribution {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> f64 {
        // Inverse CDF; 1 - U is in (0, 1]
        -(1.0 - rng.gen::<f64>()).ln() / self.rate
    }
}

/// Gamma distribution in the shape/rate parameterization (mean
/// `shape / rate`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaDistribution {
    shape: f64,
    rate: f64,
}

impl GammaDistribution {
    pub fn new(shape: f64, rate: f64) -> Result<Self, DistributionError> {
        require_positive("shape", shape)?;
        require_positive("rate", rate)?;
        Ok(Self { shape, rate })
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

/// Unit-rate gamma draw.
///
/// Marsaglia-Tsang for `shape >= 1`. Smaller shapes are boosted by one and
/// scaled back with `U^(1/shape)`.
fn unit_gamma(shape: f64, rng: &mut dyn RngCore) -> f64 {
    if shape < 1.0 {
        let u = 1.0 - rng.gen::<f64>();
        return unit_gamma(shape + 1.0, rng) * u.powf(1.0 / shape);
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let x = gaussian_with(rng);
        let v = 1.0 + c * x;
        if v <= 0.0 {
            continue;
        }
        let v = v * v * v;
        let u = rng.gen::<f64>();
        let x2 = x * x;
        if u < 1.0 - 0.0331 * x2 * x2 {
            return d * v;
        }
        if u > 0.0 && u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
            return d * v;
        }
    }
}

impl Distribution<f64> for GammaDistribution {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> f64 {
        unit_gamma(self.shape, rng) / self.rate
    }
}

/// Beta distribution on `[0, 1]`, drawn as `X / (X + Y)` for
/// unit-rate gammas `X ~ Gamma(alpha)` and `Y ~ Gamma(beta)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetaDistribution {
    x: GammaDistribution,
    y: GammaDistribution,
}

impl BetaDistribution {
    pub fn new(alpha: f64, beta: f64) -> Result<Self, DistributionError> {
        require_positive("alpha", alpha)?;
        require_positive("beta", beta)?;
        Ok(Self {
            x: GammaDistribution::new(alpha, 1.0)?,
            y: GammaDistribution::new(beta, 1.0)?,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.x.shape
    }

    pub fn beta(&self) -> f64 {
        self.y.shape
    }
}

impl Distribution<f64> for BetaDistribution {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> f64 {
        let x = self.x.sample_with(rng);
        let y = self.y.sample_with(rng);
        let total = x + y;
        if total > 0.0 {
            x / total
        } else {
            // Both gammas underflowed; only possible for tiny shapes
            if self.x.shape >= self.y.shape {
                1.0
            } else {
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DeterministicRng;

    fn mean_of(d: &mut impl Distribution<f64>, seed: u64, n: usize) -> f64 {
        let mut rng = DeterministicRng::new(seed);
        (0..n).map(|_| d.sample_with(&mut rng)).sum::<f64>() / n as f64
    }

    #[test]
    fn test_gaussian_parameters() {
        assert!(GaussianDistribution::new(0.0, -1.0).is_err());
        assert!(GaussianDistribution::new(f64::NAN, 1.0).is_err());
        let mut d = GaussianDistribution::new(10.0, 2.0).unwrap();
        let mean = mean_of(&mut d, 1, 40_000);
        assert!((mean - 10.0).abs() < 0.05, "mean {}", mean);
    }

    #[test]
    fn test_gaussian_zero_stdev_is_constant() {
        let mut rng = DeterministicRng::new(5);
        let mut d = GaussianDistribution::new(3.5, 0.0).unwrap();
        for _ in 0..100 {
            assert_eq!(d.sample_with(&mut rng), 3.5);
        }
    }

    #[test]
    fn test_exponential() {
        assert!(ExponentialDistribution::new(0.0).is_err());
        let mut d = ExponentialDistribution::new(2.0).unwrap();
        let mut rng = DeterministicRng::new(2);
        for _ in 0..1000 {
            let v = d.sample_with(&mut rng);
            assert!(v.is_finite() && v >= 0.0);
        }
        let mean = mean_of(&mut d, 3, 40_000);
        assert!((mean - 0.5).abs() < 0.02, "mean {}", mean);
    }

    #[test]
    fn test_gamma_mean_large_shape() {
        let mut d = GammaDistribution::new(3.0, 2.0).unwrap();
        let mean = mean_of(&mut d, 4, 40_000);
        assert!((mean - 1.5).abs() < 0.05, "mean {}", mean);
    }

    #[test]
    fn test_gamma_mean_small_shape() {
        let mut d = GammaDistribution::new(0.5, 1.0).unwrap();
        let mean = mean_of(&mut d, 6, 40_000);
        assert!((mean - 0.5).abs() < 0.03, "mean {}", mean);
    }

    #[test]
    fn test_gamma_rejects_bad_parameters() {
        assert!(GammaDistribution::new(0.0, 1.0).is_err());
        assert!(GammaDistribution::new(1.0, -1.0).is_err());
        assert!(GammaDistribution::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_beta_in_unit_interval() {
        let mut rng = DeterministicRng::new(8);
        let mut d = BetaDistribution::new(2.0, 5.0).unwrap();
        for _ in 0..5000 {
            let v = d.sample_with(&mut rng);
            assert!((0.0..=1.0).contains(&v), "out of range: {}", v);
        }
        let mean = mean_of(&mut d, 9, 40_000);
        assert!((mean - 2.0 / 7.0).abs() < 0.01, "mean {}", mean);
    }

    #[test]
    fn test_beta_rejects_bad_parameters() {
        assert!(BetaDistribution::new(0.0, 1.0).is_err());
        assert!(BetaDistribution::new(1.0, f64::NAN).is_err());
    }
}
