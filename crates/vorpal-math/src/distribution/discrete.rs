use rand::{Rng, RngCore};

use super::{Distribution, DistributionError, SizedDistribution};

fn require_probability(p: f64) -> Result<(), DistributionError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(DistributionError::invalid(
            "p",
            format!("must be a probability in [0, 1], got {}", p),
        ))
    }
}

/// Number of events in a fixed interval, with mean `lambda`.
///
/// Uses Knuth's product-of-uniforms method, so the cost per sample grows
/// linearly with `lambda`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonDistribution {
    lambda: f64,
    chunks: u32,
    threshold: f64,
}

impl PoissonDistribution {
    /// Largest mean handled by a single product-of-uniforms run. Beyond it
    /// `e^-lambda` loses precision and heads toward subnormals.
    const CHUNK: f64 = 500.0;

    pub fn new(lambda: f64) -> Result<Self, DistributionError> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(DistributionError::invalid(
                "lambda",
                format!("must be finite and > 0, got {}", lambda),
            ));
        }
        let chunks = (lambda / Self::CHUNK).ceil();
        if chunks > f64::from(u32::MAX) {
            return Err(DistributionError::invalid(
                "lambda",
                format!(
                    "must be at most {}, got {}",
                    Self::CHUNK * f64::from(u32::MAX),
                    lambda
                ),
            ));
        }
        let chunks = chunks as u32;
        Ok(Self {
            lambda,
            chunks,
            threshold: (-lambda / f64::from(chunks)).exp(),
        })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Distribution<u64> for PoissonDistribution {
    /// A sum of independent Poisson draws is Poisson with the summed mean,
    /// so large means are split into equal chunks.
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> u64 {
        let mut count = 0u64;
        for _ in 0..self.chunks {
            let mut product = rng.gen::<f64>();
            while product > self.threshold {
                count += 1;
                product *= rng.gen::<f64>();
            }
        }
        count
    }
}

/// Yields 1 with probability `p` and 0 otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliIntDistribution {
    p: f64,
}

impl BernoulliIntDistribution {
    pub fn new(p: f64) -> Result<Self, DistributionError> {
        require_probability(p)?;
        Ok(Self { p })
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution<u8> for BernoulliIntDistribution {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> u8 {
        u8::from(rng.gen::<f64>() < self.p)
    }
}

impl SizedDistribution<u8> for BernoulliIntDistribution {
    fn size(&self) -> usize {
        2
    }
}

/// Yields `true` with probability `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliBooleanDistribution {
    p: f64,
}

impl BernoulliBooleanDistribution {
    pub fn new(p: f64) -> Result<Self, DistributionError> {
        require_probability(p)?;
        Ok(Self { p })
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution<bool> for BernoulliBooleanDistribution {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> bool {
        rng.gen::<f64>() < self.p
    }
}

impl SizedDistribution<bool> for BernoulliBooleanDistribution {
    fn size(&self) -> usize {
        2
    }
}

/// Number of successes in `n` independent trials with success
/// probability `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialDistribution {
    n: u32,
    p: f64,
}

impl BinomialDistribution {
    pub fn new(n: u32, p: f64) -> Result<Self, DistributionError> {
        require_probability(p)?;
        Ok(Self { n, p })
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution<u32> for BinomialDistribution {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> u32 {
        let mut successes = 0;
        for _ in 0..self.n {
            if rng.gen::<f64>() < self.p {
                successes += 1;
            }
        }
        successes
    }
}

impl SizedDistribution<u32> for BinomialDistribution {
    fn size(&self) -> usize {
        self.n as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DeterministicRng;

    #[test]
    fn test_poisson_never_negative_and_has_right_mean() {
        let mut rng = DeterministicRng::new(11);
        let mut d = PoissonDistribution::new(4.0).unwrap();
        let n = 40_000;
        let total: u64 = (0..n).map(|_| d.sample_with(&mut rng)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 4.0).abs() < 0.05, "mean {}", mean);
    }

    #[test]
    fn test_poisson_large_lambda_mean() {
        let mut rng = DeterministicRng::new(27);
        let mut d = PoissonDistribution::new(1000.0).unwrap();
        let n = 2000;
        let total: u64 = (0..n).map(|_| d.sample_with(&mut rng)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 1000.0).abs() < 5.0, "mean {}", mean);
    }

    #[test]
    fn test_poisson_small_lambda_is_mostly_zero() {
        let mut rng = DeterministicRng::new(12);
        let mut d = PoissonDistribution::new(0.01).unwrap();
        let zeros = (0..1000).filter(|_| d.sample_with(&mut rng) == 0).count();
        assert!(zeros > 970, "zeros {}", zeros);
    }

    #[test]
    fn test_poisson_rejects_bad_lambda() {
        assert!(PoissonDistribution::new(0.0).is_err());
        assert!(PoissonDistribution::new(-1.0).is_err());
        assert!(PoissonDistribution::new(f64::NAN).is_err());
    }

    #[test]
    fn test_bernoulli_extremes() {
        let mut rng = DeterministicRng::new(13);
        let mut never = BernoulliIntDistribution::new(0.0).unwrap();
        let mut always = BernoulliBooleanDistribution::new(1.0).unwrap();
        for _ in 0..1000 {
            assert_eq!(never.sample_with(&mut rng), 0);
            assert!(always.sample_with(&mut rng));
        }
        assert_eq!(never.size(), 2);
        assert_eq!(always.size(), 2);
    }

    #[test]
    fn test_bernoulli_rejects_bad_probability() {
        assert!(BernoulliIntDistribution::new(1.5).is_err());
        assert!(BernoulliBooleanDistribution::new(-0.1).is_err());
        assert!(BernoulliBooleanDistribution::new(f64::NAN).is_err());
    }

    #[test]
    fn test_binomial_range_and_mean() {
        let mut rng = DeterministicRng::new(14);
        let mut d = BinomialDistribution::new(10, 0.3).unwrap();
        assert_eq!(d.size(), 11);
        let n = 20_000;
        let mut total = 0u64;
        for _ in 0..n {
            let v = d.sample_with(&mut rng);
            assert!(v <= 10);
            total += u64::from(v);
        }
        let mean = total as f64 / n as f64;
        assert!((mean - 3.0).abs() < 0.05, "mean {}", mean);
    }

    #[test]
    fn test_binomial_zero_trials() {
        let mut rng = DeterministicRng::new(15);
        let mut d = BinomialDistribution::new(0, 0.5).unwrap();
        assert_eq!(d.sample_with(&mut rng), 0);
        assert_eq!(d.size(), 1);
    }
}
