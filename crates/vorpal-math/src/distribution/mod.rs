//! Probability distributions.
//!
//! Every distribution implements [`Distribution`]: `sample_with` draws one
//! value from an explicit bit source, and `sample` draws from the
//! process-wide generator in [`crate::rng`]. Distributions with a finite
//! support also implement [`SizedDistribution`].
//!
//! Parameters are validated once at construction; sampling never fails,
//! except for [`MutableCollectionDistribution`], whose samples are
//! `Result`s because it can run out of elements.

mod collection;
mod continuous;
mod discrete;
mod uniform;

use rand::{Rng, RngCore};
use thiserror::Error;

use crate::rng::with_global_rng;

pub use collection::{
    CollectionWithReplacementDistribution, MutableCollectionDistribution, NonUniformDistribution,
};
pub use continuous::{
    BetaDistribution, ExponentialDistribution, GammaDistribution, GaussianDistribution,
};
pub use discrete::{
    BernoulliBooleanDistribution, BernoulliIntDistribution, BinomialDistribution,
    PoissonDistribution,
};
pub use uniform::{UniformDoubleDistribution, UniformIntDistribution};

/// Errors from distribution construction and sampling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    #[error("Invalid distribution parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Cannot build a distribution over an empty collection")]
    EmptySource,

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Distribution exhausted: no elements remain")]
    Exhausted,
}

impl DistributionError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// A source of samples of type `T`.
pub trait Distribution<T> {
    /// Draw one sample using `rng` as the bit source.
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> T;

    /// Draw one sample from the process-wide generator.
    fn sample(&mut self) -> T {
        with_global_rng(|rng| self.sample_with(rng))
    }
}

/// A distribution whose support is finite and countable.
pub trait SizedDistribution<T>: Distribution<T> {
    /// Number of elements in the support. For distributions that change as
    /// they are sampled, this is the current count.
    fn size(&self) -> usize;
}

impl<T, D: Distribution<T> + ?Sized> Distribution<T> for &mut D {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> T {
        (**self).sample_with(rng)
    }
}

impl<T, D: Distribution<T> + ?Sized> Distribution<T> for Box<D> {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> T {
        (**self).sample_with(rng)
    }
}

/// Standard normal draw via the Box-Muller transform.
pub(crate) fn gaussian_with(rng: &mut dyn RngCore) -> f64 {
    // 1 - U lies in (0, 1], keeping ln finite
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Uniform integer in `[min, max)` from the process-wide generator.
pub fn random_int(min: i64, max: i64) -> Result<i64, DistributionError> {
    Ok(UniformIntDistribution::new(min, max)?.sample())
}

/// Uniform double in `[min, max)` from the process-wide generator.
pub fn random_double(min: f64, max: f64) -> Result<f64, DistributionError> {
    Ok(UniformDoubleDistribution::new(min, max)?.sample())
}

/// Normal draw with the given mean and standard deviation.
pub fn random_gaussian(mean: f64, stdev: f64) -> f64 {
    with_global_rng(|rng| gaussian_with(rng) * stdev + mean)
}

/// A uniformly chosen element, or `None` for an empty slice.
pub fn random_element<T>(elements: &[T]) -> Option<&T> {
    if elements.is_empty() {
        return None;
    }
    let index = with_global_rng(|rng| rng.gen_range(0..elements.len()));
    elements.get(index)
}

/// Accept-reject (Monte Carlo) sampling.
///
/// Draws candidates from `proposal` and keeps each one with probability
/// `acceptance(&candidate)`, clamped to `[0, 1]`. Loops until a candidate is
/// accepted, so `acceptance` must be positive on some part of the support.
pub fn accept_reject_with<T, D, F>(proposal: &mut D, acceptance: F, rng: &mut dyn RngCore) -> T
where
    D: Distribution<T> + ?Sized,
    F: Fn(&T) -> f64,
{
    loop {
        let candidate = proposal.sample_with(rng);
        let p = acceptance(&candidate);
        if rng.gen::<f64>() < p {
            return candidate;
        }
    }
}

/// [`accept_reject_with`] on the process-wide generator.
pub fn accept_reject<T, D, F>(proposal: &mut D, acceptance: F) -> T
where
    D: Distribution<T> + ?Sized,
    F: Fn(&T) -> f64,
{
    with_global_rng(|rng| accept_reject_with(proposal, acceptance, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DeterministicRng;

    #[test]
    fn test_gaussian_moments() {
        let mut rng = DeterministicRng::new(9);
        let n = 50_000;
        let samples: Vec<f64> = (0..n).map(|_| gaussian_with(&mut rng)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.03, "mean {}", mean);
        assert!((var - 1.0).abs() < 0.05, "variance {}", var);
    }

    #[test]
    fn test_random_element() {
        let empty: [u8; 0] = [];
        assert_eq!(random_element(&empty), None);
        let items = ["a", "b", "c"];
        for _ in 0..100 {
            assert!(items.contains(random_element(&items).unwrap()));
        }
    }

    #[test]
    fn test_random_helpers_validate_ranges() {
        assert!(random_int(5, 5).is_err());
        assert!(random_double(2.0, 1.0).is_err());
        let v = random_int(-3, 3).unwrap();
        assert!((-3..3).contains(&v));
    }

    #[test]
    fn test_accept_reject_respects_zero_acceptance() {
        let mut rng = DeterministicRng::new(3);
        let mut proposal = UniformDoubleDistribution::new(0.0, 1.0).unwrap();
        for _ in 0..1000 {
            // Nothing below 0.5 can ever be accepted
            let v = accept_reject_with(
                &mut proposal,
                |&x: &f64| if x < 0.5 { 0.0 } else { x },
                &mut rng,
            );
            assert!(v >= 0.5);
        }
    }

    #[test]
    fn test_accept_reject_skews_toward_high_values() {
        let mut rng = DeterministicRng::new(4);
        let mut proposal = UniformDoubleDistribution::new(0.0, 1.0).unwrap();
        let n = 20_000;
        let mean = (0..n)
            .map(|_| accept_reject_with(&mut proposal, |&x: &f64| x, &mut rng))
            .sum::<f64>()
            / n as f64;
        // Density 2x on [0, 1) has mean 2/3
        assert!((mean - 2.0 / 3.0).abs() < 0.02, "mean {}", mean);
    }
}
