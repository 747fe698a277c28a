use rand::{Rng, RngCore};

use super::{Distribution, DistributionError, SizedDistribution};

/// Continuous uniform distribution over `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformDoubleDistribution {
    min: f64,
    max: f64,
}

impl UniformDoubleDistribution {
    /// Requires finite bounds with `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self, DistributionError> {
        if !(max - min).is_finite() {
            return Err(DistributionError::invalid(
                "min/max",
                format!("bounds and their span must be finite, got [{}, {})", min, max),
            ));
        }
        if min >= max {
            return Err(DistributionError::invalid(
                "min/max",
                format!("min must be less than max, got [{}, {})", min, max),
            ));
        }
        Ok(Self { min, max })
    }

    /// Uniform over `[0, max)`.
    pub fn up_to(max: f64) -> Result<Self, DistributionError> {
        Self::new(0.0, max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for UniformDoubleDistribution {
    /// Uniform over `[0, 1)`.
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

impl Distribution<f64> for UniformDoubleDistribution {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> f64 {
        rng.gen_range(self.min..self.max)
    }
}

/// Discrete uniform distribution over the integers in `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformIntDistribution {
    min: i64,
    max: i64,
}

impl UniformIntDistribution {
    /// Requires `min < max`.
    pub fn new(min: i64, max: i64) -> Result<Self, DistributionError> {
        if min >= max {
            return Err(DistributionError::invalid(
                "min/max",
                format!("min must be less than max, got [{}, {})", min, max),
            ));
        }
        Ok(Self { min, max })
    }

    /// Uniform over `[0, max)`.
    pub fn up_to(max: i64) -> Result<Self, DistributionError> {
        Self::new(0, max)
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

impl Distribution<i64> for UniformIntDistribution {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> i64 {
        rng.gen_range(self.min..self.max)
    }
}

impl SizedDistribution<i64> for UniformIntDistribution {
    fn size(&self) -> usize {
        usize::try_from(self.max.abs_diff(self.min)).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::DeterministicRng;

    #[test]
    fn test_double_rejects_bad_bounds() {
        assert!(UniformDoubleDistribution::new(1.0, 1.0).is_err());
        assert!(UniformDoubleDistribution::new(2.0, 1.0).is_err());
        assert!(UniformDoubleDistribution::new(f64::NAN, 1.0).is_err());
        assert!(UniformDoubleDistribution::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_double_stays_in_half_open_range() {
        let mut rng = DeterministicRng::new(1);
        let mut d = UniformDoubleDistribution::new(-3.0, 5.0).unwrap();
        for _ in 0..10_000 {
            let v = d.sample_with(&mut rng);
            assert!((-3.0..5.0).contains(&v), "out of range: {}", v);
        }
    }

    #[test]
    fn test_int_rejects_empty_range() {
        assert!(UniformIntDistribution::new(4, 4).is_err());
        assert!(UniformIntDistribution::new(5, -5).is_err());
    }

    #[test]
    fn test_int_size_and_range() {
        let mut rng = DeterministicRng::new(2);
        let mut d = UniformIntDistribution::new(-2, 3).unwrap();
        assert_eq!(d.size(), 5);
        let mut seen = [false; 5];
        for _ in 0..1000 {
            let v = d.sample_with(&mut rng);
            assert!((-2..3).contains(&v));
            seen[(v + 2) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "every value should appear");
    }

    #[test]
    fn test_int_size_of_extreme_range() {
        let d = UniformIntDistribution::new(i64::MIN, i64::MAX).unwrap();
        assert!(d.size() > 0);
    }
}
