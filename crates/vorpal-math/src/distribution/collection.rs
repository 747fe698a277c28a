use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::{Distribution, DistributionError, SizedDistribution};
use crate::rng::with_global_rng;

/// Weighted choice over a fixed set of values.
///
/// Each value is drawn with probability proportional to its weight. Weights
/// are scanned in insertion order against a uniform draw in `[0, total)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NonUniformDistribution<T> {
    entries: Vec<(T, f64)>,
    total: f64,
}

impl<T: Clone> NonUniformDistribution<T> {
    /// Requires at least one entry, finite non-negative weights, and a
    /// positive total weight.
    pub fn new(weights: impl IntoIterator<Item = (T, f64)>) -> Result<Self, DistributionError> {
        let entries: Vec<(T, f64)> = weights.into_iter().collect();
        if entries.is_empty() {
            return Err(DistributionError::EmptySource);
        }

        let mut total = 0.0;
        for (index, (_, weight)) in entries.iter().enumerate() {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(DistributionError::InvalidWeights(format!(
                    "weight at index {} must be finite and >= 0, got {}",
                    index, weight
                )));
            }
            total += weight;
        }
        if total <= 0.0 || !total.is_finite() {
            return Err(DistributionError::InvalidWeights(format!(
                "total weight must be finite and > 0, got {}",
                total
            )));
        }

        tracing::trace!(entries = entries.len(), total, "built weighted distribution");
        Ok(Self { entries, total })
    }

    pub fn total_weight(&self) -> f64 {
        self.total
    }
}

impl<T: Clone> Distribution<T> for NonUniformDistribution<T> {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> T {
        let mut remaining = rng.gen::<f64>() * self.total;
        let mut fallback = 0;
        for (index, (value, weight)) in self.entries.iter().enumerate() {
            if remaining < *weight {
                return value.clone();
            }
            if *weight > 0.0 {
                fallback = index;
            }
            remaining -= weight;
        }
        // Rounding in the running subtraction can step past the last bucket
        self.entries[fallback].0.clone()
    }
}

impl<T: Clone> SizedDistribution<T> for NonUniformDistribution<T> {
    fn size(&self) -> usize {
        self.entries.len()
    }
}

/// Uniform choice from a fixed collection; elements are never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionWithReplacementDistribution<T> {
    elements: Vec<T>,
}

impl<T: Clone> CollectionWithReplacementDistribution<T> {
    pub fn new(elements: impl IntoIterator<Item = T>) -> Result<Self, DistributionError> {
        let elements: Vec<T> = elements.into_iter().collect();
        if elements.is_empty() {
            return Err(DistributionError::EmptySource);
        }
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }
}

impl<T: Clone> Distribution<T> for CollectionWithReplacementDistribution<T> {
    fn sample_with(&mut self, rng: &mut dyn RngCore) -> T {
        let index = rng.gen_range(0..self.elements.len());
        self.elements[index].clone()
    }
}

impl<T: Clone> SizedDistribution<T> for CollectionWithReplacementDistribution<T> {
    fn size(&self) -> usize {
        self.elements.len()
    }
}

/// Sampling without replacement.
///
/// The input is copied and shuffled once at construction. Each sample
/// removes and returns the next remaining element; once none are left,
/// sampling yields [`DistributionError::Exhausted`]. Elements can be added
/// later, and [`shuffle`](Self::shuffle) reorders whatever remains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableCollectionDistribution<T> {
    elements: VecDeque<T>,
}

impl<T> MutableCollectionDistribution<T> {
    /// Snapshot and shuffle `elements` with the process-wide generator.
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        with_global_rng(|rng| Self::new_with(elements, rng))
    }

    /// Snapshot and shuffle `elements` with `rng`.
    pub fn new_with(elements: impl IntoIterator<Item = T>, rng: &mut dyn RngCore) -> Self {
        let mut distribution = Self {
            elements: elements.into_iter().collect(),
        };
        distribution.shuffle_with(rng);
        tracing::debug!(
            elements = distribution.elements.len(),
            "built collection distribution without replacement"
        );
        distribution
    }

    /// Append `element` after the remaining ones. It is not shuffled in
    /// until the next call to [`shuffle`](Self::shuffle).
    pub fn add(&mut self, element: T) {
        self.elements.push_back(element);
    }

    /// Reorder the remaining elements with the process-wide generator.
    pub fn shuffle(&mut self) {
        with_global_rng(|rng| self.shuffle_with(rng));
    }

    /// Reorder the remaining elements with `rng`.
    pub fn shuffle_with(&mut self, rng: &mut dyn RngCore) {
        self.elements.make_contiguous().shuffle(rng);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Remaining elements in the order they will be drawn.
    pub fn remaining(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }
}

impl<T> Distribution<Result<T, DistributionError>> for MutableCollectionDistribution<T> {
    fn sample_with(&mut self, _rng: &mut dyn RngCore) -> Result<T, DistributionError> {
        self.elements.pop_front().ok_or(DistributionError::Exhausted)
    }
}

impl<T> SizedDistribution<Result<T, DistributionError>> for MutableCollectionDistribution<T> {
    fn size(&self) -> usize {
        self.elements.len()
    }
}
