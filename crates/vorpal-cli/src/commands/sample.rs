//! Sample command implementation
//!
//! Draws from a named distribution on the process-wide generator and prints
//! summary statistics.

use anyhow::{bail, Result};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use vorpal_math::distribution::{
    BernoulliIntDistribution, BetaDistribution, BinomialDistribution, Distribution,
    ExponentialDistribution, GammaDistribution, GaussianDistribution, PoissonDistribution,
    UniformDoubleDistribution, UniformIntDistribution,
};
use vorpal_math::rng::{with_global_rng, RngCore};

/// Distributions reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DistKind {
    Uniform,
    UniformInt,
    Gaussian,
    Exponential,
    Poisson,
    Bernoulli,
    Binomial,
    Beta,
    Gamma,
}

impl DistKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistKind::Uniform => "uniform",
            DistKind::UniformInt => "uniform-int",
            DistKind::Gaussian => "gaussian",
            DistKind::Exponential => "exponential",
            DistKind::Poisson => "poisson",
            DistKind::Bernoulli => "bernoulli",
            DistKind::Binomial => "binomial",
            DistKind::Beta => "beta",
            DistKind::Gamma => "gamma",
        }
    }

    /// Names of the positional parameters, in order.
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            DistKind::Uniform | DistKind::UniformInt => &["min", "max"],
            DistKind::Gaussian => &["mean", "stdev"],
            DistKind::Exponential => &["rate"],
            DistKind::Poisson => &["lambda"],
            DistKind::Bernoulli => &["p"],
            DistKind::Binomial => &["n", "p"],
            DistKind::Beta => &["alpha", "beta"],
            DistKind::Gamma => &["shape", "rate"],
        }
    }

    /// Parameters used when none are given, if the distribution has a
    /// natural default.
    fn default_params(&self) -> Option<&'static [f64]> {
        match self {
            DistKind::Uniform => Some(&[0.0, 1.0]),
            DistKind::Gaussian => Some(&[0.0, 1.0]),
            DistKind::Exponential | DistKind::Poisson => Some(&[1.0]),
            DistKind::Bernoulli => Some(&[0.5]),
            _ => None,
        }
    }
}

/// Summary statistics over a batch of samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    pub distribution: String,
    pub params: Vec<f64>,
    pub count: usize,
    pub mean: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

type Sampler = Box<dyn FnMut(&mut dyn RngCore) -> f64>;

fn numeric<T: 'static>(mut d: impl Distribution<T> + 'static, to_f64: fn(T) -> f64) -> Sampler {
    Box::new(move |rng: &mut dyn RngCore| to_f64(d.sample_with(rng)))
}

fn resolve_params(kind: DistKind, given: &[f64]) -> Result<Vec<f64>> {
    if given.is_empty() {
        if let Some(defaults) = kind.default_params() {
            return Ok(defaults.to_vec());
        }
    }
    let names = kind.param_names();
    if given.len() != names.len() {
        bail!(
            "{} takes {} parameter(s) ({}), got {}",
            kind.as_str(),
            names.len(),
            names.join(", "),
            given.len()
        );
    }
    Ok(given.to_vec())
}

fn integer(name: &str, value: f64) -> Result<i64> {
    if value.fract() != 0.0 || !value.is_finite() {
        bail!("parameter `{}` must be an integer, got {}", name, value);
    }
    Ok(value as i64)
}

/// Build a sampler for `kind`. The parameter count is checked first, then
/// the values go through the distribution constructors.
fn build_sampler(kind: DistKind, params: &[f64]) -> Result<Sampler> {
    let params = resolve_params(kind, params)?;
    let identity = |v: f64| v;
    let sampler = match kind {
        DistKind::Uniform => {
            numeric(UniformDoubleDistribution::new(params[0], params[1])?, identity)
        }
        DistKind::UniformInt => {
            let min = integer("min", params[0])?;
            let max = integer("max", params[1])?;
            numeric(UniformIntDistribution::new(min, max)?, |v: i64| v as f64)
        }
        DistKind::Gaussian => numeric(GaussianDistribution::new(params[0], params[1])?, identity),
        DistKind::Exponential => numeric(ExponentialDistribution::new(params[0])?, identity),
        DistKind::Poisson => numeric(PoissonDistribution::new(params[0])?, |v: u64| v as f64),
        DistKind::Bernoulli => {
            numeric(BernoulliIntDistribution::new(params[0])?, |v: u8| f64::from(v))
        }
        DistKind::Binomial => {
            let n = u32::try_from(integer("n", params[0])?)?;
            numeric(BinomialDistribution::new(n, params[1])?, |v: u32| f64::from(v))
        }
        DistKind::Beta => numeric(BetaDistribution::new(params[0], params[1])?, identity),
        DistKind::Gamma => numeric(GammaDistribution::new(params[0], params[1])?, identity),
    };
    Ok(sampler)
}

/// Draw `count` samples and summarize them.
pub fn sample(kind: DistKind, params: &[f64], count: usize) -> Result<SampleSummary> {
    if count == 0 {
        bail!("count must be at least 1");
    }
    let params = resolve_params(kind, params)?;
    let mut sampler = build_sampler(kind, &params)?;

    tracing::debug!(distribution = kind.as_str(), count, "sampling");
    let samples: Vec<f64> = with_global_rng(|rng| {
        let rng: &mut dyn RngCore = rng;
        (0..count).map(|_| sampler(&mut *rng)).collect()
    });

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    Ok(SampleSummary {
        distribution: kind.as_str().to_string(),
        params,
        count,
        mean,
        variance,
        min,
        max,
    })
}

/// Run the sample command
///
/// # Arguments
/// * `kind` - Distribution to draw from
/// * `params` - Positional distribution parameters
/// * `count` - Number of samples
/// * `json` - Print JSON instead of coloured text
pub fn run(kind: DistKind, params: &[f64], count: usize, json: bool) -> Result<ExitCode> {
    let summary = sample(kind, params, count)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(ExitCode::SUCCESS);
    }

    let labelled: Vec<String> = kind
        .param_names()
        .iter()
        .zip(&summary.params)
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();

    println!("{}", "Vorpal Sample".cyan().bold());
    println!(
        "  {} {}({}) x {}",
        "->".green(),
        summary.distribution,
        labelled.join(", "),
        summary.count
    );
    println!("  {} mean     {:.6}", "->".green(), summary.mean);
    println!("  {} variance {:.6}", "->".green(), summary.variance);
    println!("  {} min      {:.6}", "->".green(), summary.min);
    println!("  {} max      {:.6}", "->".green(), summary.max);

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let summary = sample(DistKind::Uniform, &[], 2000).unwrap();
        assert_eq!(summary.params, vec![0.0, 1.0]);
        assert!(summary.min >= 0.0 && summary.max < 1.0);
    }

    #[test]
    fn test_param_count_checked() {
        let err = sample(DistKind::Beta, &[1.0], 10).unwrap_err();
        assert!(err.to_string().contains("alpha, beta"));
        assert!(sample(DistKind::Binomial, &[], 10).is_err());
    }

    #[test]
    fn test_sampler_checks_param_count() {
        assert!(build_sampler(DistKind::Beta, &[1.0]).is_err());
        assert!(build_sampler(DistKind::Binomial, &[]).is_err());
        assert!(build_sampler(DistKind::Gaussian, &[0.0, 1.0, 2.0]).is_err());
        assert!(build_sampler(DistKind::Exponential, &[]).is_ok());
    }

    #[test]
    fn test_invalid_params_rejected() {
        assert!(sample(DistKind::Gamma, &[-1.0, 1.0], 10).is_err());
        assert!(sample(DistKind::UniformInt, &[0.5, 3.0], 10).is_err());
        assert!(sample(DistKind::Binomial, &[-2.0, 0.5], 10).is_err());
        assert!(sample(DistKind::Poisson, &[1.0], 0).is_err());
    }

    #[test]
    fn test_discrete_bounds() {
        let summary = sample(DistKind::UniformInt, &[0.0, 10.0], 5000).unwrap();
        assert!(summary.min >= 0.0);
        assert!(summary.max <= 9.0);

        let summary = sample(DistKind::Binomial, &[4.0, 1.0], 50).unwrap();
        assert_eq!(summary.mean, 4.0);
        assert_eq!(summary.variance, 0.0);
    }
}
