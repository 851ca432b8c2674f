//! Convergence sequences and repeated-trial statistics.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Domain;
use crate::error::{McError, Result};
use crate::estimator::{integrate, partial_estimates, SampleSpec};
use crate::integrand::Integrand;
use crate::strategy::Strategy;

/// One entry of a convergence sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergencePoint {
    /// Number of sub-regions the estimate used.
    pub samples: usize,
    pub estimate: f64,
    /// `(estimate - truth) / truth * 100`.
    pub percent_error: f64,
}

/// Signed error of `estimate` relative to `ground_truth`, in percent.
pub fn percent_error(estimate: f64, ground_truth: f64) -> Result<f64> {
    check_ground_truth(ground_truth)?;
    Ok((estimate - ground_truth) / ground_truth * 100.0)
}

fn check_ground_truth(ground_truth: f64) -> Result<()> {
    if ground_truth == 0.0 || !ground_truth.is_finite() {
        return Err(McError::invalid(format!(
            "ground truth must be finite and non-zero, got {ground_truth}"
        )));
    }
    Ok(())
}

/// Estimates with `1..=n_max` sub-regions, each from a fresh sample, paired
/// with their percent error against `ground_truth`.
pub fn convergence<F, R>(
    integrand: &F,
    domain: &Domain,
    strategy: &Strategy,
    ground_truth: f64,
    n_max: usize,
    rng: &mut R,
) -> Result<Vec<ConvergencePoint>>
where
    F: Integrand + ?Sized,
    R: Rng + ?Sized,
{
    check_ground_truth(ground_truth)?;
    debug!(n_max, strategy = strategy.name(), ground_truth, "convergence sweep");

    partial_estimates(integrand, domain, n_max, strategy, rng)?
        .into_iter()
        .enumerate()
        .map(|(i, estimate)| {
            Ok(ConvergencePoint {
                samples: i + 1,
                estimate,
                percent_error: percent_error(estimate, ground_truth)?,
            })
        })
        .collect()
}

/// Mean and spread of independent estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialStats {
    pub mean: f64,
    /// Population standard deviation (divides by the number of trials).
    pub std_dev: f64,
    pub values: Vec<f64>,
}

impl TrialStats {
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(McError::invalid("need at least one trial"));
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Ok(TrialStats {
            mean,
            std_dev: variance.sqrt(),
            values,
        })
    }
}

/// Runs the estimate `trials` times in sequence, all drawing from `rng`.
pub fn repeated_trials<F, R>(
    integrand: &F,
    domain: &Domain,
    spec: &SampleSpec,
    trials: usize,
    rng: &mut R,
) -> Result<TrialStats>
where
    F: Integrand + ?Sized,
    R: Rng + ?Sized,
{
    if trials == 0 {
        return Err(McError::invalid("need at least one trial"));
    }
    let values = (0..trials)
        .map(|_| integrate(integrand, domain, spec.n, &spec.strategy, rng))
        .collect::<Result<Vec<_>>>()?;
    let stats = TrialStats::from_values(values)?;
    debug!(trials, mean = stats.mean, std_dev = stats.std_dev, "trials finished");
    Ok(stats)
}

/// Runs the estimate `trials` times in parallel.
///
/// One seed per trial is drawn from `rng` up front, in order, and each trial
/// gets its own generator. The result depends only on the state of `rng`,
/// not on the number of threads.
pub fn par_repeated_trials<F, R>(
    integrand: &F,
    domain: &Domain,
    spec: &SampleSpec,
    trials: usize,
    rng: &mut R,
) -> Result<TrialStats>
where
    F: Integrand + Sync + ?Sized,
    R: Rng + ?Sized,
{
    if trials == 0 {
        return Err(McError::invalid("need at least one trial"));
    }
    let seeds: Vec<u64> = (0..trials).map(|_| rng.gen()).collect();

    let values = seeds
        .into_par_iter()
        .map(|seed| {
            let mut trial_rng = Pcg64::seed_from_u64(seed);
            integrate(integrand, domain, spec.n, &spec.strategy, &mut trial_rng)
        })
        .collect::<Result<Vec<_>>>()?;
    let stats = TrialStats::from_values(values)?;
    debug!(trials, mean = stats.mean, std_dev = stats.std_dev, "parallel trials finished");
    Ok(stats)
}
