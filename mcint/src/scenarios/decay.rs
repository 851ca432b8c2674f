//! Monte Carlo simulation of radioactive decay, `dN/dt = -lambda N`.
//!
//! At every time step each surviving nucleus decays when a uniform variate
//! falls below the decay constant. The closed form `N0 e^(-lambda t)` serves
//! as the reference curve.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{McError, Result};
use crate::series::Series;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Probability that a nucleus decays during one time step.
    pub lambda: f64,
    /// Nuclei at `t = 0`.
    pub initial: u64,
    /// Number of unit time steps to simulate.
    pub steps: usize,
    pub seed: Option<u64>,
}

impl Default for DecayConfig {
    fn default() -> Self {
        DecayConfig {
            lambda: 0.01,
            initial: 10_000,
            steps: 1000,
            seed: None,
        }
    }
}

impl DecayConfig {
    pub fn validate(&self) -> Result<()> {
        check_lambda(self.lambda)
    }
}

fn check_lambda(lambda: f64) -> Result<()> {
    if (0.0..=1.0).contains(&lambda) {
        Ok(())
    } else {
        Err(McError::invalid(format!(
            "decay constant must lie in [0, 1], got {lambda}"
        )))
    }
}

/// Surviving nuclei at `t = 0, 1, ..., steps`.
pub fn simulate<R: Rng + ?Sized>(
    initial: u64,
    lambda: f64,
    steps: usize,
    rng: &mut R,
) -> Result<Vec<u64>> {
    check_lambda(lambda)?;

    let mut counts = Vec::with_capacity(steps + 1);
    let mut n = initial;
    counts.push(n);
    for _ in 0..steps {
        let decayed = (0..n).filter(|_| rng.gen::<f64>() < lambda).count() as u64;
        n -= decayed;
        counts.push(n);
    }
    debug!(initial, lambda, steps, remaining = n, "decay simulated");

    Ok(counts)
}

/// Expected surviving nuclei at time `t`.
pub fn analytic(initial: u64, lambda: f64, t: f64) -> f64 {
    initial as f64 * (-lambda * t).exp()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayReport {
    pub monte_carlo: Series,
    pub analytic: Series,
}

pub fn run(config: &DecayConfig) -> Result<DecayReport> {
    config.validate()?;
    let mut rng = super::rng_from(config.seed);
    let counts = simulate(config.initial, config.lambda, config.steps, &mut rng)?;

    let t: Vec<f64> = (0..=config.steps).map(|step| step as f64).collect();
    let expected = t
        .iter()
        .map(|&t| analytic(config.initial, config.lambda, t))
        .collect();

    Ok(DecayReport {
        monte_carlo: Series::new(
            "Monte Carlo Method",
            t.clone(),
            counts.iter().map(|&n| n as f64).collect(),
        )?,
        analytic: Series::new("Differential Method", t, expected)?,
    })
}
