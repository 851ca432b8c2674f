//! Rhombohedral versus Monte Carlo integration of `sin(x)` over `[0, pi]`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::convergence::{convergence, ConvergencePoint};
use crate::domain::Domain;
use crate::error::{McError, Result};
use crate::integrand::from_fn1;
use crate::series::Series;
use crate::strategy::Strategy;

/// The exact value of the integral of `sin(x)` over `[0, pi]`.
pub const EXPECTED: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SineComparisonConfig {
    /// Step counts `1..=max_steps` are compared.
    pub max_steps: usize,
    pub seed: Option<u64>,
}

impl Default for SineComparisonConfig {
    fn default() -> Self {
        SineComparisonConfig {
            max_steps: 999,
            seed: None,
        }
    }
}

impl SineComparisonConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(McError::invalid("need at least one step"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SineComparison {
    pub rhombohedral: Vec<ConvergencePoint>,
    pub monte_carlo: Vec<ConvergencePoint>,
}

impl SineComparison {
    /// Percent error against step count for both methods.
    pub fn series(&self) -> Vec<Series> {
        vec![
            Series::percent_errors("Rhombohedral", &self.rhombohedral),
            Series::percent_errors("Monte Carlo", &self.monte_carlo),
        ]
    }
}

pub fn run(config: &SineComparisonConfig) -> Result<SineComparison> {
    config.validate()?;
    let mut rng = super::rng_from(config.seed);
    let domain = Domain::interval(0.0, PI)?;
    let sine = from_fn1(f64::sin);

    let rhombohedral = convergence(
        &sine,
        &domain,
        &Strategy::Regular,
        EXPECTED,
        config.max_steps,
        &mut rng,
    )?;
    let monte_carlo = convergence(
        &sine,
        &domain,
        &Strategy::Uniform,
        EXPECTED,
        config.max_steps,
        &mut rng,
    )?;

    Ok(SineComparison {
        rhombohedral,
        monte_carlo,
    })
}
