//! Monte Carlo estimate of the double integral of `sin(x) sin(y)` over
//! `[0, pi]^2` as a function of the number of sub-regions.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::convergence::{convergence, ConvergencePoint};
use crate::domain::Domain;
use crate::error::{McError, Result};
use crate::integrand::from_fn2;
use crate::series::Series;
use crate::strategy::Strategy;

/// The exact volume.
pub const EXPECTED: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoubleIntegralConfig {
    pub max_steps: usize,
    pub seed: Option<u64>,
}

impl Default for DoubleIntegralConfig {
    fn default() -> Self {
        DoubleIntegralConfig {
            max_steps: 1000,
            seed: None,
        }
    }
}

impl DoubleIntegralConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(McError::invalid("need at least one step"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubleIntegral {
    pub points: Vec<ConvergencePoint>,
}

impl DoubleIntegral {
    pub fn series(&self) -> Vec<Series> {
        let last = self.points.last().map_or(1.0, |p| p.samples as f64);
        vec![
            Series::estimates("Monte Carlo Integration Volume", &self.points),
            Series::constant("Expected Volume", 1.0, last, EXPECTED),
        ]
    }
}

pub fn run(config: &DoubleIntegralConfig) -> Result<DoubleIntegral> {
    config.validate()?;
    let mut rng = super::rng_from(config.seed);
    let domain = Domain::new(&[(0.0, PI), (0.0, PI)])?;
    let points = convergence(
        &from_fn2(|x, y| x.sin() * y.sin()),
        &domain,
        &Strategy::Uniform,
        EXPECTED,
        config.max_steps,
        &mut rng,
    )?;
    Ok(DoubleIntegral { points })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_late_estimates_approach_four() {
        let config = DoubleIntegralConfig {
            max_steps: 400,
            seed: Some(8),
        };
        let result = run(&config).unwrap();
        assert_eq!(result.points.len(), 400);

        let tail: Vec<f64> = result.points[300..].iter().map(|p| p.estimate).collect();
        let mean = tail.iter().sum::<f64>() / tail.len() as f64;
        assert!((mean - EXPECTED).abs() < 0.1, "mean={mean}");

        let series = result.series();
        assert_eq!(series[1].y, vec![EXPECTED, EXPECTED]);
        assert_eq!(series[1].x, vec![1.0, 400.0]);
    }
}
