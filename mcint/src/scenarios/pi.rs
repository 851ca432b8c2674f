//! Dartboard estimate of pi.
//!
//! Darts land uniformly in the square `[-a, a]^2`. The fraction landing in the
//! inscribed circle tends to `pi a^2 / 4 a^2 = pi / 4`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{McError, Result};
use crate::series::Series;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DartboardConfig {
    /// Radius of the board; the square has side `2 * radius`.
    pub radius: f64,
    pub darts: usize,
    pub seed: Option<u64>,
}

impl Default for DartboardConfig {
    fn default() -> Self {
        DartboardConfig {
            radius: 1.0,
            darts: 10_000,
            seed: None,
        }
    }
}

impl DartboardConfig {
    pub fn validate(&self) -> Result<()> {
        check_board(self.radius, self.darts)
    }
}

fn check_board(radius: f64, darts: usize) -> Result<()> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(McError::invalid(format!(
            "dartboard radius must be positive, got {radius}"
        )));
    }
    if darts == 0 {
        return Err(McError::invalid("need at least one dart"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dartboard {
    pub hits: usize,
    /// Entry `k - 1` is `4 * hits / k` after the `k`-th dart. Unlike the
    /// integration convergence sequences this is a running estimate.
    pub estimates: Vec<f64>,
}

impl Dartboard {
    /// The estimate after the last dart.
    pub fn pi(&self) -> f64 {
        self.estimates.last().copied().unwrap_or(0.0)
    }

    pub fn series(&self) -> Vec<Series> {
        let x: Vec<f64> = (1..=self.estimates.len()).map(|k| k as f64).collect();
        let last = x.last().copied().unwrap_or(0.0);
        vec![
            Series {
                label: "Pi Value".to_string(),
                x,
                y: self.estimates.clone(),
            },
            Series::constant("Final Estimate", 0.0, last, self.pi()),
        ]
    }
}

/// Throws `darts` darts at a board of the given radius.
pub fn throw_darts<R: Rng + ?Sized>(radius: f64, darts: usize, rng: &mut R) -> Result<Dartboard> {
    check_board(radius, darts)?;

    let mut hits = 0;
    let mut estimates = Vec::with_capacity(darts);
    for dart in 1..=darts {
        let x = -radius + rng.gen::<f64>() * 2.0 * radius;
        let y = -radius + rng.gen::<f64>() * 2.0 * radius;
        if x * x + y * y <= radius * radius {
            hits += 1;
        }
        estimates.push(4.0 * hits as f64 / dart as f64);
    }
    debug!(darts, hits, "darts thrown");

    Ok(Dartboard { hits, estimates })
}

pub fn run(config: &DartboardConfig) -> Result<Dartboard> {
    config.validate()?;
    let mut rng = super::rng_from(config.seed);
    throw_darts(config.radius, config.darts, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use std::f64::consts::PI;

    #[test]
    fn test_estimates_pi() {
        let mut rng = Pcg64::seed_from_u64(31415);
        let board = throw_darts(1.0, 100_000, &mut rng).unwrap();
        assert_eq!(board.estimates.len(), 100_000);
        assert!((board.pi() - PI).abs() < 0.03, "pi={}", board.pi());
    }

    #[test]
    fn test_running_estimate_matches_hits() {
        let mut rng = Pcg64::seed_from_u64(5);
        let board = throw_darts(2.5, 1000, &mut rng).unwrap();
        assert_eq!(board.pi(), 4.0 * board.hits as f64 / 1000.0);
        // The first dart either hits (4) or misses (0).
        assert!(board.estimates[0] == 0.0 || board.estimates[0] == 4.0);
    }

    #[test]
    fn test_run_is_reproducible() {
        let config = DartboardConfig {
            seed: Some(9),
            darts: 500,
            ..Default::default()
        };
        assert_eq!(run(&config).unwrap(), run(&config).unwrap());
        let series = run(&config).unwrap().series();
        assert_eq!(series[0].len(), 500);
    }

    #[test]
    fn test_invalid_config() {
        let mut rng = Pcg64::seed_from_u64(5);
        assert!(throw_darts(0.0, 10, &mut rng).is_err());
        assert!(throw_darts(1.0, 0, &mut rng).is_err());
        assert!(throw_darts(f64::NAN, 10, &mut rng).is_err());
        // Rejected before any dart is thrown.
        assert_eq!(rng.gen::<u64>(), Pcg64::seed_from_u64(5).gen::<u64>());

        let config = DartboardConfig {
            radius: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(run(&config).is_err());
    }
}
