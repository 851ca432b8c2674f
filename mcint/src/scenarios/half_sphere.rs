//! Volume of a half-sphere by radial sampling of its base disc.
//!
//! The protruding method draws x and y within the full radius, so sub-regions
//! near the rim stick out of the sphere. The non-protruding method draws
//! within `R - sqrt(dA / pi)`, the largest radius at which a sub-region of area
//! `dA` still fits inside the base, while heights keep using `R`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::convergence::{par_repeated_trials, repeated_trials, TrialStats};
use crate::domain::Domain;
use crate::error::{McError, Result};
use crate::estimator::SampleSpec;
use crate::integrand::SurfaceHeight;
use crate::strategy::RadialCorrected;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalfSphereConfig {
    pub radius: f64,
    /// Sub-regions the base disc is divided into.
    pub sub_regions: usize,
    /// Independent volume estimates per method.
    pub trials: usize,
    /// Run the trials on the rayon thread pool.
    pub parallel: bool,
    pub seed: Option<u64>,
}

impl Default for HalfSphereConfig {
    fn default() -> Self {
        HalfSphereConfig {
            radius: 1.0,
            sub_regions: 1000,
            trials: 100,
            parallel: false,
            seed: None,
        }
    }
}

impl HalfSphereConfig {
    pub fn validate(&self) -> Result<()> {
        Domain::disc(self.radius)?;
        if self.sub_regions == 0 || self.trials == 0 {
            return Err(McError::invalid(
                "sub-region and trial counts must be at least 1",
            ));
        }
        Ok(())
    }
}

/// `(2/3) pi R^3`.
pub fn analytic_volume(radius: f64) -> f64 {
    2.0 / 3.0 * PI * radius.powi(3)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalfSphereReport {
    pub protruding: TrialStats,
    pub non_protruding: TrialStats,
    pub analytic_volume: f64,
}

pub fn run(config: &HalfSphereConfig) -> Result<HalfSphereReport> {
    config.validate()?;
    let mut rng = super::rng_from(config.seed);
    let domain = Domain::disc(config.radius)?;

    let mut trials = |radial: RadialCorrected| {
        let spec = SampleSpec::new(config.sub_regions, radial.into());
        if config.parallel {
            par_repeated_trials(&SurfaceHeight, &domain, &spec, config.trials, &mut rng)
        } else {
            repeated_trials(&SurfaceHeight, &domain, &spec, config.trials, &mut rng)
        }
    };
    let protruding = trials(RadialCorrected::protruding())?;
    let non_protruding = trials(RadialCorrected::non_protruding())?;

    let report = HalfSphereReport {
        protruding,
        non_protruding,
        analytic_volume: analytic_volume(config.radius),
    };
    info!(
        protruding = report.protruding.mean,
        non_protruding = report.non_protruding.mean,
        analytic = report.analytic_volume,
        "half-sphere volumes"
    );
    Ok(report)
}
