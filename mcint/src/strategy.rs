//! Sampling strategies: how a representative point is chosen inside a sub-region.
//!
//! All three strategies answer the same question through [`Pick`]. The
//! estimator decides what a sub-region is and how the picked point is weighted.

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{McError, Result};

/// Relative slack below zero tolerated in a radicand before it is reported.
/// Covers rounding when a sample lands exactly on the rim.
const RADICAND_SLACK: f64 = 1e-12;

/// One of the `N` equal-measure pieces a domain is split into.
#[derive(Debug, Clone, PartialEq)]
pub enum SubRegion {
    /// An axis-aligned cell with its lower and upper corner.
    Cell {
        lower: Vec<f64>,
        upper: Vec<f64>,
        measure: f64,
    },
    /// A share of a disc of radius `radius`; `measure` is the share's base area.
    Disc { radius: f64, measure: f64 },
}

impl SubRegion {
    pub fn measure(&self) -> f64 {
        match self {
            SubRegion::Cell { measure, .. } | SubRegion::Disc { measure, .. } => *measure,
        }
    }
}

/// Produces a representative point inside a sub-region.
pub trait Pick {
    fn pick<R: Rng + ?Sized>(&self, region: &SubRegion, rng: &mut R) -> Result<Vec<f64>>;
}

/// Deterministic sampling at the cell's lower grid corner.
///
/// Paired with corner averaging in the estimator this is the rhombohedral
/// (trapezoid) rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Regular;

impl Pick for Regular {
    fn pick<R: Rng + ?Sized>(&self, region: &SubRegion, _rng: &mut R) -> Result<Vec<f64>> {
        match region {
            SubRegion::Cell { lower, .. } => Ok(lower.clone()),
            SubRegion::Disc { .. } => Err(McError::invalid(
                "regular sampling needs an axis-aligned cell",
            )),
        }
    }
}

/// One uniform variate per coordinate, scaled into the cell's bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Uniform;

impl Pick for Uniform {
    fn pick<R: Rng + ?Sized>(&self, region: &SubRegion, rng: &mut R) -> Result<Vec<f64>> {
        match region {
            SubRegion::Cell { lower, upper, .. } => Ok(lower
                .iter()
                .zip(upper)
                .map(|(&min, &max)| min + rng.gen::<f64>() * (max - min))
                .collect()),
            SubRegion::Disc { .. } => Err(McError::invalid(
                "uniform sampling needs an axis-aligned cell",
            )),
        }
    }
}

/// The radius x and y are drawn within when sampling a disc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum SamplingRadius {
    /// The disc radius itself. Samples near the rim protrude from the sphere.
    #[default]
    Full,
    /// The disc radius less the radius of a circle with the sub-region's area,
    /// `R - sqrt(dA / pi)`. No sample protrudes in the x-y plane.
    Reduced,
    /// An explicit radius. Must not exceed the disc radius.
    Fixed(f64),
}

/// Samples a hemisphere over a disc.
///
/// Draws `x` uniformly in `[-r, r]`, then `y` uniformly in `[-y_max, y_max]`
/// with `y_max = sqrt(r^2 - x^2)`, where `r` is the sampling radius. The
/// height `z = sqrt(R^2 - x^2 - y^2)` always uses the disc radius `R`, even
/// when `r < R`. The picked point is `(x, y, z)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RadialCorrected {
    pub radius: SamplingRadius,
}

impl RadialCorrected {
    pub fn new(radius: SamplingRadius) -> Self {
        RadialCorrected { radius }
    }

    /// Samples within the full disc radius.
    pub fn protruding() -> Self {
        Self::new(SamplingRadius::Full)
    }

    /// Samples within the reduced radius.
    pub fn non_protruding() -> Self {
        Self::new(SamplingRadius::Reduced)
    }

    /// Resolves the radius x and y are drawn within for a sub-region.
    pub fn sampling_radius(&self, radius: f64, measure: f64) -> Result<f64> {
        let sampling = match self.radius {
            SamplingRadius::Full => radius,
            SamplingRadius::Reduced => radius - (measure / PI).sqrt(),
            SamplingRadius::Fixed(r) => r,
        };
        if !sampling.is_finite() || sampling < 0.0 {
            return Err(McError::invalid(format!(
                "sampling radius must be finite and non-negative, got {sampling}"
            )));
        }
        if sampling > radius {
            return Err(McError::Domain {
                radicand: radius * radius - sampling * sampling,
                context: "sampling radius exceeds disc radius",
            });
        }
        Ok(sampling)
    }
}

impl Pick for RadialCorrected {
    fn pick<R: Rng + ?Sized>(&self, region: &SubRegion, rng: &mut R) -> Result<Vec<f64>> {
        let (radius, measure) = match region {
            SubRegion::Disc { radius, measure } => (*radius, *measure),
            SubRegion::Cell { .. } => {
                return Err(McError::invalid("radial sampling needs a disc"));
            }
        };
        let r = self.sampling_radius(radius, measure)?;

        let x = 2.0 * r * rng.gen::<f64>() - r;
        let y_max = checked_sqrt(r * r - x * x, r * r, "maximum y at x")?;
        let y = 2.0 * y_max * rng.gen::<f64>() - y_max;
        let z = checked_sqrt(
            radius * radius - x * x - y * y,
            radius * radius,
            "hemisphere height",
        )?;

        Ok(vec![x, y, z])
    }
}

fn checked_sqrt(radicand: f64, scale: f64, context: &'static str) -> Result<f64> {
    if radicand >= 0.0 {
        Ok(radicand.sqrt())
    } else if radicand >= -RADICAND_SLACK * scale {
        Ok(0.0)
    } else {
        Err(McError::Domain { radicand, context })
    }
}

/// Selects the strategy an estimate is taken with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Strategy {
    Regular,
    Uniform,
    RadialCorrected(RadialCorrected),
}

impl Strategy {
    /// Whether picking consumes random variates.
    pub fn is_random(&self) -> bool {
        !matches!(self, Strategy::Regular)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Regular => "regular",
            Strategy::Uniform => "uniform",
            Strategy::RadialCorrected(_) => "radial-corrected",
        }
    }
}

impl Pick for Strategy {
    fn pick<R: Rng + ?Sized>(&self, region: &SubRegion, rng: &mut R) -> Result<Vec<f64>> {
        match self {
            Strategy::Regular => Regular.pick(region, rng),
            Strategy::Uniform => Uniform.pick(region, rng),
            Strategy::RadialCorrected(radial) => radial.pick(region, rng),
        }
    }
}

impl From<RadialCorrected> for Strategy {
    fn from(radial: RadialCorrected) -> Self {
        Strategy::RadialCorrected(radial)
    }
}
