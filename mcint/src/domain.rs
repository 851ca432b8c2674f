//! Integration domains: axis-aligned boxes and discs.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{McError, Result};

/// The region an estimate is taken over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Domain {
    /// An axis-aligned box given as one `(min, max)` pair per dimension.
    /// A single pair is the interval `[xi, xf]`.
    Box(Vec<(f64, f64)>),
    /// A disc of the given radius centred on the origin of the x-y plane.
    Disc { radius: f64 },
}

impl Domain {
    /// Builds a validated box domain.
    pub fn new(boundaries: &[(f64, f64)]) -> Result<Self> {
        let domain = Domain::Box(boundaries.to_vec());
        domain.validate()?;
        Ok(domain)
    }

    /// Builds the interval `[min, max]`.
    pub fn interval(min: f64, max: f64) -> Result<Self> {
        Self::new(&[(min, max)])
    }

    /// Builds a validated disc domain.
    pub fn disc(radius: f64) -> Result<Self> {
        let domain = Domain::Disc { radius };
        domain.validate()?;
        Ok(domain)
    }

    /// Checks that every bound is finite and ordered, or that the radius is positive.
    pub fn validate(&self) -> Result<()> {
        match self {
            Domain::Box(boundaries) => {
                if boundaries.is_empty() {
                    return Err(McError::invalid("box domain needs at least one dimension"));
                }
                for (d, &(min, max)) in boundaries.iter().enumerate() {
                    if !min.is_finite() || !max.is_finite() {
                        return Err(McError::invalid(format!(
                            "non-finite bounds ({min}, {max}) in dimension {d}"
                        )));
                    }
                    if min > max {
                        return Err(McError::invalid(format!(
                            "min {min} exceeds max {max} in dimension {d}"
                        )));
                    }
                }
                Ok(())
            }
            Domain::Disc { radius } => {
                if radius.is_finite() && *radius > 0.0 {
                    Ok(())
                } else {
                    Err(McError::invalid(format!(
                        "disc radius must be positive and finite, got {radius}"
                    )))
                }
            }
        }
    }

    /// Length, area, or base area of the domain.
    pub fn measure(&self) -> f64 {
        match self {
            Domain::Box(boundaries) => boundaries.iter().map(|&(min, max)| max - min).product(),
            Domain::Disc { radius } => PI * radius * radius,
        }
    }

    /// Number of coordinates in the points handed to the integrand.
    ///
    /// Disc samples carry the resolved surface height as a third coordinate.
    pub fn point_dim(&self) -> usize {
        match self {
            Domain::Box(boundaries) => boundaries.len(),
            Domain::Disc { .. } => 3,
        }
    }

    pub fn boundaries(&self) -> Option<&[(f64, f64)]> {
        match self {
            Domain::Box(boundaries) => Some(boundaries),
            Domain::Disc { .. } => None,
        }
    }

    pub fn radius(&self) -> Option<f64> {
        match self {
            Domain::Box(_) => None,
            Domain::Disc { radius } => Some(*radius),
        }
    }
}
