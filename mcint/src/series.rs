//! Labelled `(x, y)` series handed to whatever prints or plots results.

use serde::{Deserialize, Serialize};

use crate::convergence::ConvergencePoint;
use crate::error::{McError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(McError::invalid(format!(
                "series needs as many x values ({}) as y values ({})",
                x.len(),
                y.len()
            )));
        }
        Ok(Series {
            label: label.into(),
            x,
            y,
        })
    }

    /// A horizontal line at `y` spanning `[x0, x1]`.
    pub fn constant(label: impl Into<String>, x0: f64, x1: f64, y: f64) -> Self {
        Series {
            label: label.into(),
            x: vec![x0, x1],
            y: vec![y, y],
        }
    }

    /// Sample count against estimate.
    pub fn estimates(label: impl Into<String>, points: &[ConvergencePoint]) -> Self {
        Series {
            label: label.into(),
            x: points.iter().map(|p| p.samples as f64).collect(),
            y: points.iter().map(|p| p.estimate).collect(),
        }
    }

    /// Sample count against percent error.
    pub fn percent_errors(label: impl Into<String>, points: &[ConvergencePoint]) -> Self {
        Series {
            label: label.into(),
            x: points.iter().map(|p| p.samples as f64).collect(),
            y: points.iter().map(|p| p.percent_error).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
