//! `mcint` estimates integrals, areas and volumes by splitting a domain into
//! equal-measure sub-regions and sampling each one.
//!
//! Three sampling strategies are provided: regular (rhombohedral/trapezoid),
//! uniform Monte Carlo, and radial sampling of a hemisphere over a disc. The
//! random source is always injected, so seeded runs are reproducible.

pub mod convergence;
pub mod domain;
pub mod error;
pub mod estimator;
pub mod grid;
pub mod integrand;
pub mod scenarios;
pub mod series;
pub mod strategy;

pub use error::{McError, Result};
