//! Ready-made experiments built on the estimators.
//!
//! Each scenario has a serde-deserialisable config whose `Default` carries the
//! classic textbook constants, and returns its results as [`Series`] or
//! summary statistics for a caller to print or plot.
//!
//! [`Series`]: crate::series::Series

pub mod decay;
pub mod double_integral;
pub mod half_sphere;
pub mod pi;
pub mod sine;

use rand::SeedableRng;
use rand_pcg::Pcg64;

/// A fixed-seed generator when `seed` is given, otherwise one seeded from
/// system entropy.
pub fn rng_from(seed: Option<u64>) -> Pcg64 {
    match seed {
        Some(seed) => Pcg64::seed_from_u64(seed),
        None => Pcg64::from_entropy(),
    }
}
