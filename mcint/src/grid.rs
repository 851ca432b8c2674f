//! The regular grid used by the rhombohedral (trapezoid) strategy.

/// A uniform partition of the unit interval into `n_bins` bins.
#[derive(Debug, Clone)]
pub struct Grid {
    /// The number of bins in the grid.
    n_bins: usize,
    /// The grid boundaries, of size `n_bins + 1`.
    bins: Vec<f64>,
}

impl Grid {
    /// Creates a new uniform grid for a given number of bins.
    pub fn new(n_bins: usize) -> Self {
        let bins = (0..=n_bins).map(|i| i as f64 / n_bins as f64).collect();
        Grid { n_bins, bins }
    }

    /// Returns the `(low, high)` edges of `bin` mapped onto `[min, max]`.
    ///
    /// Edges are computed from the bin index rather than by accumulating a
    /// step, so the last edge lands exactly on `max`.
    pub fn edges(&self, bin: usize, min: f64, max: f64) -> (f64, f64) {
        let width = max - min;
        (min + self.bins[bin] * width, min + self.bins[bin + 1] * width)
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }
}

/// Converts a cell index to its coordinates on a lattice with `bins[d]`
/// bins along axis `d`. The last axis varies fastest.
pub fn cell_coords(index: usize, bins: &[usize]) -> Vec<usize> {
    let mut coords = vec![0; bins.len()];
    let mut current_index = index;
    for d in (0..bins.len()).rev() {
        coords[d] = current_index % bins[d];
        current_index /= bins[d];
    }
    coords
}

/// Splits `total` cells into per-axis bin counts whose product is `total`,
/// as balanced as the factorisation of `total` allows. Counts are returned in
/// ascending order, so a prime `total` gives `[1, .., 1, total]`.
pub fn axis_bins(total: usize, dim: usize) -> Vec<usize> {
    let mut bins = vec![1; dim];
    if dim == 0 {
        return bins;
    }
    for factor in prime_factors(total).into_iter().rev() {
        if let Some(smallest) = bins.iter_mut().min() {
            *smallest *= factor;
        }
    }
    bins.sort_unstable();
    bins
}

/// Prime factors of `n` in ascending order, with multiplicity.
fn prime_factors(mut n: usize) -> Vec<usize> {
    let mut factors = Vec::new();
    let mut p = 2;
    while p * p <= n {
        while n % p == 0 {
            factors.push(p);
            n /= p;
        }
        p += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}
