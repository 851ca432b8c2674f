//! The `Integrand` trait, which defines the function to be integrated.

/// A trait representing a function to be integrated.
///
/// Implement it directly for a named function, or wrap a closure with
/// [`FnIntegrand`].
pub trait Integrand {
    /// Returns the number of coordinates of the points passed to [`Integrand::eval`].
    fn dim(&self) -> usize;

    /// Evaluates the function at a given point `x`.
    ///
    /// # Arguments
    ///
    /// * `x`: A slice of `f64` representing the point in the integration space.
    ///
    /// # Returns
    ///
    /// The height (or weight) `f(x)`.
    fn eval(&self, x: &[f64]) -> f64;
}

/// Adapts a closure over `&[f64]` into an [`Integrand`] of fixed dimension.
#[derive(Clone, Copy)]
pub struct FnIntegrand<F> {
    dim: usize,
    func: F,
}

impl<F> FnIntegrand<F>
where
    F: Fn(&[f64]) -> f64,
{
    pub fn new(dim: usize, func: F) -> Self {
        FnIntegrand { dim, func }
    }
}

impl<F> Integrand for FnIntegrand<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn dim(&self) -> usize {
        self.dim
    }

    fn eval(&self, x: &[f64]) -> f64 {
        (self.func)(x)
    }
}

/// Wraps a one-dimensional `f(x)`, such as `f64::sin`.
pub fn from_fn1<F>(func: F) -> FnIntegrand<impl Fn(&[f64]) -> f64>
where
    F: Fn(f64) -> f64,
{
    FnIntegrand::new(1, move |x: &[f64]| func(x[0]))
}

/// Wraps a two-dimensional `f(x, y)`.
pub fn from_fn2<F>(func: F) -> FnIntegrand<impl Fn(&[f64]) -> f64>
where
    F: Fn(f64, f64) -> f64,
{
    FnIntegrand::new(2, move |x: &[f64]| func(x[0], x[1]))
}

/// Reads the height off a radial sample `(x, y, z)`.
///
/// Radial sampling already resolves the surface height, so integrating this
/// over a disc yields the enclosed volume.
#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceHeight;

impl Integrand for SurfaceHeight {
    fn dim(&self) -> usize {
        3
    }

    fn eval(&self, x: &[f64]) -> f64 {
        x[2]
    }
}

impl<T: Integrand + ?Sized> Integrand for &T {
    fn dim(&self) -> usize {
        (**self).dim()
    }

    fn eval(&self, x: &[f64]) -> f64 {
        (**self).eval(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_adaptors() {
        let sine = from_fn1(f64::sin);
        assert_eq!(sine.dim(), 1);
        assert_eq!(sine.eval(&[0.0]), 0.0);

        let product = from_fn2(|x, y| x * y);
        assert_eq!(product.dim(), 2);
        assert_eq!(product.eval(&[2.0, 3.0]), 6.0);
    }

    #[test]
    fn test_surface_height_reads_z() {
        assert_eq!(SurfaceHeight.dim(), 3);
        assert_eq!(SurfaceHeight.eval(&[0.1, 0.2, 0.7]), 0.7);
    }
}
