use log::{info, warn};
use rand::Rng;

use crate::error::Result;
use crate::math::matrix::Matrix;

/// Default finite-difference step.
pub const DEFAULT_STEP: f64 = 1e-5;

/// One sampled entry of a sparse gradient check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckSample {
    pub row: usize,
    pub col: usize,
    pub numerical: f64,
    pub analytic: f64,
    pub relative_error: f64,
}

/// |a − b| / max(1e-12, |a| + |b|)
pub fn relative_error(a: f64, b: f64) -> f64 {
    (a - b).abs() / (a.abs() + b.abs()).max(1e-12)
}

/// Centered difference (f(x + h) − f(x − h)) / 2h at entry (row, col).
/// `x` is restored before returning.
fn centered_difference<F>(f: &mut F, x: &mut Matrix, row: usize, col: usize, h: f64) -> Result<f64>
where
    F: FnMut(&Matrix) -> Result<f64>,
{
    let old = x.data[row][col];
    x.data[row][col] = old + h;
    let plus = f(x);
    x.data[row][col] = old - h;
    let minus = f(x);
    x.data[row][col] = old;
    Ok((plus? - minus?) / (2.0 * h))
}

/// Numerical gradient of `f` at `x` over every entry.
pub fn numerical_gradient<F>(mut f: F, x: &Matrix, h: f64) -> Result<Matrix>
where
    F: FnMut(&Matrix) -> Result<f64>,
{
    x.check_shape()?;
    let mut shifted = x.clone();
    let mut grad = Matrix::zeros(x.rows, x.cols);
    for i in 0..x.rows {
        for j in 0..x.cols {
            grad.data[i][j] = centered_difference(&mut f, &mut shifted, i, j, h)?;
        }
    }
    Ok(grad)
}

/// Compares `analytic` against centered differences at `num_checks` random
/// entries of `x`. Samples whose relative error exceeds `1e-5` are logged
/// at warn level; all samples are returned for the caller to judge.
/// An empty `x` yields no samples.
pub fn grad_check_sparse<F, R>(
    mut f: F,
    x: &Matrix,
    analytic: &Matrix,
    num_checks: usize,
    h: f64,
    rng: &mut R,
) -> Result<Vec<GradCheckSample>>
where
    F: FnMut(&Matrix) -> Result<f64>,
    R: Rng + ?Sized,
{
    x.check_same_shape(analytic)?;
    if x.rows == 0 || x.cols == 0 {
        return Ok(Vec::new());
    }
    let mut shifted = x.clone();
    let mut samples = Vec::with_capacity(num_checks);

    for _ in 0..num_checks {
        let row = rng.gen_range(0..x.rows);
        let col = rng.gen_range(0..x.cols);
        let numerical = centered_difference(&mut f, &mut shifted, row, col, h)?;
        let exact = analytic.data[row][col];
        let error = relative_error(numerical, exact);

        info!("({row}, {col}) numerical: {numerical:.6} analytic: {exact:.6}, relative error: {error:e}");
        if error > 1e-5 {
            warn!("gradient mismatch at ({row}, {col})");
        }

        samples.push(GradCheckSample {
            row,
            col,
            numerical,
            analytic: exact,
            relative_error: error,
        });
    }

    Ok(samples)
}
