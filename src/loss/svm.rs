use log::{debug, trace};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Multiclass structured SVM (hinge) loss with an L2 penalty on the weights.
///
/// Shapes: `weights` is D×C, `features` is N×D, `labels` has N entries in
/// `[0, C)`. Both forms return `(loss, dW)` where `dW` is a fresh D×C matrix.
pub struct SvmLoss;

/// Margin the correct class score must clear over every other class.
const DELTA: f64 = 1.0;

impl SvmLoss {
    /// Reference form: loops over examples and classes.
    ///
    ///   L = 1/N · Σ_i Σ_{j≠y_i} max(0, s_j − s_{y_i} + Δ) + reg·Σ W²
    ///
    /// Each violating class j adds x_i to column j of dW and subtracts it
    /// from column y_i.
    pub fn evaluate_naive(
        weights: &Matrix,
        features: &Matrix,
        labels: &[usize],
        reg: f64,
    ) -> Result<(f64, Matrix)> {
        validate(weights, features, labels, reg)?;
        debug!(
            "naive hinge loss: N={} D={} C={} reg={reg}",
            features.rows, weights.rows, weights.cols
        );

        let mut grad = Matrix::zeros(weights.rows, weights.cols);
        let mut loss = 0.0;

        for (x, &label) in features.data.iter().zip(labels) {
            let scores = class_scores(x, weights);
            let correct = scores[label];

            for (j, &score) in scores.iter().enumerate() {
                if j == label {
                    continue;
                }
                let margin = score - correct + DELTA;
                if margin > 0.0 {
                    grad.add_to_column(j, x, 1.0);
                    grad.add_to_column(label, x, -1.0);
                    loss += margin;
                }
            }
        }

        let inv_n = 1.0 / features.rows as f64;
        let (reg_loss, reg_grad) = l2_penalty(weights, reg);
        let loss = loss * inv_n + reg_loss;
        trace!("naive hinge loss = {loss}");

        Ok((loss, grad.scale(inv_n) + reg_grad))
    }

    /// Whole-batch form built on `S = X·W`.
    ///
    /// Margins are taken over every class including y_i, where the entry is
    /// always exactly Δ. The loss subtracts Δ after averaging, and the
    /// gradient replaces the y_i indicator with minus the count of strictly
    /// violating classes, so both forms agree.
    pub fn evaluate_vectorized(
        weights: &Matrix,
        features: &Matrix,
        labels: &[usize],
        reg: f64,
    ) -> Result<(f64, Matrix)> {
        validate(weights, features, labels, reg)?;
        debug!(
            "vectorized hinge loss: N={} D={} C={} reg={reg}",
            features.rows, weights.rows, weights.cols
        );

        let scores = features.dot(weights);
        let margins = hinge_margins(&scores, labels);

        let inv_n = 1.0 / features.rows as f64;
        let (reg_loss, reg_grad) = l2_penalty(weights, reg);
        let loss = margins.data.iter().flatten().sum::<f64>() * inv_n - DELTA + reg_loss;
        trace!("vectorized hinge loss = {loss}");

        let indicator = violation_indicator(&margins, labels);
        let grad = features.transpose().dot(&indicator).scale(inv_n) + reg_grad;
        Ok((loss, grad))
    }
}

/// Returns `(reg·Σ W², 2·reg·W)`.
pub fn l2_penalty(weights: &Matrix, reg: f64) -> (f64, Matrix) {
    (reg * weights.sum_squares(), weights.scale(2.0 * reg))
}

/// Scores of one example against every class: x · W.
fn class_scores(x: &[f64], weights: &Matrix) -> Vec<f64> {
    let mut scores = vec![0.0; weights.cols];
    for (&xk, w_row) in x.iter().zip(&weights.data) {
        for (s, &w) in scores.iter_mut().zip(w_row) {
            *s += xk * w;
        }
    }
    scores
}

/// max(0, S − S[i, y_i] + Δ) over the full N×C score matrix.
fn hinge_margins(scores: &Matrix, labels: &[usize]) -> Matrix {
    let data = scores.data.iter().zip(labels)
        .map(|(row, &label)| {
            let correct = row[label];
            row.iter().map(|&s| (s - correct + DELTA).max(0.0)).collect()
        })
        .collect();
    Matrix { rows: scores.rows, cols: scores.cols, data }
}

/// Binarizes margins (strictly positive → 1), then moves each row's count
/// onto the label slot. The self slot is always 1, so it ends up at
/// 1 − count = −violations.
fn violation_indicator(margins: &Matrix, labels: &[usize]) -> Matrix {
    let mut indicator = margins.map(|m| if m > 0.0 { 1.0 } else { 0.0 });
    for (row, &label) in indicator.data.iter_mut().zip(labels) {
        let count: f64 = row.iter().sum();
        row[label] -= count;
    }
    indicator
}

/// Rejects inputs the loss is undefined for, before any arithmetic runs.
fn validate(weights: &Matrix, features: &Matrix, labels: &[usize], reg: f64) -> Result<()> {
    if !reg.is_finite() || reg < 0.0 {
        return Err(Error::InvalidRegularization(reg));
    }
    weights.check_shape()?;
    features.check_shape()?;
    if features.rows == 0 {
        return Err(Error::EmptyBatch);
    }
    if features.cols != weights.rows {
        return Err(Error::ShapeMismatch {
            what: "feature dimension",
            expected: weights.rows,
            found: features.cols,
        });
    }
    if labels.len() != features.rows {
        return Err(Error::ShapeMismatch {
            what: "label count",
            expected: features.rows,
            found: labels.len(),
        });
    }
    if let Some((index, &label)) = labels.iter().enumerate().find(|(_, &l)| l >= weights.cols) {
        return Err(Error::LabelOutOfRange { index, label, num_classes: weights.cols });
    }
    Ok(())
}
