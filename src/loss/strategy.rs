use serde::{Serialize, Deserialize};

/// Selects how `HingeLossEvaluator` computes the loss and gradient.
///
/// - `Naive`      — per-example, per-class loops; the reference form.
/// - `Vectorized` — whole-matrix products over the batch. Agrees with
///   `Naive` to floating-point tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Naive,
    #[default]
    Vectorized,
}
