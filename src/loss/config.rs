use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::loss::strategy::Strategy;
use crate::loss::svm::SvmLoss;
use crate::math::matrix::Matrix;

/// Configuration for a `HingeLossEvaluator`.
///
/// # Fields
/// - `reg`      — L2 regularization strength; finite and non-negative
/// - `strategy` — which form computes the loss (`naive` or `vectorized`)
///
/// Missing fields fall back to `reg = 0.0` and `strategy = "vectorized"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub reg: f64,
    pub strategy: Strategy,
}

impl EvaluatorConfig {
    pub fn new(reg: f64, strategy: Strategy) -> Self {
        EvaluatorConfig { reg, strategy }
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from a JSON file previously written by `save_json`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<EvaluatorConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Stateless evaluator of the structured SVM loss for a fixed config.
///
/// Holds no reference to the weights, so one evaluator can be shared across
/// threads and reused across training iterations.
#[derive(Debug, Clone, Copy)]
pub struct HingeLossEvaluator {
    config: EvaluatorConfig,
}

impl HingeLossEvaluator {
    pub fn new(config: EvaluatorConfig) -> Result<Self> {
        if !config.reg.is_finite() || config.reg < 0.0 {
            return Err(Error::InvalidRegularization(config.reg));
        }
        Ok(HingeLossEvaluator { config })
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Returns `(loss, dW)` using the configured strategy.
    pub fn evaluate(&self, weights: &Matrix, features: &Matrix, labels: &[usize]) -> Result<(f64, Matrix)> {
        match self.config.strategy {
            Strategy::Naive      => SvmLoss::evaluate_naive(weights, features, labels, self.config.reg),
            Strategy::Vectorized => SvmLoss::evaluate_vectorized(weights, features, labels, self.config.reg),
        }
    }
}
