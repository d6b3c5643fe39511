pub mod error;
pub mod math;
pub mod loss;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use loss::svm::SvmLoss;
pub use loss::strategy::Strategy;
pub use loss::config::{EvaluatorConfig, HingeLossEvaluator};
