pub mod svm;
pub mod strategy;
pub mod config;

pub use svm::SvmLoss;
pub use strategy::Strategy;
pub use config::{EvaluatorConfig, HingeLossEvaluator};
