pub mod matrix;
pub mod grad_check;

pub use matrix::Matrix;
pub use grad_check::{grad_check_sparse, numerical_gradient, GradCheckSample};
