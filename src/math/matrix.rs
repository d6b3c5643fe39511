use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};
use std::ops::{Add, Sub, Mul};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Uniform samples in [-1, 1) from a generator seeded with `seed`.
    /// Two calls with the same seed and shape return identical matrices.
    pub fn random_seeded(rows: usize, cols: usize, seed: u64) -> Matrix {
        Matrix::random_with(rows, cols, &mut StdRng::seed_from_u64(seed))
    }

    pub fn random_with<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }

        res
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Multiplies every entry by `factor`.
    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// Sum of squared entries, i.e. sum(W ⊙ W).
    pub fn sum_squares(&self) -> f64 {
        self.data.iter().flatten().map(|x| x * x).sum()
    }

    /// Checks that `data` holds exactly `rows` rows of `cols` entries.
    pub fn check_shape(&self) -> Result<()> {
        if self.data.len() != self.rows {
            return Err(Error::ShapeMismatch {
                what: "matrix row count",
                expected: self.rows,
                found: self.data.len(),
            });
        }
        if let Some((row, found)) = self.data.iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != self.cols)
        {
            return Err(Error::RaggedMatrix { row, expected: self.cols, found });
        }
        Ok(())
    }

    /// Checks that both matrices are well formed and of equal shape.
    pub fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        self.check_shape()?;
        other.check_shape()?;
        if self.rows != other.rows {
            return Err(Error::ShapeMismatch { what: "row count", expected: self.rows, found: other.rows });
        }
        if self.cols != other.cols {
            return Err(Error::ShapeMismatch { what: "column count", expected: self.cols, found: other.cols });
        }
        Ok(())
    }

    /// Largest absolute element-wise difference.
    pub fn max_abs_diff(&self, other: &Matrix) -> Result<f64> {
        self.check_same_shape(other)?;
        Ok(self.data.iter().flatten()
            .zip(other.data.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }

    /// Frobenius norm of `self - other`.
    pub fn distance(&self, other: &Matrix) -> Result<f64> {
        self.check_same_shape(other)?;
        Ok(self.data.iter().flatten()
            .zip(other.data.iter().flatten())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt())
    }

    /// Matrix product `self · rhs` without consuming either operand.
    pub fn dot(&self, rhs: &Matrix) -> Matrix {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for k in 0..self.cols {
                let a = self.data[i][k];
                for j in 0..res.cols {
                    res.data[i][j] += a * rhs.data[k][j];
                }
            }
        }

        res
    }

    /// Adds `factor * src` to column `col` in place.
    pub fn add_to_column(&mut self, col: usize, src: &[f64], factor: f64) {
        debug_assert_eq!(src.len(), self.rows);
        for (row, &x) in self.data.iter_mut().zip(src) {
            row[col] += factor * x;
        }
    }

    /// Builds a matrix from rows. Panics on ragged input; see `try_from_data`.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        match Matrix::try_from_data(data) {
            Ok(m) => m,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_from_data(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, Vec::len);
        if let Some((row, found)) = data.iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(Error::RaggedMatrix { row, expected: cols, found });
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(mut self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for (row, rhs_row) in self.data.iter_mut().zip(rhs.data) {
            for (x, y) in row.iter_mut().zip(rhs_row) {
                *x += y;
            }
        }

        self
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(mut self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        for (row, rhs_row) in self.data.iter_mut().zip(rhs.data) {
            for (x, y) in row.iter_mut().zip(rhs_row) {
                *x -= y;
            }
        }

        self
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        self.dot(&rhs)
    }
}
