//! Dense linear solves for grounded conductance systems.

use log::{debug, warn};
use nalgebra::{Cholesky, DMatrix, DVector, Dyn, LU};

use crate::error::{NetworkError, Result};

/// Which decomposition a [`Factorization`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorKind {
    /// Zero-dimensional system (every node grounded)
    Empty,
    /// Cholesky decomposition of a symmetric positive definite matrix
    Cholesky,
    /// LU decomposition with partial pivoting
    Lu,
}

#[derive(Debug, Clone)]
enum Decomposition {
    Empty,
    Cholesky(Cholesky<f64, Dyn>),
    Lu(LU<f64, Dyn, Dyn>),
}

/// A factored system matrix, reusable across right-hand sides.
#[derive(Debug, Clone)]
pub struct Factorization {
    size: usize,
    decomposition: Decomposition,
}

impl Factorization {
    /// Factor `matrix`, preferring Cholesky.
    ///
    /// A grounded conductance matrix of a connected network is symmetric
    /// positive definite. If Cholesky still fails (round-off on extreme
    /// resistance ratios) LU is tried; pivots smaller than
    /// `pivot_tolerance` times the largest entry are treated as singular.
    pub fn factor(matrix: DMatrix<f64>, pivot_tolerance: f64) -> Result<Self> {
        let size = matrix.nrows();
        if matrix.ncols() != size {
            return Err(NetworkError::numeric(format!(
                "matrix is {}x{}, expected square",
                size,
                matrix.ncols()
            )));
        }
        if size == 0 {
            return Ok(Self {
                size,
                decomposition: Decomposition::Empty,
            });
        }

        let scale = matrix.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));

        match Cholesky::new(matrix.clone()) {
            Some(chol) => {
                debug!("cholesky factorization of {}x{} system", size, size);
                Ok(Self {
                    size,
                    decomposition: Decomposition::Cholesky(chol),
                })
            }
            None => {
                warn!(
                    "cholesky failed on {}x{} system, falling back to LU",
                    size, size
                );
                let lu = matrix.lu();
                let threshold = pivot_tolerance * scale;
                let u = lu.u();
                if let Some(k) = (0..size).find(|&k| u[(k, k)].abs() <= threshold) {
                    return Err(NetworkError::numeric(format!(
                        "singular matrix: pivot {} is {:.3e} (threshold {:.3e})",
                        k,
                        u[(k, k)],
                        threshold
                    )));
                }
                Ok(Self {
                    size,
                    decomposition: Decomposition::Lu(lu),
                })
            }
        }
    }

    /// The decomposition in use.
    pub fn kind(&self) -> FactorKind {
        match self.decomposition {
            Decomposition::Empty => FactorKind::Empty,
            Decomposition::Cholesky(_) => FactorKind::Cholesky,
            Decomposition::Lu(_) => FactorKind::Lu,
        }
    }

    /// Dimension of the factored system.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Solve `A x = b` for `x`.
    pub fn solve(&self, b: &DVector<f64>) -> Result<DVector<f64>> {
        if b.len() != self.size {
            return Err(NetworkError::numeric(format!(
                "right-hand side has {} entries, system has {}",
                b.len(),
                self.size
            )));
        }

        let x = match &self.decomposition {
            Decomposition::Empty => DVector::zeros(0),
            Decomposition::Cholesky(chol) => chol.solve(b),
            Decomposition::Lu(lu) => lu
                .solve(b)
                .ok_or_else(|| NetworkError::numeric("LU solve hit a zero pivot"))?,
        };

        if x.iter().any(|v| !v.is_finite()) {
            return Err(NetworkError::numeric("solution contains non-finite values"));
        }
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{dmatrix, dvector};

    #[test]
    fn test_spd_uses_cholesky() {
        // 2x + y = 5
        // x + 3y = 6
        // Solution: x = 1.8, y = 1.4
        let a = dmatrix![2.0, 1.0; 1.0, 3.0];
        let f = Factorization::factor(a, 1e-14).unwrap();
        assert_eq!(f.kind(), FactorKind::Cholesky);

        let x = f.solve(&dvector![5.0, 6.0]).unwrap();
        assert_relative_eq!(x[0], 1.8, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_indefinite_falls_back_to_lu() {
        let a = dmatrix![0.0, 1.0; 1.0, 0.0];
        let f = Factorization::factor(a, 1e-14).unwrap();
        assert_eq!(f.kind(), FactorKind::Lu);

        let x = f.solve(&dvector![2.0, 3.0]).unwrap();
        assert_relative_eq!(x[0], 3.0);
        assert_relative_eq!(x[1], 2.0);
    }

    #[test]
    fn test_singular_matrix() {
        let a = dmatrix![1.0, 2.0; 2.0, 4.0]; // Singular (row 2 = 2 * row 1)
        let result = Factorization::factor(a, 1e-14);
        assert!(matches!(
            result,
            Err(NetworkError::NumericInstability { .. })
        ));
    }

    #[test]
    fn test_empty_system() {
        let f = Factorization::factor(DMatrix::zeros(0, 0), 1e-14).unwrap();
        assert_eq!(f.kind(), FactorKind::Empty);
        assert_eq!(f.solve(&DVector::zeros(0)).unwrap().len(), 0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let f = Factorization::factor(dmatrix![1.0, 0.0; 0.0, 1.0], 1e-14).unwrap();
        assert!(f.solve(&dvector![1.0, 2.0, 3.0]).is_err());
    }
}
