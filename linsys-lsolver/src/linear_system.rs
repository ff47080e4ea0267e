use linsys_core::{DenseMatrix, LinsysError, LowerTriangular, Matrix, Result, Scalar, UpperTriangular};
use log::{debug, trace, warn};

use crate::algorithms::{
    cholesky, classify, doolittle,
    partial_pivot_lu::{self, PivotedLu},
    residual_norm, DirectSolveMetadata, SolveAlgorithm, SolveMethod, SolveResult,
};
use crate::config::{GeneralMethod, SolverConfig};

/// Progress of a single solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SolveStage {
    Unclassified,
    Classified,
    Factored,
    Solved,
    Failed,
}

/// Triangular factors produced for one coefficient matrix.
///
/// Can be reused to solve for several right-hand sides.
#[derive(Debug, Clone, PartialEq)]
pub enum Factorization<T: Scalar> {
    /// `A = L L^T`
    Cholesky(LowerTriangular<T>),
    /// `A = L U`, `L` unit lower triangular
    Doolittle {
        l: LowerTriangular<T>,
        u: UpperTriangular<T>,
    },
    /// `P A = L U`
    PartialPivotLu(PivotedLu<T>),
}

impl<T: Scalar> Factorization<T> {
    pub fn method(&self) -> SolveMethod {
        match self {
            Factorization::Cholesky(_) => SolveMethod::Cholesky,
            Factorization::Doolittle { .. } => SolveMethod::Doolittle,
            Factorization::PartialPivotLu(_) => SolveMethod::PartialPivotLu,
        }
    }

    /// Runs the two triangular solves for right-hand side `b`.
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>> {
        match self {
            Factorization::Cholesky(l) => cholesky::solve_factored(l, b),
            Factorization::Doolittle { l, u } => doolittle::solve_factored(l, u, b),
            Factorization::PartialPivotLu(lu) => lu.solve(b),
        }
    }
}

/// Solves dense systems, picking Cholesky for symmetric positive definite
/// matrices and an LU factorization otherwise.
#[derive(Debug, Clone, Default)]
pub struct LinearSystemSolver {
    pub config: SolverConfig,
}

impl LinearSystemSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Classifies `a` and factors it along the chosen path.
    ///
    /// Non-square input fails with `NotSquareMatrix`. Finiteness is only checked
    /// by [`SolveAlgorithm::validate_inputs`] on the full solve path.
    pub fn factor<T: Scalar>(&self, a: &DenseMatrix<T>) -> Result<Factorization<T>> {
        let mut stage = SolveStage::Unclassified;
        self.factor_tracked(a, &mut stage)
    }

    fn factor_tracked<T: Scalar>(
        &self,
        a: &DenseMatrix<T>,
        stage: &mut SolveStage,
    ) -> Result<Factorization<T>> {
        let classification = classify::classify(a, self.config.symmetry_tolerance);
        advance(stage, SolveStage::Classified);
        debug!(
            "classified {}x{} matrix: symmetric={}, positive_definite={}",
            a.rows(),
            a.cols(),
            classification.symmetric,
            classification.is_positive_definite()
        );

        let factorization = if classification.is_spd() {
            debug!("using Cholesky factorization");
            if self.config.symmetry_tolerance > 0.0 && !classify::is_symmetric(a, 0.0) {
                warn!(
                    "matrix is symmetric only within tolerance {}; solving with its mirrored lower triangle",
                    self.config.symmetry_tolerance
                );
            }
            let l = match (self.config.reuse_probe_factor, classification.cholesky_factor) {
                (true, Some(l)) => l,
                _ => cholesky::factor(a).map_err(|e| match e {
                    LinsysError::NotPositiveDefinite { column, pivot } => {
                        warn!(
                            "classifier reported SPD but Cholesky failed at column {}",
                            column
                        );
                        LinsysError::InconsistentClassification { column, pivot }
                    }
                    other => other,
                })?,
            };
            Factorization::Cholesky(l)
        } else {
            match self.config.general_method {
                GeneralMethod::Doolittle => {
                    debug!("using Doolittle LU factorization");
                    let (l, u) = doolittle::factor(a)?;
                    Factorization::Doolittle { l, u }
                }
                GeneralMethod::PartialPivotLu => {
                    debug!("using LU factorization with partial pivoting");
                    Factorization::PartialPivotLu(partial_pivot_lu::factor(a)?)
                }
            }
        };
        advance(stage, SolveStage::Factored);
        Ok(factorization)
    }

    fn solve_tracked<T: Scalar>(
        &self,
        a: &DenseMatrix<T>,
        b: &[T],
        stage: &mut SolveStage,
    ) -> Result<SolveResult<T, DirectSolveMetadata>> {
        self.validate_inputs(a, b)?;
        let factorization = self.factor_tracked(a, stage)?;
        let x = factorization.solve(b)?;
        let residual_norm = residual_norm(self.config.compute_residual, a, &x, b)?;
        advance(stage, SolveStage::Solved);

        Ok(SolveResult {
            x,
            metadata: DirectSolveMetadata {
                method: factorization.method(),
                residual_norm,
            },
        })
    }
}

fn advance(stage: &mut SolveStage, next: SolveStage) {
    trace!("solve stage {:?} -> {:?}", stage, next);
    *stage = next;
}

impl<T: Scalar> SolveAlgorithm<DenseMatrix<T>> for LinearSystemSolver {
    type Metadata = DirectSolveMetadata;

    fn solve(&self, a: &DenseMatrix<T>, b: &[T]) -> Result<SolveResult<T, Self::Metadata>> {
        let mut stage = SolveStage::Unclassified;
        self.solve_tracked(a, b, &mut stage).map_err(|e| {
            debug!("solve failed during stage {:?}: {}", stage, e);
            advance(&mut stage, SolveStage::Failed);
            e
        })
    }
}
