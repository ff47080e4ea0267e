use serde::{Deserialize, Serialize};

/// Factorization used for matrices that are not symmetric positive definite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneralMethod {
    /// Doolittle LU without pivoting. Fails with `ZeroPivot` on matrices that need row exchanges.
    #[default]
    Doolittle,
    /// LU with partial (row) pivoting.
    PartialPivotLu,
}

/// Settings for [`crate::LinearSystemSolver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Largest `|a_ij - a_ji|` still treated as symmetric. `0.0` means exact equality.
    ///
    /// Cholesky only reads the lower triangle, so a matrix accepted within a
    /// non-zero tolerance is solved as its mirrored lower triangle, not as `A`.
    /// The reported residual shows the difference.
    pub symmetry_tolerance: f64,
    /// Reuse the Cholesky factor computed while classifying instead of factoring again.
    pub reuse_probe_factor: bool,
    pub general_method: GeneralMethod,
    /// Report `||A x - b||_inf` in the solve metadata.
    pub compute_residual: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            symmetry_tolerance: 0.0,
            reuse_probe_factor: true,
            general_method: GeneralMethod::Doolittle,
            compute_residual: true,
        }
    }
}

impl SolverConfig {
    /// Creates a configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with the specified parameters.
    pub fn with_params(
        symmetry_tolerance: f64,
        reuse_probe_factor: bool,
        general_method: GeneralMethod,
        compute_residual: bool,
    ) -> Self {
        Self {
            symmetry_tolerance,
            reuse_probe_factor,
            general_method,
            compute_residual,
        }
    }
}
