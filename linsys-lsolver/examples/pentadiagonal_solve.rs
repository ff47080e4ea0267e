use linsys_core::ops::{norm_inf, residual};
use linsys_lsolver::{DenseMatrix, LinearSystemSolver, SolveAlgorithm};
use std::time::Instant;

/// Creates a dense pentadiagonal matrix A of size n x n.
/// Diagonals:
/// - Main: 4.0
/// - Adjacent (+1, -1): -1.0
/// - Outer (+2, -2): -0.5
/// With `skew` set, the +1 diagonal becomes -0.75 so A is no longer symmetric.
fn create_pentadiagonal_matrix(n: usize, skew: bool) -> DenseMatrix<f64> {
    let mut a = DenseMatrix::zeros(n, n);
    for i in 0..n {
        a[(i, i)] = 4.0;
        if i >= 1 {
            a[(i, i - 1)] = -1.0;
        }
        if i >= 2 {
            a[(i, i - 2)] = -0.5;
        }
        if i + 1 < n {
            a[(i, i + 1)] = if skew { -0.75 } else { -1.0 };
        }
        if i + 2 < n {
            a[(i, i + 2)] = -0.5;
        }
    }
    a
}

/// Creates a vector b of size n with b[i] = sin(i / n).
fn create_sin_vector(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 / n as f64).sin()).collect()
}

fn main() {
    // Initialize logging based on RUST_LOG environment variable
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let n = 200;
    let b = create_sin_vector(n);
    let solver = LinearSystemSolver::new();

    for skew in [false, true] {
        log::info!(
            "Setting up {}x{} pentadiagonal matrix A (skewed: {}) and sin vector b...",
            n,
            n,
            skew
        );
        let a = create_pentadiagonal_matrix(n, skew);

        let start_time = Instant::now();
        let x_result = solver.solve(&a, &b);
        let duration = start_time.elapsed();

        match x_result {
            Ok(result) => {
                let r = residual(&a, &result.x, &b).expect("dimensions already validated");
                log::info!("Solver finished successfully!");
                log::info!("  Method: {}", result.metadata.method);
                log::info!("  Residual norm: {:.6e}", norm_inf(&r));
                log::info!("  Time elapsed: {:?}", duration);
                log::debug!("Solution vector x (first 10 elements): {:?}", &result.x[..10.min(n)]);
            }
            Err(e) => {
                log::error!("Solver failed: {}", e);
            }
        }
    }
}
