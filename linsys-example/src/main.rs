use std::{error::Error, fs, process};

use linsys_core::ops::{norm_inf, residual};
use linsys_lsolver::{
    algorithms::classify, DenseMatrix, LinearSystemSolver, LinsysError, SolveAlgorithm,
    SolveMethod, SolverConfig,
};
use serde::Deserialize;

/// A linear system as read from a JSON file.
#[derive(Debug, Deserialize)]
struct SystemFile {
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
    #[serde(default)]
    config: SolverConfig,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let outcome = match args.len() {
        1 => solve_reference_systems(),
        2 => solve_file(&args[1]),
        _ => {
            eprintln!("Usage: {} [path_to_system.json]", args[0]);
            process::exit(2);
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn solve_reference_systems() -> Result<(), Box<dyn Error>> {
    let a1 = DenseMatrix::from_rows(&[
        [1.0, -1.0, 3.0, 2.0],
        [-1.0, 5.0, -5.0, -2.0],
        [3.0, -5.0, 19.0, 3.0],
        [2.0, -2.0, 3.0, 21.0],
    ])?;
    let b1 = [15.0, -35.0, 94.0, 1.0];

    let a2 = DenseMatrix::from_rows(&[
        [4.0, 1.0, 4.0, 0.0],
        [2.0, 2.0, 3.0, 2.0],
        [4.0, 3.0, 6.0, 3.0],
        [0.0, 2.0, 3.0, 9.0],
    ])?;
    let b2 = [20.0, 36.0, 60.0, 122.0];

    let solver = LinearSystemSolver::new();

    println!("Solving first system (A1x = b1)...");
    report(&solver, &a1, &b1)?;

    println!("\n{}\n", "=".repeat(50));

    println!("Solving second system (A2x = b2)...");
    report(&solver, &a2, &b2)?;
    Ok(())
}

fn solve_file(path: &str) -> Result<(), Box<dyn Error>> {
    log::info!("Reading system from {}", path);
    let content = fs::read_to_string(path)?;
    let system: SystemFile = serde_json::from_str(&content)?;
    let a = DenseMatrix::from_rows(&system.a)?;

    let solver = LinearSystemSolver::with_config(system.config);
    report(&solver, &a, &system.b)?;
    Ok(())
}

fn report(
    solver: &LinearSystemSolver,
    a: &DenseMatrix<f64>,
    b: &[f64],
) -> Result<(), Box<dyn Error>> {
    match factor_and_solve(solver, a, b) {
        Ok((method, x)) => {
            println!("Using {} decomposition.", method);
            println!("\nSolution vector (x):");
            println!("{:?}", x);
            let r = residual(a, &x, b)?;
            println!("Residual ||Ax - b||_inf = {:.3e}", norm_inf(&r));
            Ok(())
        }
        Err(e) => {
            println!("Could not solve the system: {}", describe(&e));
            Err(e.into())
        }
    }
}

/// Validates, classifies and factors `a` once, then solves for `b`.
fn factor_and_solve(
    solver: &LinearSystemSolver,
    a: &DenseMatrix<f64>,
    b: &[f64],
) -> Result<(SolveMethod, Vec<f64>), LinsysError> {
    solver.validate_inputs(a, b)?;
    let symmetric = classify::is_symmetric(a, solver.config.symmetry_tolerance);
    let factorization = solver.factor(a);
    let uses_cholesky =
        matches!(&factorization, Ok(f) if f.method() == SolveMethod::Cholesky);
    println!("{}", matrix_summary(symmetric, uses_cholesky));

    let factorization = factorization?;
    let x = factorization.solve(b)?;
    Ok((factorization.method(), x))
}

/// The positive definiteness probe only runs on symmetric matrices, so nothing
/// is claimed about it otherwise.
fn matrix_summary(symmetric: bool, positive_definite: bool) -> &'static str {
    match (symmetric, positive_definite) {
        (false, _) => "Matrix is not symmetric.",
        (true, true) => "Matrix is symmetric and positive definite.",
        (true, false) => "Matrix is symmetric but not positive definite.",
    }
}

/// Longer explanation for the solver errors a user can act on.
fn describe(e: &LinsysError) -> String {
    match e {
        LinsysError::ZeroPivot { .. } => format!(
            "{} (the matrix needs row exchanges or is singular; try \"general_method\": \"partial_pivot_lu\")",
            e
        ),
        LinsysError::Overflow { .. } => format!(
            "{} (a tiny pivot blew up the factors; try \"general_method\": \"partial_pivot_lu\")",
            e
        ),
        LinsysError::DimensionMismatch { expected, found } => format!(
            "b has {} entries but A has {} rows",
            found, expected
        ),
        other => other.to_string(),
    }
}
