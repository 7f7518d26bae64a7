//! Bracketed root-finding used by the radiative-balance solvers.
//!
//! The objectives here are expensive (each evaluation may run a full
//! multilayer integration), so the routines take fallible closures and give
//! every search an explicit iteration budget instead of looping until
//! convergence.

use thiserror::Error;

/// Failure modes shared by the root-finding routines.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("no sign change over [{lower}, {upper}] after {expansions} bracket expansions")]
    BracketNotFound {
        lower: f64,
        upper: f64,
        expansions: usize,
    },
    #[error("root search did not converge within {max_iterations} iterations")]
    NoConvergence { max_iterations: usize },
}

/// Tuning knobs for a Brent search.
#[derive(Debug, Clone)]
pub struct BrentConfig {
    /// Absolute tolerance on the root abscissa.
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for BrentConfig {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-3,
            max_iterations: 100,
        }
    }
}

/// Brent's method over the bracket `[a, b]`.
///
/// The objective may fail; its error type must be able to absorb
/// [`SolverError`] so bracket and budget failures propagate through the same
/// channel.
pub fn brent<F, E>(mut f: F, a: f64, b: f64, config: &BrentConfig) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    let fa = f(a)?;
    let fb = f(b)?;
    brent_bracketed(f, (a, fa), (b, fb), config)
}

/// Brent's method starting from `[lower, upper]`, doubling `upper` until the
/// objective changes sign. Gives up after `max_expansions` doublings.
pub fn brent_expanding<F, E>(
    mut f: F,
    lower: f64,
    mut upper: f64,
    config: &BrentConfig,
    max_expansions: usize,
) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    let f_lower = f(lower)?;
    let mut expansions = 0;
    loop {
        let f_upper = f(upper)?;
        if f_lower * f_upper <= 0.0 {
            return brent_bracketed(f, (lower, f_lower), (upper, f_upper), config);
        }
        if expansions >= max_expansions {
            return Err(SolverError::BracketNotFound {
                lower,
                upper,
                expansions,
            }
            .into());
        }
        upper *= 2.0;
        expansions += 1;
    }
}

fn brent_bracketed<F, E>(
    mut f: F,
    (mut a, mut fa): (f64, f64),
    (mut b, mut fb): (f64, f64),
    config: &BrentConfig,
) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    if fa * fb > 0.0 {
        return Err(SolverError::BracketNotFound {
            lower: a,
            upper: b,
            expansions: 0,
        }
        .into());
    }
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut bisected = true;

    for _ in 0..config.max_iterations {
        if fb == 0.0 || (b - a).abs() < config.tolerance {
            return Ok(b);
        }

        let mut s = if fa != fc && fb != fc {
            // inverse quadratic interpolation
            a * fb * fc / ((fa - fb) * (fa - fc))
                + b * fa * fc / ((fb - fa) * (fb - fc))
                + c * fa * fb / ((fc - fa) * (fc - fb))
        } else {
            // secant step
            b - fb * (b - a) / (fb - fa)
        };

        let midpoint = (3.0 * a + b) / 4.0;
        let in_bounds = (midpoint < s && s < b) || (b < s && s < midpoint);
        let step_too_large = if bisected {
            (s - b).abs() >= (b - c).abs() / 2.0 || (b - c).abs() < config.tolerance
        } else {
            (s - b).abs() >= (c - d).abs() / 2.0 || (c - d).abs() < config.tolerance
        };
        if !in_bounds || step_too_large {
            s = 0.5 * (a + b);
            bisected = true;
        } else {
            bisected = false;
        }

        let fs = f(s)?;
        d = c;
        c = b;
        fc = fb;
        if fa * fs < 0.0 {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
    }

    Err(SolverError::NoConvergence {
        max_iterations: config.max_iterations,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight() -> BrentConfig {
        BrentConfig {
            tolerance: 1.0e-10,
            max_iterations: 100,
        }
    }

    #[test]
    fn finds_quadratic_root() {
        let root: f64 =
            brent::<_, SolverError>(|x| Ok(x * x - 4.0), 0.0, 5.0, &tight()).expect("root");
        assert!((root - 2.0).abs() < 1e-8);
    }

    #[test]
    fn rejects_bracket_without_sign_change() {
        let err = brent::<_, SolverError>(|x| Ok(x * x + 1.0), -1.0, 1.0, &tight()).unwrap_err();
        assert!(matches!(err, SolverError::BracketNotFound { .. }));
    }

    #[test]
    fn expanding_bracket_reaches_distant_root() {
        let root: f64 =
            brent_expanding::<_, SolverError>(|x| Ok(x - 100.0), 1.0, 2.0, &tight(), 10)
                .expect("root");
        assert!((root - 100.0).abs() < 1e-6);
    }

    #[test]
    fn expansion_budget_is_enforced() {
        let err = brent_expanding::<_, SolverError>(|x| Ok(x - 1.0e9), 1.0, 2.0, &tight(), 3)
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::BracketNotFound { expansions: 3, .. }
        ));
    }

    #[test]
    fn objective_errors_pass_through() {
        #[derive(Debug)]
        enum TestError {
            Objective,
            Solver(SolverError),
        }
        impl From<SolverError> for TestError {
            fn from(e: SolverError) -> Self {
                TestError::Solver(e)
            }
        }
        let err = brent(|_| Err::<f64, _>(TestError::Objective), 0.0, 1.0, &tight()).unwrap_err();
        assert!(matches!(err, TestError::Objective));
    }
}
