use crate::utilities::banded::{second_diff_band, solve_banded};
use crate::utilities::errors::SmoothError;
use crate::utilities::utilities::first_non_finite;

#[derive(Clone, Copy, Debug)]
pub struct AslsOptions {
    pub smoothness: Option<f64>,
    pub asymmetry: Option<f64>,
    pub max_iterations: Option<usize>,
    pub tolerance: Option<f64>,
}

impl Default for AslsOptions {
    fn default() -> Self {
        Self {
            smoothness: Some(1e6),
            asymmetry: Some(1e-6),
            max_iterations: Some(10),
            tolerance: None,
        }
    }
}

pub fn asls(y: &[f64], options: AslsOptions) -> Result<Vec<f64>, SmoothError> {
    let n = y.len();
    if n < 3 {
        return Err(SmoothError::TooFewPoints { got: n, min: 3 });
    }
    if let Some(index) = first_non_finite(y) {
        return Err(SmoothError::NonFiniteInput { index });
    }

    let defaults = AslsOptions::default();
    let lambda = options
        .smoothness
        .unwrap_or(defaults.smoothness.unwrap_or(1e6));
    let asymmetry = options
        .asymmetry
        .unwrap_or(defaults.asymmetry.unwrap_or(1e-6));
    let max_iterations = options
        .max_iterations
        .unwrap_or(defaults.max_iterations.unwrap_or(10));
    let tolerance = options.tolerance;

    if !lambda.is_finite() || lambda <= 0.0 {
        return Err(SmoothError::InvalidSmoothness(lambda));
    }
    if !asymmetry.is_finite() {
        return Err(SmoothError::InvalidAsymmetry(asymmetry));
    }
    // p >= 1 would invert the weighting
    let p = if asymmetry >= 1.0 { 0.99 } else { asymmetry };

    let pb = second_diff_band(n);
    let mut w = vec![1.0f64; n];
    let mut baseline = vec![0.0f64; n];

    for _ in 0..max_iterations {
        let b = solve_banded(&pb, n, &w, y, lambda)?;
        for i in 0..n {
            w[i] = if y[i] > b[i] {
                p
            } else if y[i] < b[i] {
                1.0 - p
            } else {
                0.0
            };
        }
        let done = match tolerance {
            Some(tol) => {
                let mut delta = 0.0f64;
                for i in 0..n {
                    let d = (b[i] - baseline[i]).abs();
                    if d > delta {
                        delta = d;
                    }
                }
                delta < tol
            }
            None => false,
        };
        baseline = b;
        if done {
            break;
        }
    }

    Ok(baseline)
}
