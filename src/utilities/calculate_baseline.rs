use rayon::{ThreadPoolBuilder, prelude::*};

use crate::utilities::asls::{AslsOptions, asls};
use crate::utilities::errors::SmoothError;
use crate::utilities::utilities::{first_non_finite, min_max};

pub fn calculate_baseline(y: &[f64], options: AslsOptions) -> Result<Vec<f64>, SmoothError> {
    let n = y.len();
    if n < 3 {
        return Err(SmoothError::TooFewPoints { got: n, min: 3 });
    }
    if let Some(index) = first_non_finite(y) {
        return Err(SmoothError::NonFiniteInput { index });
    }

    let (min, max) = min_max(y);
    let shift = if min < 0.0 { -min } else { 0.0 };
    // all-zero (or constant non-positive) column: nothing to fit
    if max + shift == 0.0 {
        return Ok(vec![0.0; n]);
    }

    if shift > 0.0 {
        let lifted: Vec<f64> = y.iter().map(|&v| v + shift).collect();
        let mut baseline = asls(&lifted, options)?;
        for b in baseline.iter_mut() {
            *b -= shift;
        }
        Ok(baseline)
    } else {
        asls(y, options)
    }
}

pub fn calculate_baseline_batch(
    columns: &[Vec<f64>],
    options: AslsOptions,
    cores: usize,
) -> Result<Vec<Vec<f64>>, SmoothError> {
    if columns.is_empty() {
        return Ok(Vec::new());
    }
    let expected = columns[0].len();
    for (index, col) in columns.iter().enumerate() {
        if col.len() != expected {
            return Err(SmoothError::ColumnLengthMismatch {
                index,
                got: col.len(),
                expected,
            });
        }
    }

    if cores <= 1 || columns.len() < 2 {
        return batch_serial(columns, options);
    }
    match ThreadPoolBuilder::new().num_threads(cores).build() {
        Ok(pool) => pool.install(|| {
            columns
                .par_iter()
                .map(|col| calculate_baseline(col, options))
                .collect()
        }),
        Err(_) => batch_serial(columns, options),
    }
}

fn batch_serial(
    columns: &[Vec<f64>],
    options: AslsOptions,
) -> Result<Vec<Vec<f64>>, SmoothError> {
    let mut out = Vec::with_capacity(columns.len());
    for col in columns {
        out.push(calculate_baseline(col, options)?);
    }
    Ok(out)
}
