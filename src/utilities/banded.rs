use crate::utilities::errors::SmoothError;

pub const BANDWIDTH: usize = 2;

// Lower-band storage: pb[d * n + row] = P[row, row - d], d in 0..=BANDWIDTH.
pub fn second_diff_band(n: usize) -> Vec<f64> {
    let k = BANDWIDTH;
    let mut pb = vec![0.0f64; (k + 1) * n];
    if n < 3 {
        return pb;
    }
    let a = [1.0f64, -2.0, 1.0];
    for i in 0..(n - 2) {
        for p in 0..=k {
            for q in 0..=p {
                pb[(p - q) * n + (i + p)] += a[p] * a[q];
            }
        }
    }
    pb
}

pub fn solve_banded(
    pb: &[f64],
    n: usize,
    w: &[f64],
    y: &[f64],
    lambda: f64,
) -> Result<Vec<f64>, SmoothError> {
    let k = BANDWIDTH;
    let mut lb = vec![0.0f64; (k + 1) * n];
    let mut rhs = vec![0.0f64; n];
    for i in 0..n {
        rhs[i] = w[i] * y[i];
    }

    for i in 0..n {
        let mut diag = w[i] + lambda * pb[i];
        let tmax = i.min(k);
        for t in 1..=tmax {
            let v = lb[t * n + i];
            diag -= v * v;
        }
        if !(diag > 0.0 && diag.is_finite()) {
            return Err(SmoothError::NotPositiveDefinite { index: i });
        }
        let lii = diag.sqrt();
        lb[i] = lii;

        let rmax = (n - 1 - i).min(k);
        for r in 1..=rmax {
            let mut num = lambda * pb[r * n + (i + r)];
            let tmax2 = tmax.min(k - r);
            for t in 1..=tmax2 {
                num -= lb[(r + t) * n + (i + r)] * lb[t * n + i];
            }
            lb[r * n + (i + r)] = num / lii;
        }
    }

    for i in 0..n {
        rhs[i] /= lb[i];
        let rmax = (n - 1 - i).min(k);
        for r in 1..=rmax {
            rhs[i + r] -= lb[r * n + (i + r)] * rhs[i];
        }
    }
    for ii in 0..n {
        let i = n - 1 - ii;
        rhs[i] /= lb[i];
        let rmax = i.min(k);
        for r in 1..=rmax {
            rhs[i - r] -= lb[r * n + i] * rhs[i];
        }
    }

    Ok(rhs)
}
