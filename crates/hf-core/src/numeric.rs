use crate::{HfError, HfResult};

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> HfResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HfError::NonFinite { what, value: v })
    }
}

/// `count` evenly spaced values from `start` to `end`, both ends included.
///
/// The last value is pinned to `end` so accumulated rounding never leaves the
/// closed interval. A single sample yields `[start]`. For `start <= end` the
/// values never decrease; when the step is below the float resolution at
/// `start`, neighbouring values can be equal.
pub fn linspace(start: Real, end: Real, count: usize) -> Vec<Real> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (count - 1) as Real;
            let mut points: Vec<Real> = (0..count).map(|i| start + i as Real * delta).collect();
            points[count - 1] = end;
            points
        }
    }
}
