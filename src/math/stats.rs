//! An empty window yields NaN, and a NaN sample inside a window propagates.

pub fn window_max(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut best = f64::NEG_INFINITY;
    for &v in values {
        if v.is_nan() {
            return f64::NAN;
        }
        if v > best {
            best = v;
        }
    }
    best
}

pub fn window_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = values.iter().sum();
    sum / values.len() as f64
}

/// `num / den`, NaN when the denominator is zero.
pub fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        f64::NAN
    } else {
        num as f64 / den as f64
    }
}
