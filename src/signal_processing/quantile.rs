/// Percentile of a collection with linear interpolation between ranks.
///
/// The rank is `fraction * (n - 1)` over a sorted copy; fractional ranks
/// interpolate linearly between the two neighbouring order statistics.
/// Non-finite values are dropped before ranking. Returns `None` when no
/// finite values remain.
pub fn percentile(values: &[f64], fraction: f64) -> Option<f64> {
    let mut v: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let rank = fraction.clamp(0.0, 1.0) * (v.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;

    if lo == hi {
        Some(v[lo])
    } else {
        let t = rank - lo as f64;
        Some(v[lo] + t * (v[hi] - v[lo]))
    }
}

/// 75th percentile, the cut-level base used by both counters.
pub fn upper_quartile(values: &[f64]) -> Option<f64> {
    percentile(values, 0.75)
}
