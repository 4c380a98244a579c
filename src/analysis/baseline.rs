use crate::analysis::activity::{in_open_pore_range, FLAT_MEAN_LIMIT};
use crate::analysis::stats::{mean, median};
/// Resting current of a channel: the median of all samples inside the
/// open-pore window, truncated to whole pA.
///
/// The estimator does no burn-in trimming of its own; callers pass the trace
/// they classify. Returns `None` for a flat trace or when no sample sits in
/// the open-pore window.
pub fn estimate_baseline(trace: &[f32]) -> Option<i32> {
    let avg = mean(trace)?;
    if avg.abs() <= FLAT_MEAN_LIMIT {
        return None;
    }
    let open_pore: Vec<f64> = trace
        .iter()
        .copied()
        .filter(|&x| in_open_pore_range(x))
        .map(f64::from)
        .collect();
    median(&open_pore).map(|m| m as i32)
}
