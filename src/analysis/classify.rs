use serde::{Deserialize, Serialize};
use crate::analysis::thresholds::ResolvedThresholds;
use crate::analysis::AnalysisError;
/// Half width (pA) of the band around the baseline.
pub const BASELINE_HALF_WIDTH: i32 = 30;
/// Samples within this distance (pA) of zero count as zeros.
pub const ZERO_LIMIT: f32 = 5.0;
/// Below this (pA) a sample is a heavy outlier.
pub const HEAVY_LOW_LIMIT: f32 = -100.0;
/// Upper end (pA) of the outlier-high band.
pub const HEAVY_HIGH_LIMIT: f32 = 350.0;
/// Per-band sample counts of one trace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandCounts {
    pub outlier_low: u64,
    pub outlier_high: u64,
    pub outlier_heavy: u64,
    pub zero: u64,
    pub event: u64,
    pub baseline: u64,
}
impl BandCounts {
    pub fn total(&self) -> u64 {
        self.outlier_low
            + self.outlier_high
            + self.outlier_heavy
            + self.zero
            + self.event
            + self.baseline
    }
    /// Fraction of samples in the band selected by `kind`.
    ///
    /// Zeros and heavy outliers are measured against every counted sample,
    /// events and baseline only against the samples that are neither.
    pub fn density(&self, kind: DensityKind) -> Result<f64, AnalysisError> {
        let run_length = self.total();
        let length = run_length - self.zero - self.outlier_heavy;
        let (count, denominator) = match kind {
            DensityKind::Outlier => (self.outlier_heavy, run_length),
            DensityKind::Zeroes => (self.zero, run_length),
            DensityKind::Events => (self.event, length),
            DensityKind::Baseline => (self.baseline, length),
        };
        if denominator == 0 {
            return Err(AnalysisError::InsufficientData(
                "no samples left to compute a band density",
            ));
        }
        Ok(count as f64 / denominator as f64)
    }
}
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DensityKind {
    #[default]
    Events,
    Baseline,
    Zeroes,
    Outlier,
}
/// Count the samples of `trace[burnin..]` falling into each band.
///
/// Every band is counted on its own; event and baseline windows may overlap
/// the fixed outlier and zero windows, in which case a sample is counted more
/// than once and samples between the windows are not counted at all.
pub fn classify(
    trace: &[f32],
    burnin: usize,
    thresholds: ResolvedThresholds,
    baseline: i32,
) -> BandCounts {
    let trace = trace.get(burnin..).unwrap_or(&[]);
    let (event_low, event_high) = (thresholds.low, thresholds.high);
    let base_low = f64::from(baseline - BASELINE_HALF_WIDTH);
    let base_high = f64::from(baseline + BASELINE_HALF_WIDTH);
    let heavy_high = base_high.max(f64::from(HEAVY_HIGH_LIMIT));
    let mut counts = BandCounts::default();
    for &sample in trace {
        let x = f64::from(sample);
        if sample > HEAVY_LOW_LIMIT && sample < -ZERO_LIMIT {
            counts.outlier_low += 1;
        }
        if (-ZERO_LIMIT..=ZERO_LIMIT).contains(&sample) {
            counts.zero += 1;
        }
        if x > event_low && x < event_high {
            counts.event += 1;
        }
        if x >= base_low && x <= base_high {
            counts.baseline += 1;
        }
        if x > base_high && x < f64::from(HEAVY_HIGH_LIMIT) {
            counts.outlier_high += 1;
        }
        if sample <= HEAVY_LOW_LIMIT || x >= heavy_high {
            counts.outlier_heavy += 1;
        }
    }
    counts
}
