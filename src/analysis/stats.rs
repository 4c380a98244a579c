//! Whole-experiment statistics over a band distribution.
//!
//! Channels are filtered on their baseline with a median-absolute-deviation
//! cut; the event-density statistics reuse the channels that survived that
//! cut instead of filtering densities separately.
use std::collections::BTreeMap;
use crate::analysis::cache::BandDistribution;
use crate::analysis::classify::DensityKind;
use crate::analysis::thresholds::BandKey;
use crate::analysis::{AnalysisError, ChannelId};
/// Channels at or beyond this many MADs from the median baseline are dropped.
pub const MAD_CUTOFF: f64 = 3.0;
pub fn mean<T: Copy + Into<f64>>(values: &[T]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|&v| Into::<f64>::into(v)).sum();
    Some(sum / values.len() as f64)
}
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values
        .iter()
        .map(|v| {
            let delta = v - avg;
            delta * delta
        })
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.sqrt())
}
/// Round half to even at `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}
/// Mean and population standard deviation of a set of per-channel values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spread {
    pub mean: f64,
    pub std_dev: f64,
}
impl Spread {
    fn of(values: &[f64], mean_decimals: i32, std_decimals: i32) -> Result<Self, AnalysisError> {
        let (Some(avg), Some(sd)) = (mean(values), std_dev(values)) else {
            return Err(AnalysisError::InsufficientData(
                "no channel left after outlier filtering",
            ));
        };
        Ok(Self {
            mean: round_to(avg, mean_decimals),
            std_dev: round_to(sd, std_decimals),
        })
    }
}
/// Channels kept after MAD filtering on their baseline. A zero MAD keeps
/// nothing.
fn retained_baselines(baselines: &BTreeMap<ChannelId, i32>) -> BTreeMap<ChannelId, i32> {
    let values: Vec<f64> = baselines.values().map(|&b| f64::from(b)).collect();
    let Some(center) = median(&values) else {
        return BTreeMap::new();
    };
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    let mad = median(&deviations).unwrap_or(0.0);
    baselines
        .iter()
        .filter(|(_, b)| (f64::from(**b) - center).abs() < MAD_CUTOFF * mad)
        .map(|(&c, &b)| (c, b))
        .collect()
}
fn baselines_for(
    distribution: &BandDistribution,
    key: &BandKey,
    filter_outliers: bool,
) -> Result<BTreeMap<ChannelId, i32>, AnalysisError> {
    let baselines: BTreeMap<ChannelId, i32> = distribution
        .records_for(key)
        .map(|(channel, record)| (channel, record.baseline))
        .collect();
    if baselines.is_empty() {
        return Err(AnalysisError::CacheMiss(*key));
    }
    Ok(if filter_outliers {
        retained_baselines(&baselines)
    } else {
        baselines
    })
}
/// Mean baseline (2 decimals) and its spread (3 decimals) across channels.
pub fn mean_baseline(
    distribution: &BandDistribution,
    key: &BandKey,
    filter_outliers: bool,
) -> Result<Spread, AnalysisError> {
    let baselines = baselines_for(distribution, key, filter_outliers)?;
    let values: Vec<f64> = baselines.values().map(|&b| f64::from(b)).collect();
    Spread::of(&values, 2, 3)
}
/// Mean event density (4 decimals) and its spread (3 decimals) across channels.
pub fn mean_event_density(
    distribution: &BandDistribution,
    key: &BandKey,
    filter_outliers: bool,
) -> Result<Spread, AnalysisError> {
    let retained = baselines_for(distribution, key, filter_outliers)?;
    let densities = distribution
        .records_for(key)
        .filter(|(channel, _)| retained.contains_key(channel))
        .map(|(_, record)| record.counts.density(DensityKind::Events))
        .collect::<Result<Vec<f64>, _>>()?;
    Spread::of(&densities, 4, 3)
}
