use std::fmt;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::analysis::classify::BASELINE_HALF_WIDTH;
use crate::analysis::stats::round_to;
use crate::analysis::{
    mean_baseline, mean_event_density, AnalysisError, BandDistribution, ChannelId, DensityKind,
    Spread, ThresholdSpec,
};
use crate::naming::ExperimentProperties;
/// Zero densities above this mark a channel as noisy.
pub const NOISY_ZEROES_DENSITY: f64 = 0.1;
/// One recording together with everything computed for it so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub name: String,
    pub path: PathBuf,
    /// SHA-256 of the file contents, hex encoded.
    pub hash: String,
    pub properties: ExperimentProperties,
    #[serde(default)]
    pub band_distribution: BandDistribution,
}
/// Per-channel figures for the channel info panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelSummary {
    pub channel: ChannelId,
    pub baseline: i32,
    pub event_density: f64,
    pub baseline_density: f64,
    pub zeroes_density: f64,
    pub noisy: bool,
}
/// Experiment-wide figures; spreads are reported as `(mean, 2 * sd)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentSummary {
    pub active_channels: usize,
    pub event_density: (f64, f64),
    pub baseline: (f64, f64),
    pub concentration: Option<u64>,
}
impl Experiment {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        hash: impl Into<String>,
        properties: ExperimentProperties,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            hash: hash.into(),
            properties,
            band_distribution: BandDistribution::default(),
        }
    }
    /// `None` until a band scan has found at least one active channel.
    pub fn active_channels(&self) -> Option<Vec<ChannelId>> {
        if self.band_distribution.is_empty() {
            None
        } else {
            Some(self.band_distribution.channels())
        }
    }
    pub fn has_band_distribution(&self, spec: &ThresholdSpec) -> bool {
        self.band_distribution.has_record(&spec.band_key())
    }
    pub fn mean_baselines(&self, spec: &ThresholdSpec, filter_mad: bool) -> Result<Spread, AnalysisError> {
        mean_baseline(&self.band_distribution, &spec.band_key(), filter_mad)
    }
    pub fn mean_events(&self, spec: &ThresholdSpec, filter_mad: bool) -> Result<Spread, AnalysisError> {
        mean_event_density(&self.band_distribution, &spec.band_key(), filter_mad)
    }
    pub fn channel_summary(
        &self,
        channel: ChannelId,
        spec: &ThresholdSpec,
    ) -> Result<ChannelSummary, AnalysisError> {
        let key = spec.band_key();
        let record = self
            .band_distribution
            .record(channel, &key)
            .ok_or(AnalysisError::CacheMiss(key))?;
        let density = |kind| record.counts.density(kind).map(|d| round_to(d, 4));
        let zeroes_density = density(DensityKind::Zeroes)?;
        Ok(ChannelSummary {
            channel,
            baseline: record.baseline,
            event_density: density(DensityKind::Events)?,
            baseline_density: density(DensityKind::Baseline)?,
            zeroes_density,
            noisy: zeroes_density > NOISY_ZEROES_DENSITY,
        })
    }
    /// Marker lines for the raw plot: event band edges, then baseline band edges.
    pub fn event_bands(
        &self,
        channel: ChannelId,
        spec: &ThresholdSpec,
    ) -> Result<Vec<f64>, AnalysisError> {
        let key = spec.band_key();
        let record = self
            .band_distribution
            .record(channel, &key)
            .ok_or(AnalysisError::CacheMiss(key))?;
        let events = spec.resolve(Some(record.baseline))?;
        Ok(vec![
            events.low,
            events.high,
            f64::from(record.baseline - BASELINE_HALF_WIDTH),
            f64::from(record.baseline + BASELINE_HALF_WIDTH),
        ])
    }
    pub fn summary(&self, spec: &ThresholdSpec) -> Result<ExperimentSummary, AnalysisError> {
        let events = self.mean_events(spec, true)?;
        let baseline = self.mean_baselines(spec, true)?;
        Ok(ExperimentSummary {
            active_channels: self.active_channels().map_or(0, |c| c.len()),
            event_density: (events.mean, 2.0 * events.std_dev),
            baseline: (baseline.mean, 2.0 * baseline.std_dev),
            concentration: self.properties.concentration,
        })
    }
}
impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Path: {}", self.path.display())?;
        writeln!(f, "Hash: {}", self.hash)?;
        write!(f, "Props: {:?}", self.properties)
    }
}
