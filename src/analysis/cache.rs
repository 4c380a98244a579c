use std::collections::{BTreeMap, HashMap};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use crate::analysis::activity::{probe_channel, ChannelProbe};
use crate::analysis::baseline::estimate_baseline;
use crate::analysis::classify::{classify, BandCounts};
use crate::analysis::source::RawSampleSource;
use crate::analysis::thresholds::{BandKey, ThresholdSpec};
use crate::analysis::ChannelId;
/// Baseline and band counts of one channel under one threshold configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBandRecord {
    pub baseline: i32,
    pub counts: BandCounts,
}
/// Progress report emitted after every channel of a scan.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanProgress {
    pub channel: ChannelId,
    /// 1-based position of `channel` in the scan.
    pub position: usize,
    pub total: usize,
    pub fraction: f32,
    pub label: String,
}
/// What a single [`BandDistribution::fill`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillSummary {
    pub classified: usize,
    pub cached: usize,
    pub inactive: usize,
    pub unreadable: usize,
    /// Active channels whose resolved event band came out empty.
    pub rejected: usize,
}
/// Memoized band records of one experiment: channel -> band key -> record.
///
/// Slices for different keys live side by side; nothing is ever removed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<StoredBandRecord>", into = "Vec<StoredBandRecord>")]
pub struct BandDistribution {
    channels: BTreeMap<ChannelId, HashMap<BandKey, ChannelBandRecord>>,
}
impl BandDistribution {
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
    /// Channels carrying at least one record, ascending.
    pub fn channels(&self) -> Vec<ChannelId> {
        self.channels.keys().copied().collect()
    }
    /// Whether any channel has been computed for `key`.
    pub fn has_record(&self, key: &BandKey) -> bool {
        self.channels.values().any(|slices| slices.contains_key(key))
    }
    pub fn record(&self, channel: ChannelId, key: &BandKey) -> Option<&ChannelBandRecord> {
        self.channels.get(&channel)?.get(key)
    }
    /// All records stored under `key`, by ascending channel.
    pub fn records_for<'a>(
        &'a self,
        key: &'a BandKey,
    ) -> impl Iterator<Item = (ChannelId, &'a ChannelBandRecord)> + 'a {
        self.channels
            .iter()
            .filter_map(move |(&channel, slices)| slices.get(key).map(|r| (channel, r)))
    }
    pub fn insert(&mut self, channel: ChannelId, key: BandKey, record: ChannelBandRecord) {
        self.channels.entry(channel).or_default().insert(key, record);
    }
    /// Compute records for `spec` on every listed channel that lacks one.
    ///
    /// Inactive and unreadable channels are left out and will be probed again
    /// by the next call. `progress` is invoked once per channel.
    pub fn fill<S, F>(
        &mut self,
        source: &S,
        channels: &[ChannelId],
        burnin: usize,
        spec: &ThresholdSpec,
        mut progress: F,
    ) -> FillSummary
    where
        S: RawSampleSource + ?Sized,
        F: FnMut(&ScanProgress),
    {
        let key = spec.band_key();
        let total = channels.len();
        let mut summary = FillSummary::default();
        for (idx, &channel) in channels.iter().enumerate() {
            if self.record(channel, &key).is_some() {
                summary.cached += 1;
            } else {
                match probe_channel(source, channel, burnin) {
                    ChannelProbe::Active(trace) => {
                        match self.classify_channel(channel, &trace, spec, key) {
                            Some(record) => {
                                debug!(
                                    "channel {channel}: baseline {} counts {:?}",
                                    record.baseline, record.counts
                                );
                                summary.classified += 1;
                            }
                            None => summary.rejected += 1,
                        }
                    }
                    ChannelProbe::Inactive => summary.inactive += 1,
                    ChannelProbe::Unreadable(_) => summary.unreadable += 1,
                }
            }
            let position = idx + 1;
            progress(&ScanProgress {
                channel,
                position,
                total,
                fraction: position as f32 / total as f32,
                label: format!("Checking channel {position}/{total}"),
            });
        }
        info!("band scan for {key}: {summary:?}");
        summary
    }
    fn classify_channel(
        &mut self,
        channel: ChannelId,
        trace: &[f32],
        spec: &ThresholdSpec,
        key: BandKey,
    ) -> Option<ChannelBandRecord> {
        let baseline = estimate_baseline(trace)?;
        let thresholds = match spec.resolve(Some(baseline)) {
            Ok(thresholds) => thresholds,
            Err(err) => {
                warn!("skipping channel {channel}: {err}");
                return None;
            }
        };
        let record = ChannelBandRecord {
            baseline,
            counts: classify(trace, 0, thresholds, baseline),
        };
        self.insert(channel, key, record);
        Some(record)
    }
}
/// Flat on-disk form of one record; JSON maps cannot use [`BandKey`] as a key.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredBandRecord {
    channel: ChannelId,
    key: BandKey,
    baseline: i32,
    counts: BandCounts,
}
impl From<Vec<StoredBandRecord>> for BandDistribution {
    fn from(stored: Vec<StoredBandRecord>) -> Self {
        let mut dist = BandDistribution::default();
        for entry in stored {
            dist.insert(
                entry.channel,
                entry.key,
                ChannelBandRecord {
                    baseline: entry.baseline,
                    counts: entry.counts,
                },
            );
        }
        dist
    }
}
impl From<BandDistribution> for Vec<StoredBandRecord> {
    fn from(dist: BandDistribution) -> Self {
        dist.channels
            .into_iter()
            .flat_map(|(channel, slices)| {
                slices.into_iter().map(move |(key, record)| StoredBandRecord {
                    channel,
                    key,
                    baseline: record.baseline,
                    counts: record.counts,
                })
            })
            .collect()
    }
}
