use std::cell::RefCell;
use std::collections::HashMap;
use nanotrace::analysis::{mean_baseline, mean_event_density};
use nanotrace::{
    AnalysisError, BandDistribution, ChannelId, Context, MemoryRecording, RawSampleSource,
    Settings, SourceError, ThresholdSpec,
};
/// Wraps a recording and counts how often each channel is read.
struct CountingSource {
    inner: MemoryRecording,
    broken: Vec<ChannelId>,
    reads: RefCell<HashMap<ChannelId, usize>>,
}
impl CountingSource {
    fn new(inner: MemoryRecording) -> Self {
        Self {
            inner,
            broken: Vec::new(),
            reads: RefCell::new(HashMap::new()),
        }
    }
    fn total_reads(&self) -> usize {
        self.reads.borrow().values().sum()
    }
}
impl RawSampleSource for CountingSource {
    fn channel_ids(&self) -> Vec<ChannelId> {
        self.inner.channel_ids()
    }
    fn sample_rate_hz(&self) -> f32 {
        self.inner.sample_rate_hz()
    }
    fn raw_samples(&self, channel: ChannelId) -> Result<Vec<f32>, SourceError> {
        *self.reads.borrow_mut().entry(channel).or_default() += 1;
        if self.broken.contains(&channel) {
            return Err(SourceError::Read {
                channel,
                reason: "truncated dataset".into(),
            });
        }
        self.inner.raw_samples(channel)
    }
}
const BURNIN: usize = 10;
/// Transient, then a baseline near `level` with dips to `dip` and a few zeros.
fn active_channel(level: f32, dip: f32) -> Vec<f32> {
    let mut samples = vec![900.0; BURNIN];
    for i in 0..200 {
        samples.push(match i % 10 {
            0 | 1 => dip,
            2 => 0.0,
            _ => level + (i % 3) as f32,
        });
    }
    samples
}
fn recording() -> MemoryRecording {
    MemoryRecording::from_channels(
        4000.0,
        vec![
            active_channel(200.0, 80.0),
            vec![0.0; 210],
            active_channel(205.0, 82.0),
            active_channel(198.0, 79.0),
            active_channel(300.0, 120.0),
            active_channel(202.0, 81.0),
        ],
    )
}
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
#[test]
fn second_fill_does_not_reclassify() {
    init_logging();
    let source = CountingSource::new(recording());
    let spec = ThresholdSpec::relative(0.27, 0.48);
    let channels = source.channel_ids();
    let mut dist = BandDistribution::default();
    let first = dist.fill(&source, &channels, BURNIN, &spec, |_| {});
    assert_eq!(first.classified, 5);
    assert_eq!(first.inactive, 1);
    assert_eq!(source.total_reads(), 6);
    let snapshot = dist.clone();
    let second = dist.fill(&source, &channels, BURNIN, &spec, |_| {});
    assert_eq!(second.classified, 0);
    assert_eq!(second.cached, 5);
    assert_eq!(dist, snapshot);
    // only the inactive channel is probed again
    assert_eq!(source.total_reads(), 7);
    assert_eq!(source.reads.borrow()[&2], 2);
}
#[test]
fn unreadable_channel_does_not_abort_the_scan() {
    init_logging();
    let mut source = CountingSource::new(recording());
    source.broken.push(3);
    let spec = ThresholdSpec::absolute(40.0, 100.0);
    let mut dist = BandDistribution::default();
    let mut labels = Vec::new();
    let summary = dist.fill(&source, &source.channel_ids(), BURNIN, &spec, |p| {
        labels.push(p.label.clone())
    });
    assert_eq!(summary.unreadable, 1);
    assert_eq!(summary.classified, 4);
    assert_eq!(dist.channels(), vec![1, 4, 5, 6]);
    assert_eq!(labels.first().map(String::as_str), Some("Checking channel 1/6"));
    assert_eq!(labels.len(), 6);
}
#[test]
fn partition_holds_for_adjacent_windows() {
    let source = recording();
    let spec = ThresholdSpec::absolute(5.0, 170.0);
    let mut dist = BandDistribution::default();
    dist.fill(&source, &[1], BURNIN, &spec, |_| {});
    let record = dist.record(1, &spec.band_key()).unwrap();
    assert_eq!(record.baseline, 201);
    assert_eq!(record.counts.total(), 200);
    assert_eq!(record.counts.event, 40);
    assert_eq!(record.counts.zero, 20);
    assert_eq!(record.counts.baseline, 140);
}
#[test]
fn statistics_drop_the_odd_channel() {
    let source = recording();
    let spec = ThresholdSpec::relative(0.27, 0.48);
    let key = spec.band_key();
    let mut dist = BandDistribution::default();
    dist.fill(&source, &source.channel_ids(), BURNIN, &spec, |_| {});
    let baseline = mean_baseline(&dist, &key, true).unwrap();
    assert_eq!(baseline.mean, 202.25);
    let density = mean_event_density(&dist, &key, true).unwrap();
    assert_eq!(density.mean, 0.2222);
    assert_eq!(density.std_dev, 0.0);
    let unfiltered = mean_baseline(&dist, &key, false).unwrap();
    assert_eq!(unfiltered.mean, 222.0);
    assert!(matches!(
        mean_baseline(&dist, &ThresholdSpec::absolute(1.0, 2.0).band_key(), true),
        Err(AnalysisError::CacheMiss(_))
    ));
}
#[test]
fn session_round_trip_through_the_store() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let recording_path = dir.path().join("ochratoxin_05mikro_run2.fast5");
    std::fs::write(&recording_path, b"bulk fast5 bytes").unwrap();
    let store_path = dir.path().join("experiments.json");
    let settings = Settings {
        burnin: BURNIN,
        ..Default::default()
    };
    let mut ctx = Context::new(Default::default(), settings.clone());
    ctx.open_experiment(&recording_path).unwrap();
    assert!(!ctx.has_band_distribution());
    let mut last_fraction = 0.0;
    ctx.calculate_band_distributions(&recording(), |p| last_fraction = p.fraction)
        .unwrap();
    assert_eq!(last_fraction, 1.0);
    assert_eq!(ctx.active_channels(), Some(vec![1, 3, 4, 5, 6]));
    let summary = ctx.experiment_summary().unwrap();
    assert_eq!(summary.active_channels, 5);
    assert_eq!(summary.concentration, Some(500));
    ctx.save_store(&store_path).unwrap();
    let mut reloaded = Context::new(nanotrace::ExperimentStore::load(&store_path).unwrap(), settings);
    reloaded.open_experiment(&recording_path).unwrap();
    assert!(reloaded.has_band_distribution());
    assert_eq!(reloaded.experiment_summary().unwrap(), summary);
}
