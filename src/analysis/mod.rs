// src/analysis/mod.rs
pub mod activity;
pub mod baseline;
pub mod cache;
pub mod classify;
pub mod error;
pub mod source;
pub mod stats;
pub mod thresholds;
/// 1-based channel number on the flow cell.
pub type ChannelId = u16;
pub use activity::{is_active, probe_channel, ChannelProbe};
pub use baseline::estimate_baseline;
pub use cache::{BandDistribution, ChannelBandRecord, FillSummary, ScanProgress};
pub use classify::{classify, BandCounts, DensityKind};
pub use error::{AnalysisError, SourceError};
pub use source::{MemoryRecording, RawSampleSource, BULK_CHANNEL_COUNT};
pub use stats::{mean_baseline, mean_event_density, Spread};
pub use thresholds::{BandKey, ResolvedThresholds, ScalingMode, Threshold, ThresholdSpec};
