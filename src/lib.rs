// src/lib.rs
//! Band statistics for nanopore bulk recordings.
//!
//! A raw current trace per channel is checked for activity, reduced to a
//! baseline and counted into current bands; the counts are memoized per
//! threshold configuration on the [`Experiment`] and summarized across all
//! channels with MAD-filtered statistics.
pub mod analysis;
pub mod context;
pub mod experiment;
pub mod naming;
pub mod series;
pub mod settings;
pub mod store;
pub use analysis::{
    AnalysisError, BandCounts, BandDistribution, BandKey, ChannelId, MemoryRecording,
    RawSampleSource, ScalingMode, ScanProgress, SourceError, Threshold, ThresholdSpec,
};
pub use context::Context;
pub use experiment::{ChannelSummary, Experiment, ExperimentSummary};
pub use naming::{parse_experiment_name, ExperimentProperties};
pub use series::{raw_series, SeriesData};
pub use settings::Settings;
pub use store::{content_hash, file_hash, ExperimentStore};
