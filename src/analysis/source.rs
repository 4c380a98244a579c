use ndarray::{Array2, Axis};
use crate::analysis::{AnalysisError, ChannelId, SourceError};
/// Number of channels on a MinION bulk recording.
pub const BULK_CHANNEL_COUNT: usize = 126;
/// Anything that can hand out the raw current trace (pA) of one channel.
///
/// Opening and closing the underlying file is the implementor's business; the
/// analysis code only ever asks for one channel at a time.
pub trait RawSampleSource {
    fn channel_ids(&self) -> Vec<ChannelId>;
    fn sample_rate_hz(&self) -> f32;
    fn raw_samples(&self, channel: ChannelId) -> Result<Vec<f32>, SourceError>;
}
/// Read a channel and cut off the burn-in, mapping source failures to
/// [`AnalysisError::UnreadableChannel`].
pub fn read_trimmed<S: RawSampleSource + ?Sized>(
    source: &S,
    channel: ChannelId,
    burnin: usize,
) -> Result<Vec<f32>, AnalysisError> {
    let mut samples = source.raw_samples(channel)?;
    if burnin >= samples.len() {
        samples.clear();
    } else {
        samples.drain(..burnin);
    }
    Ok(samples)
}
/// Decoded recording held in memory (channels x samples), channel ids start at 1.
#[derive(Clone, Debug)]
pub struct MemoryRecording {
    sample_rate_hz: f32,
    samples: Array2<f32>,
}
impl MemoryRecording {
    pub fn new(sample_rate_hz: f32, samples: Array2<f32>) -> Self {
        Self {
            sample_rate_hz,
            samples,
        }
    }
    /// Build from per-channel vectors; shorter channels are padded with zeros.
    pub fn from_channels(sample_rate_hz: f32, channels: Vec<Vec<f32>>) -> Self {
        let n_samples = channels.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut samples = Array2::zeros((channels.len(), n_samples));
        for (mut row, channel) in samples.axis_iter_mut(Axis(0)).zip(&channels) {
            for (dst, src) in row.iter_mut().zip(channel) {
                *dst = *src;
            }
        }
        Self::new(sample_rate_hz, samples)
    }
    pub fn num_channels(&self) -> usize {
        self.samples.nrows()
    }
}
impl RawSampleSource for MemoryRecording {
    fn channel_ids(&self) -> Vec<ChannelId> {
        (1..=self.num_channels() as ChannelId).collect()
    }
    fn sample_rate_hz(&self) -> f32 {
        self.sample_rate_hz
    }
    fn raw_samples(&self, channel: ChannelId) -> Result<Vec<f32>, SourceError> {
        let row = (channel as usize)
            .checked_sub(1)
            .filter(|idx| *idx < self.num_channels())
            .ok_or(SourceError::UnknownChannel(channel))?;
        Ok(self.samples.row(row).to_vec())
    }
}
