use thiserror::Error;
use crate::analysis::thresholds::BandKey;
use crate::analysis::ChannelId;
/// Failures reported by a raw sample source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("channel {0} is not part of this recording")]
    UnknownChannel(ChannelId),
    #[error("failed to read channel {channel}: {reason}")]
    Read { channel: ChannelId, reason: String },
}
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("channel {channel} is unreadable: {reason}")]
    UnreadableChannel { channel: ChannelId, reason: String },
    #[error("no data: {0}")]
    InsufficientData(&'static str),
    #[error("no band records computed for {0}")]
    CacheMiss(BandKey),
    #[error("threshold contract violated: {0}")]
    ContractViolation(String),
}
impl From<SourceError> for AnalysisError {
    fn from(value: SourceError) -> Self {
        match value {
            SourceError::UnknownChannel(channel) => AnalysisError::UnreadableChannel {
                channel,
                reason: "unknown channel".into(),
            },
            SourceError::Read { channel, reason } => {
                AnalysisError::UnreadableChannel { channel, reason }
            }
        }
    }
}
