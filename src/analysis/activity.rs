use log::warn;
use crate::analysis::source::{read_trimmed, RawSampleSource};
use crate::analysis::stats::mean;
use crate::analysis::{AnalysisError, ChannelId};
/// Open-pore current window (pA, both ends exclusive).
pub const OPEN_PORE_MIN: f32 = 150.0;
pub const OPEN_PORE_MAX: f32 = 350.0;
/// A flat channel sits within this distance (pA) of zero on average.
pub const FLAT_MEAN_LIMIT: f64 = 1.0;
pub(crate) fn in_open_pore_range(x: f32) -> bool {
    x > OPEN_PORE_MIN && x < OPEN_PORE_MAX
}
/// Whether `trace[burnin..]` looks like a running experiment: the mean is not
/// flat and at least one sample sits in the open-pore window.
pub fn is_active(trace: &[f32], burnin: usize) -> bool {
    let trace = trace.get(burnin..).unwrap_or(&[]);
    let Some(avg) = mean(trace) else {
        return false;
    };
    avg.abs() > FLAT_MEAN_LIMIT && trace.iter().any(|&x| in_open_pore_range(x))
}
/// Outcome of probing one channel of a recording.
#[derive(Debug)]
pub enum ChannelProbe {
    /// Burn-in trimmed trace of an active channel.
    Active(Vec<f32>),
    Inactive,
    /// The source could not deliver samples; treated like an inactive channel.
    Unreadable(AnalysisError),
}
impl ChannelProbe {
    pub fn is_active(&self) -> bool {
        matches!(self, ChannelProbe::Active(_))
    }
}
/// Read one channel and run activity detection on it. Read failures are
/// logged and reported as [`ChannelProbe::Unreadable`], never raised.
pub fn probe_channel<S: RawSampleSource + ?Sized>(
    source: &S,
    channel: ChannelId,
    burnin: usize,
) -> ChannelProbe {
    match read_trimmed(source, channel, burnin) {
        Ok(trace) if is_active(&trace, 0) => ChannelProbe::Active(trace),
        Ok(_) => ChannelProbe::Inactive,
        Err(err) => {
            warn!("treating channel {channel} as inactive: {err}");
            ChannelProbe::Unreadable(err)
        }
    }
}
