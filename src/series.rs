//! Plot-ready data for the raw "squiggle" view. Drawing is left to the host.
use crate::analysis::{AnalysisError, ChannelId, RawSampleSource};
use crate::experiment::Experiment;
use crate::settings::Settings;
/// Samples shown in the initial x range of a raw plot.
pub const RAW_VIEW_SAMPLES: f64 = 100_000.0;
/// Initial current range (pA) of a raw plot.
pub const RAW_VIEW_CURRENT: (f64, f64) = (-20.0, 350.0);
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesData {
    pub title: String,
    pub x_label: String,
    pub x_lims: (f64, f64),
    pub y_label: String,
    pub y_lims: (f64, f64),
    pub x: Vec<f64>,
    pub y: Vec<f32>,
    /// Horizontal marker lines, empty when disabled or not yet computed.
    pub h_lines: Vec<f64>,
}
/// Full raw trace of `channel`, optionally in seconds, with the channel's
/// event and baseline bands as marker lines.
pub fn raw_series<S: RawSampleSource + ?Sized>(
    source: &S,
    channel: ChannelId,
    experiment: &Experiment,
    settings: &Settings,
) -> Result<SeriesData, AnalysisError> {
    let y = source.raw_samples(channel)?;
    let (x_scale, x_label) = if settings.scale_in_seconds {
        (f64::from(source.sample_rate_hz()), "time [s]")
    } else {
        (1.0, "index")
    };
    let x = (0..y.len()).map(|i| i as f64 / x_scale).collect();
    let h_lines = if settings.plot_event_bands {
        experiment
            .event_bands(channel, &settings.threshold_spec())
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    Ok(SeriesData {
        title: format!("{}\nChannel {channel}", experiment.name),
        x_label: x_label.into(),
        x_lims: (0.0, RAW_VIEW_SAMPLES / x_scale),
        y_label: "current [pA]".into(),
        y_lims: RAW_VIEW_CURRENT,
        x,
        y,
        h_lines,
    })
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{BandCounts, ChannelBandRecord, MemoryRecording};
    fn setup() -> (MemoryRecording, Experiment, Settings) {
        let rec = MemoryRecording::from_channels(4000.0, vec![vec![0.0, 200.0, 210.0, 60.0]]);
        let settings = Settings::default();
        let mut exp = Experiment::new("run", "run.fast5", "h", Default::default());
        exp.band_distribution.insert(
            1,
            settings.threshold_spec().band_key(),
            ChannelBandRecord { baseline: 200, counts: BandCounts::default() },
        );
        (rec, exp, settings)
    }
    #[test]
    fn index_axis_with_event_bands() {
        let (rec, exp, settings) = setup();
        let series = raw_series(&rec, 1, &exp, &settings).unwrap();
        assert_eq!(series.title, "run\nChannel 1");
        assert_eq!(series.x, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(series.x_lims, (0.0, 100_000.0));
        assert_eq!(series.h_lines.len(), 4);
        assert_eq!(series.h_lines[2..], [170.0, 230.0]);
    }
    #[test]
    fn seconds_axis_without_bands() {
        let (rec, exp, mut settings) = setup();
        settings.scale_in_seconds = true;
        settings.plot_event_bands = false;
        let series = raw_series(&rec, 1, &exp, &settings).unwrap();
        assert_eq!(series.x_label, "time [s]");
        assert_eq!(series.x[2], 2.0 / 4000.0);
        assert_eq!(series.x_lims, (0.0, 25.0));
        assert!(series.h_lines.is_empty());
    }
    #[test]
    fn unknown_channel_is_unreadable() {
        let (rec, exp, settings) = setup();
        assert!(matches!(
            raw_series(&rec, 2, &exp, &settings),
            Err(AnalysisError::UnreadableChannel { channel: 2, .. })
        ));
    }
}
