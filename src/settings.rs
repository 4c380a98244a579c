//! User settings, stored as JSON next to the experiment store.
use std::path::Path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use crate::analysis::{Threshold, ThresholdSpec};
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Samples skipped at the start of every channel.
    pub burnin: usize,
    pub min_event_band: Threshold,
    pub max_event_band: Threshold,
    /// Grid size for density plots, passed through to the host.
    pub kde_resolution: usize,
    /// Number of channels drawn for the random overview plot.
    pub random_kdes: usize,
    pub scale_in_seconds: bool,
    pub plot_event_bands: bool,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            burnin: 350_000,
            min_event_band: Threshold::RelativeToBaseline(0.27),
            max_event_band: Threshold::RelativeToBaseline(0.48),
            kde_resolution: 1_000_000,
            random_kdes: 5,
            scale_in_seconds: false,
            plot_event_bands: true,
        }
    }
}
impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::from_str(&content)
    }
    pub fn from_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse settings")
    }
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))
    }
    pub fn threshold_spec(&self) -> ThresholdSpec {
        ThresholdSpec::new(self.min_event_band, self.max_event_band)
    }
}
