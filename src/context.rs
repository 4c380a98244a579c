//! Session state the GUI shell talks to: the experiment store, the settings
//! and the experiment currently on screen.
use std::path::Path;
use anyhow::{anyhow, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use crate::analysis::{ChannelId, FillSummary, RawSampleSource, ScanProgress};
use crate::experiment::{ChannelSummary, Experiment, ExperimentSummary};
use crate::settings::Settings;
use crate::store::ExperimentStore;
#[derive(Debug, Default)]
pub struct Context {
    pub store: ExperimentStore,
    pub settings: Settings,
    active: Option<String>,
}
impl Context {
    pub fn new(store: ExperimentStore, settings: Settings) -> Self {
        Self {
            store,
            settings,
            active: None,
        }
    }
    /// Make the recording at `path` the active experiment.
    pub fn open_experiment(&mut self, path: &Path) -> Result<&Experiment> {
        let hash = self.store.open(path)?.hash.clone();
        self.active = Some(hash);
        self.active_experiment()
    }
    pub fn active_experiment(&self) -> Result<&Experiment> {
        self.active
            .as_deref()
            .and_then(|hash| self.store.get(hash))
            .ok_or_else(|| anyhow!("no experiment selected"))
    }
    fn active_experiment_mut(&mut self) -> Result<&mut Experiment> {
        let hash = self
            .active
            .as_deref()
            .ok_or_else(|| anyhow!("no experiment selected"))?;
        self.store
            .get_mut(hash)
            .ok_or_else(|| anyhow!("experiment {hash} is not in the store"))
    }
    /// Run a band scan of the active experiment for the current thresholds.
    pub fn calculate_band_distributions<S, F>(&mut self, source: &S, progress: F) -> Result<FillSummary>
    where
        S: RawSampleSource + ?Sized,
        F: FnMut(&ScanProgress),
    {
        let spec = self.settings.threshold_spec();
        let burnin = self.settings.burnin;
        let channels = source.channel_ids();
        let experiment = self.active_experiment_mut()?;
        Ok(experiment
            .band_distribution
            .fill(source, &channels, burnin, &spec, progress))
    }
    pub fn has_band_distribution(&self) -> bool {
        self.active_experiment()
            .map(|exp| exp.has_band_distribution(&self.settings.threshold_spec()))
            .unwrap_or(false)
    }
    pub fn active_channels(&self) -> Option<Vec<ChannelId>> {
        self.active_experiment().ok()?.active_channels()
    }
    /// Up to `random_kdes` active channels drawn at random, ascending.
    pub fn sample_channels<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<ChannelId> {
        let active = self.active_channels().unwrap_or_default();
        let n = self.settings.random_kdes;
        if active.len() <= n + 1 {
            return active;
        }
        let mut picked: Vec<ChannelId> = active.choose_multiple(rng, n).copied().collect();
        picked.sort_unstable();
        picked
    }
    pub fn experiment_summary(&self) -> Result<ExperimentSummary> {
        let spec = self.settings.threshold_spec();
        Ok(self.active_experiment()?.summary(&spec)?)
    }
    pub fn channel_summary(&self, channel: ChannelId) -> Result<ChannelSummary> {
        let spec = self.settings.threshold_spec();
        Ok(self.active_experiment()?.channel_summary(channel, &spec)?)
    }
    pub fn save_store(&self, path: &Path) -> Result<()> {
        self.store.save(path)
    }
}
