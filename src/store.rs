//! Persisted experiments, keyed by the content hash of their recording.
use std::collections::BTreeMap;
use std::path::Path;
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use crate::experiment::Experiment;
use crate::naming::parse_experiment_name;
/// Hex encoded SHA-256 digest of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
/// Hex encoded SHA-256 digest of the file at `path`, read in chunks.
pub fn file_hash(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open recording: {}", path.display()))?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)
        .with_context(|| format!("Failed to read recording: {}", path.display()))?;
    Ok(format!("{:x}", hasher.finalize()))
}
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentStore {
    experiments: BTreeMap<String, Experiment>,
}
impl ExperimentStore {
    /// Load a saved store; a missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read experiment store: {}", path.display()))?;
        let store: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse experiment store: {}", path.display()))?;
        info!("loaded {} experiments from {}", store.len(), path.display());
        Ok(store)
    }
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self).context("Failed to serialize experiment store")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write experiment store: {}", path.display()))?;
        info!("saved {} experiments to {}", self.len(), path.display());
        Ok(())
    }
    pub fn len(&self) -> usize {
        self.experiments.len()
    }
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
    pub fn get(&self, hash: &str) -> Option<&Experiment> {
        self.experiments.get(hash)
    }
    pub fn get_mut(&mut self, hash: &str) -> Option<&mut Experiment> {
        self.experiments.get_mut(hash)
    }
    pub fn experiments(&self) -> impl Iterator<Item = &Experiment> {
        self.experiments.values()
    }
    /// Register `experiment` unless its hash is already known; returns the stored one.
    pub fn insert(&mut self, experiment: Experiment) -> &mut Experiment {
        self.experiments
            .entry(experiment.hash.clone())
            .or_insert(experiment)
    }
    /// Hash the recording at `path` and return its experiment, creating a
    /// fresh one from the file name when the contents are new.
    pub fn open(&mut self, path: &Path) -> Result<&mut Experiment> {
        let hash = file_hash(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let properties = parse_experiment_name(&name);
        Ok(self.insert(Experiment::new(name, path, hash, properties)))
    }
}
