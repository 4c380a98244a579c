use std::fmt;
use std::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};
use crate::analysis::AnalysisError;
/// One side of an event band: an absolute current or a fraction of the
/// channel's baseline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Threshold {
    /// Current in pA.
    Absolute(f64),
    RelativeToBaseline(f64),
}
impl Threshold {
    pub fn value(&self) -> f64 {
        match *self {
            Threshold::Absolute(v) | Threshold::RelativeToBaseline(v) => v,
        }
    }
    pub fn is_relative(&self) -> bool {
        matches!(self, Threshold::RelativeToBaseline(_))
    }
    fn resolve(&self, baseline: Option<i32>) -> Result<f64, AnalysisError> {
        match *self {
            Threshold::Absolute(current) => Ok(current),
            Threshold::RelativeToBaseline(fraction) => baseline
                .map(|b| fraction * f64::from(b))
                .ok_or_else(|| {
                    AnalysisError::ContractViolation(
                        "baseline-relative threshold needs a baseline".into(),
                    )
                }),
        }
    }
}
/// Which sides of a threshold pair scale with the baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMode {
    None,
    LowerOnly,
    UpperOnly,
    Both,
}
impl fmt::Display for ScalingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ScalingMode::None => "none",
            ScalingMode::LowerOnly => "lower",
            ScalingMode::UpperOnly => "upper",
            ScalingMode::Both => "both",
        };
        f.write_str(tag)
    }
}
/// Lower and upper event band edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSpec {
    pub low: Threshold,
    pub high: Threshold,
}
impl ThresholdSpec {
    pub fn new(low: Threshold, high: Threshold) -> Self {
        Self { low, high }
    }
    pub fn relative(low: f64, high: f64) -> Self {
        Self::new(
            Threshold::RelativeToBaseline(low),
            Threshold::RelativeToBaseline(high),
        )
    }
    pub fn absolute(low: f64, high: f64) -> Self {
        Self::new(Threshold::Absolute(low), Threshold::Absolute(high))
    }
    pub fn scaling_mode(&self) -> ScalingMode {
        match (self.low.is_relative(), self.high.is_relative()) {
            (false, false) => ScalingMode::None,
            (true, false) => ScalingMode::LowerOnly,
            (false, true) => ScalingMode::UpperOnly,
            (true, true) => ScalingMode::Both,
        }
    }
    pub fn band_key(&self) -> BandKey {
        BandKey::new(self.scaling_mode(), self.low.value(), self.high.value())
    }
    /// Turn the pair into absolute currents for a channel with `baseline`.
    ///
    /// Fails with [`AnalysisError::ContractViolation`] when a relative side
    /// has no baseline to scale against, or when the resolved band is empty.
    pub fn resolve(&self, baseline: Option<i32>) -> Result<ResolvedThresholds, AnalysisError> {
        let low = self.low.resolve(baseline)?;
        let high = self.high.resolve(baseline)?;
        if !(low < high) {
            return Err(AnalysisError::ContractViolation(format!(
                "event band [{low}, {high}] is empty for baseline {baseline:?}"
            )));
        }
        Ok(ResolvedThresholds { low, high })
    }
}
/// Event band edges in pA.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedThresholds {
    pub low: f64,
    pub high: f64,
}
/// Cache key of one threshold configuration.
///
/// `low` and `high` are the configured values (fractions or currents), not the
/// resolved ones, so the key is identical for every channel.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BandKey {
    pub scaling: ScalingMode,
    pub low: f64,
    pub high: f64,
}
impl BandKey {
    pub fn new(scaling: ScalingMode, low: f64, high: f64) -> Self {
        Self { scaling, low, high }
    }
    fn bits(&self) -> (ScalingMode, u64, u64) {
        // -0.0 and 0.0 must hash alike
        (
            self.scaling,
            (self.low + 0.0).to_bits(),
            (self.high + 0.0).to_bits(),
        )
    }
}
impl PartialEq for BandKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}
impl Eq for BandKey {}
impl Hash for BandKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}
impl fmt::Display for BandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.scaling, self.low, self.high)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    #[test]
    fn scaling_mode_follows_tags() {
        assert_eq!(ThresholdSpec::absolute(40.0, 100.0).scaling_mode(), ScalingMode::None);
        assert_eq!(ThresholdSpec::relative(0.27, 0.48).scaling_mode(), ScalingMode::Both);
        let lower = ThresholdSpec::new(Threshold::RelativeToBaseline(0.2), Threshold::Absolute(90.0));
        assert_eq!(lower.scaling_mode(), ScalingMode::LowerOnly);
        let upper = ThresholdSpec::new(Threshold::Absolute(20.0), Threshold::RelativeToBaseline(0.5));
        assert_eq!(upper.scaling_mode(), ScalingMode::UpperOnly);
    }
    #[test]
    fn resolves_against_baseline() {
        let both = ThresholdSpec::relative(0.27, 0.48).resolve(Some(200)).unwrap();
        assert!((both.low - 54.0).abs() < 1e-9);
        assert!((both.high - 96.0).abs() < 1e-9);
        let none = ThresholdSpec::absolute(40.0, 100.0).resolve(None).unwrap();
        assert_eq!(none, ResolvedThresholds { low: 40.0, high: 100.0 });
        let lower = ThresholdSpec::new(Threshold::RelativeToBaseline(0.25), Threshold::Absolute(90.0))
            .resolve(Some(200))
            .unwrap();
        assert_eq!(lower, ResolvedThresholds { low: 50.0, high: 90.0 });
        let upper = ThresholdSpec::new(Threshold::Absolute(20.0), Threshold::RelativeToBaseline(0.5))
            .resolve(Some(200))
            .unwrap();
        assert_eq!(upper, ResolvedThresholds { low: 20.0, high: 100.0 });
    }
    #[test]
    fn relative_side_without_baseline_is_a_contract_violation() {
        let err = ThresholdSpec::relative(0.27, 0.48).resolve(None).unwrap_err();
        assert!(matches!(err, AnalysisError::ContractViolation(_)));
    }
    #[test]
    fn empty_band_is_a_contract_violation() {
        let spec = ThresholdSpec::new(Threshold::Absolute(120.0), Threshold::RelativeToBaseline(0.5));
        assert!(matches!(
            spec.resolve(Some(200)),
            Err(AnalysisError::ContractViolation(_))
        ));
    }
    #[test]
    fn band_keys_distinguish_scaling_and_values() {
        let rel = ThresholdSpec::relative(0.27, 0.48).band_key();
        let abs = ThresholdSpec::absolute(0.27, 0.48).band_key();
        assert_ne!(rel, abs);
        let keys: HashSet<BandKey> = [rel, abs, ThresholdSpec::relative(0.27, 0.48).band_key()]
            .into_iter()
            .collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(BandKey::new(ScalingMode::None, -0.0, 1.0), BandKey::new(ScalingMode::None, 0.0, 1.0));
    }
    #[test]
    fn band_key_survives_json() {
        let key = ThresholdSpec::relative(0.27, 0.48).band_key();
        let json = serde_json::to_string(&key).unwrap();
        let back: BandKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, back);
    }
}
