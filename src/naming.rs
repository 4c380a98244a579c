//! Experiment metadata guessed from recording file names.
//!
//! Names look like `ochratoxin_05mikromolar_hplc_run1.fast5`: a concentration
//! with a unit token somewhere, plus free-form flags.
use log::warn;
use serde::{Deserialize, Serialize};
/// Unit tokens and their factor to nanomolar.
const UNITS: [(&str, f64); 3] = [("mikro", 1000.0), ("nm", 1.0), ("nano", 1.0)];
const SPECIAL_RUN_MARKERS: [&str; 5] = ["glycerol", "polya", "150mv", "denatured", "strepdavidin"];
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentProperties {
    /// Analyte concentration in nM; `None` when the name carries none.
    pub concentration: Option<u64>,
    pub buffer: bool,
    pub hplc: bool,
    pub special_run: bool,
}
impl ExperimentProperties {
    /// Concentration as a float, NaN when unknown.
    pub fn concentration_or_nan(&self) -> f64 {
        self.concentration.map_or(f64::NAN, |c| c as f64)
    }
}
pub fn parse_experiment_name(name: &str) -> ExperimentProperties {
    let lower = name.to_lowercase();
    let concentration = parse_concentration(&lower);
    if concentration.is_none() {
        warn!("couldn't determine concentration for {name}");
    }
    let mut props = ExperimentProperties {
        concentration,
        ..Default::default()
    };
    if lower.contains("ochratoxin") {
        return props;
    }
    if lower.contains("buffer") {
        props.buffer = true;
        props.concentration = Some(0);
        return props;
    }
    props.hplc = lower.contains("hplc");
    props.special_run = SPECIAL_RUN_MARKERS.iter().any(|m| lower.contains(m));
    props
}
/// First `<number><unit>` pair in `lower`, scaled to nM.
fn parse_concentration(lower: &str) -> Option<u64> {
    for (pos, _) in lower.char_indices() {
        let Some(scale) = UNITS
            .iter()
            .find(|(unit, _)| lower[pos..].starts_with(unit))
            .map(|(_, scale)| *scale)
        else {
            continue;
        };
        let Some(number) = number_before(&lower[..pos]) else {
            continue;
        };
        let value: f64 = number.parse().ok()?;
        return Some((value * scale) as u64);
    }
    None
}
/// Trailing `digits[.digits]` of `prefix`; a leading zero without a decimal
/// point marks a fraction ("05" is 0.5).
fn number_before(prefix: &str) -> Option<String> {
    let bytes = prefix.as_bytes();
    let mut start = bytes.len();
    let mut seen_dot = false;
    while start > 0 {
        let b = bytes[start - 1];
        if b.is_ascii_digit() {
            start -= 1;
        } else if b == b'.' && !seen_dot {
            seen_dot = true;
            start -= 1;
        } else {
            break;
        }
    }
    let raw = &prefix[start..];
    if !raw.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if !raw.contains('.') && raw.len() > 1 && raw.starts_with('0') {
        return Some(format!("0.{}", &raw[1..]));
    }
    Some(raw.to_owned())
}
