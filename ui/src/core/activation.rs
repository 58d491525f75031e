//! Per-region activation values and the input bundle the map is driven from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::format::percent_of;
use super::region::RegionId;

/// Immutable activation snapshot. Every region has a value (missing ⇒ 0); the
/// maximum is derived once so all fills share the same reference.
///
/// Negative inputs are stored as given; validating them is the caller's job.
#[derive(Debug, Clone)]
pub struct ActivationDataset {
    values: [f64; RegionId::COUNT],
    max: f64,
    total: f64,
}

/// Bitwise equality, so a dataset holding NaN still equals itself.
impl PartialEq for ActivationDataset {
    fn eq(&self, other: &Self) -> bool {
        self.max.to_bits() == other.max.to_bits()
            && self.total.to_bits() == other.total.to_bits()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Default for ActivationDataset {
    fn default() -> Self {
        Self::empty()
    }
}

impl ActivationDataset {
    pub fn empty() -> Self {
        Self {
            values: [0.0; RegionId::COUNT],
            max: 0.0,
            total: 0.0,
        }
    }

    pub fn new<I>(entries: I, total: f64) -> Self
    where
        I: IntoIterator<Item = (RegionId, f64)>,
    {
        let mut values = [0.0; RegionId::COUNT];
        for (region, value) in entries {
            values[region.index()] = value;
        }

        let max = values
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold(0.0_f64, f64::max);

        Self { values, max, total }
    }

    /// Build from string-keyed input (`"CHEST"`, `"lower_back"`, ...). Unknown keys are skipped.
    pub fn from_raw(raw: &BTreeMap<String, f64>, total: f64) -> Self {
        let entries = raw.iter().filter_map(|(key, value)| match RegionId::from_key(key) {
            Some(region) => Some((region, *value)),
            None => {
                tracing::warn!(key = %key, "ignoring activation for unknown region");
                None
            }
        });
        Self::new(entries, total)
    }

    pub fn get(&self, region: RegionId) -> f64 {
        self.values[region.index()]
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.max <= 0.0
    }

    /// `value / max * 100`, 0 for non-positive values.
    pub fn relative_percent(&self, region: RegionId) -> f64 {
        percent_of(self.get(region), self.max)
    }

    /// `value / total * 100`, 0 for non-positive values.
    pub fn absolute_percent(&self, region: RegionId) -> f64 {
        percent_of(self.get(region), self.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegionId, f64)> + '_ {
        RegionId::ALL
            .iter()
            .map(move |region| (*region, self.values[region.index()]))
    }
}

/// How activation is measured; decides the unit label and legend precision.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VolumeMode {
    Weight {
        unit: String,
    },
    #[default]
    Sets,
}

impl VolumeMode {
    pub fn weight(unit: impl Into<String>) -> Self {
        VolumeMode::Weight { unit: unit.into() }
    }

    pub fn unit_label(&self) -> &str {
        match self {
            VolumeMode::Weight { unit } => unit.as_str(),
            VolumeMode::Sets => "sets",
        }
    }

    pub fn legend_decimals(&self) -> usize {
        match self {
            VolumeMode::Weight { .. } => 1,
            VolumeMode::Sets => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeType {
    Weight,
    #[default]
    #[serde(other)]
    Sets,
}

/// JSON-facing input bundle for one map render.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivationInput {
    #[serde(default)]
    pub muscle_activation: BTreeMap<String, f64>,
    #[serde(default)]
    pub volume_type: VolumeType,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub total_volume: f64,
}

impl ActivationInput {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn dataset(&self) -> ActivationDataset {
        ActivationDataset::from_raw(&self.muscle_activation, self.total_volume)
    }

    /// The unit string only applies in weight mode.
    pub fn mode(&self) -> VolumeMode {
        match self.volume_type {
            VolumeType::Weight => VolumeMode::weight(self.unit.clone()),
            VolumeType::Sets => VolumeMode::Sets,
        }
    }
}
