//! Anatomical region catalogue shared by the dataset, the binder and the outline asset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of muscle regions a visual surface can address.
///
/// The wire form (serde, `as_str`) is the upper-case identifier; surfaces address
/// regions by the lower-cased [`RegionId::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionId {
    Abductors,
    Abs,
    Adductors,
    Biceps,
    Calves,
    Chest,
    Forearm,
    Glutes,
    Hamstrings,
    Hips,
    Lats,
    LowerBack,
    Neck,
    Obliques,
    Quads,
    Shoulders,
    Traps,
    Triceps,
}

impl RegionId {
    pub const COUNT: usize = 18;

    pub const ALL: [RegionId; Self::COUNT] = [
        RegionId::Abductors,
        RegionId::Abs,
        RegionId::Adductors,
        RegionId::Biceps,
        RegionId::Calves,
        RegionId::Chest,
        RegionId::Forearm,
        RegionId::Glutes,
        RegionId::Hamstrings,
        RegionId::Hips,
        RegionId::Lats,
        RegionId::LowerBack,
        RegionId::Neck,
        RegionId::Obliques,
        RegionId::Quads,
        RegionId::Shoulders,
        RegionId::Traps,
        RegionId::Triceps,
    ];

    /// Position in [`RegionId::ALL`]; used for dense per-region storage.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RegionId::Abductors => "ABDUCTORS",
            RegionId::Abs => "ABS",
            RegionId::Adductors => "ADDUCTORS",
            RegionId::Biceps => "BICEPS",
            RegionId::Calves => "CALVES",
            RegionId::Chest => "CHEST",
            RegionId::Forearm => "FOREARM",
            RegionId::Glutes => "GLUTES",
            RegionId::Hamstrings => "HAMSTRINGS",
            RegionId::Hips => "HIPS",
            RegionId::Lats => "LATS",
            RegionId::LowerBack => "LOWER_BACK",
            RegionId::Neck => "NECK",
            RegionId::Obliques => "OBLIQUES",
            RegionId::Quads => "QUADS",
            RegionId::Shoulders => "SHOULDERS",
            RegionId::Traps => "TRAPS",
            RegionId::Triceps => "TRICEPS",
        }
    }

    /// Lower-cased identifier used as the class/style key on a surface.
    pub fn key(self) -> &'static str {
        match self {
            RegionId::Abductors => "abductors",
            RegionId::Abs => "abs",
            RegionId::Adductors => "adductors",
            RegionId::Biceps => "biceps",
            RegionId::Calves => "calves",
            RegionId::Chest => "chest",
            RegionId::Forearm => "forearm",
            RegionId::Glutes => "glutes",
            RegionId::Hamstrings => "hamstrings",
            RegionId::Hips => "hips",
            RegionId::Lats => "lats",
            RegionId::LowerBack => "lower_back",
            RegionId::Neck => "neck",
            RegionId::Obliques => "obliques",
            RegionId::Quads => "quads",
            RegionId::Shoulders => "shoulders",
            RegionId::Traps => "traps",
            RegionId::Triceps => "triceps",
        }
    }

    /// Human label shown in tooltips and selection read-outs.
    pub fn display_name(self) -> &'static str {
        match self {
            RegionId::Abductors => "Abductors",
            RegionId::Abs => "Abs",
            RegionId::Adductors => "Adductors",
            RegionId::Biceps => "Biceps",
            RegionId::Calves => "Calves",
            RegionId::Chest => "Chest",
            RegionId::Forearm => "Forearm",
            RegionId::Glutes => "Glutes",
            RegionId::Hamstrings => "Hamstrings",
            RegionId::Hips => "Hips",
            RegionId::Lats => "Lats",
            RegionId::LowerBack => "Lower Back",
            RegionId::Neck => "Neck",
            RegionId::Obliques => "Obliques",
            RegionId::Quads => "Quads",
            RegionId::Shoulders => "Shoulders",
            RegionId::Traps => "Traps",
            RegionId::Triceps => "Triceps",
        }
    }

    /// Case-insensitive lookup by wire name or surface key.
    pub fn from_key(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|region| region.as_str().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown muscle region `{0}`")]
pub struct UnknownRegion(pub String);

impl FromStr for RegionId {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownRegion(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_is_ordered_by_index() {
        for (position, region) in RegionId::ALL.iter().enumerate() {
            assert_eq!(region.index(), position);
        }
    }

    #[test]
    fn key_is_lowercased_wire_name() {
        for region in RegionId::ALL {
            assert_eq!(region.key(), region.as_str().to_ascii_lowercase());
        }
    }

    #[test]
    fn parses_both_cases() {
        assert_eq!("LOWER_BACK".parse::<RegionId>(), Ok(RegionId::LowerBack));
        assert_eq!("lower_back".parse::<RegionId>(), Ok(RegionId::LowerBack));
        assert!("elbow".parse::<RegionId>().is_err());
    }

    #[test]
    fn serde_uses_wire_name() {
        let json = serde_json::to_string(&RegionId::LowerBack).unwrap();
        assert_eq!(json, "\"LOWER_BACK\"");
        let back: RegionId = serde_json::from_str("\"TRAPS\"").unwrap();
        assert_eq!(back, RegionId::Traps);
    }
}
