//! Built-in duration presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::record::SectionDurations;

/// Named duration layouts for common speech lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// One minute: 15 s per section
    #[default]
    Default,
    /// Ninety seconds, weighted towards reason and example
    Extended,
    /// Two minutes: 30 s per section
    Long,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Default, Preset::Extended, Preset::Long];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Extended => "extended",
            Preset::Long => "long",
        }
    }

    pub fn durations(&self) -> SectionDurations {
        match self {
            Preset::Default => SectionDurations::uniform(15),
            Preset::Extended => SectionDurations {
                point: 20,
                reason: 25,
                example: 25,
                summary: 20,
            },
            Preset::Long => SectionDurations::uniform(30),
        }
    }

    pub fn total_seconds(&self) -> u32 {
        self.durations().total()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown preset '{}' (expected default, extended or long)", s))
    }
}
