//! Tunable settings for adoption and mood flags.
//!
//! Decay rates and caps are deliberately absent: they live as constants
//! in tick.rs.

use crate::{
    error::{PetError, PetResult},
    types::{Stat, STAT_MAX, STAT_MIN},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdoptionConfig {
    pub level:           u32,
    pub fullness:        Stat,
    pub happiness:       Stat,
    pub energy:          Stat,
    pub min_name_length: usize,
    pub max_name_length: usize,
}

impl Default for AdoptionConfig {
    fn default() -> Self {
        Self {
            level:           1,
            fullness:        100,
            happiness:       100,
            energy:          100,
            min_name_length: 2,
            max_name_length: 50,
        }
    }
}

/// A stat at or below its threshold raises the matching mood flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodThresholds {
    pub fullness:  Stat,
    pub happiness: Stat,
    pub energy:    Stat,
}

impl Default for MoodThresholds {
    fn default() -> Self {
        Self { fullness: 30, happiness: 30, energy: 30 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    pub adoption: AdoptionConfig,
    pub mood:     MoodThresholds,
}

impl PetConfig {
    /// Load from a JSON file. Missing sections fall back to defaults.
    /// In tests, use PetConfig::default().
    pub fn load(path: &str) -> PetResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> PetResult<Self> {
        let config: PetConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PetResult<()> {
        let a = &self.adoption;
        if a.level < 1 {
            return Err(invalid("adoption.level must be >= 1".into()));
        }
        for (label, value) in [
            ("adoption.fullness", a.fullness),
            ("adoption.happiness", a.happiness),
            ("adoption.energy", a.energy),
            ("mood.fullness", self.mood.fullness),
            ("mood.happiness", self.mood.happiness),
            ("mood.energy", self.mood.energy),
        ] {
            if !(STAT_MIN..=STAT_MAX).contains(&value) {
                return Err(invalid(format!("{label}={value} is outside [0, 100]")));
            }
        }
        if a.min_name_length == 0 || a.min_name_length > a.max_name_length {
            return Err(invalid(format!(
                "name length bounds {}..={} are not a valid range",
                a.min_name_length, a.max_name_length
            )));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> PetError {
    PetError::InvalidConfig { reason }
}
