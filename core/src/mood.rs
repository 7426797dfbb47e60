//! Mood flags derived from low stats, for display alongside a pet.

use crate::{config::MoodThresholds, pet::PetState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodFlag {
    Hungry,
    Unhappy,
    Sleepy,
}

impl MoodFlag {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Hungry  => "Hungry! Needs a snack",
            Self::Unhappy => "Feeling down... play together",
            Self::Sleepy  => "Sleepy... let them rest",
        }
    }
}

/// Flags in fixed order: hungry, unhappy, sleepy. Thresholds are inclusive.
pub fn mood_for(pet: &PetState, thresholds: &MoodThresholds) -> Vec<MoodFlag> {
    let mut flags = Vec::new();
    if pet.fullness <= thresholds.fullness {
        flags.push(MoodFlag::Hungry);
    }
    if pet.happiness <= thresholds.happiness {
        flags.push(MoodFlag::Unhappy);
    }
    if pet.energy <= thresholds.energy {
        flags.push(MoodFlag::Sleepy);
    }
    flags
}
