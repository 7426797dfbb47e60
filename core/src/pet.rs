//! The pet record — the only entity the core works on.

use crate::{
    error::{PetError, PetResult},
    types::{clamp_stat, OwnerId, PetId, Stat, STAT_MAX, STAT_MIN},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    pub id:           PetId,
    pub name:         String,
    pub species:      String,
    pub level:        u32,
    /// Older records call this field "hunger".
    #[serde(alias = "hunger")]
    pub fullness:     Stat,
    pub happiness:    Stat,
    pub energy:       Stat,
    /// Last instant decay was applied. None until the first tick.
    #[serde(default)]
    pub last_tick_at: Option<DateTime<Utc>>,
    pub owner_id:     OwnerId,
}

impl PetState {
    /// Clamp all three stats into [0, 100] in place.
    pub fn clamp_stats(&mut self) {
        self.fullness = clamp_stat(self.fullness);
        self.happiness = clamp_stat(self.happiness);
        self.energy = clamp_stat(self.energy);
    }

    /// True when the three stats match another record's, ignoring
    /// identity fields and the timestamp.
    pub fn same_stats(&self, other: &PetState) -> bool {
        self.fullness == other.fullness
            && self.happiness == other.happiness
            && self.energy == other.energy
    }

    /// Check the record invariants. Used when reading records back from
    /// a store, never on the tick/action path.
    pub fn validate(&self) -> PetResult<()> {
        for (label, value) in [
            ("fullness", self.fullness),
            ("happiness", self.happiness),
            ("energy", self.energy),
        ] {
            if !(STAT_MIN..=STAT_MAX).contains(&value) {
                return Err(PetError::InvalidRecord {
                    reason: format!("pet {} has {label}={value}, outside [0, 100]", self.id),
                });
            }
        }
        if self.level < 1 {
            return Err(PetError::InvalidRecord {
                reason: format!("pet {} has level 0", self.id),
            });
        }
        Ok(())
    }
}
