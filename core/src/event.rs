//! The pet event log.
//!
//! RULE: Every state change the service persists is also recorded here.
//! Variants are append-only; stored payloads must stay readable.

use crate::{
    action::PetAction,
    types::{OwnerId, PetId, Stat},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PetEvent {
    PetAdopted {
        pet_id:   PetId,
        owner_id: OwnerId,
        name:     String,
        species:  String,
    },
    /// A record without `last_tick_at` was stamped for the first time.
    FirstTouch {
        pet_id: PetId,
    },
    Ticked {
        pet_id:          PetId,
        minutes_applied: i64,
        fullness:        Stat,
        happiness:       Stat,
        energy:          Stat,
    },
    ActionApplied {
        pet_id:    PetId,
        action:    PetAction,
        fullness:  Stat,
        happiness: Stat,
        energy:    Stat,
    },
    PetDeleted {
        pet_id: PetId,
    },
    /// Caller-supplied edits written through `save_pet`.
    PetEdited {
        pet_id:    PetId,
        name:      String,
        level:     u32,
        fullness:  Stat,
        happiness: Stat,
        energy:    Stat,
    },
}

impl PetEvent {
    pub fn pet_id(&self) -> &str {
        match self {
            Self::PetAdopted { pet_id, .. }
            | Self::FirstTouch { pet_id }
            | Self::Ticked { pet_id, .. }
            | Self::ActionApplied { pet_id, .. }
            | Self::PetDeleted { pet_id }
            | Self::PetEdited { pet_id, .. } => pet_id,
        }
    }

    /// Stable name for the event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::PetAdopted { .. }    => "pet_adopted",
            Self::FirstTouch { .. }    => "first_touch",
            Self::Ticked { .. }        => "ticked",
            Self::ActionApplied { .. } => "action_applied",
            Self::PetDeleted { .. }    => "pet_deleted",
            Self::PetEdited { .. }     => "pet_edited",
        }
    }
}

/// One row of the event_log table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:          Option<i64>,
    pub pet_id:      PetId,
    pub recorded_at: DateTime<Utc>,
    pub event_type:  String,
    pub payload:     String,
}

impl EventLogEntry {
    pub fn from_event(event: &PetEvent, recorded_at: DateTime<Utc>) -> serde_json::Result<Self> {
        Ok(Self {
            id:          None,
            pet_id:      event.pet_id().to_string(),
            recorded_at,
            event_type:  event.type_name().to_string(),
            payload:     serde_json::to_string(event)?,
        })
    }

    pub fn decode(&self) -> serde_json::Result<PetEvent> {
        serde_json::from_str(&self.payload)
    }
}
