//! Player actions: feed, play, rest.
//!
//! Every action ticks first so decay is captured together with the
//! action, then applies a fixed delta and clamps.

use crate::{
    error::PetError,
    pet::PetState,
    tick::{tick, TickOutcome},
    types::Stat,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetAction {
    Feed,
    Play,
    Rest,
}

/// Fixed stat change applied by one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDelta {
    pub fullness:  Stat,
    pub happiness: Stat,
    pub energy:    Stat,
}

impl PetAction {
    pub const ALL: [PetAction; 3] = [PetAction::Feed, PetAction::Play, PetAction::Rest];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Rest => "rest",
        }
    }

    pub fn delta(&self) -> ActionDelta {
        match self {
            Self::Feed => ActionDelta { fullness:  20, happiness:  5, energy:   0 },
            Self::Play => ActionDelta { fullness: -10, happiness: 15, energy: -10 },
            Self::Rest => ActionDelta { fullness:  -5, happiness:  2, energy:  25 },
        }
    }
}

impl fmt::Display for PetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PetAction {
    type Err = PetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feed" => Ok(Self::Feed),
            "play" => Ok(Self::Play),
            "rest" => Ok(Self::Rest),
            _ => Err(PetError::UnknownAction { name: s.to_string() }),
        }
    }
}

/// Result of applying an action, with the tick that preceded it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub state: PetState,
    pub tick:  TickOutcome,
}

/// Tick to `now`, then apply `action`'s delta. Total over valid states.
pub fn apply(action: PetAction, state: &PetState, now: DateTime<Utc>) -> PetState {
    apply_with_tick(action, state, now).state
}

/// Same as [`apply`], but also hands back the tick outcome so callers can
/// log or record the decay that happened before the action.
pub fn apply_with_tick(action: PetAction, state: &PetState, now: DateTime<Utc>) -> ActionOutcome {
    let ticked = tick(state, now);
    let delta = action.delta();

    let mut next = ticked.state.clone();
    next.fullness += delta.fullness;
    next.happiness += delta.happiness;
    next.energy += delta.energy;
    next.clamp_stats();

    log::debug!(
        "pet={} {action}: fullness={} happiness={} energy={}",
        next.id,
        next.fullness,
        next.happiness,
        next.energy
    );

    ActionOutcome { state: next, tick: ticked }
}
