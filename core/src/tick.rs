//! Time-based stat decay ("lazy ticking").
//!
//! A tick computes how far a pet's stats have drifted since
//! `last_tick_at` and stamps the new instant. It is a pure function:
//! no clock reads, no store access, no logging of state it does not own.
//!
//! ORDER (fixed, never reordered):
//!   1. First touch: stamp `now`, no decay.
//!   2. Whole elapsed minutes, floored at 0 (clock skew heals nothing).
//!   3. Total backdated cap, then per-call cap.
//!   4. Linear base decay.
//!   5. Mood effects, tested against the already-decayed values.
//!   6. Round (ties away from zero), clamp to [0, 100].
//!
//! The rates and caps below are contractual. They are not read from
//! config and must not become tunable.

use crate::{pet::PetState, types::clamp_stat};
use chrono::{DateTime, Utc};

pub const FULLNESS_DECAY_PER_MIN: f64 = 0.20;
pub const ENERGY_DECAY_PER_MIN: f64 = 0.10;
pub const HAPPINESS_DECAY_PER_MIN: f64 = 0.05;

pub const HAPPINESS_PENALTY_LOW_FULLNESS_PER_MIN: f64 = 0.15;
pub const HAPPINESS_PENALTY_LOW_ENERGY_PER_MIN: f64 = 0.10;
pub const HAPPINESS_BONUS_WELL_CARED_PER_MIN: f64 = 0.05;

/// Below this (working) value a stat drags happiness down.
pub const LOW_STAT_THRESHOLD: f64 = 30.0;
/// Above this (working) value for both fullness and energy, happiness rises.
pub const WELL_CARED_THRESHOLD: f64 = 70.0;

/// At most 24h of decay in a single tick.
pub const MAX_MINUTES_PER_TICK: i64 = 24 * 60;
/// At most 3 days of catch-up after a long absence.
pub const MAX_BACKDATED_MINUTES: i64 = 3 * 24 * 60;

/// Which conditional mood effects fired during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodEffects {
    pub low_fullness: bool,
    pub low_energy:   bool,
    pub well_cared:   bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub state:           PetState,
    /// True when a stat moved or the pet was stamped for the first time.
    /// Callers persist only when this is set.
    pub changed:         bool,
    /// Minutes of decay actually applied, after both caps.
    pub minutes_applied: i64,
    pub effects:         MoodEffects,
}

/// Minutes of decay a tick at `now` would apply, after both caps.
pub fn capped_minutes(last_tick_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let raw_minutes = (now - last_tick_at).num_minutes().max(0);
    let capped_raw = raw_minutes.min(MAX_BACKDATED_MINUTES);
    capped_raw.min(MAX_MINUTES_PER_TICK)
}

/// Apply decay since `state.last_tick_at` up to `now`.
pub fn tick(state: &PetState, now: DateTime<Utc>) -> TickOutcome {
    let mut next = state.clone();

    let Some(last) = state.last_tick_at else {
        next.last_tick_at = Some(now);
        return TickOutcome {
            state:           next,
            changed:         true,
            minutes_applied: 0,
            effects:         MoodEffects::default(),
        };
    };

    if now < last {
        log::warn!(
            "pet={} clock skew: now {now} is before last tick {last}; no decay applied",
            state.id
        );
    }

    let minutes = capped_minutes(last, now);
    if minutes == 0 {
        return TickOutcome {
            state:           next,
            changed:         false,
            minutes_applied: 0,
            effects:         MoodEffects::default(),
        };
    }

    let m = minutes as f64;
    let mut fullness = f64::from(state.fullness);
    let mut energy = f64::from(state.energy);
    let mut happiness = f64::from(state.happiness);

    fullness -= FULLNESS_DECAY_PER_MIN * m;
    energy -= ENERGY_DECAY_PER_MIN * m;
    happiness -= HAPPINESS_DECAY_PER_MIN * m;

    let effects = MoodEffects {
        low_fullness: fullness < LOW_STAT_THRESHOLD,
        low_energy:   energy < LOW_STAT_THRESHOLD,
        well_cared:   fullness > WELL_CARED_THRESHOLD && energy > WELL_CARED_THRESHOLD,
    };
    if effects.low_fullness {
        happiness -= HAPPINESS_PENALTY_LOW_FULLNESS_PER_MIN * m;
    }
    if effects.low_energy {
        happiness -= HAPPINESS_PENALTY_LOW_ENERGY_PER_MIN * m;
    }
    if effects.well_cared {
        happiness += HAPPINESS_BONUS_WELL_CARED_PER_MIN * m;
    }

    next.fullness = round_and_clamp(fullness);
    next.energy = round_and_clamp(energy);
    next.happiness = round_and_clamp(happiness);
    next.last_tick_at = Some(now);

    let changed = !next.same_stats(state);

    log::debug!(
        "pet={} tick: {minutes}m applied, fullness {}->{} happiness {}->{} energy {}->{}",
        state.id,
        state.fullness,
        next.fullness,
        state.happiness,
        next.happiness,
        state.energy,
        next.energy,
    );

    TickOutcome {
        state: next,
        changed,
        minutes_applied: minutes,
        effects,
    }
}

/// f64::round rounds half away from zero. The working value is bounded by
/// 100 + a day of bonus, so the cast cannot overflow.
fn round_and_clamp(value: f64) -> i32 {
    clamp_stat(value.round() as i32)
}
