//! The caller side of the engine: load, tick or act, save.
//!
//! FLOW (every request):
//!   1. Read `now` once from the clock.
//!   2. Load the record from the store.
//!   3. Run tick() (plain reads) or action::apply_with_tick() (actions).
//!   4. Save when something changed (actions always save).
//!   5. Append what happened to the event log.
//!
//! The engine functions stay pure; every persistence decision is made here.

use crate::{
    action::{self, PetAction},
    clock::Clock,
    config::PetConfig,
    error::{PetError, PetResult},
    event::{EventLogEntry, PetEvent},
    mood::{mood_for, MoodFlag},
    pet::PetState,
    store::PetStore,
    tick::{tick, TickOutcome},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub struct PetService<S: PetStore, C: Clock> {
    pub clock:  C,
    pub config: PetConfig,
    store:      S,
}

impl<S: PetStore, C: Clock> PetService<S, C> {
    pub fn new(store: S, clock: C, config: PetConfig) -> Self {
        Self { clock, config, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Create ────────────────────────────────────────────────────

    /// Adopt a new pet for `owner_id` with the configured starting stats.
    pub fn adopt(&self, name: &str, species: &str, owner_id: &str) -> PetResult<PetState> {
        let name = name.trim();
        let species = species.trim();
        let bounds = &self.config.adoption;
        let name_len = name.chars().count();
        if name_len < bounds.min_name_length || name_len > bounds.max_name_length {
            return Err(PetError::InvalidRecord {
                reason: format!(
                    "name must be {}..={} characters, got {name_len}",
                    bounds.min_name_length, bounds.max_name_length
                ),
            });
        }
        if species.is_empty() {
            return Err(PetError::InvalidRecord { reason: "species must not be blank".into() });
        }

        let now = self.clock.now();
        let pet = PetState {
            id:           Uuid::new_v4().to_string(),
            name:         name.to_string(),
            species:      species.to_string(),
            level:        bounds.level,
            fullness:     bounds.fullness,
            happiness:    bounds.happiness,
            energy:       bounds.energy,
            last_tick_at: Some(now),
            owner_id:     owner_id.to_string(),
        };
        self.store.save(&pet)?;
        self.record(
            &PetEvent::PetAdopted {
                pet_id:   pet.id.clone(),
                owner_id: pet.owner_id.clone(),
                name:     pet.name.clone(),
                species:  pet.species.clone(),
            },
            now,
        )?;
        log::info!("pet={} adopted by owner={} ({} the {})", pet.id, pet.owner_id, pet.name, pet.species);
        Ok(pet)
    }

    // ── Read (lazy tick) ──────────────────────────────────────────

    /// Load one pet, apply decay, persist the drift if anything changed.
    pub fn get_pet(&self, id: &str) -> PetResult<Option<PetState>> {
        let Some(pet) = self.store.load(id)? else {
            return Ok(None);
        };
        let now = self.clock.now();
        Ok(Some(self.settle(&pet, now)?))
    }

    pub fn list_pets(&self) -> PetResult<Vec<PetState>> {
        let pets = self.store.load_all()?;
        self.settle_all(pets)
    }

    pub fn pets_for_owner(&self, owner_id: &str) -> PetResult<Vec<PetState>> {
        let pets = self.store.load_by_owner(owner_id)?;
        self.settle_all(pets)
    }

    // ── Write ─────────────────────────────────────────────────────

    /// Tick, then persist the record with any explicit edits the caller made.
    /// Records without an id get a fresh one. A record that differs from
    /// the stored one (or has no stored counterpart) is logged as edited.
    pub fn save_pet(&self, mut pet: PetState) -> PetResult<PetState> {
        if pet.id.trim().is_empty() {
            pet.id = Uuid::new_v4().to_string();
        }
        pet.level = pet.level.max(1);
        pet.clamp_stats();

        let edited = match self.store.load(&pet.id)? {
            Some(stored) => PetState { last_tick_at: pet.last_tick_at, ..stored } != pet,
            None => true,
        };

        let now = self.clock.now();
        let outcome = tick(&pet, now);
        self.store.save(&outcome.state)?;
        self.record_tick(&pet, &outcome, now)?;

        if edited {
            let s = &outcome.state;
            self.record(
                &PetEvent::PetEdited {
                    pet_id:    s.id.clone(),
                    name:      s.name.clone(),
                    level:     s.level,
                    fullness:  s.fullness,
                    happiness: s.happiness,
                    energy:    s.energy,
                },
                now,
            )?;
            log::debug!("pet={} edited", s.id);
        }
        Ok(outcome.state)
    }

    // ── Actions ───────────────────────────────────────────────────

    /// Tick, apply `action`, save. Fails only if the pet does not exist
    /// or the store does.
    pub fn apply_action(&self, id: &str, action: PetAction) -> PetResult<PetState> {
        let pet = self.require_pet(id)?;
        let now = self.clock.now();
        let outcome = action::apply_with_tick(action, &pet, now);

        self.store.save(&outcome.state)?;
        self.record_tick(&pet, &outcome.tick, now)?;
        let next = outcome.state;
        self.record(
            &PetEvent::ActionApplied {
                pet_id:    next.id.clone(),
                action,
                fullness:  next.fullness,
                happiness: next.happiness,
                energy:    next.energy,
            },
            now,
        )?;
        Ok(next)
    }

    pub fn feed(&self, id: &str) -> PetResult<PetState> {
        self.apply_action(id, PetAction::Feed)
    }

    pub fn play(&self, id: &str) -> PetResult<PetState> {
        self.apply_action(id, PetAction::Play)
    }

    pub fn rest(&self, id: &str) -> PetResult<PetState> {
        self.apply_action(id, PetAction::Rest)
    }

    // ── Delete ────────────────────────────────────────────────────

    pub fn delete_pet(&self, id: &str) -> PetResult<()> {
        if !self.store.delete(id)? {
            return Err(PetError::PetNotFound { id: id.to_string() });
        }
        self.record(&PetEvent::PetDeleted { pet_id: id.to_string() }, self.clock.now())?;
        log::info!("pet={id} deleted");
        Ok(())
    }

    // ── Mood ──────────────────────────────────────────────────────

    pub fn mood(&self, pet: &PetState) -> Vec<MoodFlag> {
        mood_for(pet, &self.config.mood)
    }

    // ── Internals ─────────────────────────────────────────────────

    fn require_pet(&self, id: &str) -> PetResult<PetState> {
        self.store
            .load(id)?
            .ok_or_else(|| PetError::PetNotFound { id: id.to_string() })
    }

    fn settle(&self, pet: &PetState, now: DateTime<Utc>) -> PetResult<PetState> {
        let outcome = tick(pet, now);
        if outcome.changed {
            self.store.save(&outcome.state)?;
            self.record_tick(pet, &outcome, now)?;
        }
        Ok(outcome.state)
    }

    fn settle_all(&self, pets: Vec<PetState>) -> PetResult<Vec<PetState>> {
        let now = self.clock.now();
        pets.iter().map(|p| self.settle(p, now)).collect()
    }

    fn record_tick(&self, before: &PetState, outcome: &TickOutcome, now: DateTime<Utc>) -> PetResult<()> {
        if before.last_tick_at.is_none() {
            return self.record(&PetEvent::FirstTouch { pet_id: before.id.clone() }, now);
        }
        if !outcome.changed {
            return Ok(());
        }
        let s = &outcome.state;
        self.record(
            &PetEvent::Ticked {
                pet_id:          s.id.clone(),
                minutes_applied: outcome.minutes_applied,
                fullness:        s.fullness,
                happiness:       s.happiness,
                energy:          s.energy,
            },
            now,
        )
    }

    fn record(&self, event: &PetEvent, now: DateTime<Utc>) -> PetResult<()> {
        let entry = EventLogEntry::from_event(event, now)?;
        self.store.append_event(&entry)
    }
}
