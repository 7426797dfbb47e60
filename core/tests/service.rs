//! Service flows against an in-memory SQLite store and a fixed clock.

use chrono::{DateTime, Duration, TimeZone, Utc};
use pet_core::{
    action::PetAction,
    clock::FixedClock,
    config::PetConfig,
    error::PetError,
    event::PetEvent,
    mood::MoodFlag,
    pet::PetState,
    service::PetService,
    store::{PetStore, SqlitePetStore},
};

type TestService = PetService<SqlitePetStore, FixedClock>;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

fn build() -> TestService {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = SqlitePetStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    PetService::new(store, FixedClock::new(t0()), PetConfig::default())
}

#[test]
fn adoption_seeds_defaults_and_stamps_now() {
    let service = build();
    let pet = service.adopt("  Biscuit ", "cat", "owner-1").unwrap();

    assert_eq!(pet.name, "Biscuit");
    assert_eq!(pet.level, 1);
    assert_eq!((pet.fullness, pet.happiness, pet.energy), (100, 100, 100));
    assert_eq!(pet.last_tick_at, Some(t0()));

    let stored = service.store().load(&pet.id).unwrap().expect("adopted pet is stored");
    assert_eq!(stored, pet);
    assert_eq!(service.store().event_count("pet_adopted").unwrap(), 1);
}

#[test]
fn adoption_validates_name_and_species() {
    let service = build();
    assert!(matches!(
        service.adopt("A", "cat", "owner-1"),
        Err(PetError::InvalidRecord { .. })
    ));
    assert!(matches!(
        service.adopt("Biscuit", "   ", "owner-1"),
        Err(PetError::InvalidRecord { .. })
    ));
    assert_eq!(service.store().pet_count().unwrap(), 0);
}

#[test]
fn read_persists_decay_once() {
    let mut service = build();
    let pet = service.adopt("Biscuit", "cat", "owner-1").unwrap();

    service.clock.advance_minutes(100);
    let read = service.get_pet(&pet.id).unwrap().unwrap();
    assert_eq!((read.fullness, read.happiness, read.energy), (80, 100, 90));

    let stored = service.store().load(&pet.id).unwrap().unwrap();
    assert_eq!(stored, read, "a changed read is written back");

    // Same instant again: nothing new to write.
    let again = service.get_pet(&pet.id).unwrap().unwrap();
    assert_eq!(again, read);
    assert_eq!(service.store().event_count("ticked").unwrap(), 1);
}

#[test]
fn unchanged_reads_keep_accumulating_drift() {
    let mut service = build();
    let pet = service.adopt("Biscuit", "cat", "owner-1").unwrap();

    // 1 and 2 minutes in, fullness rounds back to 100 and nothing is saved.
    for _ in 0..2 {
        service.clock.advance_minutes(1);
        let read = service.get_pet(&pet.id).unwrap().unwrap();
        assert_eq!(read.fullness, 100);
        let stored = service.store().load(&pet.id).unwrap().unwrap();
        assert_eq!(stored.last_tick_at, Some(t0()), "unchanged reads are not persisted");
    }

    // Three minutes since the stored stamp: 100 - 0.6 rounds to 99.
    service.clock.advance_minutes(1);
    let read = service.get_pet(&pet.id).unwrap().unwrap();
    assert_eq!(read.fullness, 99);
    assert_eq!(read.last_tick_at, Some(t0() + Duration::minutes(3)));
}

#[test]
fn missing_pet_reads_as_none_and_acts_as_not_found() {
    let service = build();
    assert!(service.get_pet("no-such-pet").unwrap().is_none());

    let err = service.feed("no-such-pet").unwrap_err();
    assert!(
        matches!(err, PetError::PetNotFound { ref id } if id == "no-such-pet"),
        "expected PetNotFound, got {err:?}"
    );
}

#[test]
fn actions_persist_and_are_logged() {
    let mut service = build();
    let pet = service.adopt("Mochi", "dog", "owner-1").unwrap();

    service.clock.advance_minutes(100);
    let played = service.play(&pet.id).unwrap();
    // Tick to 80 / 100 / 90, then play: -10 / +15 / -10
    assert_eq!((played.fullness, played.happiness, played.energy), (70, 100, 80));

    let stored = service.store().load(&pet.id).unwrap().unwrap();
    assert_eq!(stored, played);

    let events: Vec<PetEvent> = service
        .store()
        .events_for_pet(&pet.id)
        .unwrap()
        .iter()
        .map(|e| e.decode().expect("payload decodes"))
        .collect();
    assert_eq!(events.len(), 3, "adopted, ticked, action: {events:?}");
    assert!(matches!(events[1], PetEvent::Ticked { minutes_applied: 100, .. }));
    assert!(matches!(
        events[2],
        PetEvent::ActionApplied { action: PetAction::Play, fullness: 70, .. }
    ));
}

#[test]
fn feed_and_rest_shorthands() {
    let service = build();
    let pet = service.adopt("Mochi", "dog", "owner-1").unwrap();

    let rested = service.rest(&pet.id).unwrap();
    assert_eq!((rested.fullness, rested.happiness, rested.energy), (95, 100, 100));

    let fed = service.feed(&pet.id).unwrap();
    assert_eq!((fed.fullness, fed.happiness, fed.energy), (100, 100, 100));
}

#[test]
fn save_pet_assigns_id_clamps_and_first_touches() {
    let service = build();
    let draft = PetState {
        id: String::new(),
        name: "Pip".into(),
        species: "hamster".into(),
        level: 0,
        fullness: 150,
        happiness: -20,
        energy: 80,
        last_tick_at: None,
        owner_id: "owner-2".into(),
    };

    let saved = service.save_pet(draft).unwrap();
    assert!(!saved.id.is_empty());
    assert_eq!(saved.level, 1);
    assert_eq!((saved.fullness, saved.happiness, saved.energy), (100, 0, 80));
    assert_eq!(saved.last_tick_at, Some(t0()));
    assert_eq!(service.store().event_count("first_touch").unwrap(), 1);
    assert_eq!(service.store().event_count("pet_edited").unwrap(), 1);
}

#[test]
fn explicit_edits_are_logged() {
    let service = build();
    let pet = service.adopt("Biscuit", "cat", "owner-1").unwrap();

    let mut edit = pet.clone();
    edit.fullness = 10;
    edit.name = "Sir Biscuit".into();
    let saved = service.save_pet(edit).unwrap();
    assert_eq!(saved.fullness, 10);

    let stored = service.store().load(&pet.id).unwrap().unwrap();
    assert_eq!((stored.fullness, stored.name.as_str()), (10, "Sir Biscuit"));

    let events: Vec<PetEvent> = service
        .store()
        .events_for_pet(&pet.id)
        .unwrap()
        .iter()
        .map(|e| e.decode().expect("payload decodes"))
        .collect();
    assert_eq!(events.len(), 2, "adopted, edited: {events:?}");
    assert!(
        matches!(events[1], PetEvent::PetEdited { fullness: 10, ref name, .. } if name == "Sir Biscuit"),
        "expected PetEdited, got {:?}",
        events[1]
    );
}

#[test]
fn resaving_unchanged_record_logs_nothing() {
    let service = build();
    let pet = service.adopt("Biscuit", "cat", "owner-1").unwrap();

    service.save_pet(pet.clone()).unwrap();
    assert_eq!(service.store().event_count("pet_edited").unwrap(), 0);
    assert_eq!(service.store().events_for_pet(&pet.id).unwrap().len(), 1);
}

#[test]
fn listing_ticks_every_pet_and_filters_by_owner() {
    let mut service = build();
    let a = service.adopt("Alpha", "cat", "owner-1").unwrap();
    let b = service.adopt("Bravo", "dog", "owner-2").unwrap();
    let c = service.adopt("Charlie", "fox", "owner-1").unwrap();

    service.clock.advance_minutes(100);
    let all = service.list_pets().unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|p| p.fullness == 80 && p.energy == 90));

    let mine: Vec<String> = service
        .pets_for_owner("owner-1")
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(mine, vec![a.id, c.id]);
    assert!(!mine.contains(&b.id));
}

#[test]
fn delete_removes_pet_once() {
    let service = build();
    let pet = service.adopt("Biscuit", "cat", "owner-1").unwrap();

    service.delete_pet(&pet.id).unwrap();
    assert!(service.get_pet(&pet.id).unwrap().is_none());
    assert!(matches!(
        service.delete_pet(&pet.id),
        Err(PetError::PetNotFound { .. })
    ));
    assert_eq!(service.store().event_count("pet_deleted").unwrap(), 1);
}

#[test]
fn neglected_pet_shows_mood_flags() {
    let mut service = build();
    let pet = service.adopt("Biscuit", "cat", "owner-1").unwrap();

    // A full day of neglect: fullness 100 - 288 and energy 100 - 144 both floor.
    service.clock.advance(Duration::days(1));
    let read = service.get_pet(&pet.id).unwrap().unwrap();
    assert_eq!((read.fullness, read.energy), (0, 0));
    assert_eq!(
        service.mood(&read),
        vec![MoodFlag::Hungry, MoodFlag::Unhappy, MoodFlag::Sleepy]
    );
}

#[test]
fn legacy_hunger_field_is_accepted() {
    let json = r#"{
        "id": "legacy-1", "name": "Old", "species": "cat", "level": 2,
        "hunger": 40, "happiness": 60, "energy": 70, "owner_id": "owner-9"
    }"#;
    let pet: PetState = serde_json::from_str(json).unwrap();
    assert_eq!(pet.fullness, 40);
    assert_eq!(pet.last_tick_at, None);
}
