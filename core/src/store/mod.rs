//! Persistence for pet records.
//!
//! RULE: Only the store talks to the database.
//! The tick and action code never sees a store; the service loads a
//! record, hands it to the engine, and saves what comes back.

use crate::{
    error::PetResult,
    event::EventLogEntry,
    pet::PetState,
};
use rusqlite::Connection;

mod event_log;
mod pets;

/// The collaborator the service reads pet records from and writes them to.
/// Implementations own any locking or atomicity they need.
pub trait PetStore {
    /// `Ok(None)` when no pet has this id.
    fn load(&self, id: &str) -> PetResult<Option<PetState>>;

    /// Insert or replace the record with this id.
    fn save(&self, state: &PetState) -> PetResult<()>;

    fn load_all(&self) -> PetResult<Vec<PetState>>;

    fn load_by_owner(&self, owner_id: &str) -> PetResult<Vec<PetState>>;

    /// Returns false when there was nothing to delete.
    fn delete(&self, id: &str) -> PetResult<bool>;

    fn append_event(&self, entry: &EventLogEntry) -> PetResult<()>;
}

pub struct SqlitePetStore {
    conn: Connection,
}

impl SqlitePetStore {
    pub fn open(path: &str) -> PetResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PetResult<Self> {
        let conn = Connection::open(":memory:")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PetResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_pets.sql"))?;
        Ok(())
    }
}

impl PetStore for SqlitePetStore {
    fn load(&self, id: &str) -> PetResult<Option<PetState>> {
        self.pet_by_id(id)
    }

    fn save(&self, state: &PetState) -> PetResult<()> {
        self.upsert_pet(state)
    }

    fn load_all(&self) -> PetResult<Vec<PetState>> {
        self.all_pets()
    }

    fn load_by_owner(&self, owner_id: &str) -> PetResult<Vec<PetState>> {
        self.pets_for_owner(owner_id)
    }

    fn delete(&self, id: &str) -> PetResult<bool> {
        self.delete_pet(id)
    }

    fn append_event(&self, entry: &EventLogEntry) -> PetResult<()> {
        self.insert_event(entry)
    }
}
