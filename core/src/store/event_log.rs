use super::SqlitePetStore;
use crate::{error::PetResult, event::EventLogEntry};
use rusqlite::params;

impl SqlitePetStore {
    // ── Event log ──────────────────────────────────────────────

    pub fn insert_event(&self, entry: &EventLogEntry) -> PetResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (pet_id, recorded_at, event_type, payload)
             VALUES (?1, ?2, ?3, ?4)",
            params![entry.pet_id, entry.recorded_at, entry.event_type, entry.payload],
        )?;
        Ok(())
    }

    /// Every event recorded for one pet, oldest first.
    pub fn events_for_pet(&self, pet_id: &str) -> PetResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, pet_id, recorded_at, event_type, payload
             FROM event_log WHERE pet_id = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![pet_id], |row| {
                Ok(EventLogEntry {
                    id: Some(row.get(0)?),
                    pet_id: row.get(1)?,
                    recorded_at: row.get(2)?,
                    event_type: row.get(3)?,
                    payload: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self, event_type: &str) -> PetResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE event_type = ?1",
            params![event_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
