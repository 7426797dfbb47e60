use super::SqlitePetStore;
use crate::{error::PetResult, pet::PetState};
use rusqlite::{params, OptionalExtension, Row};

const PET_COLUMNS: &str =
    "pet_id, owner_id, name, species, level, fullness, happiness, energy, last_tick_at";

impl SqlitePetStore {
    // ── Pet ───────────────────────────────────────────────────────

    pub fn upsert_pet(&self, p: &PetState) -> PetResult<()> {
        self.conn.execute(
            "INSERT INTO pet (pet_id, owner_id, name, species, level, fullness, happiness, energy, last_tick_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(pet_id) DO UPDATE SET
                owner_id = excluded.owner_id,
                name = excluded.name,
                species = excluded.species,
                level = excluded.level,
                fullness = excluded.fullness,
                happiness = excluded.happiness,
                energy = excluded.energy,
                last_tick_at = excluded.last_tick_at",
            params![
                p.id,
                p.owner_id,
                p.name,
                p.species,
                p.level,
                p.fullness,
                p.happiness,
                p.energy,
                p.last_tick_at,
            ],
        )?;
        Ok(())
    }

    pub fn pet_by_id(&self, pet_id: &str) -> PetResult<Option<PetState>> {
        let pet = self
            .conn
            .query_row(
                &format!("SELECT {PET_COLUMNS} FROM pet WHERE pet_id = ?1"),
                params![pet_id],
                pet_from_row,
            )
            .optional()?;
        if let Some(p) = &pet {
            p.validate()?;
        }
        Ok(pet)
    }

    pub fn all_pets(&self) -> PetResult<Vec<PetState>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PET_COLUMNS} FROM pet ORDER BY rowid ASC"))?;
        let pets = stmt
            .query_map([], pet_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        validate_all(&pets)?;
        Ok(pets)
    }

    pub fn pets_for_owner(&self, owner_id: &str) -> PetResult<Vec<PetState>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PET_COLUMNS} FROM pet WHERE owner_id = ?1 ORDER BY rowid ASC"
        ))?;
        let pets = stmt
            .query_map(params![owner_id], pet_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        validate_all(&pets)?;
        Ok(pets)
    }

    pub fn delete_pet(&self, pet_id: &str) -> PetResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM pet WHERE pet_id = ?1", params![pet_id])?;
        Ok(removed > 0)
    }

    // ── Test / summary helpers ────────────────────────────────────────

    /// Number of pet rows (for tests).
    pub fn pet_count(&self) -> PetResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM pet", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn pet_from_row(row: &Row<'_>) -> rusqlite::Result<PetState> {
    Ok(PetState {
        id:           row.get(0)?,
        owner_id:     row.get(1)?,
        name:         row.get(2)?,
        species:      row.get(3)?,
        level:        row.get(4)?,
        fullness:     row.get(5)?,
        happiness:    row.get(6)?,
        energy:       row.get(7)?,
        last_tick_at: row.get(8)?,
    })
}

fn validate_all(pets: &[PetState]) -> PetResult<()> {
    pets.iter().try_for_each(PetState::validate)
}
