//! Shared primitive types used across the pet core.

/// Stable identifier for a pet. Assigned once by the service, never changed.
pub type PetId = String;

/// Opaque reference to the owning user. Never interpreted by the core.
pub type OwnerId = String;

/// A single vitality stat. Always within [STAT_MIN, STAT_MAX] once it
/// leaves the core.
pub type Stat = i32;

pub const STAT_MIN: Stat = 0;
pub const STAT_MAX: Stat = 100;

/// Clamp a stat value into the closed range [0, 100].
pub fn clamp_stat(value: Stat) -> Stat {
    value.clamp(STAT_MIN, STAT_MAX)
}
