use thiserror::Error;

#[derive(Error, Debug)]
pub enum PetError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Pet not found: {id}")]
    PetNotFound { id: String },

    #[error("Unknown action '{name}' (expected feed, play or rest)")]
    UnknownAction { name: String },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Invalid pet record: {reason}")]
    InvalidRecord { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PetResult<T> = Result<T, PetError>;
