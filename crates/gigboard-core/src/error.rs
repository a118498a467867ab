//! Error types for Gigboard

use crate::RowId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GigboardError>;

#[derive(Error, Debug)]
pub enum GigboardError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: RowId },

    /// A unique column already holds the submitted value
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A NOT NULL or CHECK column constraint rejected the row
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("`{field}` references {entity} {id}, which does not exist")]
    MissingReference {
        field: &'static str,
        entity: &'static str,
        id: RowId,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Seed error: {0}")]
    Seed(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GigboardError {
    pub fn not_found(entity: &'static str, id: RowId) -> Self {
        GigboardError::NotFound { entity, id }
    }
}
