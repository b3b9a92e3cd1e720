use thiserror::Error;

use crate::db::DatabaseError;

/// Errors surfaced by the `epiward` entry point.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
