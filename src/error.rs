use std::io;

use thiserror::Error;

/// Failure kinds surfaced by the site. Callers match on the kind, the web
/// layer decides which localized message to show.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("generation service unreachable: {0}")]
    NetworkFailure(String),

    #[error("generation response does not match the declared schema: {0}")]
    SchemaMismatch(String),

    #[error("persisted article state is corrupt: {0}")]
    StorageCorruption(String),

    #[error("credenciais inválidas")]
    AuthRejected,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("template error: {0}")]
    Template(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SiteError {
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, SiteError::SchemaMismatch(_))
    }

    pub fn is_storage_corruption(&self) -> bool {
        matches!(self, SiteError::StorageCorruption(_))
    }
}

impl From<reqwest::Error> for SiteError {
    fn from(e: reqwest::Error) -> Self {
        SiteError::NetworkFailure(e.to_string())
    }
}

pub type SiteResult<T> = Result<T, SiteError>;
