use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RecordKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    DuplicateIdentifier,
    EntityNotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

/// Failure of a catalog operation. Every variant leaves the catalog untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The identifier matches no live record.
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: i64 },
    /// An insert reused an identifier that is already live.
    #[error("{kind} {id} already exists")]
    DuplicateIdentifier { kind: RecordKind, id: i64 },
    /// An enrollment named an employee or course that does not exist.
    #[error("cannot enroll: {kind} {id} not found")]
    EntityNotFound { kind: RecordKind, id: i64 },
}

impl CatalogError {
    pub fn not_found(kind: RecordKind, id: impl Into<i64>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn duplicate(kind: RecordKind, id: impl Into<i64>) -> Self {
        Self::DuplicateIdentifier {
            kind,
            id: id.into(),
        }
    }

    pub fn entity_not_found(kind: RecordKind, id: impl Into<i64>) -> Self {
        Self::EntityNotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::DuplicateIdentifier { .. } => ErrorCode::DuplicateIdentifier,
            Self::EntityNotFound { .. } => ErrorCode::EntityNotFound,
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Self::NotFound { kind, .. }
            | Self::DuplicateIdentifier { kind, .. }
            | Self::EntityNotFound { kind, .. } => *kind,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(value: CatalogError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
