//! Error types for the data-access abstraction layer.

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The named entity is not part of the model set served by this store.
    #[error("Unknown entity: {name}")]
    UnknownEntity {
        /// The entity name that was not recognized.
        name: String,
    },

    /// The requested record was not found.
    #[error("Record not found: {entity}/{id}")]
    NotFound {
        /// The entity the record belongs to.
        entity: String,
        /// The identifier of the missing record.
        id: i64,
    },

    /// The supplied payload is not usable for the requested operation.
    #[error("Invalid payload: {message}")]
    InvalidPayload {
        /// Description of why the payload is invalid.
        message: String,
    },

    /// A uniqueness or integrity constraint was violated.
    #[error("Constraint violation: {message}")]
    Conflict {
        /// Description of the violated constraint.
        message: String,
    },

    /// An internal store error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StoreError {
    /// Creates a new `UnknownEntity` error.
    #[must_use]
    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity { name: name.into() }
    }

    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(entity: impl Into<String>, id: i64) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id,
        }
    }

    /// Creates a new `InvalidPayload` error.
    #[must_use]
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Creates a new `Conflict` error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the error category for logging and error extensions.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownEntity { .. } => "unknown_entity",
            Self::NotFound { .. } => "not_found",
            Self::InvalidPayload { .. } => "invalid_payload",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal",
        }
    }
}
