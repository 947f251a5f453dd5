//! Error types for schema derivation.
//!
//! Build-time errors are fatal: a schema is either derived completely or not
//! at all. Runtime resolution errors never appear here; they surface as
//! per-field GraphQL errors through the execution engine.

use ormql_model::StoreError;

/// Errors that can occur while deriving or serving a schema.
#[derive(Debug, thiserror::Error)]
pub enum GraphQLError {
    /// An entity cannot be projected into a usable type.
    #[error("Malformed entity `{name}`: {reason}")]
    MalformedEntity {
        /// The entity name, or a placeholder when the name itself is missing.
        name: String,
        /// Why the entity cannot be projected.
        reason: String,
    },

    /// A relationship points at an entity that is not in the model set.
    #[error("Relationship `{entity}.{association}` targets unknown entity `{target}`")]
    DanglingRelationship {
        /// The entity declaring the relationship.
        entity: String,
        /// The association name.
        association: String,
        /// The missing target entity.
        target: String,
    },

    /// The host type system rejected the assembled schema.
    #[error("Failed to build GraphQL schema: {0}")]
    SchemaBuildFailed(String),

    /// Schema is still being built - caller should retry.
    #[error("GraphQL schema is initializing, please retry")]
    SchemaInitializing,

    /// A store operation failed during schema derivation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GraphQLError {
    /// Creates a new `MalformedEntity` error.
    #[must_use]
    pub fn malformed_entity(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedEntity {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `DanglingRelationship` error.
    #[must_use]
    pub fn dangling_relationship(
        entity: impl Into<String>,
        association: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::DanglingRelationship {
            entity: entity.into(),
            association: association.into(),
            target: target.into(),
        }
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedEntity { .. } => "MALFORMED_ENTITY",
            Self::DanglingRelationship { .. } => "DANGLING_RELATIONSHIP",
            Self::SchemaBuildFailed(_) => "SCHEMA_BUILD_FAILED",
            Self::SchemaInitializing => "SCHEMA_INITIALIZING",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}
