//! # ormql-graphql
//!
//! GraphQL schema derivation for OrmQL entity models.
//!
//! This crate turns a [`ModelSet`](ormql_model::ModelSet) - entities, scalar
//! attributes, and cardinality-tagged relationships - into a complete
//! GraphQL schema backed by a [`ModelStore`](ormql_model::ModelStore):
//!
//! - one **output type** per entity, with resolvable association fields
//!   (belongs-to as the bare target type, has-many as a list)
//! - one **input type** per entity for mutation payloads, always-nullable
//!   and free of resolution behavior
//! - a **query root** with a listing field and a by-ID field per entity
//! - a **mutation root** with `<Entity>Create`, `<Entity>Update`, and
//!   `<Entity>Delete` fields per entity
//!
//! Self-referencing and mutually-referencing entities are supported; type
//! cross-references are by name and resolve when the schema is finalized.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ormql_graphql::{GraphQLContext, ModelSchemaBuilder, SchemaBuilderConfig};
//! use ormql_model::{EntityDef, MemoryStore, ModelSet, ScalarType};
//!
//! let models = ModelSet::new()
//!     .define(
//!         EntityDef::new("User")
//!             .attr("firstName", ScalarType::String)
//!             .belongs_to("Department"),
//!     )
//!     .define(
//!         EntityDef::new("Department")
//!             .attr("name", ScalarType::String)
//!             .has_many("User"),
//!     );
//!
//! let store = MemoryStore::shared(models.clone());
//! let builder = ModelSchemaBuilder::new(Arc::new(models), SchemaBuilderConfig::default());
//! let schema = builder.build()?;
//!
//! let context = GraphQLContext::builder()
//!     .with_store(store)
//!     .with_request_id("req-1")
//!     .build()?;
//! let response = schema
//!     .execute(async_graphql::Request::new("{ User { firstName } }").data(context))
//!     .await;
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`schema`] - Type graph derivation, schema building, lazy loading
//! - [`context`] - GraphQL execution context
//! - [`resolvers`] - Field and root-operation resolvers
//! - [`error`] - Error types for schema derivation

pub mod config;
pub mod context;
pub mod error;
pub mod resolvers;
pub mod schema;

// Re-export main types
pub use config::GraphQLConfig;
pub use context::{ContextBuilderError, GraphQLContext, GraphQLContextBuilder};
pub use error::GraphQLError;
pub use schema::{LazySchema, ModelSchemaBuilder, SchemaBuilderConfig, SchemaState};

/// Result type for schema derivation operations.
pub type Result<T> = std::result::Result<T, GraphQLError>;
