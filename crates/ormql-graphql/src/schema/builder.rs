//! GraphQL schema builder.
//!
//! This module provides `ModelSchemaBuilder`, which derives a complete
//! GraphQL schema from a model set using async-graphql's dynamic schema
//! API: custom scalars, the output and input type graphs, and the query and
//! mutation roots wired to the store.

use std::sync::Arc;

use async_graphql::dynamic::{Scalar, Schema, SchemaBuilder, Type};
use ormql_model::ModelSet;
use tracing::debug;

use crate::error::GraphQLError;

use super::graph::{build_graphs, retained};
use super::projector::{DATE_SCALAR, DATETIME_SCALAR, JSON_SCALAR, UUID_SCALAR};
use super::roots::{build_mutation_root, build_query_root};

/// Configuration for the schema builder.
#[derive(Debug, Clone)]
pub struct SchemaBuilderConfig {
    /// Maximum query depth allowed.
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    pub max_complexity: usize,

    /// Whether to enable introspection queries.
    pub introspection_enabled: bool,
}

impl Default for SchemaBuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: 15,
            max_complexity: 500,
            introspection_enabled: true,
        }
    }
}

/// Builds a GraphQL schema from a model set.
///
/// The derived schema contains:
/// - one output type and one input type per entity
/// - query-root listing and single-record fields per entity
/// - mutation-root create/update/delete fields per entity
///
/// # Example
///
/// ```ignore
/// let builder = ModelSchemaBuilder::new(models, SchemaBuilderConfig::default());
/// let schema = builder.build()?;
/// ```
pub struct ModelSchemaBuilder {
    /// The entity collection the schema is derived from.
    models: Arc<ModelSet>,

    /// Configuration options.
    config: SchemaBuilderConfig,
}

impl ModelSchemaBuilder {
    /// Creates a new schema builder.
    #[must_use]
    pub fn new(models: Arc<ModelSet>, config: SchemaBuilderConfig) -> Self {
        Self { models, config }
    }

    /// Builds the GraphQL schema.
    ///
    /// Construction is pure in-memory assembly; the store is only touched
    /// later, by resolvers. A build either yields a complete schema or
    /// fails - no partial schema is ever returned.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::MalformedEntity` or
    /// `GraphQLError::DanglingRelationship` for unusable model sets, and
    /// `GraphQLError::SchemaBuildFailed` when the host type system rejects
    /// the assembled schema.
    pub fn build(&self) -> Result<Schema, GraphQLError> {
        debug!("Starting GraphQL schema build");

        if retained(&self.models).next().is_none() {
            return Err(GraphQLError::SchemaBuildFailed(
                "model set contains no entities".into(),
            ));
        }

        let graphs = build_graphs(&self.models)?;

        let mut schema_builder = Schema::build("Query", Some("Mutation"), None);

        schema_builder = self.register_scalars(schema_builder);

        for (_, output) in graphs.outputs {
            schema_builder = schema_builder.register(Type::Object(output));
        }
        for (_, input) in graphs.inputs {
            schema_builder = schema_builder.register(Type::InputObject(input));
        }

        schema_builder = schema_builder.register(build_query_root(&self.models));
        schema_builder = schema_builder.register(build_mutation_root(&self.models));

        let mut schema_builder = schema_builder.limit_depth(self.config.max_depth);
        schema_builder = schema_builder.limit_complexity(self.config.max_complexity);

        if !self.config.introspection_enabled {
            schema_builder = schema_builder.disable_introspection();
        }

        let schema = schema_builder
            .finish()
            .map_err(|e| GraphQLError::SchemaBuildFailed(e.to_string()))?;

        debug!("GraphQL schema build complete");
        Ok(schema)
    }

    /// Registers the custom scalar types.
    fn register_scalars(&self, builder: SchemaBuilder) -> SchemaBuilder {
        let scalars = [
            (DATE_SCALAR, "A calendar date (YYYY-MM-DD)"),
            (DATETIME_SCALAR, "An RFC 3339 instant"),
            (UUID_SCALAR, "A string-encoded UUID"),
            (JSON_SCALAR, "An arbitrary JSON document"),
        ];

        let mut builder = builder;
        for (name, description) in scalars {
            let scalar = Scalar::new(name).description(description);
            builder = builder.register(scalar);
        }

        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ormql_model::{EntityDef, ScalarType};

    fn test_models() -> Arc<ModelSet> {
        Arc::new(
            ModelSet::new()
                .define(
                    EntityDef::new("User")
                        .attr("firstName", ScalarType::String)
                        .attr("lastName", ScalarType::String)
                        .belongs_to("Department"),
                )
                .define(
                    EntityDef::new("Department")
                        .attr("name", ScalarType::String)
                        .has_many("Department"),
                ),
        )
    }

    #[test]
    fn test_default_config() {
        let config = SchemaBuilderConfig::default();
        assert_eq!(config.max_depth, 15);
        assert_eq!(config.max_complexity, 500);
        assert!(config.introspection_enabled);
    }

    #[test]
    fn test_schema_builder_creates_valid_schema() {
        let builder = ModelSchemaBuilder::new(test_models(), SchemaBuilderConfig::default());

        let schema = builder.build().expect("Schema should build");
        let sdl = schema.sdl();

        assert!(sdl.contains("type Query"), "Schema should have Query type");
        assert!(
            sdl.contains("type Mutation"),
            "Schema should have Mutation type"
        );
        assert!(sdl.contains("type User"), "Schema should have User type");
        assert!(
            sdl.contains("input UserInput"),
            "Schema should have UserInput type"
        );
        assert!(
            sdl.contains("scalar DateTime"),
            "Schema should have DateTime scalar"
        );
    }

    #[test]
    fn test_self_referencing_entity_terminates() {
        let models = Arc::new(
            ModelSet::new().define(
                EntityDef::new("Department")
                    .attr("name", ScalarType::String)
                    .has_many("Department"),
            ),
        );
        let builder = ModelSchemaBuilder::new(models, SchemaBuilderConfig::default());

        let schema = builder.build().expect("Schema should build");
        let sdl = schema.sdl();

        assert!(
            sdl.contains("Department: [Department!]!"),
            "Self-referencing field should resolve to the type itself"
        );
    }

    #[test]
    fn test_empty_model_set_fails() {
        let builder = ModelSchemaBuilder::new(
            Arc::new(ModelSet::new()),
            SchemaBuilderConfig::default(),
        );

        let err = builder.build().unwrap_err();
        assert!(matches!(err, GraphQLError::SchemaBuildFailed(_)));
    }

    #[test]
    fn test_dangling_relationship_aborts_build() {
        let models = Arc::new(
            ModelSet::new().define(
                EntityDef::new("Torrent")
                    .attr("magnet", ScalarType::String)
                    .belongs_to("User"),
            ),
        );
        let builder = ModelSchemaBuilder::new(models, SchemaBuilderConfig::default());

        let err = builder.build().unwrap_err();
        assert!(matches!(err, GraphQLError::DanglingRelationship { .. }));
    }

    #[test]
    fn test_schema_with_disabled_introspection() {
        let config = SchemaBuilderConfig {
            introspection_enabled: false,
            ..Default::default()
        };
        let builder = ModelSchemaBuilder::new(test_models(), config);

        assert!(
            builder.build().is_ok(),
            "Schema should build with introspection disabled"
        );
    }
}
