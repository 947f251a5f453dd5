//! Type graph construction.
//!
//! Builds the two parallel named-type graphs from a model set: the output
//! graph (objects with resolvable association fields) and the input graph
//! (payload shapes for mutations). Both graphs are keyed by entity name and
//! always share the same key set.
//!
//! The whole model set is validated before any type is produced, so a
//! failed build never leaks a partial graph. Associations reference their
//! targets by type name; the names are all known up front, which is what
//! makes self-references and mutual references work without ordering the
//! entities.

use std::collections::HashSet;

use async_graphql::dynamic::{InputObject, Object};
use indexmap::IndexMap;
use ormql_model::{EntityDef, ModelSet};
use tracing::{debug, trace};

use crate::error::GraphQLError;

use super::projector::{
    association_fields, association_inputs, attribute_fields, attribute_inputs,
};

/// Type names owned by the schema roots; model entries with these names are
/// namespace markers, not entities.
pub(crate) const RESERVED_TYPE_NAMES: &[&str] = &["Query", "Mutation"];

/// Returns the input-type name derived from an entity name.
#[must_use]
pub fn input_type_name(entity: &str) -> String {
    format!("{entity}Input")
}

/// Iterates the model set's real entities, skipping reserved entries.
pub(crate) fn retained(models: &ModelSet) -> impl Iterator<Item = &EntityDef> {
    models
        .entities()
        .filter(|entity| !RESERVED_TYPE_NAMES.contains(&entity.name.as_str()))
}

/// The output and input type graphs derived from one model set.
#[derive(Debug)]
pub struct TypeGraphs {
    /// Output object types, keyed by entity name.
    pub outputs: IndexMap<String, Object>,
    /// Input object types, keyed by entity name (type names carry the
    /// `Input` suffix).
    pub inputs: IndexMap<String, InputObject>,
}

impl TypeGraphs {
    /// Iterates the entity names both graphs are keyed by.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.outputs.keys().map(String::as_str)
    }

    /// Returns the number of entities in each graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Returns `true` if the graphs contain no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Builds the output and input type graphs for a model set.
///
/// # Errors
///
/// Returns `GraphQLError::MalformedEntity` for an entity without a name or
/// with an empty field set, and `GraphQLError::DanglingRelationship` when an
/// association targets an entity missing from the set. Both abort the build
/// before any type is produced.
pub fn build_graphs(models: &ModelSet) -> Result<TypeGraphs, GraphQLError> {
    // The key set comes first: association fields reference these names, so
    // every name must be settled before any field set is computed.
    let mut names: HashSet<&str> = HashSet::new();
    for entity in models.entities() {
        if entity.name.is_empty() {
            return Err(GraphQLError::malformed_entity("<unnamed>", "missing name"));
        }
        if RESERVED_TYPE_NAMES.contains(&entity.name.as_str()) {
            debug!(name = %entity.name, "Skipping reserved model entry");
            continue;
        }
        names.insert(&entity.name);
    }

    for entity in retained(models) {
        if entity.is_empty() {
            return Err(GraphQLError::malformed_entity(
                &entity.name,
                "empty field set",
            ));
        }
        for (association, rel) in &entity.relationships {
            if !names.contains(rel.target.as_str()) {
                return Err(GraphQLError::dangling_relationship(
                    &entity.name,
                    association,
                    &rel.target,
                ));
            }
        }
    }

    let mut outputs = IndexMap::new();
    let mut inputs = IndexMap::new();

    for entity in retained(models) {
        trace!(name = %entity.name, "Deriving entity types");

        let mut output = Object::new(&entity.name);
        for field in attribute_fields(models, entity) {
            output = output.field(field);
        }
        for field in association_fields(entity) {
            output = output.field(field);
        }

        let mut input = InputObject::new(input_type_name(&entity.name));
        for value in attribute_inputs(models, entity) {
            input = input.field(value);
        }
        for value in association_inputs(entity) {
            input = input.field(value);
        }

        outputs.insert(entity.name.clone(), output);
        inputs.insert(entity.name.clone(), input);
    }

    debug!(count = outputs.len(), "Type graphs derived");

    Ok(TypeGraphs { outputs, inputs })
}
