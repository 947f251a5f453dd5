//! Root operation generation.
//!
//! Derives the `Query` and `Mutation` root types from a model set. Field
//! names are mechanical functions of the entity name and operation kind, so
//! unique entity names guarantee collision-free roots.
//!
//! Query-root listing fields use the bare entity name; the historical
//! pluralizing suffix was dropped because it does not generalize beyond
//! English entity names.

use async_graphql::dynamic::{Field, InputValue, Object, TypeRef};
use ormql_model::{EntityDef, ModelSet};
use tracing::trace;

use crate::resolvers::{CreateResolver, DeleteResolver, ListResolver, ReadResolver, UpdateResolver};

use super::graph::{input_type_name, retained};
use super::projector::scalar_type_ref;

/// The kind of a root mutation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Create a record.
    Create,
    /// Update a record in place.
    Update,
    /// Delete a record.
    Delete,
}

/// Derives the mutation-root field name for an entity and operation kind.
#[must_use]
pub fn operation_field_name(entity: &str, kind: OperationKind) -> String {
    let suffix = match kind {
        OperationKind::Create => "Create",
        OperationKind::Update => "Update",
        OperationKind::Delete => "Delete",
    };
    format!("{entity}{suffix}")
}

/// Derives the query-root single-record field name for an entity.
#[must_use]
pub fn read_field_name(entity: &str) -> String {
    format!("{entity}ById")
}

/// Builds the `Query` root type with listing and single-record fields for
/// every entity.
#[must_use]
pub fn build_query_root(models: &ModelSet) -> Object {
    let mut query = Object::new("Query");

    for entity in retained(models) {
        query = query.field(listing_field(models, entity));
        query = query.field(read_field(entity));
        trace!(entity = %entity.name, "Added query root fields");
    }

    query
}

/// Builds the `Mutation` root type with create/update/delete fields for
/// every entity.
#[must_use]
pub fn build_mutation_root(models: &ModelSet) -> Object {
    let mut mutation = Object::new("Mutation");

    for entity in retained(models) {
        let name = entity.name.as_str();
        let input = input_type_name(name);

        mutation = mutation.field(
            Field::new(
                operation_field_name(name, OperationKind::Create),
                TypeRef::named(name),
                CreateResolver::resolve(name.to_string()),
            )
            .argument(InputValue::new(name, TypeRef::named_nn(input.as_str())))
            .description(format!("Create a {name}")),
        );

        mutation = mutation.field(
            Field::new(
                operation_field_name(name, OperationKind::Update),
                TypeRef::named(name),
                UpdateResolver::resolve(name.to_string()),
            )
            .argument(InputValue::new(name, TypeRef::named_nn(input.as_str())))
            .description(format!("Update a {name}")),
        );

        mutation = mutation.field(
            Field::new(
                operation_field_name(name, OperationKind::Delete),
                TypeRef::named_nn(TypeRef::INT),
                DeleteResolver::resolve(name.to_string()),
            )
            .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::INT)))
            .description(format!("Delete a {name}")),
        );

        trace!(entity = %name, "Added mutation root fields");
    }

    mutation
}

/// The per-entity listing field: bare entity name, list-typed, with one
/// equality-filter argument per attribute plus the standard control
/// arguments.
fn listing_field(models: &ModelSet, entity: &EntityDef) -> Field {
    let name = entity.name.as_str();

    let mut field = Field::new(
        name,
        TypeRef::named_nn_list_nn(name),
        ListResolver::resolve(name.to_string()),
    )
    .description(format!("List {name} records"));

    field = field.argument(InputValue::new("id", TypeRef::named(TypeRef::INT)));
    for (attr_name, attr) in &entity.attributes {
        if attr_name == "id" {
            continue;
        }
        field = field.argument(InputValue::new(
            attr_name,
            scalar_type_ref(attr.scalar, true),
        ));
    }
    for key in models.foreign_key_columns(entity) {
        field = field.argument(InputValue::new(key, TypeRef::named(TypeRef::INT)));
    }

    field
        .argument(InputValue::new("limit", TypeRef::named(TypeRef::INT)))
        .argument(InputValue::new("offset", TypeRef::named(TypeRef::INT)))
        .argument(InputValue::new("order", TypeRef::named(TypeRef::STRING)))
}

/// The per-entity single-record field.
fn read_field(entity: &EntityDef) -> Field {
    let name = entity.name.as_str();

    Field::new(
        read_field_name(name),
        TypeRef::named(name),
        ReadResolver::resolve(name.to_string()),
    )
    .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::INT)))
    .description(format!("Read a single {name} record by ID"))
}
