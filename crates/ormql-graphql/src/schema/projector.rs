//! Field projection for entity types.
//!
//! This module turns one entity's metadata into GraphQL fields: scalar
//! attributes become fields of the matching primitive or custom scalar type,
//! associations become fields referencing the target entity's type in the
//! same graph variant. Cross-references are by type name, which is what lets
//! an association point at a type that has not been built yet (including the
//! entity itself); the dynamic schema registry resolves all names when the
//! schema is finalized.
//!
//! Output fields carry resolvers. Input fields are plain `InputValue`s - the
//! host type system has no way to attach behavior to them, which is exactly
//! the contract mutation payloads require.

use async_graphql::dynamic::{Field, FieldFuture, InputValue, TypeRef};
use ormql_model::{Cardinality, EntityDef, ModelSet, ScalarType};

use crate::resolvers::{RelationLink, RelationResolver, parent_field};

use super::graph::input_type_name;

/// Name of the custom scalar for calendar dates.
pub const DATE_SCALAR: &str = "Date";
/// Name of the custom scalar for RFC 3339 instants.
pub const DATETIME_SCALAR: &str = "DateTime";
/// Name of the custom scalar for string-encoded UUIDs.
pub const UUID_SCALAR: &str = "Uuid";
/// Name of the custom scalar for arbitrary JSON documents.
pub const JSON_SCALAR: &str = "Json";

/// Maps a scalar attribute type to a GraphQL type reference.
pub(crate) fn scalar_type_ref(scalar: ScalarType, nullable: bool) -> TypeRef {
    let name = scalar_name(scalar);
    if nullable {
        TypeRef::named(name)
    } else {
        TypeRef::named_nn(name)
    }
}

fn scalar_name(scalar: ScalarType) -> &'static str {
    match scalar {
        ScalarType::String | ScalarType::Text => TypeRef::STRING,
        ScalarType::Integer => TypeRef::INT,
        ScalarType::Float => TypeRef::FLOAT,
        ScalarType::Boolean => TypeRef::BOOLEAN,
        ScalarType::Date => DATE_SCALAR,
        ScalarType::DateTime => DATETIME_SCALAR,
        ScalarType::Uuid => UUID_SCALAR,
        ScalarType::Json => JSON_SCALAR,
    }
}

/// Creates an output field that reads one attribute off the parent record.
fn record_field(name: &str, ty: TypeRef) -> Field {
    let field_name = name.to_string();
    Field::new(name, ty, move |ctx| {
        let field_name = field_name.clone();
        FieldFuture::new(async move { parent_field(&ctx, &field_name) })
    })
}

/// Projects the entity's scalar attributes into output fields.
///
/// Every output type carries the store-maintained `id`, `createdAt`, and
/// `updatedAt` fields plus one `Int` field per materialized foreign-key
/// column, in addition to the declared attributes; a declared attribute of
/// the same name takes precedence.
pub(crate) fn attribute_fields(models: &ModelSet, entity: &EntityDef) -> Vec<Field> {
    let mut fields = Vec::with_capacity(entity.attributes.len() + 3);

    if !entity.attributes.contains_key("id") {
        fields.push(record_field("id", TypeRef::named_nn(TypeRef::INT)));
    }

    for (name, attr) in &entity.attributes {
        fields.push(record_field(name, scalar_type_ref(attr.scalar, attr.nullable)));
    }

    for key in models.foreign_key_columns(entity) {
        fields.push(record_field(&key, TypeRef::named(TypeRef::INT)));
    }

    for stamp in ["createdAt", "updatedAt"] {
        if !entity.attributes.contains_key(stamp) {
            fields.push(record_field(stamp, TypeRef::named(DATETIME_SCALAR)));
        }
    }

    fields
}

/// Projects the entity's scalar attributes into input fields.
///
/// Input fields are always nullable so mutation payloads can stay partial;
/// the `id` field carries the update target's identifier, and belongs-to
/// foreign keys are writable so payloads can link records.
pub(crate) fn attribute_inputs(models: &ModelSet, entity: &EntityDef) -> Vec<InputValue> {
    let mut inputs = Vec::with_capacity(entity.attributes.len() + 1);

    if !entity.attributes.contains_key("id") {
        inputs.push(InputValue::new("id", TypeRef::named(TypeRef::INT)));
    }

    for (name, attr) in &entity.attributes {
        inputs.push(InputValue::new(name, scalar_type_ref(attr.scalar, true)));
    }

    for key in models.foreign_key_columns(entity) {
        inputs.push(InputValue::new(key, TypeRef::named(TypeRef::INT)));
    }

    inputs
}

/// Projects the entity's associations into output fields.
///
/// A `Many` association is a list of the target's output type, a `One`
/// association the bare type. Each field resolves through the store, scoped
/// by the association's foreign key.
pub(crate) fn association_fields(entity: &EntityDef) -> Vec<Field> {
    entity
        .relationships
        .iter()
        .map(|(association, rel)| {
            let ty = match rel.cardinality {
                Cardinality::One => TypeRef::named(rel.target.as_str()),
                Cardinality::Many => TypeRef::named_nn_list_nn(rel.target.as_str()),
            };
            let link = RelationLink::new(entity, association, rel);
            Field::new(association, ty, RelationResolver::resolve(link))
        })
        .collect()
}

/// Projects the entity's associations into input fields.
///
/// Input associations reference the target's input type and carry no
/// resolution behavior; they are shape only.
pub(crate) fn association_inputs(entity: &EntityDef) -> Vec<InputValue> {
    entity
        .relationships
        .iter()
        .map(|(association, rel)| {
            let target_input = input_type_name(&rel.target);
            let ty = match rel.cardinality {
                Cardinality::One => TypeRef::named(target_input),
                Cardinality::Many => TypeRef::named_list(target_input),
            };
            InputValue::new(association, ty)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_type_refs() {
        assert_eq!(
            scalar_type_ref(ScalarType::String, true).to_string(),
            "String"
        );
        assert_eq!(
            scalar_type_ref(ScalarType::String, false).to_string(),
            "String!"
        );
        assert_eq!(
            scalar_type_ref(ScalarType::Integer, false).to_string(),
            "Int!"
        );
        assert_eq!(scalar_type_ref(ScalarType::Text, true).to_string(), "String");
        assert_eq!(
            scalar_type_ref(ScalarType::DateTime, true).to_string(),
            "DateTime"
        );
        assert_eq!(scalar_type_ref(ScalarType::Json, true).to_string(), "Json");
    }

    #[test]
    fn test_attribute_projection_counts() {
        let models = ModelSet::new().define(
            EntityDef::new("User")
                .attr("firstName", ScalarType::String)
                .attr("bio", ScalarType::Text),
        );
        let user = models.get("User").unwrap();

        // id + 2 attributes + createdAt + updatedAt
        assert_eq!(attribute_fields(&models, user).len(), 5);
        // id + 2 attributes
        assert_eq!(attribute_inputs(&models, user).len(), 3);
    }

    #[test]
    fn test_belongs_to_materializes_foreign_key() {
        let models = ModelSet::new()
            .define(
                EntityDef::new("User")
                    .attr("firstName", ScalarType::String)
                    .belongs_to("Department"),
            )
            .define(EntityDef::new("Department").attr("name", ScalarType::String));
        let user = models.get("User").unwrap();

        // id + firstName + DepartmentId + createdAt + updatedAt
        assert_eq!(attribute_fields(&models, user).len(), 5);
        // id + firstName + DepartmentId
        assert_eq!(attribute_inputs(&models, user).len(), 3);
    }

    #[test]
    fn test_association_projection_counts() {
        let user = EntityDef::new("User")
            .attr("firstName", ScalarType::String)
            .belongs_to("Department")
            .has_many("Torrent");

        assert_eq!(association_fields(&user).len(), 2);
        assert_eq!(association_inputs(&user).len(), 2);
    }

    #[test]
    fn test_zero_relationship_entity_projects_attributes_only() {
        let plain = EntityDef::new("Note").attr("body", ScalarType::Text);
        assert!(association_fields(&plain).is_empty());
        assert!(association_inputs(&plain).is_empty());
    }
}
