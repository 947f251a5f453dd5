//! Integration tests for schema generation.
//!
//! These tests verify the shape of the derived schema through its SDL:
//! type graphs, root operations, and the naming and cardinality policies.

use std::sync::Arc;

use ormql_graphql::{ModelSchemaBuilder, SchemaBuilderConfig};
use ormql_model::{EntityDef, ModelSet, ScalarType};

/// The model set from the original reference scenario: a user belongs to a
/// department, departments nest under departments, torrents belong to users.
fn reference_models() -> Arc<ModelSet> {
    Arc::new(
        ModelSet::new()
            .define(
                EntityDef::new("User")
                    .attr("firstName", ScalarType::String)
                    .attr("lastName", ScalarType::String)
                    .attr("bio", ScalarType::Text)
                    .belongs_to("Department"),
            )
            .define(
                EntityDef::new("Department")
                    .attr("name", ScalarType::String)
                    .has_many("Department"),
            )
            .define(
                EntityDef::new("Torrent")
                    .attr("magnet", ScalarType::String)
                    .attr("name", ScalarType::String)
                    .attr("source", ScalarType::String)
                    .belongs_to("User"),
            ),
    )
}

fn reference_sdl() -> String {
    let builder = ModelSchemaBuilder::new(reference_models(), SchemaBuilderConfig::default());
    builder.build().expect("Schema should build").sdl()
}

#[test]
fn test_query_root_has_one_list_field_per_entity() {
    let sdl = reference_sdl();

    assert!(sdl.contains("type Query"), "Should have Query root");
    for entity in ["User", "Department", "Torrent"] {
        assert!(
            sdl.contains(&format!("): [{entity}!]!")),
            "Query field for {entity} should be list typed"
        );
        assert!(
            sdl.contains(&format!("{entity}ById(id: Int!): {entity}")),
            "Should have a single-record field for {entity}"
        );
    }
}

#[test]
fn test_listing_field_arguments() {
    let sdl = reference_sdl();

    // Bare entity name, filter args per attribute and foreign key, plus the
    // control arguments.
    assert!(
        sdl.contains("User(id: Int, firstName: String, lastName: String, bio: String, DepartmentId: Int, limit: Int, offset: Int, order: String): [User!]!"),
        "User listing field should carry filter and control arguments, got: {sdl}"
    );
}

#[test]
fn test_mutation_root_has_three_fields_per_entity() {
    let sdl = reference_sdl();

    assert!(sdl.contains("type Mutation"), "Should have Mutation root");
    for entity in ["User", "Department", "Torrent"] {
        assert!(
            sdl.contains(&format!("{entity}Create({entity}: {entity}Input!): {entity}")),
            "Should have {entity}Create"
        );
        assert!(
            sdl.contains(&format!("{entity}Update({entity}: {entity}Input!): {entity}")),
            "Should have {entity}Update"
        );
        assert!(
            sdl.contains(&format!("{entity}Delete(id: Int!): Int!")),
            "Should have {entity}Delete returning a row count"
        );
    }
}

#[test]
fn test_output_types_carry_association_fields() {
    let sdl = reference_sdl();

    // belongs-to is the bare target type
    assert!(
        sdl.contains("Department: Department\n"),
        "User should have a singular Department field"
    );
    assert!(
        sdl.contains("User: User\n"),
        "Torrent should have a singular User field"
    );
    // self-referencing has-many is a list of the type itself
    assert!(
        sdl.contains("Department: [Department!]!"),
        "Department should have a self-referencing list field"
    );
}

#[test]
fn test_input_types_mirror_entities_without_behavior() {
    let sdl = reference_sdl();

    for entity in ["User", "Department", "Torrent"] {
        assert!(
            sdl.contains(&format!("input {entity}Input")),
            "Should have {entity}Input"
        );
    }

    // Input fields are nullable, including the identifier and the
    // self-referencing association list.
    assert!(sdl.contains("id: Int\n"), "Input id should be nullable");
    assert!(
        sdl.contains("Department: [DepartmentInput]"),
        "DepartmentInput should reference itself as a nullable list"
    );
    assert!(
        sdl.contains("Department: DepartmentInput"),
        "UserInput should reference DepartmentInput"
    );
}

#[test]
fn test_output_types_expose_store_columns() {
    let sdl = reference_sdl();

    assert!(sdl.contains("id: Int!"), "Output id should be non-null");
    assert!(
        sdl.contains("DepartmentId: Int"),
        "Belongs-to foreign key should be exposed"
    );
    assert!(
        sdl.contains("createdAt: DateTime"),
        "Creation stamp should be exposed"
    );
    assert!(
        sdl.contains("updatedAt: DateTime"),
        "Update stamp should be exposed"
    );
}

#[test]
fn test_custom_scalars_are_registered() {
    let sdl = reference_sdl();

    for scalar in ["Date", "DateTime", "Uuid", "Json"] {
        assert!(
            sdl.contains(&format!("scalar {scalar}")),
            "Schema should register the {scalar} scalar"
        );
    }
}

#[test]
fn test_mutual_references_build_completely() {
    let models = Arc::new(
        ModelSet::new()
            .define(
                EntityDef::new("User")
                    .attr("firstName", ScalarType::String)
                    .belongs_to("Department"),
            )
            .define(
                EntityDef::new("Department")
                    .attr("name", ScalarType::String)
                    .has_many("User"),
            ),
    );
    let builder = ModelSchemaBuilder::new(models, SchemaBuilderConfig::default());

    let sdl = builder.build().expect("Schema should build").sdl();
    assert!(sdl.contains("Department: Department\n"));
    assert!(sdl.contains("User: [User!]!"));
}

#[test]
fn test_zero_relationship_entity_is_attribute_projection() {
    let models = Arc::new(
        ModelSet::new().define(
            EntityDef::new("Note")
                .attr("title", ScalarType::String)
                .attr("body", ScalarType::Text),
        ),
    );
    let builder = ModelSchemaBuilder::new(models, SchemaBuilderConfig::default());

    let sdl = builder.build().expect("Schema should build").sdl();
    let type_block = sdl
        .split("type Note {")
        .nth(1)
        .and_then(|rest| rest.split('}').next())
        .expect("Note type should be in SDL");

    for field in ["id: Int!", "title: String", "body: String"] {
        assert!(type_block.contains(field), "Note should project {field}");
    }
    assert!(
        !type_block.contains('['),
        "Note should have no association fields"
    );
}
