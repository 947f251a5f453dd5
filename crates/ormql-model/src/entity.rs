//! Entity and relationship metadata.
//!
//! This module defines the descriptive side of the model layer: which
//! entities exist, which scalar attributes they carry, and how they relate
//! to each other. The metadata is immutable once assembled into a
//! [`ModelSet`]; consumers derive API surfaces from it but never modify it.

use indexmap::IndexMap;

/// Primitive type of an entity attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Short text.
    String,
    /// Long-form text.
    Text,
    /// 64-bit signed integer.
    Integer,
    /// 64-bit float.
    Float,
    /// Boolean.
    Boolean,
    /// Calendar date without time of day.
    Date,
    /// Instant in time with offset.
    DateTime,
    /// UUID, transported as a string.
    Uuid,
    /// Arbitrary JSON document.
    Json,
}

/// A scalar attribute of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDef {
    /// The attribute's primitive type.
    pub scalar: ScalarType,
    /// Whether the attribute may be null.
    pub nullable: bool,
}

impl AttributeDef {
    /// Creates a nullable attribute of the given scalar type.
    #[must_use]
    pub fn new(scalar: ScalarType) -> Self {
        Self {
            scalar,
            nullable: true,
        }
    }

    /// Marks the attribute as non-nullable.
    #[must_use]
    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Cardinality of a relationship.
///
/// `Many` covers both has-many and many-to-many associations; they are
/// indistinguishable at the API-derivation level, where both become list
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Belongs-to: the source record references a single target record.
    One,
    /// Has-many: the target records reference the source record.
    Many,
}

/// A directed, cardinality-tagged association between two entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDef {
    /// Name of the target entity.
    pub target: String,
    /// Cardinality of the association.
    pub cardinality: Cardinality,
    /// Foreign-key column override. When absent, the conventional key is
    /// used: `<association>Id` on the source for belongs-to, `<source>Id`
    /// on the target for has-many.
    pub foreign_key: Option<String>,
}

impl RelationshipDef {
    /// Creates a belongs-to relationship.
    #[must_use]
    pub fn belongs_to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            cardinality: Cardinality::One,
            foreign_key: None,
        }
    }

    /// Creates a has-many relationship.
    #[must_use]
    pub fn has_many(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            cardinality: Cardinality::Many,
            foreign_key: None,
        }
    }

    /// Overrides the conventional foreign-key column.
    #[must_use]
    pub fn with_foreign_key(mut self, key: impl Into<String>) -> Self {
        self.foreign_key = Some(key.into());
        self
    }

    /// Resolves the foreign-key column this association is scoped by.
    ///
    /// For belongs-to the key lives on the source record; for has-many it
    /// lives on the target records and points back at the source entity.
    #[must_use]
    pub fn resolve_foreign_key(&self, association: &str, source: &str) -> String {
        if let Some(ref key) = self.foreign_key {
            return key.clone();
        }
        match self.cardinality {
            Cardinality::One => format!("{association}Id"),
            Cardinality::Many => format!("{source}Id"),
        }
    }
}

/// A named record kind with attributes and relationships.
///
/// Attribute and relationship order is declaration order, which keeps any
/// serialized schema snapshot stable across rebuilds.
#[derive(Debug, Clone, Default)]
pub struct EntityDef {
    /// The entity name, used as the derived type name.
    pub name: String,
    /// Scalar attributes, keyed by attribute name.
    pub attributes: IndexMap<String, AttributeDef>,
    /// Associations, keyed by association name.
    pub relationships: IndexMap<String, RelationshipDef>,
}

impl EntityDef {
    /// Creates an entity with no attributes or relationships.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            relationships: IndexMap::new(),
        }
    }

    /// Adds a nullable attribute of the given scalar type.
    #[must_use]
    pub fn attr(self, name: impl Into<String>, scalar: ScalarType) -> Self {
        self.attribute(name, AttributeDef::new(scalar))
    }

    /// Adds an attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, def: AttributeDef) -> Self {
        self.attributes.insert(name.into(), def);
        self
    }

    /// Adds a belongs-to association named after the target entity.
    #[must_use]
    pub fn belongs_to(self, target: impl Into<String>) -> Self {
        let target = target.into();
        self.relationship(target.clone(), RelationshipDef::belongs_to(target))
    }

    /// Adds a has-many association named after the target entity.
    #[must_use]
    pub fn has_many(self, target: impl Into<String>) -> Self {
        let target = target.into();
        self.relationship(target.clone(), RelationshipDef::has_many(target))
    }

    /// Adds an association under an explicit name.
    #[must_use]
    pub fn relationship(mut self, association: impl Into<String>, def: RelationshipDef) -> Self {
        self.relationships.insert(association.into(), def);
        self
    }

    /// Returns `true` if the entity declares neither attributes nor
    /// relationships and would therefore project an empty field set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.relationships.is_empty()
    }
}

/// An ordered collection of entities, keyed by entity name.
///
/// This is the unit handed to the schema derivation layer. Iteration order
/// is insertion order.
#[derive(Debug, Clone, Default)]
pub struct ModelSet {
    entities: IndexMap<String, EntityDef>,
}

impl ModelSet {
    /// Creates an empty model set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity, replacing any previous definition of the same name.
    #[must_use]
    pub fn define(mut self, entity: EntityDef) -> Self {
        self.insert(entity);
        self
    }

    /// Adds an entity in place.
    pub fn insert(&mut self, entity: EntityDef) {
        self.entities.insert(entity.name.clone(), entity);
    }

    /// Looks up an entity by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntityDef> {
        self.entities.get(name)
    }

    /// Returns `true` if an entity with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Iterates entities in declaration order.
    pub fn entities(&self) -> impl Iterator<Item = &EntityDef> {
        self.entities.values()
    }

    /// Iterates entity names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the set contains no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Foreign-key columns materialized on an entity's records.
    ///
    /// An entity's own belongs-to associations put their key on its records;
    /// has-many associations put their key on the *target* entity's records,
    /// so those arrive from every entity pointing at this one (including the
    /// entity itself, for self-references). Declared attributes shadow
    /// generated columns of the same name.
    #[must_use]
    pub fn foreign_key_columns(&self, entity: &EntityDef) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();

        for (association, rel) in &entity.relationships {
            if rel.cardinality == Cardinality::One {
                push_column(&mut keys, entity, rel.resolve_foreign_key(association, &entity.name));
            }
        }

        for source in self.entities() {
            for (association, rel) in &source.relationships {
                if rel.cardinality == Cardinality::Many && rel.target == entity.name {
                    push_column(&mut keys, entity, rel.resolve_foreign_key(association, &source.name));
                }
            }
        }

        keys
    }
}

fn push_column(keys: &mut Vec<String>, entity: &EntityDef, key: String) {
    if key != "id" && !entity.attributes.contains_key(&key) && !keys.contains(&key) {
        keys.push(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_builder() {
        let user = EntityDef::new("User")
            .attr("firstName", ScalarType::String)
            .attr("lastName", ScalarType::String)
            .attribute("email", AttributeDef::new(ScalarType::String).non_null())
            .belongs_to("Department");

        assert_eq!(user.name, "User");
        assert_eq!(user.attributes.len(), 3);
        assert!(user.attributes["firstName"].nullable);
        assert!(!user.attributes["email"].nullable);
        assert_eq!(user.relationships["Department"].target, "Department");
        assert_eq!(
            user.relationships["Department"].cardinality,
            Cardinality::One
        );
    }

    #[test]
    fn test_foreign_key_convention() {
        let rel = RelationshipDef::belongs_to("Department");
        assert_eq!(rel.resolve_foreign_key("Department", "User"), "DepartmentId");

        let rel = RelationshipDef::has_many("User");
        assert_eq!(rel.resolve_foreign_key("User", "Department"), "DepartmentId");

        let rel = RelationshipDef::belongs_to("User").with_foreign_key("authorId");
        assert_eq!(rel.resolve_foreign_key("author", "Post"), "authorId");
    }

    #[test]
    fn test_empty_entity() {
        assert!(EntityDef::new("Empty").is_empty());
        assert!(!EntityDef::new("A").attr("x", ScalarType::Integer).is_empty());
        assert!(!EntityDef::new("B").has_many("B").is_empty());
    }

    #[test]
    fn test_model_set_preserves_order() {
        let models = ModelSet::new()
            .define(EntityDef::new("User").attr("name", ScalarType::String))
            .define(EntityDef::new("Department").attr("name", ScalarType::String))
            .define(EntityDef::new("Torrent").attr("magnet", ScalarType::String));

        let names: Vec<&str> = models.names().collect();
        assert_eq!(names, vec!["User", "Department", "Torrent"]);
        assert_eq!(models.len(), 3);
        assert!(models.contains("Torrent"));
        assert!(models.get("Ghost").is_none());
    }

    #[test]
    fn test_foreign_key_columns() {
        let models = ModelSet::new()
            .define(
                EntityDef::new("User")
                    .attr("firstName", ScalarType::String)
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
                    .belongs_to("User"),
            );

        // Own belongs-to key
        let user = models.get("User").unwrap();
        assert_eq!(models.foreign_key_columns(user), vec!["DepartmentId"]);

        // Self-referencing has-many materializes the key on the entity itself
        let department = models.get("Department").unwrap();
        assert_eq!(models.foreign_key_columns(department), vec!["DepartmentId"]);

        let torrent = models.get("Torrent").unwrap();
        assert_eq!(models.foreign_key_columns(torrent), vec!["UserId"]);
    }

    #[test]
    fn test_foreign_key_columns_shadowed_by_attribute() {
        let models = ModelSet::new().define(
            EntityDef::new("User")
                .attr("DepartmentId", ScalarType::Integer)
                .belongs_to("Department"),
        );

        let user = models.get("User").unwrap();
        assert!(models.foreign_key_columns(user).is_empty());
    }

    #[test]
    fn test_redefining_entity_replaces() {
        let models = ModelSet::new()
            .define(EntityDef::new("User").attr("name", ScalarType::String))
            .define(EntityDef::new("User").attr("email", ScalarType::String));

        assert_eq!(models.len(), 1);
        let user = models.get("User").unwrap();
        assert!(user.attributes.contains_key("email"));
        assert!(!user.attributes.contains_key("name"));
    }
}
