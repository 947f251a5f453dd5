//! GraphQL resolvers for derived entity types and root operations.
//!
//! This module provides the resolver implementations wired into the derived
//! schema:
//! - `list`: root listing queries (e.g., `User(firstName: "Ada", limit: 10)`)
//! - `read`: single-record queries (e.g., `UserById(id: 1)`)
//! - `relation`: association fields on output types
//! - `create` / `update` / `delete`: root mutations

mod create;
mod delete;
mod list;
mod read;
mod relation;
mod update;

pub use create::CreateResolver;
pub use delete::DeleteResolver;
pub use list::ListResolver;
pub use read::ReadResolver;
pub use relation::{RelationLink, RelationResolver};
pub use update::UpdateResolver;

use async_graphql::dynamic::{ResolverContext, ValueAccessor};
use async_graphql::{Error as FieldError, Name, Value};
use ormql_model::StoreError;

use crate::context::GraphQLContext;

/// Helper to extract GraphQL context from resolver context.
pub(crate) fn get_graphql_context<'a>(
    ctx: &'a ResolverContext<'_>,
) -> Result<&'a GraphQLContext, FieldError> {
    ctx.data::<GraphQLContext>()
        .map_err(|_| FieldError::new("GraphQL context not available"))
}

/// Reads a field out of the parent record, which resolvers pass down as a
/// GraphQL object value.
pub(crate) fn parent_field(
    ctx: &ResolverContext<'_>,
    name: &str,
) -> Result<Option<Value>, FieldError> {
    let Some(parent) = ctx.parent_value.as_value() else {
        return Err(FieldError::new("parent value is not a record"));
    };
    let Value::Object(record) = parent else {
        return Err(FieldError::new(format!(
            "parent value should be an object, found: {parent}"
        )));
    };
    Ok(record.get(name).cloned())
}

/// Convert a serde_json::Value to async_graphql::Value.
pub(crate) fn json_to_graphql_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                Value::Number(
                    async_graphql::Number::from_f64(f)
                        .unwrap_or_else(|| async_graphql::Number::from(0)),
                )
            } else {
                Value::Null
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::List(arr.into_iter().map(json_to_graphql_value).collect())
        }
        serde_json::Value::Object(obj) => {
            let map: async_graphql::indexmap::IndexMap<Name, Value> = obj
                .into_iter()
                .map(|(k, v)| (Name::new(k), json_to_graphql_value(v)))
                .collect();
            Value::Object(map)
        }
    }
}

/// Converts an argument accessor to serde_json::Value.
pub(crate) fn value_accessor_to_json(
    value: &ValueAccessor<'_>,
) -> Result<serde_json::Value, FieldError> {
    if value.is_null() {
        return Ok(serde_json::Value::Null);
    }

    if let Ok(b) = value.boolean() {
        return Ok(serde_json::Value::Bool(b));
    }

    if let Ok(i) = value.i64() {
        return Ok(serde_json::Value::Number(i.into()));
    }

    if let Ok(f) = value.f64() {
        return Ok(serde_json::json!(f));
    }

    if let Ok(s) = value.string() {
        return Ok(serde_json::Value::String(s.to_string()));
    }

    if let Ok(list) = value.list() {
        let items: Result<Vec<serde_json::Value>, FieldError> =
            list.iter().map(|v| value_accessor_to_json(&v)).collect();
        return Ok(serde_json::Value::Array(items?));
    }

    if let Ok(obj) = value.object() {
        let mut map = serde_json::Map::new();
        for (k, v) in obj.iter() {
            map.insert(k.to_string(), value_accessor_to_json(&v)?);
        }
        return Ok(serde_json::Value::Object(map));
    }

    Ok(serde_json::Value::Null)
}

/// Converts a store error to a GraphQL error with the category in extensions.
pub(crate) fn store_error_to_graphql(error: StoreError) -> FieldError {
    use async_graphql::ErrorExtensions;

    let category = error.category();
    FieldError::new(error.to_string()).extend_with(|_, e| {
        e.set("category", category);
    })
}
