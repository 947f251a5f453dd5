//! Association field resolver.
//!
//! Resolves relationship fields on output types by fetching the related
//! record(s) from the store, scoped by the relationship's foreign key:
//! belongs-to reads the foreign key off the parent record and looks up the
//! target; has-many lists target records whose foreign key points back at
//! the parent.

use async_graphql::Value;
use async_graphql::dynamic::{FieldFuture, ResolverContext};
use ormql_model::{Cardinality, EntityDef, ListParams, RelationshipDef};
use tracing::{debug, warn};

use super::{get_graphql_context, json_to_graphql_value, parent_field, store_error_to_graphql};

/// Everything an association field needs to fetch its related records.
#[derive(Debug, Clone)]
pub struct RelationLink {
    /// The association name (the field name on the source type).
    pub association: String,
    /// The target entity.
    pub target: String,
    /// The association's cardinality.
    pub cardinality: Cardinality,
    /// The resolved foreign-key column.
    pub foreign_key: String,
}

impl RelationLink {
    /// Builds the link for one association of a source entity.
    #[must_use]
    pub fn new(source: &EntityDef, association: &str, def: &RelationshipDef) -> Self {
        Self {
            association: association.to_string(),
            target: def.target.clone(),
            cardinality: def.cardinality,
            foreign_key: def.resolve_foreign_key(association, &source.name),
        }
    }
}

/// Resolver for association fields on output types.
pub struct RelationResolver;

impl RelationResolver {
    /// Creates a resolver function for one association field.
    pub fn resolve(
        link: RelationLink,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let link = link.clone();
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;

                match link.cardinality {
                    Cardinality::One => {
                        // Nothing to fetch when the foreign key is absent.
                        let foreign_id = match parent_field(&ctx, &link.foreign_key)? {
                            Some(Value::Number(n)) => match n.as_i64() {
                                Some(id) => id,
                                None => return Ok(None),
                            },
                            _ => return Ok(None),
                        };

                        debug!(
                            association = %link.association,
                            target = %link.target,
                            foreign_id,
                            "Resolving belongs-to association"
                        );

                        let record = gql_ctx
                            .store
                            .find_one(&link.target, foreign_id)
                            .await
                            .map_err(|e| {
                                warn!(error = %e, "Store error resolving association");
                                store_error_to_graphql(e)
                            })?;

                        Ok(record.map(|r| json_to_graphql_value(r.values)))
                    }
                    Cardinality::Many => {
                        let parent_id = match parent_field(&ctx, "id")? {
                            Some(Value::Number(n)) => n.as_i64().ok_or_else(|| {
                                async_graphql::Error::new("parent record id is not an integer")
                            })?,
                            _ => {
                                return Err(async_graphql::Error::new(
                                    "parent record is missing an id",
                                ));
                            }
                        };

                        debug!(
                            association = %link.association,
                            target = %link.target,
                            parent_id,
                            "Resolving has-many association"
                        );

                        let params =
                            ListParams::new().with_filter(link.foreign_key.clone(), parent_id);
                        let records = gql_ctx
                            .store
                            .find_all(&link.target, &params)
                            .await
                            .map_err(|e| {
                                warn!(error = %e, "Store error resolving association");
                                store_error_to_graphql(e)
                            })?;

                        let entries: Vec<Value> = records
                            .into_iter()
                            .map(|r| json_to_graphql_value(r.values))
                            .collect();

                        Ok(Some(Value::List(entries)))
                    }
                }
            })
        }
    }
}
