//! Single-record read resolver.
//!
//! Implements resolvers for queries like `UserById(id: 1)` that fetch a
//! single record by its identifier.

use async_graphql::dynamic::{FieldFuture, ResolverContext};
use tracing::{debug, warn};

use super::{get_graphql_context, json_to_graphql_value, store_error_to_graphql};

/// Resolver for single-record read operations.
pub struct ReadResolver;

impl ReadResolver {
    /// Creates a resolver function for reading a single record by ID.
    pub fn resolve(
        entity: String,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let entity = entity.clone();
            FieldFuture::new(async move {
                let id = ctx
                    .args
                    .get("id")
                    .and_then(|v| v.i64().ok())
                    .ok_or_else(|| async_graphql::Error::new("Missing required argument 'id'"))?;

                debug!(entity = %entity, id, "Resolving single-record read");

                let gql_ctx = get_graphql_context(&ctx)?;

                let record = gql_ctx.store.find_one(&entity, id).await.map_err(|e| {
                    warn!(error = %e, entity = %entity, "Store error reading record");
                    store_error_to_graphql(e)
                })?;

                match record {
                    Some(record) => Ok(Some(json_to_graphql_value(record.values))),
                    None => {
                        // Missing record resolves to null, not an error.
                        debug!(entity = %entity, id, "Record not found");
                        Ok(None)
                    }
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReadResolver;

    #[test]
    fn test_read_resolver_created() {
        let _resolver = ReadResolver::resolve("User".to_string());
    }
}
