//! Delete mutation resolver.
//!
//! Handles `<Entity>Delete` mutations. The result is the number of records
//! affected (0 or 1), not the deleted record, which no longer exists.

use async_graphql::Value;
use async_graphql::dynamic::{FieldFuture, ResolverContext};
use tracing::{debug, warn};

use super::{get_graphql_context, store_error_to_graphql};

/// Resolver for record delete mutations.
///
/// Handles mutations like:
/// ```graphql
/// mutation {
///   UserDelete(id: 1)
/// }
/// ```
pub struct DeleteResolver;

impl DeleteResolver {
    /// Creates a resolver for record deletion.
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

                debug!(entity = %entity, id, "Processing delete mutation");

                let gql_ctx = get_graphql_context(&ctx)?;

                let rows = gql_ctx.store.destroy(&entity, id).await.map_err(|e| {
                    warn!(error = %e, entity = %entity, id, "Delete failed");
                    store_error_to_graphql(e)
                })?;

                debug!(entity = %entity, id, rows, "Delete completed");

                Ok(Some(Value::Number(rows.into())))
            })
        }
    }
}
