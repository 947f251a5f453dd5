//! Update mutation resolver.
//!
//! Handles `<Entity>Update` mutations. The payload argument carries the
//! record identifier; after the store reports the update, the record is
//! re-fetched and returned through the same path the single-record read
//! uses, so the result's relationship fields resolve like any other record
//! rather than collapsing to a row count.

use async_graphql::dynamic::{FieldFuture, ResolverContext};
use tracing::{debug, warn};

use super::{get_graphql_context, json_to_graphql_value, store_error_to_graphql, value_accessor_to_json};

/// Resolver for record update mutations.
///
/// Handles mutations like:
/// ```graphql
/// mutation {
///   UserUpdate(User: {id: 1, bio: "updated"}) {
///     id
///     bio
///     Department { name }
///   }
/// }
/// ```
pub struct UpdateResolver;

impl UpdateResolver {
    /// Creates a resolver for record updates.
    pub fn resolve(
        entity: String,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let entity = entity.clone();
            FieldFuture::new(async move {
                debug!(entity = %entity, "Processing update mutation");

                let gql_ctx = get_graphql_context(&ctx)?;

                let input = ctx.args.get(entity.as_str()).ok_or_else(|| {
                    async_graphql::Error::new(format!("Missing required argument '{entity}'"))
                })?;
                let payload = value_accessor_to_json(&input)?;

                let id = payload.get("id").and_then(|v| v.as_i64()).ok_or_else(|| {
                    async_graphql::Error::new("Update payload must carry an 'id' field")
                })?;

                let rows = gql_ctx
                    .store
                    .update(&entity, id, &payload)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, entity = %entity, id, "Update failed");
                        store_error_to_graphql(e)
                    })?;

                debug!(entity = %entity, id, rows, "Record updated");

                // Re-fetch so the caller gets a fully resolvable record.
                let record = gql_ctx.store.find_one(&entity, id).await.map_err(|e| {
                    warn!(error = %e, entity = %entity, id, "Re-fetch after update failed");
                    store_error_to_graphql(e)
                })?;

                Ok(record.map(|r| json_to_graphql_value(r.values)))
            })
        }
    }
}
