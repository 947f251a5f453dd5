//! Create mutation resolver.
//!
//! Handles `<Entity>Create` mutations. The payload argument is named after
//! the entity and typed with the entity's input type.

use async_graphql::dynamic::{FieldFuture, ResolverContext};
use tracing::{debug, warn};

use super::{get_graphql_context, json_to_graphql_value, store_error_to_graphql, value_accessor_to_json};

/// Resolver for record creation mutations.
///
/// Handles mutations like:
/// ```graphql
/// mutation {
///   UserCreate(User: {firstName: "Ada"}) {
///     id
///     firstName
///   }
/// }
/// ```
pub struct CreateResolver;

impl CreateResolver {
    /// Creates a resolver for record creation.
    pub fn resolve(
        entity: String,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let entity = entity.clone();
            FieldFuture::new(async move {
                debug!(entity = %entity, "Processing create mutation");

                let gql_ctx = get_graphql_context(&ctx)?;

                let input = ctx.args.get(entity.as_str()).ok_or_else(|| {
                    async_graphql::Error::new(format!("Missing required argument '{entity}'"))
                })?;
                let payload = value_accessor_to_json(&input)?;

                let record = gql_ctx.store.create(&entity, &payload).await.map_err(|e| {
                    warn!(error = %e, entity = %entity, "Create failed");
                    store_error_to_graphql(e)
                })?;

                debug!(entity = %entity, id = record.id, "Record created");

                Ok(Some(json_to_graphql_value(record.values)))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CreateResolver;

    #[test]
    fn test_create_resolver_created() {
        let _resolver = CreateResolver::resolve("User".to_string());
    }
}
