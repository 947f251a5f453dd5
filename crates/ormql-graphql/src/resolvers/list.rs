//! Root listing resolver.
//!
//! Implements resolvers for the per-entity query-root fields, e.g.
//! `User(firstName: "Ada", limit: 10, order: "-lastName")`.

use async_graphql::Value;
use async_graphql::dynamic::{FieldFuture, ResolverContext};
use ormql_model::ListParams;
use tracing::{debug, warn};

use super::{get_graphql_context, json_to_graphql_value, store_error_to_graphql, value_accessor_to_json};

/// Resolver for listing operations.
pub struct ListResolver;

impl ListResolver {
    /// Creates a resolver function for listing records of one entity.
    pub fn resolve(
        entity: String,
    ) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
        move |ctx| {
            let entity = entity.clone();
            FieldFuture::new(async move {
                let gql_ctx = get_graphql_context(&ctx)?;

                let params = build_list_params(&ctx)?;

                debug!(entity = %entity, params = ?params, "Resolving listing query");

                let records = gql_ctx
                    .store
                    .find_all(&entity, &params)
                    .await
                    .map_err(|e| {
                        warn!(error = %e, entity = %entity, "Store error during listing");
                        store_error_to_graphql(e)
                    })?;

                let entries: Vec<Value> = records
                    .into_iter()
                    .map(|record| json_to_graphql_value(record.values))
                    .collect();

                debug!(entity = %entity, count = entries.len(), "Listing completed");

                Ok(Some(Value::List(entries)))
            })
        }
    }
}

/// Builds listing parameters from GraphQL arguments.
///
/// `limit`, `offset`, and `order` are control arguments; everything else is
/// an equality filter on the attribute of the same name. Sort fields are
/// comma-separated, with a `-` prefix selecting descending order.
fn build_list_params(ctx: &ResolverContext<'_>) -> Result<ListParams, async_graphql::Error> {
    let mut params = ListParams::new();

    for (key, value) in ctx.args.iter() {
        match key.as_str() {
            "limit" => {
                if let Ok(n) = value.i64() {
                    params = params.with_limit(n.max(0) as u64);
                }
            }
            "offset" => {
                if let Ok(n) = value.i64() {
                    params = params.with_offset(n.max(0) as u64);
                }
            }
            "order" => {
                if let Ok(s) = value.string() {
                    for sort_field in s.split(',') {
                        let sort_field = sort_field.trim();
                        if let Some(field) = sort_field.strip_prefix('-') {
                            params = params.with_sort(field, true);
                        } else if !sort_field.is_empty() {
                            params = params.with_sort(sort_field, false);
                        }
                    }
                }
            }
            _ => {
                let filter_value = value_accessor_to_json(&value)?;
                params = params.with_filter(key.as_str(), filter_value);
            }
        }
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::ListResolver;

    #[test]
    fn test_list_resolver_created() {
        let _resolver = ListResolver::resolve("User".to_string());
    }
}
