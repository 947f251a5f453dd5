//! GraphQL execution context.
//!
//! The context holds the dependencies resolvers need while the execution
//! engine walks a query. It is constructed per request and attached to the
//! request via `async-graphql`'s data system.
//!
//! # Example
//!
//! ```ignore
//! use ormql_graphql::GraphQLContextBuilder;
//!
//! let context = GraphQLContextBuilder::new()
//!     .with_store(store.clone())
//!     .with_request_id("req-123")
//!     .build()?;
//!
//! let response = schema
//!     .execute(async_graphql::Request::new(query).data(context))
//!     .await;
//! ```

use ormql_model::DynStore;

/// GraphQL execution context.
///
/// Designed to be `Clone` and `Send + Sync`; shared state sits behind `Arc`.
#[derive(Clone)]
pub struct GraphQLContext {
    /// The data-access backend all resolvers delegate to.
    pub store: DynStore,

    /// Request ID for tracing and correlation.
    pub request_id: String,
}

impl GraphQLContext {
    /// Creates a new builder for `GraphQLContext`.
    #[must_use]
    pub fn builder() -> GraphQLContextBuilder {
        GraphQLContextBuilder::default()
    }
}

/// Builder for constructing `GraphQLContext`.
#[derive(Default)]
pub struct GraphQLContextBuilder {
    store: Option<DynStore>,
    request_id: Option<String>,
}

impl GraphQLContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the store backend.
    #[must_use]
    pub fn with_store(mut self, store: DynStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the request ID.
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Builds the `GraphQLContext`.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<GraphQLContext, ContextBuilderError> {
        let store = self
            .store
            .ok_or(ContextBuilderError::MissingField("store"))?;

        let request_id = self
            .request_id
            .ok_or(ContextBuilderError::MissingField("request_id"))?;

        Ok(GraphQLContext { store, request_id })
    }
}

/// Errors that can occur when building a `GraphQLContext`.
#[derive(Debug, thiserror::Error)]
pub enum ContextBuilderError {
    /// A required field was not provided.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ormql_model::{MemoryStore, ModelSet};

    #[test]
    fn test_builder_missing_store() {
        let result = GraphQLContextBuilder::new()
            .with_request_id("req-123")
            .build();

        assert!(matches!(
            result,
            Err(ContextBuilderError::MissingField("store"))
        ));
    }

    #[test]
    fn test_builder_missing_request_id() {
        let result = GraphQLContextBuilder::new()
            .with_store(MemoryStore::shared(ModelSet::new()))
            .build();

        assert!(matches!(
            result,
            Err(ContextBuilderError::MissingField("request_id"))
        ));
    }

    #[test]
    fn test_builder_complete() {
        let context = GraphQLContextBuilder::new()
            .with_store(MemoryStore::shared(ModelSet::new()))
            .with_request_id("req-123")
            .build()
            .unwrap();

        assert_eq!(context.request_id, "req-123");
    }
}
