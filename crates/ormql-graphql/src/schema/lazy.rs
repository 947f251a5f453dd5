//! Lazy schema loading.
//!
//! `LazySchema` defers schema building until first access, so an embedding
//! server can start serving before the schema exists. After a successful
//! build the schema is cached; `invalidate()` drops the cache so the next
//! access rebuilds from scratch, which is the only supported way to pick up
//! model changes.

use std::sync::Arc;

use async_graphql::dynamic::Schema;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::error::GraphQLError;

use super::builder::ModelSchemaBuilder;

/// State of the lazy schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// Schema has not been built yet.
    Uninitialized,
    /// Schema is currently being built.
    Building,
    /// Schema is ready for use.
    Ready,
    /// Schema build failed.
    Failed,
}

/// Thread-safe lazy schema holder.
///
/// # Example
///
/// ```ignore
/// let lazy = LazySchema::new(builder);
///
/// // First access triggers the build; later accesses hit the cache.
/// let schema = lazy.get_or_build().await?;
///
/// // Force a rebuild on next access.
/// lazy.invalidate().await;
/// ```
pub struct LazySchema {
    /// The cached schema (None if not built yet or invalidated).
    schema: RwLock<Option<Arc<Schema>>>,

    /// Build lock to ensure only one build at a time.
    build_lock: Mutex<()>,

    /// Current state of the schema.
    state: RwLock<SchemaState>,

    /// The schema builder.
    builder: ModelSchemaBuilder,

    /// Last build error message (for diagnostics).
    last_error: RwLock<Option<String>>,
}

impl LazySchema {
    /// Creates a new lazy schema with the given builder.
    #[must_use]
    pub fn new(builder: ModelSchemaBuilder) -> Self {
        Self {
            schema: RwLock::new(None),
            build_lock: Mutex::new(()),
            state: RwLock::new(SchemaState::Uninitialized),
            builder,
            last_error: RwLock::new(None),
        }
    }

    /// Returns the current state of the schema.
    pub async fn state(&self) -> SchemaState {
        *self.state.read().await
    }

    /// Gets the schema, building it if necessary.
    ///
    /// Concurrent callers wait for an in-progress build and then share its
    /// result.
    ///
    /// # Errors
    ///
    /// Returns the build error if schema derivation fails.
    pub async fn get_or_build(&self) -> Result<Arc<Schema>, GraphQLError> {
        // Fast path: schema already built
        {
            let schema = self.schema.read().await;
            if let Some(ref s) = *schema {
                return Ok(Arc::clone(s));
            }
        }

        let _guard = self.build_lock.lock().await;

        // Double-check after acquiring lock
        {
            let schema = self.schema.read().await;
            if let Some(ref s) = *schema {
                return Ok(Arc::clone(s));
            }
        }

        *self.state.write().await = SchemaState::Building;
        info!("Building GraphQL schema...");

        match self.builder.build() {
            Ok(schema) => {
                let schema = Arc::new(schema);
                *self.schema.write().await = Some(Arc::clone(&schema));
                *self.state.write().await = SchemaState::Ready;
                *self.last_error.write().await = None;
                info!("GraphQL schema built successfully");
                Ok(schema)
            }
            Err(e) => {
                warn!(error = %e, "Failed to build GraphQL schema");
                *self.state.write().await = SchemaState::Failed;
                *self.last_error.write().await = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Gets the schema if it's already built, without triggering a build.
    pub async fn get(&self) -> Option<Arc<Schema>> {
        self.schema.read().await.clone()
    }

    /// Invalidates the cached schema, causing the next `get_or_build()` to
    /// rebuild it.
    pub async fn invalidate(&self) {
        let _guard = self.build_lock.lock().await;

        *self.schema.write().await = None;
        *self.state.write().await = SchemaState::Uninitialized;
        *self.last_error.write().await = None;

        info!("GraphQL schema invalidated - will rebuild on next access");
    }

    /// Returns the last build error, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// Returns whether the schema is ready for use.
    pub async fn is_ready(&self) -> bool {
        *self.state.read().await == SchemaState::Ready
    }
}
