//! The data-access trait implemented by store backends.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
use crate::types::{ListParams, Record};

/// The data-access contract the API derivation layer is wired to.
///
/// A store serves the entities of one [`ModelSet`](crate::ModelSet); every
/// operation is scoped by entity name. Implementations must be thread-safe
/// (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// use ormql_model::{ModelStore, ListParams, StoreError};
///
/// async fn department_heads(store: &dyn ModelStore) -> Result<usize, StoreError> {
///     let params = ListParams::new().with_filter("role", "head");
///     let records = store.find_all("User", &params).await?;
///     Ok(records.len())
/// }
/// ```
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// Lists records of an entity, honoring filters, sort, limit, and offset.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownEntity` if the entity is not served by
    /// this store.
    async fn find_all(&self, entity: &str, params: &ListParams) -> Result<Vec<Record>, StoreError>;

    /// Reads a single record by identifier.
    ///
    /// Returns `None` if the record does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown entities or infrastructure failures,
    /// never for a missing record.
    async fn find_one(&self, entity: &str, id: i64) -> Result<Option<Record>, StoreError>;

    /// Creates a record from a JSON payload and returns it.
    ///
    /// The payload must be a JSON object; the store assigns the identifier
    /// and stamps `createdAt`/`updatedAt`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidPayload` if the payload is not an object.
    /// Returns `StoreError::Conflict` on constraint violations.
    async fn create(&self, entity: &str, payload: &Value) -> Result<Record, StoreError>;

    /// Updates the record with the given identifier from a JSON payload.
    ///
    /// Only the fields present in the payload are written. Returns the
    /// number of records affected (0 if no record has that identifier).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidPayload` if the payload is not an object.
    async fn update(&self, entity: &str, id: i64, payload: &Value) -> Result<u64, StoreError>;

    /// Deletes the record with the given identifier.
    ///
    /// Returns the number of records affected (0 or 1).
    async fn destroy(&self, entity: &str, id: i64) -> Result<u64, StoreError>;
}

/// Type alias for a shareable store trait object.
pub type DynStore = std::sync::Arc<dyn ModelStore>;

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time test that ModelStore is object-safe
    fn _assert_store_object_safe(_: &dyn ModelStore) {}
}
