//! Data types exchanged with store implementations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

/// A record as returned by a store.
///
/// `values` is the full record as a JSON object, including the `id`,
/// `createdAt`, and `updatedAt` fields the store maintains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// The record identifier.
    pub id: i64,
    /// The entity this record belongs to.
    pub entity: String,
    /// The record content as JSON.
    pub values: Value,
    /// When the record was last written.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// When the record was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Record {
    /// Creates a new `Record` stamped with the current time.
    #[must_use]
    pub fn new(id: i64, entity: impl Into<String>, values: Value) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id,
            entity: entity.into(),
            values,
            updated_at: now,
            created_at: now,
        }
    }

    /// Returns a copy with new content and a fresh `updated_at` stamp.
    #[must_use]
    pub fn with_values(&self, values: Value) -> Self {
        Self {
            id: self.id,
            entity: self.entity.clone(),
            values,
            updated_at: OffsetDateTime::now_utc(),
            created_at: self.created_at,
        }
    }

    /// Reads a field from the record content.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Parameters for a listing query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    /// Equality filters, keyed by attribute name.
    pub filters: IndexMap<String, Value>,
    /// Maximum number of records to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Number of records to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Sort parameters, applied in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<SortParam>>,
}

impl ListParams {
    /// Creates new empty `ListParams`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality filter.
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Sets the limit parameter.
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the offset parameter.
    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Adds a sort parameter.
    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, descending: bool) -> Self {
        self.sort
            .get_or_insert_with(Vec::new)
            .push(SortParam::new(field, descending));
        self
    }

    /// Returns `true` if no filters are set.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty()
    }
}

/// A sort parameter for listing results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortParam {
    /// The field to sort by.
    pub field: String,
    /// Whether to sort in descending order.
    pub descending: bool,
}

impl SortParam {
    /// Creates a new `SortParam`.
    #[must_use]
    pub fn new(field: impl Into<String>, descending: bool) -> Self {
        Self {
            field: field.into(),
            descending,
        }
    }

    /// Creates an ascending sort parameter.
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, false)
    }

    /// Creates a descending sort parameter.
    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serialization() {
        let record = Record::new(1, "User", json!({"id": 1, "firstName": "Ada"}));

        let encoded = serde_json::to_string(&record).expect("serialization failed");
        let decoded: Record = serde_json::from_str(&encoded).expect("deserialization failed");

        assert_eq!(decoded.id, 1);
        assert_eq!(decoded.entity, "User");
        assert_eq!(decoded.field("firstName"), Some(&json!("Ada")));
    }

    #[test]
    fn test_record_with_values_keeps_created_at() {
        let record = Record::new(1, "User", json!({"id": 1}));
        let updated = record.with_values(json!({"id": 1, "bio": "hi"}));

        assert_eq!(updated.created_at, record.created_at);
        assert_eq!(updated.field("bio"), Some(&json!("hi")));
    }

    #[test]
    fn test_list_params_builder() {
        let params = ListParams::new()
            .with_filter("firstName", "Ada")
            .with_filter("DepartmentId", 3)
            .with_limit(10)
            .with_offset(20)
            .with_sort("lastName", true);

        assert_eq!(params.filters["firstName"], json!("Ada"));
        assert_eq!(params.filters["DepartmentId"], json!(3));
        assert_eq!(params.limit, Some(10));
        assert_eq!(params.offset, Some(20));
        assert_eq!(params.sort.as_ref().unwrap().len(), 1);
        assert!(!params.is_unfiltered());
    }

    #[test]
    fn test_sort_param_helpers() {
        assert!(!SortParam::asc("name").descending);
        assert!(SortParam::desc("name").descending);
    }
}
