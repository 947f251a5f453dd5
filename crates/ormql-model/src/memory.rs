//! In-memory store backend.
//!
//! This module provides an in-memory implementation of the [`ModelStore`]
//! trait, used by the test suites and by embedders that do not need a
//! persistent backend. Records live in per-entity ordered maps behind a
//! `tokio` read-write lock; identifiers are per-entity sequences.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::RwLock;
use tracing::debug;

use crate::entity::ModelSet;
use crate::error::StoreError;
use crate::traits::{DynStore, ModelStore};
use crate::types::{ListParams, Record, SortParam};

/// Rows and identifier sequence for one entity.
#[derive(Debug, Default)]
struct EntityTable {
    rows: BTreeMap<i64, Record>,
    next_id: i64,
}

impl EntityTable {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory implementation of [`ModelStore`].
///
/// # Example
///
/// ```ignore
/// use ormql_model::{EntityDef, MemoryStore, ModelSet, ModelStore, ScalarType};
///
/// let models = ModelSet::new()
///     .define(EntityDef::new("User").attr("firstName", ScalarType::String));
/// let store = MemoryStore::new(models);
///
/// let created = store.create("User", &serde_json::json!({"firstName": "Ada"})).await?;
/// ```
pub struct MemoryStore {
    /// Writable columns per entity: declared attributes plus materialized
    /// foreign keys. `id` and the timestamps are store-managed and never
    /// writable through payloads.
    columns: HashMap<String, std::collections::HashSet<String>>,
    data: RwLock<HashMap<String, EntityTable>>,
}

impl MemoryStore {
    /// Creates an empty store serving the given model set.
    #[must_use]
    pub fn new(models: ModelSet) -> Self {
        let columns = models
            .entities()
            .map(|entity| {
                let mut set: std::collections::HashSet<String> =
                    entity.attributes.keys().cloned().collect();
                set.extend(models.foreign_key_columns(entity));
                (entity.name.clone(), set)
            })
            .collect();
        let data = models
            .names()
            .map(|name| (name.to_string(), EntityTable::default()))
            .collect();
        Self {
            columns,
            data: RwLock::new(data),
        }
    }

    /// Creates an empty store and wraps it in a [`DynStore`].
    #[must_use]
    pub fn shared(models: ModelSet) -> DynStore {
        std::sync::Arc::new(Self::new(models))
    }

    fn writable_columns(
        &self,
        entity: &str,
    ) -> Result<&std::collections::HashSet<String>, StoreError> {
        self.columns
            .get(entity)
            .ok_or_else(|| StoreError::unknown_entity(entity))
    }

    /// Copies the entity's writable columns out of a payload, dropping
    /// everything else.
    fn projected_fields(
        &self,
        entity: &str,
        payload: &Value,
    ) -> Result<Map<String, Value>, StoreError> {
        let columns = self.writable_columns(entity)?;
        let source = payload
            .as_object()
            .ok_or_else(|| StoreError::invalid_payload("expected a JSON object"))?;

        let mut fields = Map::new();
        for (key, value) in source {
            if columns.contains(key) {
                fields.insert(key.clone(), value.clone());
            }
        }
        Ok(fields)
    }
}

fn rfc3339(ts: OffsetDateTime) -> Value {
    Value::String(ts.format(&Rfc3339).unwrap_or_default())
}

/// Total order over JSON values for sorting: null < bool < number < string,
/// anything else compares by its serialized form.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (x, y) => x.to_string().cmp(&y.to_string()),
    }
}

fn sort_records(records: &mut [Record], sort: &[SortParam]) {
    records.sort_by(|a, b| {
        for param in sort {
            let left = a.field(&param.field).unwrap_or(&Value::Null);
            let right = b.field(&param.field).unwrap_or(&Value::Null);
            let ordering = compare_values(left, right);
            let ordering = if param.descending {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.id.cmp(&b.id)
    });
}

#[async_trait]
impl ModelStore for MemoryStore {
    async fn find_all(&self, entity: &str, params: &ListParams) -> Result<Vec<Record>, StoreError> {
        self.writable_columns(entity)?;
        let guard = self.data.read().await;
        let table = guard
            .get(entity)
            .ok_or_else(|| StoreError::unknown_entity(entity))?;

        let mut records: Vec<Record> = table
            .rows
            .values()
            .filter(|record| {
                params.filters.iter().all(|(key, expected)| {
                    record.field(key).unwrap_or(&Value::Null) == expected
                })
            })
            .cloned()
            .collect();

        if let Some(ref sort) = params.sort {
            sort_records(&mut records, sort);
        }

        let offset = params.offset.unwrap_or(0) as usize;
        let records: Vec<Record> = match params.limit {
            Some(limit) => records.into_iter().skip(offset).take(limit as usize).collect(),
            None => records.into_iter().skip(offset).collect(),
        };

        Ok(records)
    }

    async fn find_one(&self, entity: &str, id: i64) -> Result<Option<Record>, StoreError> {
        self.writable_columns(entity)?;
        let guard = self.data.read().await;
        Ok(guard
            .get(entity)
            .and_then(|table| table.rows.get(&id))
            .cloned())
    }

    async fn create(&self, entity: &str, payload: &Value) -> Result<Record, StoreError> {
        let mut fields = self.projected_fields(entity, payload)?;

        let mut guard = self.data.write().await;
        let table = guard
            .get_mut(entity)
            .ok_or_else(|| StoreError::unknown_entity(entity))?;

        let id = table.allocate_id();
        let now = OffsetDateTime::now_utc();
        fields.insert("id".to_string(), Value::from(id));
        fields.insert("createdAt".to_string(), rfc3339(now));
        fields.insert("updatedAt".to_string(), rfc3339(now));

        let record = Record::new(id, entity, Value::Object(fields));
        table.rows.insert(id, record.clone());

        debug!(entity, id, "record created");
        Ok(record)
    }

    async fn update(&self, entity: &str, id: i64, payload: &Value) -> Result<u64, StoreError> {
        let fields = self.projected_fields(entity, payload)?;

        let mut guard = self.data.write().await;
        let table = guard
            .get_mut(entity)
            .ok_or_else(|| StoreError::unknown_entity(entity))?;

        let Some(existing) = table.rows.get(&id) else {
            return Ok(0);
        };

        let mut values = existing
            .values
            .as_object()
            .cloned()
            .unwrap_or_default();
        for (key, value) in fields {
            values.insert(key, value);
        }
        values.insert("updatedAt".to_string(), rfc3339(OffsetDateTime::now_utc()));

        let updated = existing.with_values(Value::Object(values));
        table.rows.insert(id, updated);

        debug!(entity, id, "record updated");
        Ok(1)
    }

    async fn destroy(&self, entity: &str, id: i64) -> Result<u64, StoreError> {
        self.writable_columns(entity)?;
        let mut guard = self.data.write().await;
        let table = guard
            .get_mut(entity)
            .ok_or_else(|| StoreError::unknown_entity(entity))?;

        let removed = table.rows.remove(&id);
        if removed.is_some() {
            debug!(entity, id, "record destroyed");
        }
        Ok(u64::from(removed.is_some()))
    }
}
