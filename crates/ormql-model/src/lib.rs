//! # ormql-model
//!
//! Entity model and data-access abstraction for OrmQL.
//!
//! This crate defines the two contracts the schema derivation layer in
//! `ormql-graphql` is built against:
//!
//! - the **model description**: [`EntityDef`], [`RelationshipDef`], and
//!   [`ModelSet`] describe which entities exist, their scalar attributes,
//!   and their cardinality-tagged associations;
//! - the **data-access trait**: [`ModelStore`] provides the five primitive
//!   operations (`find_all`, `find_one`, `create`, `update`, `destroy`)
//!   that derived root operations and relationship fields delegate to.
//!
//! An in-memory backend, [`MemoryStore`], is included for tests and
//! embedders without a persistent store.
//!
//! ## Example
//!
//! ```ignore
//! use ormql_model::{EntityDef, MemoryStore, ModelSet, ScalarType};
//!
//! let models = ModelSet::new()
//!     .define(
//!         EntityDef::new("User")
//!             .attr("firstName", ScalarType::String)
//!             .belongs_to("Department"),
//!     )
//!     .define(EntityDef::new("Department").attr("name", ScalarType::String));
//!
//! let store = MemoryStore::shared(models);
//! ```

mod entity;
mod error;
mod memory;
mod traits;
mod types;

pub use entity::{AttributeDef, Cardinality, EntityDef, ModelSet, RelationshipDef, ScalarType};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use traits::{DynStore, ModelStore};
pub use types::{ListParams, Record, SortParam};

/// Type alias for a store result.
pub type StoreResult<T> = Result<T, StoreError>;
