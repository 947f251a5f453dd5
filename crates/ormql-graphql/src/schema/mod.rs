//! Schema derivation and lazy loading.
//!
//! ## Components
//!
//! - [`projector`](self) - projects one entity's attributes and associations
//!   into GraphQL fields (output and input variants)
//! - [`build_graphs`] - assembles the parallel output/input type graphs
//! - [`ModelSchemaBuilder`] - derives the complete schema, roots included
//! - [`LazySchema`] - thread-safe deferred schema holder with invalidation
//!
//! ## Architecture
//!
//! Derivation runs in one pass over the model set. Association fields
//! reference their target types by name, so the graphs tolerate self- and
//! mutual references without ordering or placeholder types; the dynamic
//! schema registry checks every name when the schema is finalized.

mod builder;
mod graph;
mod lazy;
mod projector;
mod roots;

pub use builder::{ModelSchemaBuilder, SchemaBuilderConfig};
pub use graph::{TypeGraphs, build_graphs, input_type_name};
pub use lazy::{LazySchema, SchemaState};
pub use projector::{DATE_SCALAR, DATETIME_SCALAR, JSON_SCALAR, UUID_SCALAR};
pub use roots::{
    OperationKind, build_mutation_root, build_query_root, operation_field_name, read_field_name,
};
