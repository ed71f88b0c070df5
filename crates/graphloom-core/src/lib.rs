//! # graphloom-core
//!
//! Core type model and named-type registry for GraphLoom schema
//! composition.
//!
//! This crate holds the data plane of a schema build: named type objects
//! (scalar, object, enum, input object, interface), `List`/`NonNull`
//! wrappers, the registry that owns and resolves type names, and the
//! memoizing [`Lazy`](lazy::Lazy) cell that lets possibly-cyclic type
//! graphs be declared in any order. The SDL compiler and the thunk
//! resolution engine that drive this model live in `graphloom-sdl`.
//!
//! ## Overview
//!
//! A build session owns one [`TypeRegistry`]: it is seeded with the
//! built-in scalars, populated by compiled SDL fragments or direct
//! registration, and consulted whenever a deferred field map or interface
//! list is first accessed. Named types are shared as `Arc<NamedType>`;
//! wrapper types are transient values rebuilt per reference.
//!
//! ## Modules
//!
//! - [`config`] - Per-session build options
//! - [`error`] - Error types for schema construction
//! - [`lazy`] - Deferred, memoized evaluation of schema parts
//! - [`registry`] - The name → type store
//! - [`types`] - The type model

pub mod config;
pub mod error;
pub mod lazy;
pub mod registry;
pub mod types;

// Re-export main types
pub use config::SchemaOptions;
pub use error::{SchemaError, TypePosition};
pub use lazy::{Lazy, LazyInit, LazyState};
pub use registry::TypeRegistry;
pub use types::{
    EnumType, EnumValueDefinition, EnumValueMap, FieldDefinition, FieldMap, InputObjectType,
    InputValueDefinition, InputValueMap, InterfaceType, NamedType, ObjectType, ScalarType, Type,
    TypeKind, builtin_scalars,
};

/// Result type for schema construction.
pub type Result<T> = std::result::Result<T, SchemaError>;
