//! # graphloom-sdl
//!
//! SDL compiler and thunk resolution engine for GraphLoom schema
//! composition.
//!
//! This crate drives the type model in `graphloom-core`: it compiles SDL
//! fragments into named type definitions, resolves type references
//! (rebuilding `List`/`NonNull` wrapper chains around registry lookups,
//! with output/input capability checks), and resolves deferred entries
//! in composed field maps, restoring them to deferred form on demand.
//!
//! ## Overview
//!
//! Application code compiles SDL fragments to populate a caller-owned
//! [`TypeRegistry`](graphloom_core::TypeRegistry), composes higher-level
//! field maps (possibly thunking types that are not declared yet), and
//! hands those maps to the thunk engine, which calls back into type
//! resolution to materialize concrete types:
//!
//! ```
//! use graphloom_core::TypeRegistry;
//! use graphloom_sdl::{compile_type_fragment, get_wrapped};
//!
//! let mut registry = TypeRegistry::new();
//! compile_type_fragment(&mut registry, "type IntRange { min: Int, max: Int }")?;
//!
//! let range = get_wrapped(&registry, "[IntRange!]")?;
//! assert_eq!(range.unwrap().to_string(), "[IntRange!]");
//! # Ok::<(), graphloom_core::SchemaError>(())
//! ```
//!
//! ## Modules
//!
//! - [`expr`] - Type-reference expressions
//! - [`mapper`] - SDL compilation and type resolution
//! - [`directives`] - Directive extraction helpers
//! - [`values`] - Default-value literal coercion
//! - [`thunk`] - The thunk resolution engine

pub mod directives;
pub mod expr;
pub mod mapper;
pub mod thunk;
pub mod values;

// Re-export main types
pub use directives::DEFAULT_DEPRECATION_REASON;
pub use expr::TypeExpr;
pub use mapper::{
    TypeSource, coerce_input_type, coerce_output_type, compile_type_fragment, get_wrapped,
    produce_input_type, produce_interface_type, produce_output_type, produce_type,
    resolve_type_expr,
};
pub use thunk::{
    InputFieldConfig, InputFieldEntry, InputFieldMap, InputFieldThunk, OutputFieldConfig,
    OutputFieldEntry, OutputFieldMap, OutputFieldThunk, TypeSlot, TypeThunk,
    resolve_input_field_map, resolve_output_field_map, restore_input_field_map,
    restore_output_field_map,
};
pub use values::value_from_literal;
