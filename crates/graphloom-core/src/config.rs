//! Schema-build options.
//!
//! Options apply to one build session (one [`TypeRegistry`]); there is no
//! process-wide configuration. Options can be embedded in a host
//! application's configuration file under a `[schema]` table.
//!
//! # Example Configuration
//!
//! ```toml
//! [schema]
//! seed_builtin_scalars = true
//! ```
//!
//! [`TypeRegistry`]: crate::registry::TypeRegistry

use serde::{Deserialize, Serialize};

/// Options for a schema-build session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaOptions {
    /// Seed the registry with the five built-in scalar types
    /// (`String`, `Int`, `Float`, `Boolean`, `ID`) at construction,
    /// before any SDL is compiled.
    /// Default: true
    #[serde(default = "default_seed_builtin_scalars")]
    pub seed_builtin_scalars: bool,
}

fn default_seed_builtin_scalars() -> bool {
    true
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            seed_builtin_scalars: default_seed_builtin_scalars(),
        }
    }
}
