//! The named-type registry.
//!
//! One [`TypeRegistry`] is one schema-build session: the single source of
//! truth for type identity, owned by the caller and threaded explicitly
//! through every compiler and resolver call. Independent sessions never
//! share state.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::config::SchemaOptions;
use crate::types::{NamedType, builtin_scalars};

/// A mutable mapping from type name to named type.
///
/// The registry is the sole owner of named-type lifetime; entries live
/// until they are overwritten or deleted. `set` performs no validation -
/// a name that already exists is rebound (last write wins), and
/// overwriting a built-in scalar is permitted.
#[derive(Debug)]
pub struct TypeRegistry {
    types: IndexMap<String, Arc<NamedType>>,
}

impl TypeRegistry {
    /// Creates a registry seeded with the five built-in scalar types.
    pub fn new() -> Self {
        Self::with_options(&SchemaOptions::default())
    }

    /// Creates a registry configured by `options`.
    pub fn with_options(options: &SchemaOptions) -> Self {
        let mut registry = Self {
            types: IndexMap::new(),
        };
        if options.seed_builtin_scalars {
            registry.add_builtin_scalars();
        }
        registry
    }

    /// Seeds the built-in scalar types. Idempotent: re-seeding rebinds
    /// the same five names.
    pub fn add_builtin_scalars(&mut self) {
        for scalar in builtin_scalars() {
            self.set(scalar.name().to_string(), scalar);
        }
    }

    /// Looks up a type by name.
    pub fn get(&self, name: &str) -> Option<&Arc<NamedType>> {
        self.types.get(name)
    }

    /// Binds `name` to `ty`, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, ty: Arc<NamedType>) {
        let name = name.into();
        if self.types.contains_key(&name) {
            debug!(type_name = %name, "rebinding registered type");
        }
        self.types.insert(name, ty);
    }

    /// Registers `ty` under its own name and returns the shared handle.
    pub fn register(&mut self, ty: impl Into<NamedType>) -> Arc<NamedType> {
        let ty = Arc::new(ty.into());
        self.set(ty.name().to_string(), Arc::clone(&ty));
        ty
    }

    /// Whether `name` is bound.
    pub fn has(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Removes the binding for `name`. Returns whether one existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.types.shift_remove(name).is_some()
    }

    /// The registered names, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry has no types at all.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarType;

    #[test]
    fn test_new_registry_is_seeded() {
        let registry = TypeRegistry::new();
        for name in ["String", "Int", "Float", "Boolean", "ID"] {
            assert!(registry.has(name), "missing built-in scalar {name}");
        }
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_unseeded_registry_is_empty() {
        let options = SchemaOptions {
            seed_builtin_scalars: false,
        };
        let registry = TypeRegistry::with_options(&options);
        assert!(registry.is_empty());
        assert!(!registry.has("String"));
    }

    #[test]
    fn test_set_is_last_write_wins() {
        let mut registry = TypeRegistry::new();
        let replacement = registry.register(ScalarType::new("String").with_description("mine"));
        let looked_up = registry.get("String").unwrap();
        assert!(Arc::ptr_eq(looked_up, &replacement));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_delete() {
        let mut registry = TypeRegistry::new();
        assert!(registry.delete("ID"));
        assert!(!registry.has("ID"));
        assert!(!registry.delete("ID"));
    }

    #[test]
    fn test_keys_in_registration_order() {
        let mut registry = TypeRegistry::new();
        registry.register(ScalarType::new("DateTime"));
        let keys: Vec<&str> = registry.keys().collect();
        assert_eq!(keys, ["String", "Int", "Float", "Boolean", "ID", "DateTime"]);
    }
}
