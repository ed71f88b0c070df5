//! Interface types.
//!
//! Interfaces enter a registry by direct registration only; the SDL
//! compiler consumes them (through `implements` lists) but never builds
//! one from a top-level definition.

use super::FieldMap;
use crate::error::SchemaError;
use crate::lazy::Lazy;
use crate::registry::TypeRegistry;

/// An interface type: a named contract of output fields.
#[derive(Debug)]
pub struct InterfaceType {
    name: String,
    description: Option<String>,
    fields: Lazy<FieldMap>,
}

impl InterfaceType {
    /// Creates an interface type with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Lazy::resolved(FieldMap::default()),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets an eagerly built field map.
    #[must_use]
    pub fn with_fields(mut self, fields: FieldMap) -> Self {
        self.fields = Lazy::resolved(fields);
        self
    }

    /// Defers field-map construction until first access.
    #[must_use]
    pub fn with_deferred_fields<F>(mut self, init: F) -> Self
    where
        F: Fn(&TypeRegistry) -> Result<FieldMap, SchemaError> + Send + Sync + 'static,
    {
        self.fields = Lazy::deferred(init);
        self
    }

    /// The type's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type's description, if declared.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The field map, built against `registry` on first access.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures from deferred construction.
    pub fn fields(&self, registry: &TypeRegistry) -> Result<&FieldMap, SchemaError> {
        self.fields.get(registry)
    }
}
