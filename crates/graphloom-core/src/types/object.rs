//! Object types and field definitions.

use std::sync::Arc;

use indexmap::IndexMap;

use super::{InputValueMap, NamedType, Type};
use crate::error::SchemaError;
use crate::lazy::Lazy;
use crate::registry::TypeRegistry;

/// Field name → definition, in declaration order.
pub type FieldMap = IndexMap<String, FieldDefinition>;

/// One output field of an object or interface type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    /// The field's type; must be output-capable at its base.
    pub ty: Type,
    /// The field's description, if declared.
    pub description: Option<String>,
    /// Argument name → definition.
    pub args: InputValueMap,
    /// Deprecation reason, if the field carries a `@deprecated` directive.
    pub deprecation_reason: Option<String>,
}

impl FieldDefinition {
    /// Creates a field of the given type with no description, arguments,
    /// or deprecation.
    pub fn new(ty: Type) -> Self {
        Self {
            ty,
            description: None,
            args: InputValueMap::default(),
            deprecation_reason: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an argument.
    #[must_use]
    pub fn with_arg(
        mut self,
        name: impl Into<String>,
        arg: super::InputValueDefinition,
    ) -> Self {
        self.args.insert(name.into(), arg);
        self
    }

    /// Marks the field deprecated with the given reason.
    #[must_use]
    pub fn with_deprecation_reason(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }
}

/// An object type: a named set of output fields, plus the interfaces it
/// implements.
///
/// Both the field map and the interface list are deferred: a definition
/// may reference types that are registered after it, including itself,
/// and the references are only chased on first access.
#[derive(Debug)]
pub struct ObjectType {
    name: String,
    description: Option<String>,
    fields: Lazy<FieldMap>,
    interfaces: Lazy<Vec<Arc<NamedType>>>,
}

impl ObjectType {
    /// Creates an object type with no fields and no interfaces.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Lazy::resolved(FieldMap::default()),
            interfaces: Lazy::resolved(Vec::new()),
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

    /// Sets the implemented interfaces.
    #[must_use]
    pub fn with_interfaces(mut self, interfaces: Vec<Arc<NamedType>>) -> Self {
        self.interfaces = Lazy::resolved(interfaces);
        self
    }

    /// Defers interface resolution until first access.
    #[must_use]
    pub fn with_deferred_interfaces<F>(mut self, init: F) -> Self
    where
        F: Fn(&TypeRegistry) -> Result<Vec<Arc<NamedType>>, SchemaError> + Send + Sync + 'static,
    {
        self.interfaces = Lazy::deferred(init);
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
    /// Propagates resolution failures from deferred construction, e.g.
    /// [`SchemaError::UnknownType`] for a field typed with an
    /// unregistered name.
    pub fn fields(&self, registry: &TypeRegistry) -> Result<&FieldMap, SchemaError> {
        self.fields.get(registry)
    }

    /// The implemented interfaces, resolved against `registry` on first
    /// access. Every entry is an `Interface` named type.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures from deferred construction.
    pub fn interfaces(&self, registry: &TypeRegistry) -> Result<&[Arc<NamedType>], SchemaError> {
        self.interfaces.get(registry).map(Vec::as_slice)
    }

    /// Whether the field map has been built.
    pub fn fields_resolved(&self) -> bool {
        self.fields.is_resolved()
    }
}
