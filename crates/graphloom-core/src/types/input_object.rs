//! Input-object types and input value definitions.

use async_graphql_value::ConstValue;
use indexmap::IndexMap;

use super::Type;
use crate::error::SchemaError;
use crate::lazy::Lazy;
use crate::registry::TypeRegistry;

/// Field or argument name → definition, in declaration order.
pub type InputValueMap = IndexMap<String, InputValueDefinition>;

/// One input value: an argument of an output field, or a field of an
/// input-object type.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    /// The value's type; must be input-capable at its base.
    pub ty: Type,
    /// The value's description, if declared.
    pub description: Option<String>,
    /// Default value, coerced from its literal against the resolved
    /// input type once, at build time.
    pub default_value: Option<ConstValue>,
}

impl InputValueDefinition {
    /// Creates an input value of the given type with no description or
    /// default.
    pub fn new(ty: Type) -> Self {
        Self {
            ty,
            description: None,
            default_value: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default_value(mut self, value: ConstValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// An input-object type: a named set of input fields.
///
/// The field map is deferred for the same reason an object type's is:
/// fields may reference names registered after the declaration.
#[derive(Debug)]
pub struct InputObjectType {
    name: String,
    description: Option<String>,
    fields: Lazy<InputValueMap>,
}

impl InputObjectType {
    /// Creates an input-object type with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Lazy::resolved(InputValueMap::default()),
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
    pub fn with_fields(mut self, fields: InputValueMap) -> Self {
        self.fields = Lazy::resolved(fields);
        self
    }

    /// Defers field-map construction until first access.
    #[must_use]
    pub fn with_deferred_fields<F>(mut self, init: F) -> Self
    where
        F: Fn(&TypeRegistry) -> Result<InputValueMap, SchemaError> + Send + Sync + 'static,
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
    pub fn fields(&self, registry: &TypeRegistry) -> Result<&InputValueMap, SchemaError> {
        self.fields.get(registry)
    }
}
