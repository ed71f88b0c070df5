//! Enum types.
//!
//! Enum values carry no type references, so the value map is built
//! eagerly; there is no forward-reference risk to defer around.

use indexmap::IndexMap;

/// One declared enum value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumValueDefinition {
    /// The value's description, if declared.
    pub description: Option<String>,
    /// Deprecation reason, if the value carries a `@deprecated` directive.
    pub deprecation_reason: Option<String>,
}

impl EnumValueDefinition {
    /// Creates a value with no description or deprecation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the value deprecated with the given reason.
    #[must_use]
    pub fn with_deprecation_reason(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }
}

/// Value name → definition, in declaration order.
pub type EnumValueMap = IndexMap<String, EnumValueDefinition>;

/// An enum type: a named, closed set of values.
#[derive(Debug, Clone)]
pub struct EnumType {
    name: String,
    description: Option<String>,
    values: EnumValueMap,
}

impl EnumType {
    /// Creates an enum type with no values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: EnumValueMap::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a value.
    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: EnumValueDefinition) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Replaces the whole value map.
    #[must_use]
    pub fn with_values(mut self, values: EnumValueMap) -> Self {
        self.values = values;
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

    /// The declared values.
    pub fn values(&self) -> &EnumValueMap {
        &self.values
    }

    /// Whether `name` is a declared value.
    pub fn has_value(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
