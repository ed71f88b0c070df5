//! Scalar types and the built-in scalar set.

use std::sync::Arc;

use super::NamedType;

/// A leaf type: no fields, coerces to/from a single value.
///
/// The compiler never builds scalars from SDL; they enter a registry by
/// seeding or by direct registration.
#[derive(Debug, Clone)]
pub struct ScalarType {
    name: String,
    description: Option<String>,
}

impl ScalarType {
    /// Creates a scalar type with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The scalar's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scalar's description, if declared.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// The five built-in scalar types, ready for registry seeding.
///
/// Seeding must happen before any SDL is compiled so bare scalar
/// references resolve without explicit declaration.
pub fn builtin_scalars() -> [Arc<NamedType>; 5] {
    [
        Arc::new(NamedType::Scalar(ScalarType::new("String").with_description(
            "The `String` scalar type represents textual data, represented as UTF-8 \
             character sequences.",
        ))),
        Arc::new(NamedType::Scalar(ScalarType::new("Int").with_description(
            "The `Int` scalar type represents non-fractional signed whole numeric values.",
        ))),
        Arc::new(NamedType::Scalar(ScalarType::new("Float").with_description(
            "The `Float` scalar type represents signed double-precision fractional values.",
        ))),
        Arc::new(NamedType::Scalar(ScalarType::new("Boolean").with_description(
            "The `Boolean` scalar type represents `true` or `false`.",
        ))),
        Arc::new(NamedType::Scalar(ScalarType::new("ID").with_description(
            "The `ID` scalar type represents a unique identifier.",
        ))),
    ]
}
