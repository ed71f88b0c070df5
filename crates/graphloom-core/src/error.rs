//! Error types for schema construction.
//!
//! Every error in this crate is fatal for the construction step that
//! raised it: schema building is pure in-memory graph assembly, so there
//! is nothing to retry and nothing is swallowed. Errors surface
//! synchronously at the point of evaluation, including evaluation that
//! was deferred into a [`Lazy`](crate::lazy::Lazy) cell.

use std::fmt;

use thiserror::Error;

/// The position a resolved type was required to be legal in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePosition {
    /// Response shapes: object/interface fields.
    Output,
    /// Arguments and input-object fields.
    Input,
    /// The `implements` list of an object type.
    Interface,
}

impl fmt::Display for TypePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output => write!(f, "output"),
            Self::Input => write!(f, "input"),
            Self::Interface => write!(f, "interface"),
        }
    }
}

/// Errors raised while compiling SDL fragments or resolving type
/// references against a registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// An SDL fragment did not parse into a well-formed definition document.
    #[error("malformed SDL fragment: {0}")]
    MalformedSdl(String),

    /// A top-level SDL definition kind outside the supported set
    /// (object, enum, input object).
    #[error("type definition kind \"{0}\" is not supported")]
    UnsupportedDefinition(String),

    /// A named-type reference that does not exist in the registry.
    #[error("cannot find type with name \"{0}\" in the type registry")]
    UnknownType(String),

    /// A resolved type that is not legal in the position it was used in.
    #[error("type \"{type_name}\" cannot be used in {position} position")]
    CapabilityMismatch {
        /// Name of the offending named type.
        type_name: String,
        /// The position the type was required to satisfy.
        position: TypePosition,
    },

    /// An internal invariant broken by input that well-formed collaborators
    /// never produce. A programming-error signal, not a user-facing
    /// recoverable condition.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl SchemaError {
    /// Create a new MalformedSdl error.
    pub fn malformed_sdl(message: impl Into<String>) -> Self {
        Self::MalformedSdl(message.into())
    }

    /// Create a new UnsupportedDefinition error naming the offending kind.
    pub fn unsupported_definition(kind: impl Into<String>) -> Self {
        Self::UnsupportedDefinition(kind.into())
    }

    /// Create a new UnknownType error naming the missing type.
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType(name.into())
    }

    /// Create a new CapabilityMismatch error for a type used in output position.
    pub fn expected_output_type(type_name: impl Into<String>) -> Self {
        Self::CapabilityMismatch {
            type_name: type_name.into(),
            position: TypePosition::Output,
        }
    }

    /// Create a new CapabilityMismatch error for a type used in input position.
    pub fn expected_input_type(type_name: impl Into<String>) -> Self {
        Self::CapabilityMismatch {
            type_name: type_name.into(),
            position: TypePosition::Input,
        }
    }

    /// Create a new CapabilityMismatch error for a non-interface in an
    /// `implements` list.
    pub fn expected_interface_type(type_name: impl Into<String>) -> Self {
        Self::CapabilityMismatch {
            type_name: type_name.into(),
            position: TypePosition::Interface,
        }
    }

    /// Create a new Invariant error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_message_names_the_type() {
        let err = SchemaError::unknown_type("Bogus");
        assert_eq!(
            err.to_string(),
            "cannot find type with name \"Bogus\" in the type registry"
        );
    }

    #[test]
    fn test_capability_mismatch_message_names_position() {
        let err = SchemaError::expected_input_type("Post");
        assert_eq!(
            err.to_string(),
            "type \"Post\" cannot be used in input position"
        );

        let err = SchemaError::expected_output_type("PostInput");
        assert!(err.to_string().contains("output position"));
    }

    #[test]
    fn test_unsupported_definition_names_kind() {
        let err = SchemaError::unsupported_definition("union");
        assert_eq!(
            err.to_string(),
            "type definition kind \"union\" is not supported"
        );
    }
}
