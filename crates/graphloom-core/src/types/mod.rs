//! The GraphQL type model.
//!
//! A schema is a graph of uniquely-named [`NamedType`] nodes, owned by the
//! [`TypeRegistry`](crate::registry::TypeRegistry) and shared as
//! `Arc<NamedType>`. A [`Type`] is a named type with zero or more
//! `List`/`NonNull` modifiers around it; wrapper values are transient,
//! rebuilt each time a reference is resolved, and never interned.
//!
//! Object, input-object, and interface types own their field maps behind
//! a [`Lazy`](crate::lazy::Lazy) cell so a definition can reference names
//! that are registered later, including its own.

use std::fmt;
use std::sync::Arc;

mod enum_type;
mod input_object;
mod interface;
mod object;
mod scalar;

pub use enum_type::{EnumType, EnumValueDefinition, EnumValueMap};
pub use input_object::{InputObjectType, InputValueDefinition, InputValueMap};
pub use interface::InterfaceType;
pub use object::{FieldDefinition, FieldMap, ObjectType};
pub use scalar::{ScalarType, builtin_scalars};

/// The kind of a named type, for dispatch and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Object,
    Enum,
    InputObject,
    Interface,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Object => write!(f, "object"),
            Self::Enum => write!(f, "enum"),
            Self::InputObject => write!(f, "input object"),
            Self::Interface => write!(f, "interface"),
        }
    }
}

/// A uniquely-named, non-wrapped type. Identity is the name.
///
/// Interfaces are consumed as already-existing named types; the SDL
/// compiler never synthesizes them.
#[derive(Debug)]
pub enum NamedType {
    Scalar(ScalarType),
    Object(ObjectType),
    Enum(EnumType),
    InputObject(InputObjectType),
    Interface(InterfaceType),
}

impl NamedType {
    /// The type's unique name.
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(t) => t.name(),
            Self::Object(t) => t.name(),
            Self::Enum(t) => t.name(),
            Self::InputObject(t) => t.name(),
            Self::Interface(t) => t.name(),
        }
    }

    /// The type's description, if declared.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(t) => t.description(),
            Self::Object(t) => t.description(),
            Self::Enum(t) => t.description(),
            Self::InputObject(t) => t.description(),
            Self::Interface(t) => t.description(),
        }
    }

    /// The kind of this type.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
            Self::Interface(_) => TypeKind::Interface,
        }
    }

    /// Whether this type is legal in output position (response shapes).
    pub fn is_output_type(&self) -> bool {
        matches!(
            self,
            Self::Scalar(_) | Self::Object(_) | Self::Interface(_) | Self::Enum(_)
        )
    }

    /// Whether this type is legal in input position (arguments,
    /// input-object fields).
    pub fn is_input_type(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_) | Self::InputObject(_))
    }

    /// Returns the scalar type, if this is one.
    pub fn as_scalar(&self) -> Option<&ScalarType> {
        match self {
            Self::Scalar(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the object type, if this is one.
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Self::Object(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the enum type, if this is one.
    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            Self::Enum(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the input-object type, if this is one.
    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        match self {
            Self::InputObject(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the interface type, if this is one.
    pub fn as_interface(&self) -> Option<&InterfaceType> {
        match self {
            Self::Interface(t) => Some(t),
            _ => None,
        }
    }
}

impl From<ScalarType> for NamedType {
    fn from(ty: ScalarType) -> Self {
        Self::Scalar(ty)
    }
}

impl From<ObjectType> for NamedType {
    fn from(ty: ObjectType) -> Self {
        Self::Object(ty)
    }
}

impl From<EnumType> for NamedType {
    fn from(ty: EnumType) -> Self {
        Self::Enum(ty)
    }
}

impl From<InputObjectType> for NamedType {
    fn from(ty: InputObjectType) -> Self {
        Self::InputObject(ty)
    }
}

impl From<InterfaceType> for NamedType {
    fn from(ty: InterfaceType) -> Self {
        Self::Interface(ty)
    }
}

/// A type as referenced from a field or argument: a named type, possibly
/// wrapped in `List`/`NonNull` modifiers.
///
/// Invariant: `NonNull` never directly wraps another `NonNull`. The
/// wrapper-rebuilding walk enforces this; the reference grammar cannot
/// express it.
#[derive(Clone)]
pub enum Type {
    Named(Arc<NamedType>),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    /// A bare named type.
    pub fn named(ty: Arc<NamedType>) -> Self {
        Self::Named(ty)
    }

    /// Wraps `inner` in a list modifier.
    pub fn list(inner: Type) -> Self {
        Self::List(Box::new(inner))
    }

    /// Wraps `inner` in a non-null modifier.
    pub fn non_null(inner: Type) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Walks to the innermost named type.
    pub fn base_named(&self) -> &Arc<NamedType> {
        match self {
            Self::Named(ty) => ty,
            Self::List(inner) | Self::NonNull(inner) => inner.base_named(),
        }
    }

    /// Whether the outermost modifier is `NonNull`.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(ty) => f.write_str(ty.name()),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// Renders the SDL spelling instead of descending into the named type:
/// a resolved type graph may be cyclic, and the name is the identity
/// anyway.
impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

/// Structural equality with named types compared by name: a type is
/// identified by its registered name, and a name may be rebound.
impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Named(a), Self::Named(b)) => a.name() == b.name(),
            (Self::List(a), Self::List(b)) => a == b,
            (Self::NonNull(a), Self::NonNull(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_sdl_syntax() {
        let int = builtin_scalars()
            .into_iter()
            .find(|t| t.name() == "Int")
            .unwrap();
        let ty = Type::non_null(Type::list(Type::non_null(Type::named(int))));
        assert_eq!(ty.to_string(), "[Int!]!");
    }

    #[test]
    fn test_base_named_unwraps_modifiers() {
        let string = builtin_scalars()
            .into_iter()
            .find(|t| t.name() == "String")
            .unwrap();
        let ty = Type::list(Type::non_null(Type::named(Arc::clone(&string))));
        assert_eq!(ty.base_named().name(), "String");
    }

    #[test]
    fn test_equality_is_by_name_and_shape() {
        let a = Arc::new(NamedType::from(ScalarType::new("DateTime")));
        let b = Arc::new(NamedType::from(ScalarType::new("DateTime")));
        assert_eq!(Type::named(a.clone()), Type::named(b));
        assert_ne!(Type::named(a.clone()), Type::list(Type::named(a)));
    }

    #[test]
    fn test_capabilities() {
        let object = NamedType::from(ObjectType::new("Post"));
        assert!(object.is_output_type());
        assert!(!object.is_input_type());

        let input = NamedType::from(InputObjectType::new("PostInput"));
        assert!(input.is_input_type());
        assert!(!input.is_output_type());

        let scalar = NamedType::from(ScalarType::new("Int"));
        assert!(scalar.is_output_type());
        assert!(scalar.is_input_type());

        let iface = NamedType::from(InterfaceType::new("Node"));
        assert!(iface.is_output_type());
        assert!(!iface.is_input_type());
    }
}
