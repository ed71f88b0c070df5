//! Type-reference expressions.
//!
//! A [`TypeExpr`] is the parsed shape of a type reference as it appears
//! in SDL: a name with zero or more `List`/`NonNull` modifiers. It is the
//! input to resolution: the registry lookup happens on the innermost
//! name, and the modifier chain is rebuilt around whatever that lookup
//! returns.
//!
//! The parser collaborator flattens non-null into a `nullable` flag on
//! each node; conversion re-expands that flag into an explicit `NonNull`
//! wrapper so the modifier chain can be walked uniformly.

use std::fmt;

use async_graphql_parser::types as ast;
use graphloom_core::SchemaError;

/// A parsed type reference: named, list, or non-null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named(String),
    List(Box<TypeExpr>),
    NonNull(Box<TypeExpr>),
}

impl TypeExpr {
    /// A bare named reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Wraps `inner` in a list modifier.
    pub fn list(inner: TypeExpr) -> Self {
        Self::List(Box::new(inner))
    }

    /// Wraps `inner` in a non-null modifier.
    pub fn non_null(inner: TypeExpr) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Parses a reference string such as `"[Int!]!"`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MalformedSdl`] when the string is not a
    /// well-formed type reference.
    pub fn parse(reference: &str) -> Result<Self, SchemaError> {
        let ty = ast::Type::new(reference).ok_or_else(|| {
            SchemaError::malformed_sdl(format!("invalid type reference \"{reference}\""))
        })?;
        Ok(Self::from(&ty))
    }

    /// The innermost named reference.
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.name(),
        }
    }
}

impl From<&ast::Type> for TypeExpr {
    fn from(ty: &ast::Type) -> Self {
        let base = match &ty.base {
            ast::BaseType::Named(name) => Self::Named(name.to_string()),
            ast::BaseType::List(inner) => Self::List(Box::new(Self::from(inner.as_ref()))),
        };
        if ty.nullable {
            base
        } else {
            Self::NonNull(Box::new(base))
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_name() {
        assert_eq!(TypeExpr::parse("String").unwrap(), TypeExpr::named("String"));
    }

    #[test]
    fn test_parse_wrapped_reference() {
        let expr = TypeExpr::parse("[Int!]!").unwrap();
        assert_eq!(
            expr,
            TypeExpr::non_null(TypeExpr::list(TypeExpr::non_null(TypeExpr::named("Int"))))
        );
        assert_eq!(expr.name(), "Int");
        assert_eq!(expr.to_string(), "[Int!]!");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            TypeExpr::parse("[Int"),
            Err(SchemaError::MalformedSdl(_))
        ));
    }
}
