//! Build-time coercion of default-value literals.
//!
//! A default value is declared as a literal and coerced against its
//! resolved input type exactly once, when the owning field map is built.
//! Coercion failure yields no default rather than an error, matching the
//! declare-then-ignore behavior schema authors rely on for permissive
//! defaults.

use async_graphql_value::ConstValue;
use graphloom_core::{NamedType, Type};

/// Coerces a literal against an input type. `None` on mismatch.
///
/// `NonNull` unwraps and rejects explicit null; lists coerce element-wise
/// and lift a bare literal into a singleton; enum literals must name a
/// declared value; built-in scalars accept their natural literals (`ID`
/// additionally accepts integer literals, as strings). Custom scalars and
/// input-object literals pass through unchanged: arbitrary custom-scalar
/// coercion is a collaborator concern.
pub fn value_from_literal(literal: &ConstValue, ty: &Type) -> Option<ConstValue> {
    match ty {
        Type::NonNull(inner) => match literal {
            ConstValue::Null => None,
            other => value_from_literal(other, inner),
        },
        Type::List(inner) => match literal {
            ConstValue::Null => Some(ConstValue::Null),
            ConstValue::List(items) => items
                .iter()
                .map(|item| value_from_literal(item, inner))
                .collect::<Option<Vec<_>>>()
                .map(ConstValue::List),
            other => value_from_literal(other, inner).map(|value| ConstValue::List(vec![value])),
        },
        Type::Named(named) => {
            if matches!(literal, ConstValue::Null) {
                return Some(ConstValue::Null);
            }
            match named.as_ref() {
                NamedType::Scalar(scalar) => coerce_scalar_literal(scalar.name(), literal),
                NamedType::Enum(enum_type) => match literal {
                    ConstValue::Enum(name) if enum_type.has_value(name.as_str()) => {
                        Some(literal.clone())
                    }
                    _ => None,
                },
                NamedType::InputObject(_) => match literal {
                    ConstValue::Object(_) => Some(literal.clone()),
                    _ => None,
                },
                // Output-only types cannot carry defaults; the capability
                // check rejects them before coercion is ever reached.
                NamedType::Object(_) | NamedType::Interface(_) => None,
            }
        }
    }
}

fn coerce_scalar_literal(scalar_name: &str, literal: &ConstValue) -> Option<ConstValue> {
    match scalar_name {
        "Int" => match literal {
            ConstValue::Number(number) => {
                let value = number.as_i64()?;
                i32::try_from(value).ok()?;
                Some(literal.clone())
            }
            _ => None,
        },
        "Float" => match literal {
            ConstValue::Number(_) => Some(literal.clone()),
            _ => None,
        },
        "String" => match literal {
            ConstValue::String(_) => Some(literal.clone()),
            _ => None,
        },
        "Boolean" => match literal {
            ConstValue::Boolean(_) => Some(literal.clone()),
            _ => None,
        },
        "ID" => match literal {
            ConstValue::String(_) => Some(literal.clone()),
            ConstValue::Number(number) if number.as_i64().is_some() => {
                Some(ConstValue::String(number.to_string()))
            }
            _ => None,
        },
        // Custom scalar: the literal passes through untouched.
        _ => Some(literal.clone()),
    }
}
