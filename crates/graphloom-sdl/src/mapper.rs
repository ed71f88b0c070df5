//! The SDL compiler and type-reference resolution.
//!
//! [`compile_type_fragment`] turns an SDL fragment into named type
//! definitions and registers the first one. Object and input-object
//! definitions get *deferred* field maps: the definition AST is captured
//! and only walked against the registry on first access, after the whole
//! batch (and any manually registered types) is in place. That deferral
//! is what lets a fragment reference itself or names declared later.
//!
//! Resolution is split into two walks over the same reference expression:
//! find the innermost name and look it up, then rebuild the
//! `List`/`NonNull` wrapper chain around the resolved base. The split
//! exists so capability checks can inspect the base type independent of
//! wrapping depth.

use std::sync::Arc;

use async_graphql_parser::{Positioned, parse_schema, types as ast};
use tracing::{debug, trace};

use graphloom_core::{
    EnumType, EnumValueDefinition, FieldDefinition, FieldMap, InputObjectType,
    InputValueDefinition, InputValueMap, NamedType, ObjectType, SchemaError, Type, TypeRegistry,
};

use crate::directives::deprecation_reason;
use crate::expr::TypeExpr;
use crate::values::value_from_literal;

/// A type handed across the composition boundary: either already
/// resolved, or a reference string still to be parsed and resolved.
#[derive(Debug, Clone)]
pub enum TypeSource {
    Type(Type),
    Reference(String),
}

impl From<Type> for TypeSource {
    fn from(ty: Type) -> Self {
        Self::Type(ty)
    }
}

impl From<&str> for TypeSource {
    fn from(reference: &str) -> Self {
        Self::Reference(reference.to_string())
    }
}

impl From<String> for TypeSource {
    fn from(reference: String) -> Self {
        Self::Reference(reference)
    }
}

/// Compiles an SDL fragment and registers the first built type.
///
/// Every top-level definition in the fragment must build; an
/// unsupported definition kind anywhere fails the whole call, but only
/// the first built type is registered and returned. A fragment with zero
/// definitions yields `Ok(None)`.
///
/// # Errors
///
/// [`SchemaError::MalformedSdl`] when the fragment does not parse;
/// [`SchemaError::UnsupportedDefinition`] for top-level kinds outside
/// object / enum / input object.
pub fn compile_type_fragment(
    registry: &mut TypeRegistry,
    sdl: &str,
) -> Result<Option<Arc<NamedType>>, SchemaError> {
    let document = parse_schema(sdl).map_err(|err| SchemaError::malformed_sdl(err.to_string()))?;

    let mut types = Vec::with_capacity(document.definitions.len());
    for definition in &document.definitions {
        types.push(make_schema_def(definition)?);
    }

    let Some(first) = types.into_iter().next() else {
        return Ok(None);
    };
    debug!(type_name = %first.name(), kind = %first.kind(), "registered compiled type");
    registry.set(first.name().to_string(), Arc::clone(&first));
    Ok(Some(first))
}

fn make_schema_def(definition: &ast::TypeSystemDefinition) -> Result<Arc<NamedType>, SchemaError> {
    match definition {
        ast::TypeSystemDefinition::Schema(_) => Err(SchemaError::unsupported_definition("schema")),
        ast::TypeSystemDefinition::Directive(_) => {
            Err(SchemaError::unsupported_definition("directive"))
        }
        ast::TypeSystemDefinition::Type(definition) => make_type_def(&definition.node),
    }
}

fn make_type_def(definition: &ast::TypeDefinition) -> Result<Arc<NamedType>, SchemaError> {
    if definition.extend {
        return Err(SchemaError::unsupported_definition("extension"));
    }
    match &definition.kind {
        ast::TypeKind::Object(object) => Ok(make_object_def(definition, object)),
        ast::TypeKind::Enum(enum_def) => Ok(make_enum_def(definition, enum_def)),
        ast::TypeKind::InputObject(input) => Ok(make_input_object_def(definition, input)),
        ast::TypeKind::Scalar => Err(SchemaError::unsupported_definition("scalar")),
        ast::TypeKind::Interface(_) => Err(SchemaError::unsupported_definition("interface")),
        ast::TypeKind::Union(_) => Err(SchemaError::unsupported_definition("union")),
    }
}

fn make_object_def(definition: &ast::TypeDefinition, object: &ast::ObjectType) -> Arc<NamedType> {
    let type_name = definition.name.node.to_string();
    trace!(type_name = %type_name, "building object type definition");

    let fields = object.fields.clone();
    let implements: Vec<String> = object
        .implements
        .iter()
        .map(|name| name.node.to_string())
        .collect();

    let mut ty = ObjectType::new(type_name)
        .with_deferred_fields(move |registry| make_field_map(registry, &fields))
        .with_deferred_interfaces(move |registry| {
            implements
                .iter()
                .map(|name| produce_interface_type(registry, name))
                .collect()
        });
    if let Some(description) = &definition.description {
        ty = ty.with_description(description.node.clone());
    }
    Arc::new(NamedType::Object(ty))
}

fn make_enum_def(definition: &ast::TypeDefinition, enum_def: &ast::EnumType) -> Arc<NamedType> {
    let type_name = definition.name.node.to_string();
    trace!(type_name = %type_name, "building enum type definition");

    let mut ty = EnumType::new(type_name);
    if let Some(description) = &definition.description {
        ty = ty.with_description(description.node.clone());
    }
    for value in &enum_def.values {
        let value = &value.node;
        let mut def = EnumValueDefinition::new();
        if let Some(description) = &value.description {
            def = def.with_description(description.node.clone());
        }
        if let Some(reason) = deprecation_reason(&value.directives) {
            def = def.with_deprecation_reason(reason);
        }
        ty = ty.with_value(value.value.node.to_string(), def);
    }
    Arc::new(NamedType::Enum(ty))
}

fn make_input_object_def(
    definition: &ast::TypeDefinition,
    input: &ast::InputObjectType,
) -> Arc<NamedType> {
    let type_name = definition.name.node.to_string();
    trace!(type_name = %type_name, "building input object type definition");

    let fields = input.fields.clone();
    let mut ty = InputObjectType::new(type_name)
        .with_deferred_fields(move |registry| make_input_values(registry, &fields));
    if let Some(description) = &definition.description {
        ty = ty.with_description(description.node.clone());
    }
    Arc::new(NamedType::InputObject(ty))
}

fn make_field_map(
    registry: &TypeRegistry,
    fields: &[Positioned<ast::FieldDefinition>],
) -> Result<FieldMap, SchemaError> {
    let mut map = FieldMap::default();
    for field in fields {
        let field = &field.node;
        let expr = TypeExpr::from(&field.ty.node);
        let ty = produce_output_type(registry, &expr)?;
        map.insert(
            field.name.node.to_string(),
            FieldDefinition {
                ty,
                description: field.description.as_ref().map(|d| d.node.clone()),
                args: make_input_values(registry, &field.arguments)?,
                deprecation_reason: deprecation_reason(&field.directives),
            },
        );
    }
    Ok(map)
}

fn make_input_values(
    registry: &TypeRegistry,
    values: &[Positioned<ast::InputValueDefinition>],
) -> Result<InputValueMap, SchemaError> {
    let mut map = InputValueMap::default();
    for value in values {
        let value = &value.node;
        let expr = TypeExpr::from(&value.ty.node);
        let ty = produce_input_type(registry, &expr)?;
        let default_value = value
            .default_value
            .as_ref()
            .and_then(|literal| value_from_literal(&literal.node, &ty));
        map.insert(
            value.name.node.to_string(),
            InputValueDefinition {
                ty,
                description: value.description.as_ref().map(|d| d.node.clone()),
                default_value,
            },
        );
    }
    Ok(map)
}

/// Parses and resolves a reference string, `Ok(None)` when the base name
/// is not registered.
///
/// # Errors
///
/// [`SchemaError::MalformedSdl`] when the string is not a well-formed
/// type reference.
pub fn get_wrapped(registry: &TypeRegistry, reference: &str) -> Result<Option<Type>, SchemaError> {
    let expr = TypeExpr::parse(reference)?;
    Ok(resolve_type_expr(registry, &expr))
}

/// Resolves a reference expression, `None` when the base name is not
/// registered.
pub fn resolve_type_expr(registry: &TypeRegistry, expr: &TypeExpr) -> Option<Type> {
    match expr {
        TypeExpr::Named(name) => registry.get(name).map(|ty| Type::named(Arc::clone(ty))),
        TypeExpr::List(inner) => resolve_type_expr(registry, inner).map(Type::list),
        TypeExpr::NonNull(inner) => resolve_type_expr(registry, inner).map(Type::non_null),
    }
}

fn named_type(registry: &TypeRegistry, name: &str) -> Result<Arc<NamedType>, SchemaError> {
    registry
        .get(name)
        .map(Arc::clone)
        .ok_or_else(|| SchemaError::unknown_type(name))
}

/// Rebuilds the `List`/`NonNull` wrapper chain of `expr` around an
/// already-resolved base type.
fn build_wrapped_type(base: Type, expr: &TypeExpr) -> Result<Type, SchemaError> {
    match expr {
        TypeExpr::Named(_) => Ok(base),
        TypeExpr::List(inner) => Ok(Type::list(build_wrapped_type(base, inner)?)),
        TypeExpr::NonNull(inner) => {
            let wrapped = build_wrapped_type(base, inner)?;
            if wrapped.is_non_null() {
                return Err(SchemaError::invariant(
                    "non-null wrapper cannot wrap another non-null type",
                ));
            }
            Ok(Type::non_null(wrapped))
        }
    }
}

/// Resolves a reference expression against the registry.
///
/// # Errors
///
/// [`SchemaError::UnknownType`] when the innermost name is not registered.
pub fn produce_type(registry: &TypeRegistry, expr: &TypeExpr) -> Result<Type, SchemaError> {
    let base = named_type(registry, expr.name())?;
    build_wrapped_type(Type::named(base), expr)
}

/// Resolves a reference expression and requires an output-capable base.
///
/// # Errors
///
/// [`SchemaError::UnknownType`] or [`SchemaError::CapabilityMismatch`].
pub fn produce_output_type(registry: &TypeRegistry, expr: &TypeExpr) -> Result<Type, SchemaError> {
    let ty = produce_type(registry, expr)?;
    check_output_type(&ty)?;
    Ok(ty)
}

/// Resolves a reference expression and requires an input-capable base.
///
/// # Errors
///
/// [`SchemaError::UnknownType`] or [`SchemaError::CapabilityMismatch`].
pub fn produce_input_type(registry: &TypeRegistry, expr: &TypeExpr) -> Result<Type, SchemaError> {
    let ty = produce_type(registry, expr)?;
    check_input_type(&ty)?;
    Ok(ty)
}

/// Resolves `name` and requires an interface type.
///
/// # Errors
///
/// [`SchemaError::UnknownType`] or [`SchemaError::CapabilityMismatch`].
pub fn produce_interface_type(
    registry: &TypeRegistry,
    name: &str,
) -> Result<Arc<NamedType>, SchemaError> {
    let ty = named_type(registry, name)?;
    if ty.as_interface().is_none() {
        return Err(SchemaError::expected_interface_type(ty.name()));
    }
    Ok(ty)
}

/// Coerces a [`TypeSource`] to an output type: an already-resolved type
/// is capability-checked, a reference string is parsed and resolved.
///
/// # Errors
///
/// [`SchemaError::MalformedSdl`], [`SchemaError::UnknownType`], or
/// [`SchemaError::CapabilityMismatch`].
pub fn coerce_output_type(
    registry: &TypeRegistry,
    source: TypeSource,
) -> Result<Type, SchemaError> {
    match source {
        TypeSource::Type(ty) => {
            check_output_type(&ty)?;
            Ok(ty)
        }
        TypeSource::Reference(reference) => {
            let expr = TypeExpr::parse(&reference)?;
            produce_output_type(registry, &expr)
        }
    }
}

/// Coerces a [`TypeSource`] to an input type; mirror of
/// [`coerce_output_type`].
///
/// # Errors
///
/// [`SchemaError::MalformedSdl`], [`SchemaError::UnknownType`], or
/// [`SchemaError::CapabilityMismatch`].
pub fn coerce_input_type(registry: &TypeRegistry, source: TypeSource) -> Result<Type, SchemaError> {
    match source {
        TypeSource::Type(ty) => {
            check_input_type(&ty)?;
            Ok(ty)
        }
        TypeSource::Reference(reference) => {
            let expr = TypeExpr::parse(&reference)?;
            produce_input_type(registry, &expr)
        }
    }
}

fn check_output_type(ty: &Type) -> Result<(), SchemaError> {
    let base = ty.base_named();
    if base.is_output_type() {
        Ok(())
    } else {
        Err(SchemaError::expected_output_type(base.name()))
    }
}

fn check_input_type(ty: &Type) -> Result<(), SchemaError> {
    let base = ty.base_named();
    if base.is_input_type() {
        Ok(())
    } else {
        Err(SchemaError::expected_input_type(base.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_round_trip() {
        let registry = TypeRegistry::new();
        let ty = get_wrapped(&registry, "[Int!]!").unwrap().unwrap();
        assert_eq!(ty.to_string(), "[Int!]!");
        assert_eq!(ty.base_named().name(), "Int");

        let bare = get_wrapped(&registry, "String").unwrap().unwrap();
        assert!(matches!(bare, Type::Named(_)));
    }

    #[test]
    fn test_get_wrapped_missing_base_is_none() {
        let registry = TypeRegistry::new();
        assert_eq!(get_wrapped(&registry, "[Bogus!]").unwrap(), None);
    }

    #[test]
    fn test_double_non_null_is_an_invariant_violation() {
        let registry = TypeRegistry::new();
        let expr = TypeExpr::non_null(TypeExpr::non_null(TypeExpr::named("Int")));
        assert!(matches!(
            produce_type(&registry, &expr),
            Err(SchemaError::Invariant(_))
        ));
    }

    #[test]
    fn test_produce_type_names_the_missing_type() {
        let registry = TypeRegistry::new();
        let expr = TypeExpr::parse("[Bogus]").unwrap();
        assert!(matches!(
            produce_type(&registry, &expr),
            Err(SchemaError::UnknownType(name)) if name == "Bogus"
        ));
    }

    #[test]
    fn test_unsupported_definition_kinds() {
        let mut registry = TypeRegistry::new();
        for (sdl, kind) in [
            ("scalar DateTime", "scalar"),
            ("union U = A | B", "union"),
            ("interface Node { id: ID }", "interface"),
            ("schema { query: Query }", "schema"),
            ("directive @tag(name: String) on FIELD_DEFINITION", "directive"),
            ("extend type T { a: Int }", "extension"),
        ] {
            let err = compile_type_fragment(&mut registry, sdl).unwrap_err();
            assert!(
                matches!(&err, SchemaError::UnsupportedDefinition(k) if k == kind),
                "{sdl}: {err}"
            );
        }
    }

    #[test]
    fn test_malformed_fragment() {
        let mut registry = TypeRegistry::new();
        assert!(matches!(
            compile_type_fragment(&mut registry, "type {{{"),
            Err(SchemaError::MalformedSdl(_))
        ));
    }
}
