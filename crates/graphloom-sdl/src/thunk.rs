//! The thunk resolution engine.
//!
//! Composition code builds field maps whose entries may be *deferred*: a
//! whole field, or just its type, is a zero-argument closure standing in
//! for a value that does not exist yet. Deferral is what breaks
//! forward-reference cycles, since a field can name a type that is declared
//! later, or the type that owns it.
//!
//! The engine walks such a map and replaces every deferred entry with a
//! concrete, registry-resolved definition, stamping each resolved entry
//! with a back-reference to the closure it came from. The inverse pass
//! puts the closures back. The two passes obey a round-trip law:
//! restoring a freshly resolved map yields a map structurally equal to
//! the original, for any mixture of plain fields, field-level thunks,
//! and type-level thunks.
//!
//! Every thunk is invoked at most once per resolution pass, and an
//! already-resolved map resolves to itself; repeated passes neither
//! re-invoke closures nor re-stamp entries.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::trace;

use async_graphql_value::ConstValue;
use graphloom_core::{SchemaError, Type, TypeRegistry};

use crate::mapper::{TypeSource, coerce_input_type, coerce_output_type};

/// A deferred output field: invoked once to obtain the concrete config.
pub type OutputFieldThunk = Arc<dyn Fn() -> OutputFieldConfig + Send + Sync>;

/// A deferred input field.
pub type InputFieldThunk = Arc<dyn Fn() -> InputFieldConfig + Send + Sync>;

/// A deferred type: invoked once to obtain a resolved type or a
/// reference string.
pub type TypeThunk = Arc<dyn Fn() -> TypeSource + Send + Sync>;

/// Field name → entry, in declaration order.
pub type OutputFieldMap = IndexMap<String, OutputFieldEntry>;

/// Input field/argument name → entry, in declaration order.
pub type InputFieldMap = IndexMap<String, InputFieldEntry>;

fn thunk_eq<T: ?Sized>(a: &Option<Arc<T>>, b: &Option<Arc<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

/// The type position of a composed field: resolved, a reference string
/// still owned by the composition layer, or deferred behind a thunk.
#[derive(Clone)]
pub enum TypeSlot {
    Resolved(Type),
    Reference(String),
    Deferred(TypeThunk),
}

impl TypeSlot {
    /// A deferred type slot.
    pub fn deferred<F>(thunk: F) -> Self
    where
        F: Fn() -> TypeSource + Send + Sync + 'static,
    {
        Self::Deferred(Arc::new(thunk))
    }

    /// The resolved type, if this slot is resolved.
    pub fn ty(&self) -> Option<&Type> {
        match self {
            Self::Resolved(ty) => Some(ty),
            _ => None,
        }
    }

    /// Whether this slot is still a thunk.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl From<Type> for TypeSlot {
    fn from(ty: Type) -> Self {
        Self::Resolved(ty)
    }
}

impl From<&str> for TypeSlot {
    fn from(reference: &str) -> Self {
        Self::Reference(reference.to_string())
    }
}

impl From<String> for TypeSlot {
    fn from(reference: String) -> Self {
        Self::Reference(reference)
    }
}

impl fmt::Debug for TypeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(ty) => f.debug_tuple("Resolved").field(ty).finish(),
            Self::Reference(reference) => f.debug_tuple("Reference").field(reference).finish(),
            Self::Deferred(_) => f.write_str("Deferred(<thunk>)"),
        }
    }
}

/// Thunks compare by identity: equality means "the same closure", which
/// is exactly what the restore round-trip preserves.
impl PartialEq for TypeSlot {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Resolved(a), Self::Resolved(b)) => a == b,
            (Self::Reference(a), Self::Reference(b)) => a == b,
            (Self::Deferred(a), Self::Deferred(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A concrete output field as composed by application code.
#[derive(Clone)]
pub struct OutputFieldConfig {
    /// The field's type position.
    pub ty: TypeSlot,
    /// The field's description, if any.
    pub description: Option<String>,
    /// Argument name → entry.
    pub args: InputFieldMap,
    /// Deprecation reason, if any.
    pub deprecation_reason: Option<String>,
    origin_field_thunk: Option<OutputFieldThunk>,
    origin_type_thunk: Option<TypeThunk>,
}

impl OutputFieldConfig {
    /// Creates a field config with the given type position.
    pub fn new(ty: impl Into<TypeSlot>) -> Self {
        Self {
            ty: ty.into(),
            description: None,
            args: InputFieldMap::default(),
            deprecation_reason: None,
            origin_field_thunk: None,
            origin_type_thunk: None,
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
    pub fn with_arg(mut self, name: impl Into<String>, arg: impl Into<InputFieldEntry>) -> Self {
        self.args.insert(name.into(), arg.into());
        self
    }

    /// Marks the field deprecated.
    #[must_use]
    pub fn with_deprecation_reason(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }

    /// The stamped field-level back-reference, if resolution installed
    /// this config in place of a thunk.
    pub fn origin_field_thunk(&self) -> Option<&OutputFieldThunk> {
        self.origin_field_thunk.as_ref()
    }

    /// The stamped type-level back-reference, if resolution replaced a
    /// deferred type slot.
    pub fn origin_type_thunk(&self) -> Option<&TypeThunk> {
        self.origin_type_thunk.as_ref()
    }
}

impl fmt::Debug for OutputFieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputFieldConfig")
            .field("ty", &self.ty)
            .field("description", &self.description)
            .field("args", &self.args)
            .field("deprecation_reason", &self.deprecation_reason)
            .field("origin_field_thunk", &self.origin_field_thunk.is_some())
            .field("origin_type_thunk", &self.origin_type_thunk.is_some())
            .finish()
    }
}

impl PartialEq for OutputFieldConfig {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && self.description == other.description
            && self.args == other.args
            && self.deprecation_reason == other.deprecation_reason
            && thunk_eq(&self.origin_field_thunk, &other.origin_field_thunk)
            && thunk_eq(&self.origin_type_thunk, &other.origin_type_thunk)
    }
}

/// One entry of an output field map: a concrete config, or a thunk that
/// will produce one.
#[derive(Clone)]
pub enum OutputFieldEntry {
    Deferred(OutputFieldThunk),
    Resolved(OutputFieldConfig),
}

impl PartialEq for OutputFieldEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Deferred(a), Self::Deferred(b)) => Arc::ptr_eq(a, b),
            (Self::Resolved(a), Self::Resolved(b)) => a == b,
            _ => false,
        }
    }
}

impl OutputFieldEntry {
    /// A deferred field entry.
    pub fn deferred<F>(thunk: F) -> Self
    where
        F: Fn() -> OutputFieldConfig + Send + Sync + 'static,
    {
        Self::Deferred(Arc::new(thunk))
    }

    /// The concrete config, if resolved.
    pub fn config(&self) -> Option<&OutputFieldConfig> {
        match self {
            Self::Resolved(config) => Some(config),
            Self::Deferred(_) => None,
        }
    }

    /// Whether this entry is still a thunk.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl From<OutputFieldConfig> for OutputFieldEntry {
    fn from(config: OutputFieldConfig) -> Self {
        Self::Resolved(config)
    }
}

impl fmt::Debug for OutputFieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deferred(_) => f.write_str("Deferred(<thunk>)"),
            Self::Resolved(config) => f.debug_tuple("Resolved").field(config).finish(),
        }
    }
}

/// A concrete input field (or argument) as composed by application code.
#[derive(Clone)]
pub struct InputFieldConfig {
    /// The field's type position.
    pub ty: TypeSlot,
    /// The field's description, if any.
    pub description: Option<String>,
    /// Default value, if any.
    pub default_value: Option<ConstValue>,
    origin_field_thunk: Option<InputFieldThunk>,
    origin_type_thunk: Option<TypeThunk>,
}

impl InputFieldConfig {
    /// Creates an input field config with the given type position.
    pub fn new(ty: impl Into<TypeSlot>) -> Self {
        Self {
            ty: ty.into(),
            description: None,
            default_value: None,
            origin_field_thunk: None,
            origin_type_thunk: None,
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

    /// The stamped field-level back-reference, if any.
    pub fn origin_field_thunk(&self) -> Option<&InputFieldThunk> {
        self.origin_field_thunk.as_ref()
    }

    /// The stamped type-level back-reference, if any.
    pub fn origin_type_thunk(&self) -> Option<&TypeThunk> {
        self.origin_type_thunk.as_ref()
    }
}

impl fmt::Debug for InputFieldConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputFieldConfig")
            .field("ty", &self.ty)
            .field("description", &self.description)
            .field("default_value", &self.default_value)
            .field("origin_field_thunk", &self.origin_field_thunk.is_some())
            .field("origin_type_thunk", &self.origin_type_thunk.is_some())
            .finish()
    }
}

impl PartialEq for InputFieldConfig {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && self.description == other.description
            && self.default_value == other.default_value
            && thunk_eq(&self.origin_field_thunk, &other.origin_field_thunk)
            && thunk_eq(&self.origin_type_thunk, &other.origin_type_thunk)
    }
}

/// One entry of an input field map.
#[derive(Clone)]
pub enum InputFieldEntry {
    Deferred(InputFieldThunk),
    Resolved(InputFieldConfig),
}

impl PartialEq for InputFieldEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Deferred(a), Self::Deferred(b)) => Arc::ptr_eq(a, b),
            (Self::Resolved(a), Self::Resolved(b)) => a == b,
            _ => false,
        }
    }
}

impl InputFieldEntry {
    /// A deferred input field entry.
    pub fn deferred<F>(thunk: F) -> Self
    where
        F: Fn() -> InputFieldConfig + Send + Sync + 'static,
    {
        Self::Deferred(Arc::new(thunk))
    }

    /// The concrete config, if resolved.
    pub fn config(&self) -> Option<&InputFieldConfig> {
        match self {
            Self::Resolved(config) => Some(config),
            Self::Deferred(_) => None,
        }
    }

    /// Whether this entry is still a thunk.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl From<InputFieldConfig> for InputFieldEntry {
    fn from(config: InputFieldConfig) -> Self {
        Self::Resolved(config)
    }
}

impl fmt::Debug for InputFieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deferred(_) => f.write_str("Deferred(<thunk>)"),
            Self::Resolved(config) => f.debug_tuple("Resolved").field(config).finish(),
        }
    }
}

/// Resolves every deferred entry of an output field map in place.
///
/// Each field is visited exactly once: a deferred entry is invoked and
/// its declared type coerced to an output type; a deferred type slot on
/// a concrete entry is invoked and just the slot replaced; a non-empty
/// argument map recurses through [`resolve_input_field_map`] under the
/// dotted path `"<typeName>.<fieldName>.args"`. Resolved entries are
/// stamped with back-references to the closures they came from so
/// [`restore_output_field_map`] can undo the pass. Entries with nothing
/// deferred are untouched, which makes repeated passes no-ops.
///
/// # Errors
///
/// Propagates coercion failures: [`SchemaError::MalformedSdl`],
/// [`SchemaError::UnknownType`], [`SchemaError::CapabilityMismatch`].
pub fn resolve_output_field_map(
    registry: &TypeRegistry,
    field_map: &mut OutputFieldMap,
    type_name: &str,
) -> Result<(), SchemaError> {
    for (field_name, entry) in field_map.iter_mut() {
        if let OutputFieldEntry::Deferred(thunk) = entry {
            let thunk = Arc::clone(thunk);
            let mut config = thunk();
            config.ty = match config.ty {
                TypeSlot::Resolved(ty) => {
                    TypeSlot::Resolved(coerce_output_type(registry, TypeSource::Type(ty))?)
                }
                TypeSlot::Reference(reference) => TypeSlot::Resolved(coerce_output_type(
                    registry,
                    TypeSource::Reference(reference),
                )?),
                deferred @ TypeSlot::Deferred(_) => deferred,
            };
            config.origin_field_thunk = Some(thunk);
            trace!(path = %format!("{type_name}.{field_name}"), "resolved deferred field");
            *entry = OutputFieldEntry::Resolved(config);
        }

        if let OutputFieldEntry::Resolved(config) = entry {
            if let TypeSlot::Deferred(type_thunk) = &config.ty {
                let type_thunk = Arc::clone(type_thunk);
                let ty = coerce_output_type(registry, type_thunk())?;
                config.ty = TypeSlot::Resolved(ty);
                config.origin_type_thunk = Some(type_thunk);
                trace!(path = %format!("{type_name}.{field_name}"), "resolved deferred field type");
            }
            if !config.args.is_empty() {
                let path = format!("{type_name}.{field_name}.args");
                resolve_input_field_map(registry, &mut config.args, &path)?;
            }
        }
    }
    Ok(())
}

/// Resolves every deferred entry of an input field map in place; mirror
/// of [`resolve_output_field_map`] without the argument recursion -
/// input definitions have no nested arguments.
///
/// # Errors
///
/// Propagates coercion failures: [`SchemaError::MalformedSdl`],
/// [`SchemaError::UnknownType`], [`SchemaError::CapabilityMismatch`].
pub fn resolve_input_field_map(
    registry: &TypeRegistry,
    field_map: &mut InputFieldMap,
    type_name: &str,
) -> Result<(), SchemaError> {
    for (field_name, entry) in field_map.iter_mut() {
        if let InputFieldEntry::Deferred(thunk) = entry {
            let thunk = Arc::clone(thunk);
            let mut config = thunk();
            config.ty = match config.ty {
                TypeSlot::Resolved(ty) => {
                    TypeSlot::Resolved(coerce_input_type(registry, TypeSource::Type(ty))?)
                }
                TypeSlot::Reference(reference) => TypeSlot::Resolved(coerce_input_type(
                    registry,
                    TypeSource::Reference(reference),
                )?),
                deferred @ TypeSlot::Deferred(_) => deferred,
            };
            config.origin_field_thunk = Some(thunk);
            trace!(path = %format!("{type_name}.{field_name}"), "resolved deferred input field");
            *entry = InputFieldEntry::Resolved(config);
        }

        if let InputFieldEntry::Resolved(config) = entry
            && let TypeSlot::Deferred(type_thunk) = &config.ty
        {
            let type_thunk = Arc::clone(type_thunk);
            let ty = coerce_input_type(registry, type_thunk())?;
            config.ty = TypeSlot::Resolved(ty);
            config.origin_type_thunk = Some(type_thunk);
            trace!(path = %format!("{type_name}.{field_name}"), "resolved deferred input field type");
        }
    }
    Ok(())
}

/// Restores deferred form in place: the inverse of
/// [`resolve_output_field_map`].
///
/// A stamped field-level back-reference replaces the whole entry;
/// otherwise a stamped type-level back-reference restores just the type
/// slot and nested arguments are restored recursively. Stamps are
/// cleared, so a restored map is structurally equal to the map the
/// resolution pass started from. Fields with no stamps are left as-is.
pub fn restore_output_field_map(field_map: &mut OutputFieldMap) {
    for (_, entry) in field_map.iter_mut() {
        if let OutputFieldEntry::Resolved(config) = entry {
            if let Some(thunk) = config.origin_field_thunk.take() {
                *entry = OutputFieldEntry::Deferred(thunk);
            } else {
                if let Some(type_thunk) = config.origin_type_thunk.take() {
                    config.ty = TypeSlot::Deferred(type_thunk);
                }
                restore_input_field_map(&mut config.args);
            }
        }
    }
}

/// Restores deferred form of an input field map in place; mirror of
/// [`restore_output_field_map`].
pub fn restore_input_field_map(field_map: &mut InputFieldMap) {
    for (_, entry) in field_map.iter_mut() {
        if let InputFieldEntry::Resolved(config) = entry {
            if let Some(thunk) = config.origin_field_thunk.take() {
                *entry = InputFieldEntry::Deferred(thunk);
            } else if let Some(type_thunk) = config.origin_type_thunk.take() {
                config.ty = TypeSlot::Deferred(type_thunk);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_empty_map_is_noop() {
        let registry = TypeRegistry::new();
        let mut map = OutputFieldMap::default();
        resolve_output_field_map(&registry, &mut map, "Query").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_plain_entries_are_untouched() {
        let registry = TypeRegistry::new();
        let int = Type::named(std::sync::Arc::clone(registry.get("Int").unwrap()));
        let mut map = OutputFieldMap::default();
        map.insert(
            "count".to_string(),
            OutputFieldEntry::from(OutputFieldConfig::new(int)),
        );
        let original = map.clone();

        resolve_output_field_map(&registry, &mut map, "Stats").unwrap();
        assert_eq!(map, original);
    }

    #[test]
    fn test_reference_slot_on_plain_entry_is_left_alone() {
        let registry = TypeRegistry::new();
        let mut map = OutputFieldMap::default();
        map.insert(
            "later".to_string(),
            OutputFieldEntry::from(OutputFieldConfig::new("SomeType")),
        );
        let original = map.clone();

        resolve_output_field_map(&registry, &mut map, "Query").unwrap();
        assert_eq!(map, original);
    }

    #[test]
    fn test_restore_without_stamps_is_noop() {
        let registry = TypeRegistry::new();
        let int = Type::named(std::sync::Arc::clone(registry.get("Int").unwrap()));
        let mut map = OutputFieldMap::default();
        map.insert(
            "count".to_string(),
            OutputFieldEntry::from(OutputFieldConfig::new(int)),
        );
        let original = map.clone();

        restore_output_field_map(&mut map);
        assert_eq!(map, original);
    }
}
