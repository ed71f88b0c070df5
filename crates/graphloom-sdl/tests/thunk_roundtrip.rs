//! Integration tests for the thunk resolution engine: the round-trip
//! law, idempotence, and cycle-breaking via deferred entries.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use graphloom_core::{SchemaError, Type, TypeRegistry};
use graphloom_sdl::{
    InputFieldConfig, InputFieldEntry, OutputFieldConfig, OutputFieldEntry, OutputFieldMap,
    TypeSlot, compile_type_fragment, resolve_output_field_map, restore_output_field_map,
};

fn registry_with_node() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    compile_type_fragment(&mut registry, "type Node { id: ID }").unwrap();
    registry
}

fn named(registry: &TypeRegistry, name: &str) -> Type {
    Type::named(Arc::clone(registry.get(name).unwrap()))
}

/// A map mixing a plain field, a field-level thunk, and a type-level
/// thunk, as composition code would build it.
fn mixed_map(registry: &TypeRegistry) -> OutputFieldMap {
    let mut map = OutputFieldMap::default();
    map.insert(
        "plain".to_string(),
        OutputFieldEntry::from(OutputFieldConfig::new(named(registry, "Int"))),
    );
    map.insert(
        "whole".to_string(),
        OutputFieldEntry::deferred(|| {
            OutputFieldConfig::new("Node!").with_description("deferred whole field")
        }),
    );
    let mut by_type = OutputFieldConfig::new(TypeSlot::deferred(|| "[Node]".into()));
    by_type.description = Some("deferred type only".to_string());
    map.insert("byType".to_string(), OutputFieldEntry::from(by_type));
    map
}

#[test]
fn resolve_materializes_every_deferred_entry() {
    let registry = registry_with_node();
    let mut map = mixed_map(&registry);

    resolve_output_field_map(&registry, &mut map, "Query").unwrap();

    let whole = map["whole"].config().unwrap();
    assert_eq!(whole.ty.ty().unwrap().to_string(), "Node!");
    assert_eq!(whole.description.as_deref(), Some("deferred whole field"));
    assert!(whole.origin_field_thunk().is_some());
    assert!(whole.origin_type_thunk().is_none());

    let by_type = map["byType"].config().unwrap();
    assert_eq!(by_type.ty.ty().unwrap().to_string(), "[Node]");
    assert_eq!(by_type.description.as_deref(), Some("deferred type only"));
    assert!(by_type.origin_field_thunk().is_none());
    assert!(by_type.origin_type_thunk().is_some());

    let plain = map["plain"].config().unwrap();
    assert!(plain.origin_field_thunk().is_none());
    assert!(plain.origin_type_thunk().is_none());
}

#[test]
fn restore_after_resolve_is_structurally_equal_to_the_original() {
    let registry = registry_with_node();
    let mut map = mixed_map(&registry);
    let original = map.clone();

    resolve_output_field_map(&registry, &mut map, "Query").unwrap();
    assert_ne!(map, original, "resolution must change the deferred entries");

    restore_output_field_map(&mut map);
    assert_eq!(map, original);
}

#[test]
fn resolution_is_idempotent_and_invokes_each_thunk_once() {
    static FIELD_CALLS: AtomicUsize = AtomicUsize::new(0);
    static TYPE_CALLS: AtomicUsize = AtomicUsize::new(0);

    let registry = registry_with_node();
    let mut map = OutputFieldMap::default();
    map.insert(
        "whole".to_string(),
        OutputFieldEntry::deferred(|| {
            FIELD_CALLS.fetch_add(1, Ordering::SeqCst);
            OutputFieldConfig::new("Node")
        }),
    );
    map.insert(
        "byType".to_string(),
        OutputFieldEntry::from(OutputFieldConfig::new(TypeSlot::deferred(|| {
            TYPE_CALLS.fetch_add(1, Ordering::SeqCst);
            "Node".into()
        }))),
    );

    resolve_output_field_map(&registry, &mut map, "Query").unwrap();
    let after_first = map.clone();
    resolve_output_field_map(&registry, &mut map, "Query").unwrap();

    assert_eq!(map, after_first);
    assert_eq!(FIELD_CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(TYPE_CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn type_thunk_breaks_the_forward_reference_cycle() {
    // Compose a field map that names a type which does not exist yet.
    let mut registry = TypeRegistry::new();
    let mut map = OutputFieldMap::default();
    map.insert(
        "next".to_string(),
        OutputFieldEntry::from(OutputFieldConfig::new(TypeSlot::deferred(|| "Node".into()))),
    );

    // The name only has to exist at resolution time.
    compile_type_fragment(&mut registry, "type Node { id: ID }").unwrap();
    resolve_output_field_map(&registry, &mut map, "Node").unwrap();

    let next = map["next"].config().unwrap();
    assert_eq!(next.ty.ty().unwrap().base_named().name(), "Node");
}

#[test]
fn args_resolve_recursively_and_round_trip() {
    let registry = registry_with_node();

    let arg_by_type =
        InputFieldConfig::new(TypeSlot::deferred(|| "Int!".into())).with_description("limit");
    let field = OutputFieldConfig::new(named(&registry, "Node"))
        .with_arg("limit", arg_by_type)
        .with_arg(
            "after",
            InputFieldEntry::deferred(|| InputFieldConfig::new("ID")),
        );

    let mut map = OutputFieldMap::default();
    map.insert("node".to_string(), OutputFieldEntry::from(field));
    let original = map.clone();

    resolve_output_field_map(&registry, &mut map, "Query").unwrap();

    let args = &map["node"].config().unwrap().args;
    let limit = args["limit"].config().unwrap();
    assert_eq!(limit.ty.ty().unwrap().to_string(), "Int!");
    assert!(limit.origin_type_thunk().is_some());
    let after = args["after"].config().unwrap();
    assert_eq!(after.ty.ty().unwrap().to_string(), "ID");
    assert!(after.origin_field_thunk().is_some());

    restore_output_field_map(&mut map);
    assert_eq!(map, original);
}

#[test]
fn unknown_reference_from_a_thunk_is_fatal() {
    let registry = TypeRegistry::new();
    let mut map = OutputFieldMap::default();
    map.insert(
        "broken".to_string(),
        OutputFieldEntry::deferred(|| OutputFieldConfig::new("Bogus")),
    );

    let err = resolve_output_field_map(&registry, &mut map, "Query").unwrap_err();
    assert!(matches!(&err, SchemaError::UnknownType(name) if name == "Bogus"));
}

#[test]
fn output_capability_is_enforced_on_thunk_results() {
    let mut registry = TypeRegistry::new();
    compile_type_fragment(&mut registry, "input Filter { q: String }").unwrap();

    let mut map = OutputFieldMap::default();
    map.insert(
        "filter".to_string(),
        OutputFieldEntry::deferred(|| OutputFieldConfig::new("Filter")),
    );

    let err = resolve_output_field_map(&registry, &mut map, "Query").unwrap_err();
    assert!(matches!(
        err,
        SchemaError::CapabilityMismatch { ref type_name, .. } if type_name == "Filter"
    ));
}

#[test]
fn input_capability_is_enforced_inside_args() {
    let registry = registry_with_node();

    let field = OutputFieldConfig::new(named(&registry, "Int")).with_arg(
        "node",
        InputFieldEntry::deferred(|| InputFieldConfig::new("Node")),
    );
    let mut map = OutputFieldMap::default();
    map.insert("count".to_string(), OutputFieldEntry::from(field));

    let err = resolve_output_field_map(&registry, &mut map, "Query").unwrap_err();
    assert!(matches!(
        err,
        SchemaError::CapabilityMismatch { ref type_name, .. } if type_name == "Node"
    ));
}

#[test]
fn field_thunk_returning_a_deferred_type_gets_both_stamps() {
    let registry = registry_with_node();
    let mut map = OutputFieldMap::default();
    map.insert(
        "nested".to_string(),
        OutputFieldEntry::deferred(|| {
            OutputFieldConfig::new(TypeSlot::deferred(|| "Node".into()))
        }),
    );

    resolve_output_field_map(&registry, &mut map, "Query").unwrap();
    let config = map["nested"].config().unwrap();
    assert_eq!(config.ty.ty().unwrap().base_named().name(), "Node");
    assert!(config.origin_field_thunk().is_some());
    assert!(config.origin_type_thunk().is_some());

    // On restore, the field-level stamp wins: the entry collapses back
    // to the original field thunk.
    restore_output_field_map(&mut map);
    assert!(map["nested"].is_deferred());
}
