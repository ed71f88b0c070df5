//! Directive extraction helpers.
//!
//! The compiler consumes directives as declaration metadata only;
//! execution semantics (`@skip`/`@include`) belong to the query engine.
//! The one directive it understands is `@deprecated`, on fields and enum
//! values.

use async_graphql_parser::Positioned;
use async_graphql_parser::types::ConstDirective;
use async_graphql_value::ConstValue;

/// Directive name constants understood by the compiler.
pub mod names {
    pub const DEPRECATED: &str = "deprecated";
}

/// The `@deprecated` directive's own default for its `reason` argument,
/// per the GraphQL specification.
pub const DEFAULT_DEPRECATION_REASON: &str = "No longer supported";

/// Extracts the deprecation reason from a directive list.
///
/// The first `@deprecated` occurrence wins. An explicit string `reason`
/// is returned verbatim; a directive without a usable `reason` argument
/// falls back to the directive's declared default. No directive, no
/// reason.
pub fn deprecation_reason(directives: &[Positioned<ConstDirective>]) -> Option<String> {
    let deprecated = directives
        .iter()
        .find(|directive| directive.node.name.node.as_str() == names::DEPRECATED)?;

    match deprecated.node.get_argument("reason") {
        Some(reason) => match &reason.node {
            ConstValue::String(text) => Some(text.clone()),
            _ => Some(DEFAULT_DEPRECATION_REASON.to_string()),
        },
        None => Some(DEFAULT_DEPRECATION_REASON.to_string()),
    }
}
