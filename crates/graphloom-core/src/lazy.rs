//! Deferred evaluation of schema parts.
//!
//! This module provides [`Lazy`], a memoizing cell that defers building a
//! value until first access. Field maps and implemented-interface lists
//! are stored this way so a type definition may reference names that are
//! not registered yet, including its own: the reference is only chased
//! once the whole batch of declarations has been processed and the value
//! is actually needed.
//!
//! A cell is a two-state machine: `Pending` holds an unevaluated
//! initializer, `Resolved` holds the built value. The transition is
//! one-way and memoized. A *failed* initialization does not transition:
//! the error is returned to the caller and the next access runs the
//! initializer again, so registering a missing type between accesses
//! turns failure into success.

use std::fmt;
use std::sync::OnceLock;

use crate::error::SchemaError;
use crate::registry::TypeRegistry;

/// Initializer for a deferred value. Evaluated against the registry the
/// accessor supplies, which is what lets a single definition participate
/// in any number of independent build sessions.
pub type LazyInit<T> = Box<dyn Fn(&TypeRegistry) -> Result<T, SchemaError> + Send + Sync>;

/// State of a [`Lazy`] cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyState {
    /// The initializer has not produced a value yet.
    Pending,
    /// The value is built and cached.
    Resolved,
}

/// A deferred, memoized value.
pub struct Lazy<T> {
    cell: OnceLock<T>,
    init: Option<LazyInit<T>>,
}

impl<T> Lazy<T> {
    /// Creates a cell that evaluates `init` on first access.
    pub fn deferred<F>(init: F) -> Self
    where
        F: Fn(&TypeRegistry) -> Result<T, SchemaError> + Send + Sync + 'static,
    {
        Self {
            cell: OnceLock::new(),
            init: Some(Box::new(init)),
        }
    }

    /// Creates an already-resolved cell. The registry is never consulted.
    pub fn resolved(value: T) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(value);
        Self { cell, init: None }
    }

    /// Returns the current state of the cell.
    pub fn state(&self) -> LazyState {
        if self.cell.get().is_some() {
            LazyState::Resolved
        } else {
            LazyState::Pending
        }
    }

    /// Whether the value has been built.
    pub fn is_resolved(&self) -> bool {
        self.state() == LazyState::Resolved
    }

    /// Gets the value, building it against `registry` if necessary.
    ///
    /// # Errors
    ///
    /// Propagates whatever the initializer returns, typically
    /// [`SchemaError::UnknownType`] when a referenced name is not
    /// registered yet. Errors are not memoized.
    pub fn get(&self, registry: &TypeRegistry) -> Result<&T, SchemaError> {
        if let Some(value) = self.cell.get() {
            return Ok(value);
        }
        let init = self
            .init
            .as_ref()
            .ok_or_else(|| SchemaError::invariant("pending cell has no initializer"))?;
        let value = init(registry)?;
        Ok(self.cell.get_or_init(|| value))
    }
}

impl<T: fmt::Debug> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => f.debug_tuple("Resolved").field(value).finish(),
            None => f.write_str("Pending"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_resolved_cell_never_runs_registry() {
        let lazy = Lazy::resolved(7);
        let registry = TypeRegistry::new();
        assert!(lazy.is_resolved());
        assert_eq!(*lazy.get(&registry).unwrap(), 7);
    }

    #[test]
    fn test_deferred_cell_evaluates_once() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let lazy = Lazy::deferred(|_| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(42)
        });
        let registry = TypeRegistry::new();

        assert_eq!(lazy.state(), LazyState::Pending);
        assert_eq!(*lazy.get(&registry).unwrap(), 42);
        assert_eq!(*lazy.get(&registry).unwrap(), 42);
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(lazy.state(), LazyState::Resolved);
    }

    #[test]
    fn test_failed_initialization_is_retried() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let lazy: Lazy<i32> = Lazy::deferred(|_| {
            if CALLS.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(SchemaError::unknown_type("Node"))
            } else {
                Ok(1)
            }
        });
        let registry = TypeRegistry::new();

        assert!(matches!(
            lazy.get(&registry),
            Err(SchemaError::UnknownType(name)) if name == "Node"
        ));
        assert_eq!(lazy.state(), LazyState::Pending);
        assert_eq!(*lazy.get(&registry).unwrap(), 1);
    }
}
