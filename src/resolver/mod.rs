//! Field dependency resolution.
//!
//! Given a field list, the active [`FieldContext`] and the keys that just
//! changed, [`DependencyResolver`] works out which fields are affected and
//! collects a [`FieldUpdate`] for each one that wants to react.
//!
//! # Resolution Process
//!
//! 1. **Graph Construction**: build a [`DependencyGraph`] (dependency → dependents)
//!    from the field list. Rebuilt on every call.
//! 2. **Affected Set**: BFS from the changed keys over the reverse graph.
//! 3. **Callbacks**: for each affected key, in discovery order, find the field
//!    by key, fetch its callback for the active context and run it with the
//!    form data and request context.
//! 4. **Collection**: every `Some(update)` is recorded under the field's key.
//!
//! # Permissive Lookups
//!
//! Unknown keys are never an error. A changed key that matches no field, a
//! `depends_on` entry naming a field that was removed, or an affected key
//! with no field behind it are all skipped. So is a field with no callback
//! for the active context.
//!
//! # Cycles
//!
//! Resolution does not check for cycles; the BFS terminates regardless.
//! Call [`DependencyResolver::detect_circular_dependencies`] when fields are
//! registered (see [`crate::form::FieldSet`]) and refuse to serve the form if
//! it fails.
//!
//! # Example
//!
//! ```rust
//! use fieldgraph::field::{Field, FieldContext, FieldUpdate, FormData};
//! use fieldgraph::resolver::DependencyResolver;
//!
//! let fields: Vec<Field> = vec![
//!     Field::new("country"),
//!     Field::new("city")
//!         .depends_on(["country"])
//!         .on(FieldContext::Form, |_, _, _| Some(FieldUpdate::new().show().make_required())),
//! ];
//!
//! let resolver = DependencyResolver::new(&fields, FieldContext::Form);
//! resolver.detect_circular_dependencies().unwrap();
//!
//! let updates = resolver.resolve(&FormData::new(), &["country"], &());
//! assert_eq!(updates["city"].required, Some(true));
//! ```

pub mod dependency_graph;

pub use dependency_graph::DependencyGraph;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace};

use crate::core::FieldError;
use crate::field::{Field, FieldContext, FieldUpdate, FormData};

/// Patches collected by one resolution, keyed by field key, in the order the
/// fields were reached.
pub type FieldUpdates = IndexMap<String, FieldUpdate>;

/// Resolves field updates for one context over a borrowed field list.
pub struct DependencyResolver<'a, C = ()> {
    fields: &'a [Field<C>],
    context: FieldContext,
}

impl<'a, C> DependencyResolver<'a, C> {
    pub fn new(fields: &'a [Field<C>], context: impl Into<FieldContext>) -> Self {
        Self {
            fields,
            context: context.into(),
        }
    }

    #[must_use]
    pub const fn context(&self) -> &FieldContext {
        &self.context
    }

    #[must_use]
    pub const fn fields(&self) -> &'a [Field<C>] {
        self.fields
    }

    /// Linear lookup by key; first match wins.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&'a Field<C>> {
        self.fields.iter().find(|field| field.key() == key)
    }

    /// Check the field list for dependency cycles.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::CircularDependency`] naming a field on the cycle.
    pub fn detect_circular_dependencies(&self) -> Result<(), FieldError> {
        DependencyGraph::from_fields(self.fields).detect_cycles(self.fields)
    }

    /// Keys transitively affected by `changed`, in BFS discovery order.
    pub fn affected_fields<S: AsRef<str>>(&self, changed: &[S]) -> IndexSet<String> {
        DependencyGraph::from_fields(self.fields).find_affected(changed)
    }

    /// Run the callbacks of every field affected by `changed`.
    ///
    /// Always succeeds; the result is empty when nothing reacts. The returned
    /// keys are a subset of [`affected_fields`](Self::affected_fields).
    pub fn resolve<S: AsRef<str>>(
        &self,
        form_data: &FormData,
        changed: &[S],
        request: &C,
    ) -> FieldUpdates {
        let affected = self.affected_fields(changed);
        let mut updates = FieldUpdates::new();

        for key in &affected {
            let Some(field) = self.field(key) else {
                trace!("Affected field '{}' is not registered, skipping", key);
                continue;
            };
            let Some(callback) = field.callback(&self.context) else {
                trace!("Field '{}' has no '{}' callback, skipping", key, self.context);
                continue;
            };

            match callback(field, form_data, request) {
                Some(update) => {
                    updates.insert(key.clone(), update);
                }
                None => trace!("Field '{}' reported no change", key),
            }
        }

        debug!(
            "Resolved {} changed field(s) in '{}' context: {} affected, {} updated",
            changed.len(),
            self.context,
            affected.len(),
            updates.len()
        );

        updates
    }
}
