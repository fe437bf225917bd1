//! Field registration.
//!
//! [`FieldSet`] is where cycle detection runs proactively: every
//! [`register`](FieldSet::register) call re-checks the graph and rolls the
//! registration back if it would introduce a cycle, so a form that made it
//! through registration can be resolved safely on every request.

pub mod schema;

pub use schema::{Condition, FieldSchema, FormSchema, Reaction};

use std::fmt;
use tracing::debug;

use crate::config::EngineConfig;
use crate::core::FieldError;
use crate::field::{Field, FieldContext, FormData};
use crate::resolver::{DependencyGraph, DependencyResolver, FieldUpdates};

/// An ordered, validated collection of fields.
pub struct FieldSet<C = ()> {
    fields: Vec<Field<C>>,
    detect_cycles: bool,
}

impl<C> Default for FieldSet<C> {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            detect_cycles: true,
        }
    }
}

impl<C> FieldSet<C> {
    /// Empty set with cycle detection on registration enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty set following `config.detect_cycles_on_register`.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new().with_cycle_check(config.detect_cycles_on_register)
    }

    #[must_use]
    pub fn with_cycle_check(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    /// Add a field.
    ///
    /// # Errors
    ///
    /// - [`FieldError::DuplicateField`] if the key is already registered
    /// - [`FieldError::CircularDependency`] if cycle detection is enabled and
    ///   the new field closes a cycle
    ///
    /// On error the set is left unchanged.
    pub fn register(&mut self, field: Field<C>) -> Result<(), FieldError> {
        let key = field.key().to_string();
        if self.get(&key).is_some() {
            return Err(FieldError::DuplicateField {
                key,
            });
        }

        self.fields.push(field);
        if self.detect_cycles
            && let Err(err) = self.check()
        {
            self.fields.pop();
            return Err(err);
        }

        debug!("Registered field '{}' ({} total)", key, self.fields.len());
        Ok(())
    }

    /// Register several fields, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register); fields before the failing one
    /// stay registered.
    pub fn extend(&mut self, fields: impl IntoIterator<Item = Field<C>>) -> Result<(), FieldError> {
        for field in fields {
            self.register(field)?;
        }
        Ok(())
    }

    /// Run cycle detection over the registered fields.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::CircularDependency`] if the fields form a cycle.
    pub fn check(&self) -> Result<(), FieldError> {
        DependencyGraph::from_fields(&self.fields).detect_cycles(&self.fields)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Field<C>> {
        self.fields.iter().find(|field| field.key() == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::key)
    }

    #[must_use]
    pub fn fields(&self) -> &[Field<C>] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reverse dependency graph of the registered fields.
    #[must_use]
    pub fn graph(&self) -> DependencyGraph {
        DependencyGraph::from_fields(&self.fields)
    }

    /// A resolver over these fields for `context`.
    pub fn resolver(&self, context: impl Into<FieldContext>) -> DependencyResolver<'_, C> {
        DependencyResolver::new(&self.fields, context)
    }

    /// Shorthand for `self.resolver(context).resolve(...)`.
    pub fn resolve<S: AsRef<str>>(
        &self,
        context: impl Into<FieldContext>,
        form_data: &FormData,
        changed: &[S],
        request: &C,
    ) -> FieldUpdates {
        self.resolver(context).resolve(form_data, changed, request)
    }
}

impl<C> fmt::Debug for FieldSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSet")
            .field("fields", &self.fields)
            .field("detect_cycles", &self.detect_cycles)
            .finish()
    }
}
