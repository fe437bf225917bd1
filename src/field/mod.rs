//! Form field declarations.
//!
//! A [`Field`] carries the dependency-relevant facets of one form input: its
//! key, the keys it depends on, and one callback per [`FieldContext`]. When
//! any upstream field changes, the resolver invokes the callback registered
//! for the active context and collects the [`FieldUpdate`] it returns.
//!
//! ```rust
//! use fieldgraph::field::{Field, FieldContext, FieldUpdate};
//!
//! let city: Field = Field::new("city")
//!     .depends_on(["country"])
//!     .on(FieldContext::Form, |_field, data, _request| {
//!         let has_country = data.get("country").is_some_and(|v| !v.is_null());
//!         Some(FieldUpdate::new().set_visible(has_country))
//!     });
//!
//! assert!(city.has_callback(&FieldContext::Form));
//! assert!(!city.has_callback(&FieldContext::Filter));
//! ```

pub mod context;
pub mod registry;
pub mod rules;
pub mod update;

pub use context::FieldContext;
pub use registry::{Validator, ValidatorRegistry};
pub use rules::ValidationRule;
pub use update::{FieldState, FieldUpdate};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Snapshot of every field's current value, keyed by field key.
pub type FormData = serde_json::Map<String, serde_json::Value>;

/// Callback run for an affected field.
///
/// Receives the field itself, the current form data and the opaque request
/// context `C`. Returning `None` means "no change for this field".
///
/// There is no error channel: a callback that fails must handle it itself,
/// typically by logging through something reachable from `C` and returning
/// `None`.
pub type FieldCallback<C> =
    Arc<dyn Fn(&Field<C>, &FormData, &C) -> Option<FieldUpdate> + Send + Sync>;

/// One form field's key, dependencies and context-scoped callbacks.
///
/// `C` is the request context passed through to callbacks untouched.
pub struct Field<C = ()> {
    key: String,
    label: Option<String>,
    depends_on: Vec<String>,
    callbacks: HashMap<FieldContext, FieldCallback<C>>,
}

impl<C> Field<C> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            depends_on: Vec::new(),
            callbacks: HashMap::new(),
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Declare upstream dependencies, appended in order.
    ///
    /// Duplicates and self-references are kept as given; cycle detection is
    /// what reports a self-reference.
    #[must_use]
    pub fn depends_on<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Register the callback for `context`, replacing any previous one.
    #[must_use]
    pub fn on<F>(mut self, context: impl Into<FieldContext>, callback: F) -> Self
    where
        F: Fn(&Field<C>, &FormData, &C) -> Option<FieldUpdate> + Send + Sync + 'static,
    {
        self.callbacks.insert(context.into(), Arc::new(callback));
        self
    }

    /// Register an already shared callback for `context`.
    #[must_use]
    pub fn on_shared(mut self, context: impl Into<FieldContext>, callback: FieldCallback<C>) -> Self {
        self.callbacks.insert(context.into(), callback);
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The label, falling back to the key.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.depends_on
    }

    #[must_use]
    pub fn callback(&self, context: &FieldContext) -> Option<&FieldCallback<C>> {
        self.callbacks.get(context)
    }

    #[must_use]
    pub fn has_callback(&self, context: &FieldContext) -> bool {
        self.callbacks.contains_key(context)
    }

    /// Contexts this field has callbacks for.
    pub fn contexts(&self) -> impl Iterator<Item = &FieldContext> {
        self.callbacks.keys()
    }

    /// `true` if the field declares dependencies and has at least one callback.
    #[must_use]
    pub fn is_reactive(&self) -> bool {
        !self.depends_on.is_empty() && !self.callbacks.is_empty()
    }
}

// Manual impl: callbacks are shared, so `C` need not be Clone.
impl<C> Clone for Field<C> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            depends_on: self.depends_on.clone(),
            callbacks: self.callbacks.clone(),
        }
    }
}

impl<C> fmt::Debug for Field<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut contexts: Vec<&str> = self.callbacks.keys().map(FieldContext::as_str).collect();
        contexts.sort_unstable();
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("depends_on", &self.depends_on)
            .field("contexts", &contexts)
            .finish()
    }
}
