//! fieldgraph - form field dependency propagation
//!
//! Given form fields that declare which other fields they depend on, and the
//! set of fields whose value just changed, fieldgraph finds every field that is
//! transitively affected and asks each one, through a context-scoped callback,
//! how its client-visible state should change.
//!
//! # Architecture Overview
//!
//! ```text
//! changed keys ──► DependencyGraph::from_fields   (dependency → dependents)
//!                        │
//!                        ▼
//!                  find_affected (BFS, cycle-safe)
//!                        │
//!                        ▼
//!          for each affected field: callback(context)
//!                        │
//!                        ▼
//!              IndexMap<key, FieldUpdate>
//! ```
//!
//! Cycle detection is a separate DFS pass. [`form::FieldSet`] runs it on every
//! registration so cyclic configurations are rejected up front; the
//! propagation path never loops even if one slips through.
//!
//! # Core Modules
//!
//! - [`field`] - Field declarations, contexts, the tri-state [`field::FieldUpdate`]
//!   patch, validation rules and the validator registry
//! - [`resolver`] - Graph building, cycle detection, affected-set search and
//!   the [`resolver::DependencyResolver`] orchestrator
//! - [`form`] - Validated field registration and declarative TOML schemas
//! - [`config`] - Engine configuration (`~/.fieldgraph/config.toml`)
//! - [`core`] - Error types and user-facing error formatting
//! - [`cli`] - The `fieldgraph` command-line tool
//!
//! # Example
//!
//! ```rust
//! use fieldgraph::field::{Field, FieldContext, FieldUpdate, FormData};
//! use fieldgraph::form::FieldSet;
//! use serde_json::Value;
//!
//! let mut set = FieldSet::new();
//! set.register(Field::new("country")).unwrap();
//! set.register(
//!     Field::new("state")
//!         .depends_on(["country"])
//!         .on(FieldContext::Form, |_, data: &FormData, _: &()| {
//!             let us = data.get("country").and_then(Value::as_str) == Some("US");
//!             Some(FieldUpdate::new().set_visible(us).set_required(us))
//!         }),
//! )
//! .unwrap();
//!
//! let mut data = FormData::new();
//! data.insert("country".into(), "US".into());
//!
//! let updates = set.resolve(FieldContext::Form, &data, &["country"], &());
//! assert_eq!(
//!     serde_json::to_string(&updates["state"]).unwrap(),
//!     r#"{"visible":true,"required":true}"#
//! );
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod field;
pub mod form;
pub mod resolver;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
