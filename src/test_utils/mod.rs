//! Test utilities for fieldgraph
//!
//! Shared fixtures for unit and integration tests: a small address form in
//! both schema and code form, a `FormData` builder and one-time logging setup.
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldgraph::field::FieldContext;
//! use fieldgraph::test_utils::{address_field_set, form_data};
//! use serde_json::json;
//!
//! let set = address_field_set();
//! let updates = set.resolve(FieldContext::Form, &form_data(json!({ "country": "US" })), &["country"], &());
//! assert!(updates.contains_key("state"));
//! ```

use serde_json::Value;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::field::{Field, FieldContext, FieldUpdate, FormData};
use crate::form::FieldSet;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=fieldgraph=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Convert a `json!` object into [`FormData`]. Non-objects give empty data.
#[must_use]
pub fn form_data(value: Value) -> FormData {
    match value {
        Value::Object(map) => map,
        _ => FormData::new(),
    }
}

/// The address form as a TOML schema.
///
/// `state` shows and becomes required for the US, hides and clears otherwise;
/// `city` lists options per country; `zip` enables once a state is chosen.
pub const ADDRESS_SCHEMA: &str = r#"
[[fields]]
key = "country"
label = "Country"

[[fields]]
key = "state"
label = "State"
depends_on = ["country"]

[[fields.on.form]]
when = { field = "country", equals = "US" }
update = { visible = true, required = true }

[[fields.on.form]]
update = { visible = false, required = false, value = "" }

[[fields]]
key = "city"
depends_on = ["country"]

[[fields.on.form]]
when = { field = "country", equals = "US" }
update = { options = { nyc = "New York", sf = "San Francisco" } }

[[fields.on.form]]
when = { field = "country", equals = "FR" }
update = { options = { par = "Paris", lyo = "Lyon" } }

[[fields.on.filter]]
update = { placeholder = "Any city" }

[[fields]]
key = "zip"
label = "ZIP code"
depends_on = ["state"]

[[fields.on.form]]
when = { field = "state", is_empty = false }
update = { disabled = false }

[[fields.on.form]]
update = { disabled = true, value = "" }
"#;

/// The address form built in code, for tests that do not go through a schema.
///
/// # Panics
///
/// Never in practice; the fixture has no duplicates or cycles.
#[must_use]
pub fn address_field_set() -> FieldSet {
    let fields: [Field; 3] = [
        Field::new("country").label("Country"),
        Field::new("state").label("State").depends_on(["country"]).on(
            FieldContext::Form,
            |_, data, _| {
                if data.get("country").and_then(Value::as_str) == Some("US") {
                    Some(FieldUpdate::new().show().make_required())
                } else {
                    Some(FieldUpdate::new().hide().make_optional().set_value(""))
                }
            },
        ),
        Field::new("zip").label("ZIP code").depends_on(["state"]).on(
            FieldContext::Form,
            |_, data, _| match data.get("state").and_then(Value::as_str) {
                Some(state) if !state.is_empty() => Some(FieldUpdate::new().enable()),
                _ => Some(FieldUpdate::new().disable().set_value("")),
            },
        ),
    ];

    let mut set = FieldSet::new();
    set.extend(fields)
        .unwrap_or_else(|err| panic!("address fixture failed to register: {err}"));
    set
}
