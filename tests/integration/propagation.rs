//! Multi-field resolution through the public API.

use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use fieldgraph::field::{Field, FieldContext, FieldState, FieldUpdate, FormData, ValidationRule};
use fieldgraph::form::FieldSet;
use fieldgraph::test_utils::{address_field_set, form_data, init_test_logging};

/// Request-scoped collaborator handed to every callback.
struct Catalog {
    cities: HashMap<&'static str, Vec<(&'static str, &'static str)>>,
    lookups: AtomicUsize,
}

impl Catalog {
    fn new() -> Self {
        let mut cities = HashMap::new();
        cities.insert("US", vec![("nyc", "New York"), ("sf", "San Francisco")]);
        cities.insert("FR", vec![("par", "Paris")]);
        Self {
            cities,
            lookups: AtomicUsize::new(0),
        }
    }

    fn cities_for(&self, country: &str) -> Vec<(String, String)> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.cities
            .get(country)
            .map(|list| list.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
            .unwrap_or_default()
    }
}

fn catalog_form() -> FieldSet<Catalog> {
    let mut set = FieldSet::new();
    set.extend([
        Field::new("country"),
        Field::new("city").depends_on(["country"]).on(
            FieldContext::Form,
            |_, data: &FormData, catalog: &Catalog| {
                let country = data.get("country").and_then(Value::as_str)?;
                let options = catalog.cities_for(country);
                Some(FieldUpdate::new().set_options(options).clear_value())
            },
        ),
        Field::new("district").depends_on(["city"]).on(
            FieldContext::Form,
            |_, _: &FormData, _: &Catalog| Some(FieldUpdate::new().hide()),
        ),
    ])
    .unwrap();
    set
}

#[test]
fn test_address_form_for_us() {
    init_test_logging(None);
    let set = address_field_set();

    let updates = set.resolve(
        FieldContext::Form,
        &form_data(json!({ "country": "US", "state": "NY" })),
        &["country"],
        &(),
    );

    assert_eq!(updates.keys().collect::<Vec<_>>(), vec!["state", "zip"]);
    assert_eq!(updates["state"], FieldUpdate::new().show().make_required());
    assert_eq!(updates["zip"], FieldUpdate::new().enable());
}

#[test]
fn test_hidden_field_is_cleared_explicitly() {
    let set = address_field_set();

    let updates = set.resolve(
        FieldContext::Form,
        &form_data(json!({ "country": "DE" })),
        &["country"],
        &(),
    );

    let state = serde_json::to_value(&updates["state"]).unwrap();
    assert_eq!(state, json!({ "visible": false, "required": false, "value": "" }));
}

#[test]
fn test_request_context_reaches_callbacks() {
    let set = catalog_form();
    let catalog = Catalog::new();

    let updates = set.resolve(
        FieldContext::Form,
        &form_data(json!({ "country": "FR" })),
        &["country"],
        &catalog,
    );

    assert_eq!(catalog.lookups.load(Ordering::SeqCst), 1);
    let city = &updates["city"];
    assert_eq!(city.options.as_ref().unwrap().get("par").map(String::as_str), Some("Paris"));
    assert_eq!(city.value, Some(Value::Null));
    assert_eq!(updates["district"], FieldUpdate::new().hide());
}

#[test]
fn test_callback_returning_none_is_omitted() {
    let set = catalog_form();
    let catalog = Catalog::new();

    // No country in the form data: the city callback bails out early.
    let updates = set.resolve(FieldContext::Form, &FormData::new(), &["country"], &catalog);

    assert!(!updates.contains_key("city"));
    assert!(updates.contains_key("district"));
    assert_eq!(catalog.lookups.load(Ordering::SeqCst), 0);
}

#[test]
fn test_other_context_has_no_callbacks() {
    let set = catalog_form();
    let updates = set.resolve(
        FieldContext::Custom("inline".into()),
        &form_data(json!({ "country": "US" })),
        &["country"],
        &Catalog::new(),
    );
    assert!(updates.is_empty());
}

#[test]
fn test_updates_apply_to_client_state() {
    let set = address_field_set();
    let mut states: HashMap<String, FieldState> =
        set.keys().map(|key| (key.to_string(), FieldState::default())).collect();

    let updates = set.resolve(
        FieldContext::Form,
        &form_data(json!({ "country": "CA" })),
        &["country"],
        &(),
    );
    for (key, update) in &updates {
        if let Some(state) = states.get_mut(key) {
            update.apply_to(state);
        }
    }

    assert!(!states["state"].visible);
    assert!(!states["state"].required);
    assert!(states["zip"].disabled);
    // untouched fields keep their defaults
    assert!(states["country"].visible);
}

#[test]
fn test_rules_replace_and_append() {
    let set: FieldSet = {
        let mut set = FieldSet::new();
        set.extend([
            Field::new("kind"),
            Field::new("amount").depends_on(["kind"]).on(FieldContext::Form, |_, data, _| {
                let update = FieldUpdate::new()
                    .set_rules(vec![ValidationRule::required(), ValidationRule::numeric()]);
                if data.get("kind").and_then(Value::as_str) == Some("percent") {
                    Some(update.add_rule(ValidationRule::max(100.0).unwrap()))
                } else {
                    Some(update)
                }
            }),
        ])
        .unwrap();
        set
    };

    let updates =
        set.resolve(FieldContext::Form, &form_data(json!({ "kind": "percent" })), &["kind"], &());
    let names: Vec<&str> = updates["amount"]
        .rules
        .as_ref()
        .unwrap()
        .iter()
        .map(|rule| rule.name.as_str())
        .collect();
    assert_eq!(names, vec!["required", "numeric", "max"]);
}

#[tokio::test]
async fn test_shared_field_set_across_tasks() {
    let set = Arc::new(address_field_set());

    let handles: Vec<_> = ["US", "FR", "US", "JP"]
        .into_iter()
        .map(|country| {
            let set = Arc::clone(&set);
            tokio::spawn(async move {
                let updates = set.resolve(
                    FieldContext::Form,
                    &form_data(json!({ "country": country })),
                    &["country"],
                    &(),
                );
                (country, updates["state"].visible)
            })
        })
        .collect();

    for handle in handles {
        let (country, visible) = handle.await.unwrap();
        assert_eq!(visible, Some(country == "US"));
    }
}
