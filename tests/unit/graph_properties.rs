use fieldgraph::core::FieldError;
use fieldgraph::field::{Field, FieldContext, FieldUpdate, FormData};
use fieldgraph::resolver::{DependencyGraph, DependencyResolver};

fn field(key: &str, deps: &[&str]) -> Field {
    Field::new(key)
        .depends_on(deps.iter().copied())
        .on(FieldContext::Form, |_, _, _| Some(FieldUpdate::new().show()))
}

#[test]
fn test_affected_set_is_transitive_closure() {
    let fields = vec![
        field("a", &[]),
        field("b", &["a"]),
        field("c", &["b"]),
        field("d", &["c"]),
        field("x", &[]),
        field("y", &["x"]),
    ];
    let resolver = DependencyResolver::new(&fields, FieldContext::Form);

    let affected = resolver.affected_fields(&["a"]);
    assert_eq!(affected.iter().collect::<Vec<_>>(), vec!["b", "c", "d"]);

    let affected = resolver.affected_fields(&["b", "x"]);
    assert_eq!(affected.iter().collect::<Vec<_>>(), vec!["c", "y", "d"]);
}

#[test]
fn test_changed_key_excluded_unless_reachable() {
    let fields = vec![field("a", &[]), field("b", &["a"]), field("c", &["b"])];
    let resolver = DependencyResolver::new(&fields, FieldContext::Form);

    assert!(!resolver.affected_fields(&["b"]).contains("b"));
    // b is also a dependent of a, which changed alongside it.
    assert!(resolver.affected_fields(&["a", "b"]).contains("b"));
}

#[test]
fn test_diamond_is_not_a_cycle() {
    let fields = vec![
        field("top", &[]),
        field("left", &["top"]),
        field("right", &["top"]),
        field("bottom", &["left", "right"]),
    ];
    let resolver = DependencyResolver::new(&fields, FieldContext::Form);

    assert!(resolver.detect_circular_dependencies().is_ok());
    let updates = resolver.resolve(&FormData::new(), &["top"], &());
    assert_eq!(updates.keys().collect::<Vec<_>>(), vec!["left", "right", "bottom"]);
}

#[test]
fn test_every_cycle_shape_is_detected() {
    let shapes: Vec<Vec<Field>> = vec![
        vec![field("a", &["a"])],
        vec![field("a", &["b"]), field("b", &["a"])],
        vec![field("root", &[]), field("a", &["root", "c"]), field("b", &["a"]), field("c", &["b"])],
    ];

    for fields in shapes {
        let err = DependencyResolver::new(&fields, FieldContext::Form)
            .detect_circular_dependencies()
            .unwrap_err();
        let FieldError::CircularDependency { field, chain } = err else {
            panic!("expected a cycle");
        };
        assert!(chain.ends_with(&field), "chain '{chain}' should end at '{field}'");
    }
}

#[test]
fn test_resolution_terminates_on_cycles() {
    let fields = vec![field("a", &["b"]), field("b", &["a"])];
    let resolver = DependencyResolver::new(&fields, FieldContext::Form);

    let updates = resolver.resolve(&FormData::new(), &["a"], &());
    assert_eq!(updates.keys().collect::<Vec<_>>(), vec!["b", "a"]);
}

#[test]
fn test_unknown_keys_are_ignored_everywhere() {
    let fields = vec![field("a", &["ghost"]), field("b", &["a", "phantom"])];
    let resolver = DependencyResolver::new(&fields, FieldContext::Form);

    assert!(resolver.detect_circular_dependencies().is_ok());
    assert!(resolver.resolve(&FormData::new(), &["nobody"], &()).is_empty());

    // A dependency on a missing key still propagates from it if it "changes".
    let updates = resolver.resolve(&FormData::new(), &["ghost"], &());
    assert_eq!(updates.keys().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_result_is_subset_of_affected() {
    let fields: Vec<Field> = vec![
        field("a", &[]),
        Field::new("b").depends_on(["a"]),
        Field::new("c").depends_on(["a"]).on(FieldContext::Form, |_, _, _| None),
        field("d", &["a"]),
    ];
    let resolver = DependencyResolver::new(&fields, FieldContext::Form);

    let affected = resolver.affected_fields(&["a"]);
    let updates = resolver.resolve(&FormData::new(), &["a"], &());

    assert_eq!(affected.len(), 3);
    assert_eq!(updates.keys().collect::<Vec<_>>(), vec!["d"]);
    assert!(updates.keys().all(|key| affected.contains(key)));
}

#[test]
fn test_graph_is_rebuilt_from_current_fields() {
    let mut fields = vec![field("a", &[]), field("b", &["a"])];
    assert_eq!(
        DependencyResolver::new(&fields, FieldContext::Form).resolve(&FormData::new(), &["a"], &()).len(),
        1
    );

    fields[1] = field("b", &[]);
    assert!(
        DependencyResolver::new(&fields, FieldContext::Form)
            .resolve(&FormData::new(), &["a"], &())
            .is_empty()
    );
}

#[test]
fn test_topological_order_respects_edges() {
    let fields = vec![
        field("district", &["city"]),
        field("city", &["country"]),
        field("country", &[]),
        field("zip", &["city", "district"]),
    ];

    let order = DependencyGraph::topological_order(&fields).unwrap();
    let position = |key: &str| order.iter().position(|k| k == key).unwrap();

    assert_eq!(order.len(), 4);
    assert!(position("country") < position("city"));
    assert!(position("city") < position("district"));
    assert!(position("district") < position("zip"));
}

#[test]
fn test_empty_change_yields_nothing() {
    let fields = vec![field("a", &[]), field("b", &["a"]), field("c", &["b"])];
    let resolver = DependencyResolver::new(&fields, FieldContext::Form);

    let nothing: [&str; 0] = [];
    assert!(resolver.affected_fields(&nothing).is_empty());
    assert!(resolver.resolve(&FormData::new(), &nothing, &()).is_empty());
}
