//! Integration tests for the style engine: resolution, provenance,
//! updates, batches, and the ephemeral overlay.

use atelier_css::StyleValue;
use atelier_style::{
    Breakpoint, Presets, StyleDecl, StyleEngine, StyleOrigin, StyleSource, StyleSourceSelection,
    UpdateOptions,
};
use atelier_tree::{InstanceId, InstanceTree};

const COMMIT: UpdateOptions = UpdateOptions { is_ephemeral: false };
const PREVIEW: UpdateOptions = UpdateOptions { is_ephemeral: true };

fn breakpoints() -> Vec<Breakpoint> {
    let bp = |id: &str, label: &str, min_width: Option<f64>| Breakpoint {
        id: id.into(),
        label: label.into(),
        min_width,
        max_width: None,
    };
    vec![
        bp("base", "Base", None),
        bp("tablet", "Tablet", Some(768.0)),
        bp("desktop", "Desktop", Some(1280.0)),
        bp("wide", "Wide", Some(1920.0)),
    ]
}

fn decl(breakpoint: &str, source: &str, property: &str, value: StyleValue) -> StyleDecl {
    StyleDecl {
        breakpoint_id: breakpoint.into(),
        style_source_id: source.into(),
        state: None,
        property: property.into(),
        value,
    }
}

/// Body > Box fixture with a local source on each instance.
fn two_instance_engine(decls: Vec<StyleDecl>) -> (StyleEngine, InstanceId) {
    let mut tree = InstanceTree::new("Body");
    let child = tree.alloc("Box");
    assert!(tree.append_child(InstanceId::ROOT, child));

    let sources = vec![
        StyleSource::Local {
            id: "body-local".into(),
        },
        StyleSource::Local {
            id: "box-local".into(),
        },
    ];
    let selections = vec![
        StyleSourceSelection {
            instance: InstanceId::ROOT,
            values: vec!["body-local".into()],
        },
        StyleSourceSelection {
            instance: child,
            values: vec!["box-local".into()],
        },
    ];
    let engine = StyleEngine::new(
        breakpoints(),
        tree,
        sources,
        selections,
        decls,
        Presets::new(),
    );
    (engine, child)
}

// ========== resolution ==========

#[test]
fn test_resolve_without_selection_degrades_to_empty() {
    let (engine, _) = two_instance_engine(vec![]);
    assert!(engine.resolve("width").is_none());
    assert!(engine.resolve_all().is_empty());
}

#[test]
fn test_local_value_wins_and_tags_local() {
    let (mut engine, child) = two_instance_engine(vec![decl(
        "base",
        "box-local",
        "width",
        StyleValue::px(320.0),
    )]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    let info = engine.resolve("width").unwrap();
    assert_eq!(info.value, StyleValue::px(320.0));
    assert_eq!(info.origin(), StyleOrigin::Local);
}

#[test]
fn test_cascaded_value_wins_but_tags_remote() {
    // width set at base only; desktop selected
    let (mut engine, child) = two_instance_engine(vec![decl(
        "base",
        "box-local",
        "width",
        StyleValue::px(320.0),
    )]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("desktop");

    let info = engine.resolve("width").unwrap();
    assert_eq!(info.value, StyleValue::px(320.0));
    assert_eq!(info.origin(), StyleOrigin::Remote);
    let cascaded = info.cascaded.unwrap();
    assert_eq!(cascaded.breakpoint_id, "base");
}

#[test]
fn test_cascade_scenario_four_breakpoints() {
    // width@base=100, width@tablet=200, height@base=50,
    // height@desktop=150 (local at the selected breakpoint),
    // width@wide=400 (future breakpoint, ignored).
    let (mut engine, child) = two_instance_engine(vec![
        decl("base", "box-local", "width", StyleValue::px(100.0)),
        decl("tablet", "box-local", "width", StyleValue::px(200.0)),
        decl("base", "box-local", "height", StyleValue::px(50.0)),
        decl("desktop", "box-local", "height", StyleValue::px(150.0)),
        decl("wide", "box-local", "width", StyleValue::px(400.0)),
    ]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("desktop");

    let width = engine.resolve("width").unwrap();
    assert_eq!(width.value, StyleValue::px(200.0));
    assert_eq!(width.cascaded.as_ref().unwrap().breakpoint_id, "tablet");
    assert_eq!(width.origin(), StyleOrigin::Remote);

    let height = engine.resolve("height").unwrap();
    assert_eq!(height.value, StyleValue::px(150.0));
    assert_eq!(height.origin(), StyleOrigin::Local);
    // the base declaration is still visible as the cascaded runner-up
    assert_eq!(height.cascaded.unwrap().breakpoint_id, "base");
}

#[test]
fn test_resolution_is_idempotent_without_writes() {
    let (mut engine, child) = two_instance_engine(vec![decl(
        "base",
        "box-local",
        "width",
        StyleValue::px(320.0),
    )]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    let first = engine.resolve_all();
    let second = engine.resolve_all();
    assert_eq!(first, second);
}

// ========== inheritance ==========

#[test]
fn test_inheritable_property_reaches_child() {
    let (mut engine, child) = two_instance_engine(vec![decl(
        "base",
        "body-local",
        "fontWeight",
        StyleValue::keyword("bold"),
    )]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    let info = engine.resolve("fontWeight").unwrap();
    assert_eq!(info.value, StyleValue::keyword("bold"));
    assert_eq!(info.origin(), StyleOrigin::Remote);
    assert_eq!(info.inherited.unwrap().instance_id, InstanceId::ROOT);
}

#[test]
fn test_non_inheritable_property_does_not_reach_child() {
    let (mut engine, child) = two_instance_engine(vec![decl(
        "base",
        "body-local",
        "width",
        StyleValue::px(960.0),
    )]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    let info = engine.resolve("width").unwrap();
    // Falls through to the registry initial value, not the parent's width
    assert_eq!(info.value, StyleValue::keyword("auto"));
    assert_eq!(info.origin(), StyleOrigin::Default);
    assert!(info.inherited.is_none());
}

#[test]
fn test_current_color_resolves_through_parent() {
    let (mut engine, child) = two_instance_engine(vec![
        decl("base", "body-local", "color", StyleValue::rgb(255, 0, 0)),
        decl(
            "base",
            "box-local",
            "color",
            StyleValue::keyword("currentColor"),
        ),
    ]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    let info = engine.resolve("color").unwrap();
    // The declared value stays the literal keyword...
    assert_eq!(info.value, StyleValue::keyword("currentColor"));
    // ...while the effective referent comes from the parent.
    assert_eq!(info.current_color, Some(StyleValue::rgb(255, 0, 0)));
}

// ========== source chains ==========

fn token_engine() -> (StyleEngine, InstanceId) {
    let mut tree = InstanceTree::new("Body");
    let child = tree.alloc("Box");
    assert!(tree.append_child(InstanceId::ROOT, child));

    let sources = vec![
        StyleSource::Token {
            id: "accent".into(),
            name: "Accent".into(),
        },
        StyleSource::Local {
            id: "box-local".into(),
        },
    ];
    let selections = vec![StyleSourceSelection {
        instance: child,
        values: vec!["accent".into(), "box-local".into()],
    }];
    let decls = vec![
        decl("base", "accent", "color", StyleValue::rgb(0, 0, 255)),
        decl("base", "box-local", "color", StyleValue::rgb(255, 0, 0)),
    ];
    let engine = StyleEngine::new(breakpoints(), tree, sources, selections, decls, Presets::new());
    (engine, child)
}

#[test]
fn test_previous_source_preview_under_local_override() {
    let (mut engine, child) = token_engine();
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");
    // No explicit source selection: the strongest (local) source is edited.

    let info = engine.resolve("color").unwrap();
    assert_eq!(info.value, StyleValue::rgb(255, 0, 0));
    assert_eq!(info.origin(), StyleOrigin::Local);
    // Deleting the override would reveal the token's value
    let previous = info.previous_source.unwrap();
    assert_eq!(previous.style_source_id, "accent");
    assert_eq!(previous.value, StyleValue::rgb(0, 0, 255));
}

#[test]
fn test_next_source_preview_when_editing_the_token() {
    let (mut engine, child) = token_engine();
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");
    engine.select_source(Some("accent".into()));

    let info = engine.resolve("color").unwrap();
    // The token's own declaration is the local tier while it is edited
    assert_eq!(info.value, StyleValue::rgb(0, 0, 255));
    assert_eq!(info.origin(), StyleOrigin::Local);
    // ...and the local override is what will beat it on the canvas
    let next = info.next_source.unwrap();
    assert_eq!(next.style_source_id, "box-local");
    assert_eq!(next.value, StyleValue::rgb(255, 0, 0));
}

#[test]
fn test_source_label_for_provenance() {
    let (engine, _) = token_engine();
    assert_eq!(engine.source_label("accent"), Some("Accent"));
    assert_eq!(engine.source_label("box-local"), Some("Local"));
    assert_eq!(engine.source_label("missing"), None);
}

// ========== updates ==========

#[test]
fn test_set_property_upserts_by_identity_key() {
    let (mut engine, child) = two_instance_engine(vec![]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    engine.set_property("width", StyleValue::px(100.0), &COMMIT);
    engine.set_property("width", StyleValue::px(200.0), &COMMIT);

    // Second write replaced the first in place
    let width_decls: Vec<_> = engine
        .decls()
        .iter()
        .filter(|decl| decl.property == "width")
        .collect();
    assert_eq!(width_decls.len(), 1);
    assert_eq!(width_decls[0].value, StyleValue::px(200.0));
}

#[test]
fn test_invalid_value_is_swallowed() {
    let (mut engine, child) = two_instance_engine(vec![]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    engine.set_property(
        "width",
        StyleValue::Invalid {
            value: "12parsecs".into(),
        },
        &COMMIT,
    );
    engine.set_property("height", StyleValue::GuaranteedInvalid, &COMMIT);

    assert!(engine.decls().is_empty());
}

#[test]
fn test_delete_property_is_noop_when_absent() {
    let (mut engine, child) = two_instance_engine(vec![decl(
        "base",
        "box-local",
        "width",
        StyleValue::px(100.0),
    )]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    engine.delete_property("height", &COMMIT);
    assert_eq!(engine.decls().len(), 1);

    engine.delete_property("width", &COMMIT);
    assert!(engine.decls().is_empty());
}

#[test]
fn test_lazy_local_source_creation_on_first_edit() {
    // The instance has no sources attached at all
    let mut tree = InstanceTree::new("Body");
    let child = tree.alloc("Box");
    assert!(tree.append_child(InstanceId::ROOT, child));
    let mut engine = StyleEngine::new(
        breakpoints(),
        tree,
        Vec::new(),
        Vec::new(),
        Vec::new(),
        Presets::new(),
    );
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    engine.set_property("width", StyleValue::px(42.0), &COMMIT);

    assert_eq!(engine.decls().len(), 1);
    let info = engine.resolve("width").unwrap();
    assert_eq!(info.value, StyleValue::px(42.0));
    assert_eq!(info.origin(), StyleOrigin::Local);
}

#[test]
fn test_writes_target_selected_state() {
    let (mut engine, child) = two_instance_engine(vec![]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");
    engine.select_state(Some(":hover".into()));

    engine.set_property("color", StyleValue::rgb(255, 0, 0), &COMMIT);
    assert_eq!(engine.decls()[0].state.as_deref(), Some(":hover"));

    // Back on the stateless base the hover declaration is not local
    engine.select_state(None);
    let info = engine.resolve("color").unwrap();
    assert!(info.local.is_none());
}

// ========== batches and the ephemeral overlay ==========

#[test]
fn test_batch_publish_applies_all_in_order() {
    let (mut engine, child) = two_instance_engine(vec![]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    let mut batch = engine.create_batch();
    batch.set_property("width", StyleValue::px(100.0));
    batch.set_property("height", StyleValue::px(50.0));
    // Later operation on the same property overrides the earlier one
    batch.set_property("width", StyleValue::px(200.0));
    batch.publish(&COMMIT);

    assert_eq!(engine.resolve("width").unwrap().value, StyleValue::px(200.0));
    assert_eq!(engine.resolve("height").unwrap().value, StyleValue::px(50.0));
}

#[test]
fn test_dropped_batch_touches_nothing() {
    let (mut engine, child) = two_instance_engine(vec![]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    let mut batch = engine.create_batch();
    batch.set_property("width", StyleValue::px(100.0));
    drop(batch);

    assert!(engine.decls().is_empty());
}

#[test]
fn test_ephemeral_publish_leaves_storage_unchanged() {
    let (mut engine, child) = two_instance_engine(vec![decl(
        "base",
        "box-local",
        "width",
        StyleValue::px(100.0),
    )]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");
    let before = engine.resolve_all();

    let mut batch = engine.create_batch();
    batch.set_property("width", StyleValue::px(500.0));
    batch.set_property("height", StyleValue::px(500.0));
    batch.set_property("opacity", StyleValue::unit(0.5, atelier_css::Unit::Number));
    batch.publish(&PREVIEW);

    // Preview is visible...
    assert_eq!(engine.resolve("width").unwrap().value, StyleValue::px(500.0));
    // ...but persistent storage is untouched
    assert_eq!(engine.decls().len(), 1);
    assert_eq!(engine.decls()[0].value, StyleValue::px(100.0));

    // Abort restores the pre-preview resolved state exactly
    engine.abort_ephemeral();
    assert_eq!(engine.resolve_all(), before);
}

#[test]
fn test_committed_write_clears_the_preview_for_that_property() {
    let (mut engine, child) = two_instance_engine(vec![]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("base");

    engine.set_property("width", StyleValue::px(300.0), &PREVIEW);
    assert_eq!(engine.resolve("width").unwrap().value, StyleValue::px(300.0));

    engine.set_property("width", StyleValue::px(400.0), &COMMIT);
    let info = engine.resolve("width").unwrap();
    assert_eq!(info.value, StyleValue::px(400.0));
    assert!(info.ephemeral.is_none());
}

#[test]
fn test_ephemeral_delete_previews_the_fallback() {
    let (mut engine, child) = two_instance_engine(vec![
        decl("base", "box-local", "width", StyleValue::px(100.0)),
        decl("tablet", "box-local", "width", StyleValue::px(200.0)),
    ]);
    engine.select_instance(Some(child));
    engine.select_breakpoint("tablet");

    engine.delete_property("width", &PREVIEW);
    let info = engine.resolve("width").unwrap();
    // The preview shows what deleting the local value would reveal
    assert_eq!(info.value, StyleValue::px(100.0));
    assert_eq!(info.origin(), StyleOrigin::Remote);
    // Storage still has both declarations
    assert_eq!(engine.decls().len(), 2);
}
