//! Inheritance resolver: contributions of ancestor instances.
//!
//! [CSS Cascading Level 4 § 7.1](https://www.w3.org/TR/css-cascade-4/#inherited-property)
//!
//! "Some properties are inherited from an ancestor element to its
//! descendants."
//!
//! Ancestors are visited root first, parent last, so a value found on a
//! closer ancestor overwrites one found farther up — the same winner CSS
//! inheritance would pick, computed without simulating the full document.
//! Within one ancestor, preset styles apply first and the ancestor's own
//! breakpoint cascade second, since author declarations beat presets.

use std::collections::HashMap;

use atelier_css::{StyleValue, is_inherited};
use atelier_tree::{InstanceId, InstanceTree};

use crate::cascade::resolve_cascaded;
use crate::index::StyleIndex;
use crate::model::{Presets, StyleDecl};

/// A property value contributed by an ancestor instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InheritedValue {
    /// The ancestor the value comes from.
    pub instance_id: InstanceId,
    /// The owning source, when the value comes from a declaration rather
    /// than a component preset.
    pub style_source_id: Option<String>,
    /// The inherited value.
    pub value: StyleValue,
}

/// Compute inherited values for the instance addressed by `selector`
/// (target first, root last).
///
/// Each ancestor's contribution is its component preset overlaid by its own
/// cascade evaluated over `[...cascaded_breakpoint_ids, selected_id]` —
/// the ancestor's *effective* stateless style at the selected breakpoint.
/// Only registry-inheritable properties are retained. A selector of length
/// 1 (the root) has no ancestors and resolves to an empty map.
#[must_use]
pub fn resolve_inherited(
    selector: &[InstanceId],
    tree: &InstanceTree,
    index: &StyleIndex,
    decls: &[StyleDecl],
    presets: &Presets,
    cascaded_breakpoint_ids: &[String],
    selected_id: &str,
) -> HashMap<String, InheritedValue> {
    let mut inherited: HashMap<String, InheritedValue> = HashMap::new();

    // The ancestor's effective style includes the selected breakpoint itself.
    let mut effective_ids = cascaded_breakpoint_ids.to_vec();
    effective_ids.push(selected_id.to_string());

    // Root → parent; the target instance itself is excluded.
    for &ancestor in selector.iter().skip(1).rev() {
        if let Some(component) = tree.component(ancestor) {
            if let Some(preset) = presets.get(component) {
                for (property, value) in preset {
                    if !is_inherited(property) {
                        continue;
                    }
                    let _ = inherited.insert(
                        property.clone(),
                        InheritedValue {
                            instance_id: ancestor,
                            style_source_id: None,
                            value: value.clone(),
                        },
                    );
                }
            }
        }

        let cascaded = resolve_cascaded(index.instance_decls(decls, ancestor), &effective_ids);
        for (property, cascaded_value) in cascaded {
            if !is_inherited(&property) {
                continue;
            }
            let _ = inherited.insert(
                property,
                InheritedValue {
                    instance_id: ancestor,
                    style_source_id: Some(cascaded_value.style_source_id),
                    value: cascaded_value.value,
                },
            );
        }
    }

    inherited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StyleSourceSelection;

    fn fixture() -> (InstanceTree, Vec<StyleDecl>, Vec<StyleSourceSelection>) {
        let mut tree = InstanceTree::new("Body");
        let child = tree.alloc("Paragraph");
        assert!(tree.append_child(InstanceId::ROOT, child));

        let decls = vec![
            StyleDecl {
                breakpoint_id: "base".into(),
                style_source_id: "body-local".into(),
                state: None,
                property: "fontWeight".into(),
                value: StyleValue::keyword("bold"),
            },
            StyleDecl {
                breakpoint_id: "base".into(),
                style_source_id: "body-local".into(),
                state: None,
                property: "width".into(),
                value: StyleValue::px(960.0),
            },
        ];
        let selections = vec![StyleSourceSelection {
            instance: InstanceId::ROOT,
            values: vec!["body-local".into()],
        }];
        (tree, decls, selections)
    }

    #[test]
    fn test_inheritable_property_flows_to_child() {
        let (tree, decls, selections) = fixture();
        let index = StyleIndex::new(&decls, &selections);
        let selector = tree.selector_of(InstanceId(1));

        let inherited = resolve_inherited(
            &selector,
            &tree,
            &index,
            &decls,
            &Presets::new(),
            &[],
            "base",
        );

        let font_weight = &inherited["fontWeight"];
        assert_eq!(font_weight.instance_id, InstanceId::ROOT);
        assert_eq!(font_weight.value, StyleValue::keyword("bold"));
        // width is not inheritable and must not appear
        assert!(!inherited.contains_key("width"));
    }

    #[test]
    fn test_root_selector_resolves_empty() {
        let (tree, decls, selections) = fixture();
        let index = StyleIndex::new(&decls, &selections);
        let selector = vec![InstanceId::ROOT];

        let inherited = resolve_inherited(
            &selector,
            &tree,
            &index,
            &decls,
            &Presets::new(),
            &[],
            "base",
        );
        assert!(inherited.is_empty());
    }

    #[test]
    fn test_declaration_overrides_preset_on_same_ancestor() {
        let (tree, decls, selections) = fixture();
        let index = StyleIndex::new(&decls, &selections);
        let selector = tree.selector_of(InstanceId(1));

        let mut presets = Presets::new();
        let _ = presets.insert(
            "Body".into(),
            vec![("fontWeight".into(), StyleValue::keyword("normal"))],
        );

        let inherited =
            resolve_inherited(&selector, &tree, &index, &decls, &presets, &[], "base");
        assert_eq!(inherited["fontWeight"].value, StyleValue::keyword("bold"));
        assert!(inherited["fontWeight"].style_source_id.is_some());
    }
}
