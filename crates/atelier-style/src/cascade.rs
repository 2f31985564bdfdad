//! Cascade resolver: contributions of earlier breakpoints.
//!
//! [CSS Cascading Level 4 § 6](https://www.w3.org/TR/css-cascade-4/#cascading)
//!
//! With breakpoints modeled as overlapping media queries, a declaration at
//! an earlier (weaker) breakpoint still applies at the selected one unless
//! a breakpoint between them re-declares the property. The resolver scans
//! the cascaded breakpoints weakest to strongest and lets the last writer
//! win, which is exactly the media-query cascade a published stylesheet
//! would produce.

use std::collections::HashMap;

use atelier_css::StyleValue;

use crate::model::StyleDecl;

/// A property value contributed by an earlier breakpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadedValue {
    /// The breakpoint the winning declaration lives at.
    pub breakpoint_id: String,
    /// The source owning the winning declaration.
    pub style_source_id: String,
    /// The declared value.
    pub value: StyleValue,
}

/// Compute the cascaded contribution for one instance.
///
/// `instance_decls` are the instance's declarations (any breakpoint, any
/// state); `cascaded_breakpoint_ids` must be ordered weakest first, as
/// produced by [`crate::breakpoints::cascaded_breakpoint_ids`]. Only
/// stateless declarations participate. Pure read; no side effects.
#[must_use]
pub fn resolve_cascaded<'a>(
    instance_decls: impl Iterator<Item = &'a StyleDecl> + Clone,
    cascaded_breakpoint_ids: &[String],
) -> HashMap<String, CascadedValue> {
    let mut cascaded: HashMap<String, CascadedValue> = HashMap::new();

    // Weakest to strongest; a later breakpoint overwrites an earlier one.
    for breakpoint_id in cascaded_breakpoint_ids {
        for decl in instance_decls
            .clone()
            .filter(|decl| decl.state.is_none() && decl.breakpoint_id == *breakpoint_id)
        {
            let _ = cascaded.insert(
                decl.property.clone(),
                CascadedValue {
                    breakpoint_id: breakpoint_id.clone(),
                    style_source_id: decl.style_source_id.clone(),
                    value: decl.value.clone(),
                },
            );
        }
    }

    cascaded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(breakpoint: &str, property: &str, value: StyleValue) -> StyleDecl {
        StyleDecl {
            breakpoint_id: breakpoint.into(),
            style_source_id: "local".into(),
            state: None,
            property: property.into(),
            value,
        }
    }

    #[test]
    fn test_later_breakpoint_wins() {
        let decls = vec![
            decl("base", "width", StyleValue::px(100.0)),
            decl("tablet", "width", StyleValue::px(200.0)),
        ];
        let order = vec!["base".to_string(), "tablet".to_string()];

        let cascaded = resolve_cascaded(decls.iter(), &order);
        let width = &cascaded["width"];
        assert_eq!(width.breakpoint_id, "tablet");
        assert_eq!(width.value, StyleValue::px(200.0));
    }

    #[test]
    fn test_stateful_declarations_ignored() {
        let mut hover = decl("base", "width", StyleValue::px(100.0));
        hover.state = Some(":hover".into());
        let order = vec!["base".to_string()];

        let cascaded = resolve_cascaded([&hover].into_iter(), &order);
        assert!(cascaded.is_empty());
    }

    #[test]
    fn test_scenario_four_breakpoints() {
        // Selected breakpoint is "3"; "4" is in the future and "3" itself is
        // not part of the cascaded set.
        let decls = vec![
            decl("1", "width", StyleValue::px(100.0)),
            decl("2", "width", StyleValue::px(200.0)),
            decl("1", "height", StyleValue::px(50.0)),
            decl("3", "height", StyleValue::px(150.0)),
            decl("4", "width", StyleValue::px(400.0)),
        ];
        let order = vec!["1".to_string(), "2".to_string()];

        let cascaded = resolve_cascaded(decls.iter(), &order);
        assert_eq!(cascaded.len(), 2);
        assert_eq!(cascaded["height"].breakpoint_id, "1");
        assert_eq!(cascaded["height"].value, StyleValue::px(50.0));
        assert_eq!(cascaded["width"].breakpoint_id, "2");
        assert_eq!(cascaded["width"].value, StyleValue::px(200.0));
    }
}
