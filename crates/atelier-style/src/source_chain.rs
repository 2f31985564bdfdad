//! Source-chain resolver: previous/next source contributions.
//!
//! An instance can stack several style sources (a token plus a local
//! override, say). While one source is being edited, the panel previews
//! what each property *would* resolve to from the sources before it
//! ("previous": the value the override is beating) and after it ("next":
//! the value that would take over if the override were deleted).
//!
//! Both resolvers look at a single breakpoint and stateless declarations
//! only, and rely on the storage index's explicit per-instance ordering
//! (selection position, then insertion order) rather than raw collection
//! iteration order.

use std::collections::HashMap;

use atelier_css::StyleValue;

use crate::model::StyleDecl;

/// A property value contributed by another source in the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceValue {
    /// The contributing source.
    pub style_source_id: String,
    /// The declared value.
    pub value: StyleValue,
}

/// Values from sources *before* the selected one in the selection order.
///
/// The closest preceding source wins: declarations arrive ordered by
/// selection position, so the last match overwrites earlier ones.
#[must_use]
pub fn resolve_previous_source<'a>(
    instance_decls: impl Iterator<Item = &'a StyleDecl>,
    source_order: &[String],
    selected_source_id: &str,
    breakpoint_id: &str,
) -> HashMap<String, SourceValue> {
    let Some(position) = source_order
        .iter()
        .position(|id| id == selected_source_id)
    else {
        return HashMap::new();
    };
    let previous_ids = &source_order[..position];

    let mut values: HashMap<String, SourceValue> = HashMap::new();
    for decl in instance_decls.filter(|decl| {
        decl.state.is_none()
            && decl.breakpoint_id == breakpoint_id
            && previous_ids.contains(&decl.style_source_id)
    }) {
        let _ = values.insert(
            decl.property.clone(),
            SourceValue {
                style_source_id: decl.style_source_id.clone(),
                value: decl.value.clone(),
            },
        );
    }
    values
}

/// Values from sources *after* the selected one in the selection order.
///
/// The closest following source wins: the first match in the ordered
/// declaration stream is kept and later ones are ignored.
#[must_use]
pub fn resolve_next_source<'a>(
    instance_decls: impl Iterator<Item = &'a StyleDecl>,
    source_order: &[String],
    selected_source_id: &str,
    breakpoint_id: &str,
) -> HashMap<String, SourceValue> {
    let Some(position) = source_order
        .iter()
        .position(|id| id == selected_source_id)
    else {
        return HashMap::new();
    };
    let next_ids = &source_order[position + 1..];

    let mut values: HashMap<String, SourceValue> = HashMap::new();
    for decl in instance_decls.filter(|decl| {
        decl.state.is_none()
            && decl.breakpoint_id == breakpoint_id
            && next_ids.contains(&decl.style_source_id)
    }) {
        let _ = values.entry(decl.property.clone()).or_insert(SourceValue {
            style_source_id: decl.style_source_id.clone(),
            value: decl.value.clone(),
        });
    }
    values
}
