//! Style storage index.
//!
//! A derived, disposable cache over the flat declaration list: it maps style
//! sources and instances to the declarations that apply to them. The engine
//! rebuilds it synchronously after every committed mutation, so resolution
//! always observes a fully-applied state.
//!
//! Per-instance declaration order is explicit: declarations are ordered by
//! the position of their source in the instance's selection list first, and
//! by declaration insertion order second. The source-chain resolver depends
//! on this ordering; deriving it from an explicit key (rather than trusting
//! collection iteration order) keeps previous/next-source resolution correct
//! even when the raw list is stored out of order.

use std::collections::HashMap;

use atelier_tree::InstanceId;

use crate::model::{StyleDecl, StyleSourceSelection};

/// Index from sources and instances to declaration positions.
#[derive(Debug, Default)]
pub struct StyleIndex {
    /// Declaration positions per style source, in insertion order.
    by_source: HashMap<String, Vec<usize>>,
    /// Declaration positions per instance, ordered by
    /// (selection-list position of the source, insertion order).
    by_instance: HashMap<InstanceId, Vec<usize>>,
}

impl StyleIndex {
    /// Build the index from the raw declaration list and source selections.
    #[must_use]
    pub fn new(decls: &[StyleDecl], selections: &[StyleSourceSelection]) -> Self {
        let mut by_source: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, decl) in decls.iter().enumerate() {
            by_source
                .entry(decl.style_source_id.clone())
                .or_default()
                .push(position);
        }

        let mut by_instance: HashMap<InstanceId, Vec<usize>> = HashMap::new();
        for selection in selections {
            let mut positions: Vec<usize> = Vec::new();
            // Selection order is the primary sort key; insertion order the
            // secondary one, because `by_source` lists are already in
            // insertion order.
            for source_id in &selection.values {
                if let Some(source_positions) = by_source.get(source_id) {
                    positions.extend_from_slice(source_positions);
                }
            }
            let _ = by_instance.insert(selection.instance, positions);
        }

        StyleIndex {
            by_source,
            by_instance,
        }
    }

    /// The declarations attached to `source_id`, in insertion order.
    pub fn source_decls<'a>(
        &'a self,
        decls: &'a [StyleDecl],
        source_id: &str,
    ) -> impl Iterator<Item = &'a StyleDecl> + Clone {
        self.by_source
            .get(source_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|&position| &decls[position])
    }

    /// The declarations that apply to `instance` through its selection,
    /// ordered by (selection position, insertion order).
    pub fn instance_decls<'a>(
        &'a self,
        decls: &'a [StyleDecl],
        instance: InstanceId,
    ) -> impl Iterator<Item = &'a StyleDecl> + Clone {
        self.by_instance
            .get(&instance)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|&position| &decls[position])
    }
}
