//! Project document: the serialized form of a styleable page.
//!
//! The builder persists pages as JSON: a nested instance tree plus the four
//! flat style collections. Loading validates every cross-reference before
//! handing the data to the engine, so resolution never has to defend
//! against dangling ids or duplicate declaration keys.

use std::collections::{HashMap, HashSet};

use atelier_css::StyleValue;
use atelier_tree::{InstanceId, InstanceTree};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::StyleEngine;
use crate::model::{Breakpoint, Presets, StyleDecl, StyleSource, StyleSourceSelection};

/// Error type for project loading.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Two instances share an id.
    #[error("duplicate instance id '{0}'")]
    DuplicateInstance(String),
    /// Two breakpoints share an id.
    #[error("duplicate breakpoint id '{0}'")]
    DuplicateBreakpoint(String),
    /// Two style sources share an id.
    #[error("duplicate style source id '{0}'")]
    DuplicateStyleSource(String),
    /// A selection references an instance that does not exist.
    #[error("selection references unknown instance '{0}'")]
    UnknownInstance(String),
    /// A selection or declaration references a source that does not exist.
    #[error("unknown style source '{0}'")]
    UnknownStyleSource(String),
    /// A declaration references a breakpoint that does not exist.
    #[error("declaration references unknown breakpoint '{0}'")]
    UnknownBreakpoint(String),
    /// Two declarations share the `(breakpoint, source, state, property)`
    /// identity key.
    #[error(
        "duplicate declaration for '{property}' at ({breakpoint_id}, {style_source_id}, {state:?})"
    )]
    DuplicateDeclaration {
        /// Breakpoint component of the offending key.
        breakpoint_id: String,
        /// Source component of the offending key.
        style_source_id: String,
        /// State component of the offending key.
        state: Option<String>,
        /// Property component of the offending key.
        property: String,
    },
}

/// One instance node in the serialized tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDoc {
    /// Stable string id referenced by selections.
    pub id: String,
    /// Component the instance renders.
    pub component: String,
    /// Optional navigator label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Child instances in render order.
    #[serde(default)]
    pub children: Vec<InstanceDoc>,
}

/// One serialized source selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDoc {
    /// Instance string id the sources attach to.
    pub instance: String,
    /// Source ids, weakest first.
    pub values: Vec<String>,
}

/// One serialized style declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDeclDoc {
    /// Breakpoint the declaration applies at.
    pub breakpoint_id: String,
    /// Owning style source.
    pub style_source_id: String,
    /// Pseudo-state selector; absent means stateless.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// camelCase property name.
    pub property: String,
    /// The declared value.
    pub value: StyleValue,
}

/// One serialized preset entry for a component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetStyleDoc {
    /// camelCase property name.
    pub property: String,
    /// The preset value.
    pub value: StyleValue,
}

/// The serialized project: everything the engine needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDoc {
    /// The breakpoint set.
    pub breakpoints: Vec<Breakpoint>,
    /// The instance tree, root node first.
    pub root: InstanceDoc,
    /// All style sources.
    #[serde(default)]
    pub style_sources: Vec<StyleSource>,
    /// Source selections per instance.
    #[serde(default)]
    pub style_source_selections: Vec<SelectionDoc>,
    /// The flat declaration list.
    #[serde(default)]
    pub styles: Vec<StyleDeclDoc>,
    /// Component preset styles.
    #[serde(default)]
    pub presets: HashMap<String, Vec<PresetStyleDoc>>,
}

impl ProjectDoc {
    /// Validate the document and build a [`StyleEngine`] from it.
    ///
    /// Also returns the map from document instance ids to arena
    /// [`InstanceId`]s so callers can address instances by their
    /// serialized ids.
    ///
    /// # Errors
    /// Returns a [`ProjectError`] on any duplicate id, duplicate
    /// declaration identity key, or dangling cross-reference.
    pub fn into_engine(self) -> Result<(StyleEngine, HashMap<String, InstanceId>), ProjectError> {
        let mut breakpoint_ids: HashSet<&str> = HashSet::new();
        for breakpoint in &self.breakpoints {
            if !breakpoint_ids.insert(&breakpoint.id) {
                return Err(ProjectError::DuplicateBreakpoint(breakpoint.id.clone()));
            }
        }

        let mut source_ids: HashSet<&str> = HashSet::new();
        for source in &self.style_sources {
            if !source_ids.insert(source.id()) {
                return Err(ProjectError::DuplicateStyleSource(source.id().to_string()));
            }
        }

        // Build the arena tree depth-first, preserving child order.
        let mut tree = InstanceTree::new(self.root.component.clone());
        if let Some(root) = tree.get_mut(InstanceId::ROOT) {
            root.label = self.root.label.clone();
        }
        let mut id_map: HashMap<String, InstanceId> = HashMap::new();
        let _ = id_map.insert(self.root.id.clone(), InstanceId::ROOT);

        let mut pending: Vec<(InstanceId, &InstanceDoc)> = self
            .root
            .children
            .iter()
            .map(|child| (InstanceId::ROOT, child))
            .collect();
        // Stack order would reverse siblings; process as a FIFO queue.
        let mut queue_position = 0;
        while queue_position < pending.len() {
            let (parent, doc) = pending[queue_position];
            queue_position += 1;

            let id = tree.alloc(doc.component.clone());
            if let Some(instance) = tree.get_mut(id) {
                instance.label = doc.label.clone();
            }
            let attached = tree.append_child(parent, id);
            debug_assert!(attached, "fresh allocations always attach");
            if id_map.insert(doc.id.clone(), id).is_some() {
                return Err(ProjectError::DuplicateInstance(doc.id.clone()));
            }
            pending.extend(doc.children.iter().map(|child| (id, child)));
        }

        let mut selections: Vec<StyleSourceSelection> = Vec::new();
        for selection in &self.style_source_selections {
            let instance = *id_map
                .get(&selection.instance)
                .ok_or_else(|| ProjectError::UnknownInstance(selection.instance.clone()))?;
            for source_id in &selection.values {
                if !source_ids.contains(source_id.as_str()) {
                    return Err(ProjectError::UnknownStyleSource(source_id.clone()));
                }
            }
            selections.push(StyleSourceSelection {
                instance,
                values: selection.values.clone(),
            });
        }

        let mut decls: Vec<StyleDecl> = Vec::new();
        let mut seen_keys = HashSet::new();
        for doc in self.styles {
            if !breakpoint_ids.contains(doc.breakpoint_id.as_str()) {
                return Err(ProjectError::UnknownBreakpoint(doc.breakpoint_id));
            }
            if !source_ids.contains(doc.style_source_id.as_str()) {
                return Err(ProjectError::UnknownStyleSource(doc.style_source_id));
            }
            let decl = StyleDecl {
                breakpoint_id: doc.breakpoint_id,
                style_source_id: doc.style_source_id,
                state: doc.state,
                property: doc.property,
                value: doc.value,
            };
            if !seen_keys.insert(decl.key()) {
                return Err(ProjectError::DuplicateDeclaration {
                    breakpoint_id: decl.breakpoint_id,
                    style_source_id: decl.style_source_id,
                    state: decl.state,
                    property: decl.property,
                });
            }
            decls.push(decl);
        }

        let presets: Presets = self
            .presets
            .into_iter()
            .map(|(component, entries)| {
                (
                    component,
                    entries
                        .into_iter()
                        .map(|entry| (entry.property, entry.value))
                        .collect(),
                )
            })
            .collect();

        let engine = StyleEngine::new(
            self.breakpoints,
            tree,
            self.style_sources,
            selections,
            decls,
            presets,
        );
        Ok((engine, id_map))
    }
}
