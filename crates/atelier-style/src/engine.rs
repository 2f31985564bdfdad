//! The style engine: one owner for all mutable style state.
//!
//! Rather than ambient global stores, the engine is constructed with
//! explicit references to everything resolution needs — breakpoints,
//! instance tree, sources, selections, declarations, presets — plus the
//! panel's current selection. The resolver functions stay pure; the engine
//! wires them together and is the only code that mutates the collections.
//!
//! Committed state and preview state are two explicit tiers: committed
//! declarations live in the flat list (indexed after every mutation), and
//! ephemeral writes live in a transient overlay consulted ahead of `local`
//! during assembly. The overlay exists so a drag interaction can fire many
//! preview writes per second without committing a transaction per
//! pointer-move; it is cleared by the next committed write to the same
//! property or by an explicit abort.

use std::collections::HashMap;

use atelier_common::warning::warn_once;
use atelier_css::{StyleValue, component_tag, initial_value, registered_properties, tag_default_styles};
use atelier_tree::{InstanceId, InstanceTree};

use crate::breakpoints::cascaded_breakpoint_ids;
use crate::cascade::{CascadedValue, resolve_cascaded};
use crate::index::StyleIndex;
use crate::info::{Candidates, StyleValueInfo, assemble};
use crate::inheritance::{InheritedValue, resolve_inherited};
use crate::model::{Breakpoint, Presets, StyleDecl, StyleSource, StyleSourceSelection};
use crate::source_chain::{SourceValue, resolve_next_source, resolve_previous_source};

/// Options for a write or a batch publish.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// When true the update only touches the preview overlay; persistent
    /// storage is left unchanged and the operations are discarded after
    /// the preview frame.
    pub is_ephemeral: bool,
}

/// What the panel currently has selected.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// The instance being styled.
    pub instance: Option<InstanceId>,
    /// The active breakpoint.
    pub breakpoint_id: Option<String>,
    /// The active pseudo-state; `None` is the stateless base.
    pub state: Option<String>,
    /// The source being edited; `None` means the strongest (last) source
    /// attached to the instance.
    pub style_source_id: Option<String>,
}

/// A staged entry in the preview overlay.
#[derive(Debug, Clone)]
enum PendingChange {
    Set(StyleValue),
    Delete,
}

/// A single queued operation inside a batch.
#[derive(Debug, Clone)]
enum UpdateOp {
    Set { property: String, value: StyleValue },
    Delete { property: String },
}

/// The style engine. See the module docs for the state model.
#[derive(Debug)]
pub struct StyleEngine {
    breakpoints: Vec<Breakpoint>,
    tree: InstanceTree,
    sources: Vec<StyleSource>,
    selections: Vec<StyleSourceSelection>,
    decls: Vec<StyleDecl>,
    presets: Presets,
    index: StyleIndex,
    ephemeral: HashMap<(InstanceId, String), PendingChange>,
    selection: Selection,
}

impl StyleEngine {
    /// Build an engine over the given collections and index them.
    #[must_use]
    pub fn new(
        breakpoints: Vec<Breakpoint>,
        tree: InstanceTree,
        sources: Vec<StyleSource>,
        selections: Vec<StyleSourceSelection>,
        decls: Vec<StyleDecl>,
        presets: Presets,
    ) -> Self {
        let index = StyleIndex::new(&decls, &selections);
        StyleEngine {
            breakpoints,
            tree,
            sources,
            selections,
            decls,
            presets,
            index,
            ephemeral: HashMap::new(),
            selection: Selection::default(),
        }
    }

    /// The instance tree.
    #[must_use]
    pub const fn tree(&self) -> &InstanceTree {
        &self.tree
    }

    /// The breakpoint set.
    #[must_use]
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// The raw declaration list (committed tier only).
    #[must_use]
    pub fn decls(&self) -> &[StyleDecl] {
        &self.decls
    }

    /// The current panel selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The provenance label for a source id ("Local" or the token name).
    #[must_use]
    pub fn source_label(&self, source_id: &str) -> Option<&str> {
        self.sources
            .iter()
            .find(|source| source.id() == source_id)
            .map(StyleSource::label)
    }

    /// The user-facing label for a breakpoint id.
    #[must_use]
    pub fn breakpoint_label(&self, breakpoint_id: &str) -> Option<&str> {
        self.breakpoints
            .iter()
            .find(|bp| bp.id == breakpoint_id)
            .map(|bp| bp.label.as_str())
    }

    /// Select the instance to style (or clear the selection).
    pub fn select_instance(&mut self, instance: Option<InstanceId>) {
        self.selection.instance = instance;
        self.selection.style_source_id = None;
    }

    /// Select the active breakpoint.
    pub fn select_breakpoint(&mut self, breakpoint_id: impl Into<String>) {
        self.selection.breakpoint_id = Some(breakpoint_id.into());
    }

    /// Select the active pseudo-state (`None` = stateless base).
    pub fn select_state(&mut self, state: Option<String>) {
        self.selection.state = state;
    }

    /// Select which attached source is being edited (`None` = strongest).
    pub fn select_source(&mut self, style_source_id: Option<String>) {
        self.selection.style_source_id = style_source_id;
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Resolve one property for the current selection, with provenance.
    ///
    /// Degrades to `None` when nothing is selected or no layer supplies a
    /// value — absence is "nothing to show", not a fault.
    #[must_use]
    pub fn resolve(&self, property: &str) -> Option<StyleValueInfo> {
        let context = self.resolution_context()?;
        self.assemble_with_context(&context, property)
    }

    /// Bulk-resolve every registered property for the current selection.
    #[must_use]
    pub fn resolve_all(&self) -> HashMap<String, StyleValueInfo> {
        let Some(context) = self.resolution_context() else {
            return HashMap::new();
        };
        registered_properties()
            .filter_map(|property| {
                self.assemble_with_context(&context, property)
                    .map(|info| (property.to_string(), info))
            })
            .collect()
    }

    /// Everything resolution needs for the selected instance, computed once
    /// per resolve call rather than cached — the collections are small and
    /// the rebuild-on-write rule keeps invalidation trivial.
    fn resolution_context(&self) -> Option<ResolutionContext> {
        let instance = self.selection.instance?;
        let breakpoint_id = self.selection.breakpoint_id.clone()?;
        let cascaded_ids = cascaded_breakpoint_ids(&self.breakpoints, &breakpoint_id);

        let selector = self.tree.selector_of(instance);
        let source_order = self
            .selection_for(instance)
            .map(|selection| selection.values.clone())
            .unwrap_or_default();
        let selected_source = self.selected_source_id(instance);

        let cascaded = resolve_cascaded(
            self.index.instance_decls(&self.decls, instance),
            &cascaded_ids,
        );
        let inherited = resolve_inherited(
            &selector,
            &self.tree,
            &self.index,
            &self.decls,
            &self.presets,
            &cascaded_ids,
            &breakpoint_id,
        );

        let (previous, next) = selected_source.as_ref().map_or_else(
            || (HashMap::new(), HashMap::new()),
            |selected| {
                (
                    resolve_previous_source(
                        self.index.instance_decls(&self.decls, instance),
                        &source_order,
                        selected,
                        &breakpoint_id,
                    ),
                    resolve_next_source(
                        self.index.instance_decls(&self.decls, instance),
                        &source_order,
                        selected,
                        &breakpoint_id,
                    ),
                )
            },
        );

        let mut local: HashMap<String, StyleValue> = HashMap::new();
        if let Some(selected) = &selected_source {
            for decl in self
                .index
                .instance_decls(&self.decls, instance)
                .filter(|decl| {
                    decl.breakpoint_id == breakpoint_id
                        && decl.style_source_id == *selected
                        && decl.state == self.selection.state
                })
            {
                let _ = local.insert(decl.property.clone(), decl.value.clone());
            }
        }

        let component = self.tree.component(instance).unwrap_or("Box").to_string();
        let preset: HashMap<String, StyleValue> = self
            .presets
            .get(&component)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(property, value)| (property.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let current_color = self.resolve_current_color(&selector, &cascaded_ids, &breakpoint_id);

        Some(ResolutionContext {
            instance,
            component,
            cascaded,
            inherited,
            previous,
            next,
            local,
            preset,
            current_color,
        })
    }

    fn assemble_with_context(
        &self,
        context: &ResolutionContext,
        property: &str,
    ) -> Option<StyleValueInfo> {
        let overlay = self
            .ephemeral
            .get(&(context.instance, property.to_string()));
        let (ephemeral, local) = match overlay {
            Some(PendingChange::Set(value)) => {
                (Some(value.clone()), context.local.get(property).cloned())
            }
            // A pending delete suppresses the local tier so the panel
            // previews what the property falls back to.
            Some(PendingChange::Delete) => (None, None),
            None => (None, context.local.get(property).cloned()),
        };

        let tag = component_tag(&context.component);
        let tag_default = tag_default_styles(tag)
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.clone());

        let mut info = assemble(Candidates {
            ephemeral,
            local,
            previous_source: context.previous.get(property).cloned(),
            next_source: context.next.get(property).cloned(),
            cascaded: context.cascaded.get(property).cloned(),
            inherited: context.inherited.get(property).cloned(),
            preset: context.preset.get(property).cloned(),
            tag_default,
            initial: initial_value(property).cloned(),
        })?;

        if property == "color" {
            info.current_color = Some(context.current_color.clone());
        }
        Some(info)
    }

    /// The effective color `currentColor` references resolve to: the
    /// nearest ancestor-or-self `color` that is not itself `currentColor`
    /// or `inherit`. A second, independent pass — deliberately not folded
    /// into the generic inheritance walk.
    fn resolve_current_color(
        &self,
        selector: &[InstanceId],
        cascaded_ids: &[String],
        breakpoint_id: &str,
    ) -> StyleValue {
        let mut effective_ids = cascaded_ids.to_vec();
        effective_ids.push(breakpoint_id.to_string());

        for &level in selector {
            // The overlay previews a color drag on the selected instance.
            if let Some(PendingChange::Set(value)) =
                self.ephemeral.get(&(level, "color".to_string()))
            {
                if let Some(concrete) = concrete_color(value) {
                    return concrete.clone();
                }
            }

            let cascaded =
                resolve_cascaded(self.index.instance_decls(&self.decls, level), &effective_ids);
            let declared = cascaded.get("color").map(|c| &c.value);
            let preset = self.tree.component(level).and_then(|component| {
                self.presets.get(component).and_then(|entries| {
                    entries
                        .iter()
                        .find(|(property, _)| property == "color")
                        .map(|(_, value)| value)
                })
            });
            let tag_default = self.tree.component(level).and_then(|component| {
                tag_default_styles(component_tag(component))
                    .iter()
                    .find(|(property, _)| *property == "color")
                    .map(|(_, value)| value)
            });

            if let Some(concrete) = declared
                .and_then(concrete_color)
                .or_else(|| preset.and_then(concrete_color))
                .or_else(|| tag_default.and_then(concrete_color))
            {
                return concrete.clone();
            }
        }

        initial_value("color")
            .cloned()
            .unwrap_or(StyleValue::rgb(0, 0, 0))
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    /// Upsert one property (a batch of one).
    pub fn set_property(&mut self, property: &str, value: StyleValue, options: &UpdateOptions) {
        let mut batch = self.create_batch();
        batch.set_property(property, value);
        batch.publish(options);
    }

    /// Delete one property (a batch of one).
    pub fn delete_property(&mut self, property: &str, options: &UpdateOptions) {
        let mut batch = self.create_batch();
        batch.delete_property(property);
        batch.publish(options);
    }

    /// Start accumulating operations; nothing touches storage until
    /// [`BatchUpdate::publish`]. Dropping the batch discards it.
    pub fn create_batch(&mut self) -> BatchUpdate<'_> {
        BatchUpdate {
            engine: self,
            ops: Vec::new(),
        }
    }

    /// Abort any pending preview: clears the overlay so resolution falls
    /// back to committed state.
    pub fn abort_ephemeral(&mut self) {
        self.ephemeral.clear();
    }

    fn selection_for(&self, instance: InstanceId) -> Option<&StyleSourceSelection> {
        self.selections
            .iter()
            .find(|selection| selection.instance == instance)
    }

    /// The source a write would target: the explicitly selected source if
    /// it is attached to the instance, else the strongest (last) one.
    fn selected_source_id(&self, instance: InstanceId) -> Option<String> {
        let attached = self.selection_for(instance)?;
        if let Some(selected) = &self.selection.style_source_id {
            if attached.values.contains(selected) {
                return Some(selected.clone());
            }
        }
        attached.values.last().cloned()
    }

    /// The source a committed write targets, creating a local source and
    /// selection entry on first edit of an untouched instance.
    fn ensure_write_source(&mut self, instance: InstanceId) -> String {
        if let Some(existing) = self.selected_source_id(instance) {
            return existing;
        }

        let mut id = format!("local:{}", instance.0);
        while self.sources.iter().any(|source| source.id() == id) {
            id.push('*');
        }
        self.sources.push(StyleSource::Local { id: id.clone() });
        match self
            .selections
            .iter_mut()
            .find(|selection| selection.instance == instance)
        {
            Some(selection) => selection.values.push(id.clone()),
            None => self.selections.push(StyleSourceSelection {
                instance,
                values: vec![id.clone()],
            }),
        }
        id
    }

    /// Apply a published batch. Committed publishes mutate the declaration
    /// list as one transaction and rebuild the index before returning;
    /// ephemeral publishes only stage the overlay.
    fn apply(&mut self, ops: Vec<UpdateOp>, options: &UpdateOptions) {
        let Some(instance) = self.selection.instance else {
            return;
        };
        let Some(breakpoint_id) = self.selection.breakpoint_id.clone() else {
            return;
        };
        if ops.is_empty() {
            return;
        }

        if options.is_ephemeral {
            for op in ops {
                let (property, change) = match op {
                    UpdateOp::Set { property, value } => (property, PendingChange::Set(value)),
                    UpdateOp::Delete { property } => (property, PendingChange::Delete),
                };
                let _ = self.ephemeral.insert((instance, property), change);
            }
            return;
        }

        let source_id = self.ensure_write_source(instance);
        let state = self.selection.state.clone();

        for op in &ops {
            match op {
                UpdateOp::Set { property, value } => {
                    let position = self.decls.iter().position(|decl| {
                        decl.breakpoint_id == breakpoint_id
                            && decl.style_source_id == source_id
                            && decl.state == state
                            && decl.property == *property
                    });
                    match position {
                        Some(position) => self.decls[position].value = value.clone(),
                        None => self.decls.push(StyleDecl {
                            breakpoint_id: breakpoint_id.clone(),
                            style_source_id: source_id.clone(),
                            state: state.clone(),
                            property: property.clone(),
                            value: value.clone(),
                        }),
                    }
                }
                UpdateOp::Delete { property } => {
                    self.decls.retain(|decl| {
                        !(decl.breakpoint_id == breakpoint_id
                            && decl.style_source_id == source_id
                            && decl.state == state
                            && decl.property == *property)
                    });
                }
            }
        }

        // A committed write supersedes any staged preview of the property.
        for op in &ops {
            let property = match op {
                UpdateOp::Set { property, .. } | UpdateOp::Delete { property } => property,
            };
            let _ = self.ephemeral.remove(&(instance, property.clone()));
        }

        self.index = StyleIndex::new(&self.decls, &self.selections);
    }
}

/// Precomputed per-resolve context for the selected instance.
struct ResolutionContext {
    instance: InstanceId,
    component: String,
    cascaded: HashMap<String, CascadedValue>,
    inherited: HashMap<String, InheritedValue>,
    previous: HashMap<String, SourceValue>,
    next: HashMap<String, SourceValue>,
    local: HashMap<String, StyleValue>,
    preset: HashMap<String, StyleValue>,
    current_color: StyleValue,
}

/// An accumulating, atomic batch of style updates.
///
/// Operations apply in queue order at publish time; later operations on the
/// same property override earlier ones. Publishing is all-or-nothing:
/// either every operation lands in committed storage, or (ephemeral mode)
/// none do and only the preview overlay changes.
#[derive(Debug)]
pub struct BatchUpdate<'a> {
    engine: &'a mut StyleEngine,
    ops: Vec<UpdateOp>,
}

impl BatchUpdate<'_> {
    /// Queue an upsert. Values tagged invalid are rejected here (warned
    /// once, then swallowed) — invalid intermediate states are a routine
    /// part of interactive text editing, not an error.
    pub fn set_property(&mut self, property: impl Into<String>, value: StyleValue) {
        let property = property.into();
        if value.is_invalid() {
            warn_once(
                "style",
                &format!("rejected invalid value for property '{property}'"),
            );
            return;
        }
        self.ops.push(UpdateOp::Set { property, value });
    }

    /// Queue a delete; a no-op at publish time if the declaration is absent.
    pub fn delete_property(&mut self, property: impl Into<String>) {
        self.ops.push(UpdateOp::Delete {
            property: property.into(),
        });
    }

    /// Apply every queued operation as one transaction.
    pub fn publish(self, options: &UpdateOptions) {
        let BatchUpdate { engine, ops } = self;
        engine.apply(ops, options);
    }
}

/// A color usable as the `currentColor` referent: anything except the
/// `currentColor` and `inherit` keywords (and invalid values).
fn concrete_color(value: &StyleValue) -> Option<&StyleValue> {
    match value {
        StyleValue::Keyword { value: keyword }
            if keyword.eq_ignore_ascii_case("currentColor")
                || keyword.eq_ignore_ascii_case("inherit") =>
        {
            None
        }
        value if value.is_invalid() => None,
        value => Some(value),
    }
}
