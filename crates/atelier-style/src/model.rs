//! Raw data model shared by every resolver.
//!
//! The style panel edits four flat collections: breakpoints, style sources,
//! source selections, and style declarations. Everything else the engine
//! exposes (cascaded values, inherited values, source chains) is derived
//! from these on demand and owns no state of its own.

use std::collections::HashMap;

use atelier_css::StyleValue;
use atelier_tree::InstanceId;
use serde::{Deserialize, Serialize};

/// A responsive breakpoint.
///
/// [Media Queries Level 4 § 4.2](https://www.w3.org/TR/mediaqueries-4/#width)
///
/// Exactly one breakpoint is selected at a time in the panel; declarations on
/// breakpoints that activate before the selected one cascade into it. The
/// base breakpoint has neither `min_width` nor `max_width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    /// Stable identifier referenced by declarations.
    pub id: String,
    /// User-facing name ("Base", "Tablet", ...).
    pub label: String,
    /// `min-width` media condition in px, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    /// `max-width` media condition in px, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
}

/// Where a group of declarations comes from.
///
/// A `Local` source belongs to a single instance and is created lazily on
/// first edit; a `Token` is a named source shared across instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StyleSource {
    /// Per-instance override source; not shareable.
    Local {
        /// Stable identifier referenced by declarations and selections.
        id: String,
    },
    /// Named shareable source.
    Token {
        /// Stable identifier referenced by declarations and selections.
        id: String,
        /// User-facing token name shown as provenance.
        name: String,
    },
}

impl StyleSource {
    /// The source's stable id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Local { id } | Self::Token { id, .. } => id,
        }
    }

    /// The label shown to the user as provenance.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Local { .. } => "Local",
            Self::Token { name, .. } => name,
        }
    }
}

/// The ordered list of style sources attached to one instance.
///
/// Order matters: sources earlier in `values` are overridden by later ones
/// at the same breakpoint and state, and the order defines the previous/next
/// source relationships the panel previews.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSourceSelection {
    /// The instance the sources are attached to.
    pub instance: InstanceId,
    /// Source ids, weakest first.
    pub values: Vec<String>,
}

/// One raw style declaration.
///
/// At most one declaration may exist per [`StyleDeclKey`]; the engine
/// upserts by that identity key.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDecl {
    /// Breakpoint this declaration applies at.
    pub breakpoint_id: String,
    /// Owning style source.
    pub style_source_id: String,
    /// Pseudo-state selector (e.g. `:hover`); `None` is the stateless base.
    pub state: Option<String>,
    /// camelCase property name.
    pub property: String,
    /// The declared value.
    pub value: StyleValue,
}

impl StyleDecl {
    /// The declaration's identity key.
    #[must_use]
    pub fn key(&self) -> StyleDeclKey {
        StyleDeclKey {
            breakpoint_id: self.breakpoint_id.clone(),
            style_source_id: self.style_source_id.clone(),
            state: self.state.clone(),
            property: self.property.clone(),
        }
    }
}

/// Identity key of a declaration: `(breakpoint, source, state, property)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleDeclKey {
    /// Breakpoint component of the key.
    pub breakpoint_id: String,
    /// Style source component of the key.
    pub style_source_id: String,
    /// Pseudo-state component of the key (`None` = stateless).
    pub state: Option<String>,
    /// Property component of the key.
    pub property: String,
}

/// Component preset styles keyed by component name.
///
/// Presets are stateless `(property, value)` pairs a component ships with,
/// sitting between inherited values and HTML tag defaults in the resolved
/// priority. Keyed by component name: in this engine an instance's rendered
/// tag is a function of its component, so a `(component, tag)` pair would be
/// redundant.
pub type Presets = HashMap<String, Vec<(String, StyleValue)>>;
