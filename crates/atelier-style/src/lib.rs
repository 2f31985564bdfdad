//! Cascade, inheritance, and source-chain resolution for the Atelier
//! style panel.
//!
//! # Scope
//!
//! This crate implements the resolution core the style panel talks to:
//! - **Breakpoint Ordering** — total order over breakpoints and the set
//!   that cascades into the selected one
//! - **Style Storage Index** — derived per-source/per-instance indices over
//!   the flat declaration list, rebuilt on every committed mutation
//! - **Cascade Resolver** — contributions of earlier breakpoints
//! - **Inheritance Resolver** — contributions of ancestor instances
//!   ([CSS Cascading Level 4 § 7](https://www.w3.org/TR/css-cascade-4/#inheriting))
//! - **Source-Chain Resolver** — previous/next source previews for stacked
//!   style sources
//! - **Resolved Style Assembler** — one [`StyleValueInfo`] per property
//!   with a fixed value priority and an independent provenance tag
//! - **Update/Batch Writer** — atomic batched writes with an ephemeral
//!   preview overlay
//! - **Layered-Value Utilities** — group-consistent edits of
//!   comma-repeatable properties
//! - **Project Document** — serialized page format with load-time
//!   validation
//!
//! The UI consumes exactly two call shapes: `resolve` (bulk or single
//! property) and the write path (`set_property` / `delete_property` /
//! `create_batch`). Everything else here exists to serve those two.
//!
//! # Not Yet Implemented
//!
//! - Undo/redo transaction history (external collaborator)
//! - CSS text generation for whole stylesheets (only per-value `Display`)
//! - Asset/font management

/// Breakpoint total order and cascaded-set computation.
pub mod breakpoints;
/// Cascade resolver per [CSS Cascading Level 4 § 6](https://www.w3.org/TR/css-cascade-4/#cascading).
pub mod cascade;
/// The style engine: selection state, updates, and assembly.
pub mod engine;
/// Style storage index over the flat declaration list.
pub mod index;
/// Resolved style assembly and provenance.
pub mod info;
/// Inheritance resolver per [CSS Cascading Level 4 § 7](https://www.w3.org/TR/css-cascade-4/#inheriting).
pub mod inheritance;
/// Layered-value utilities for comma-repeatable properties.
pub mod layers;
/// Raw data model: breakpoints, sources, selections, declarations.
pub mod model;
/// Serialized project document and validation.
pub mod project;
/// Source-chain resolver for stacked style sources.
pub mod source_chain;

// Re-exports for convenience
pub use breakpoints::{cascaded_breakpoint_ids, compare_media};
pub use cascade::{CascadedValue, resolve_cascaded};
pub use engine::{BatchUpdate, Selection, StyleEngine, UpdateOptions};
pub use index::StyleIndex;
pub use info::{StyleOrigin, StyleValueInfo};
pub use inheritance::{InheritedValue, resolve_inherited};
pub use model::{Breakpoint, Presets, StyleDecl, StyleDeclKey, StyleSource, StyleSourceSelection};
pub use project::{ProjectDoc, ProjectError};
pub use source_chain::{SourceValue, resolve_next_source, resolve_previous_source};
