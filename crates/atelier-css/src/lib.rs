//! CSS value model and static property metadata for the Atelier style engine.
//!
//! # Scope
//!
//! This crate implements the data half of the style panel:
//! - **Style Values** ([CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/))
//!   - Tagged value union: keyword, unit, rgb, tuple, layers, unparsed,
//!     image, function, invalid
//!   - CSS text serialization via `Display`
//! - **Property Registry** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Per-property inheritability and initial value
//! - **Layer Groups** ([CSS Backgrounds Level 3 § 2](https://www.w3.org/TR/css-backgrounds-3/#layering))
//!   - Which longhand properties co-vary per comma-repeatable group, and
//!     each property's default layer value
//! - **Tag Defaults** ([WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html))
//!   - Default styles per rendered HTML tag, plus the component → tag map
//!
//! The resolution logic itself (cascade, inheritance, source chains) lives in
//! `atelier-style`; this crate is pure data and lookup tables.
//!
//! # Not Yet Implemented
//!
//! - CSS text parsing (values arrive pre-structured from the editor UI)
//! - calc() expressions
//! - Custom properties (var())

/// Tag default styles and the component → tag map per
/// [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html).
pub mod defaults;
/// Layer-group tables per [CSS Backgrounds Level 3 § 2](https://www.w3.org/TR/css-backgrounds-3/#layering).
pub mod layers;
/// Property registry per [CSS Cascading Level 4 § 7](https://www.w3.org/TR/css-cascade-4/#inheriting).
pub mod property;
/// Style value union per [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/).
pub mod value;

// Re-exports for convenience
pub use defaults::{component_tag, tag_default_styles};
pub use layers::{default_layer_value, is_layered, layer_group};
pub use property::{
    PropertyMeta, initial_value, is_inherited, property_meta, registered_properties,
};
pub use value::{Layer, StyleValue, Unit, to_kebab_case};
