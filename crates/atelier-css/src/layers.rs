//! Layer-group tables for comma-repeatable properties.
//!
//! [CSS Backgrounds Level 3 § 2 Layering](https://www.w3.org/TR/css-backgrounds-3/#layering)
//!
//! "The background of a box can have multiple layers in CSS3. The number of
//! layers is determined by the number of comma-separated values in the
//! 'background-image' property."
//!
//! Every comma-repeatable property belongs to exactly one *layer group*: the
//! set of longhands whose Nth comma-separated entries describe the same
//! layer. Editing any one of them must keep the whole group's layer counts
//! equal, which is the invariant the layered-value utilities in
//! `atelier-style` enforce. Single properties like `box-shadow` form
//! one-element groups.

use crate::property::initial_value;
use crate::value::StyleValue;

/// [§ 2 Layering](https://www.w3.org/TR/css-backgrounds-3/#layering)
/// Longhands whose comma-separated entries co-vary per background layer.
pub const BACKGROUND_GROUP: &[&str] = &[
    "backgroundImage",
    "backgroundPositionX",
    "backgroundPositionY",
    "backgroundSize",
    "backgroundRepeat",
    "backgroundAttachment",
    "backgroundBlendMode",
];

/// [CSS Transitions 1 § 2](https://www.w3.org/TR/css-transitions-1/#transitions)
/// "the lists are matched up from the first value": transition longhands
/// co-vary per transition.
pub const TRANSITION_GROUP: &[&str] = &[
    "transitionProperty",
    "transitionDuration",
    "transitionTimingFunction",
    "transitionDelay",
];

/// Comma-repeatable properties that form a group of one.
const SINGLE_GROUPS: &[&[&str]] = &[
    &["boxShadow"],
    &["textShadow"],
    &["filter"],
    &["backdropFilter"],
];

/// The layer group containing `property`, or `None` for non-repeatable
/// properties. The returned slice always contains `property` itself.
#[must_use]
pub fn layer_group(property: &str) -> Option<&'static [&'static str]> {
    if BACKGROUND_GROUP.contains(&property) {
        return Some(BACKGROUND_GROUP);
    }
    if TRANSITION_GROUP.contains(&property) {
        return Some(TRANSITION_GROUP);
    }
    SINGLE_GROUPS
        .iter()
        .find(|group| group.contains(&property))
        .copied()
}

/// Whether a property's value is a comma-repeatable layer list.
#[must_use]
pub fn is_layered(property: &str) -> bool {
    layer_group(property).is_some()
}

/// The documented default for one layer of `property`, used to pad a
/// shorter sibling when the group's layer counts are normalized.
///
/// Never a list and never invalid: padding must produce a well-formed entry.
/// For most longhands this is the property's registry initial value ("If a
/// property doesn't have enough comma-separated values to match the number
/// of layers, the UA must calculate its used value by repeating the list"
/// — we pad with the initial value instead, which is what the editor shows
/// for an untouched longhand). Shadow and filter layers default to a
/// neutral visible effect so a freshly added layer has something to edit.
#[must_use]
pub fn default_layer_value(property: &str) -> StyleValue {
    match property {
        "boxShadow" | "textShadow" => StyleValue::Tuple {
            value: vec![
                StyleValue::px(0.0),
                StyleValue::px(2.0),
                StyleValue::px(5.0),
                StyleValue::Rgb {
                    r: 0,
                    g: 0,
                    b: 0,
                    alpha: 0.2,
                },
            ],
        },
        "filter" | "backdropFilter" => StyleValue::Function {
            name: "blur".into(),
            args: vec![StyleValue::px(0.0)],
        },
        _ => initial_value(property)
            .cloned()
            .unwrap_or(StyleValue::keyword("none")),
    }
}
