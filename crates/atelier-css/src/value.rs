//! CSS value types for the Atelier style engine.
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Values in the editor are structured, not textual: the UI edits a tagged
//! union and the engine serializes it to CSS text only at publish time. The
//! serde representation uses an adjacent `type` tag so a serialized value
//! reads like `{"type":"unit","value":100,"unit":"px"}`.

use core::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths) and
/// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
///
/// Unit attached to a numeric value. `Number` marks a unitless number
/// (e.g. `line-height: 1.5`, `opacity: 0.4`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Unit {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1px = 1/96th of 1in"
    Px,
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the element"
    Em,
    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    /// "Equal to the computed value of the font-size property of the root element"
    Rem,
    /// [§ 5.1.2 Viewport-percentage lengths](https://www.w3.org/TR/css-values-4/#viewport-relative-lengths)
    /// "1vw = 1% of viewport width"
    Vw,
    /// [§ 5.1.2 Viewport-percentage lengths](https://www.w3.org/TR/css-values-4/#viewport-relative-lengths)
    /// "1vh = 1% of viewport height"
    Vh,
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    #[serde(rename = "%")]
    #[strum(serialize = "%")]
    Percent,
    /// [§ 7.2 Angle units](https://www.w3.org/TR/css-values-4/#angles)
    Deg,
    /// [§ 7.3 Duration units](https://www.w3.org/TR/css-values-4/#time) — seconds
    S,
    /// [§ 7.3 Duration units](https://www.w3.org/TR/css-values-4/#time) — milliseconds
    Ms,
    /// A unitless `<number>`; serialized without a suffix.
    Number,
}

/// One entry of a comma-repeatable value list.
///
/// [CSS Backgrounds Level 3 § 2 Layering](https://www.w3.org/TR/css-backgrounds-3/#layering)
///
/// The `hidden` flag is a soft delete: a hidden layer stays in the data
/// model (so the user can re-enable it) but is skipped when the list is
/// serialized to CSS text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// The layer's value (a tuple, function, image, or unparsed fragment).
    pub value: StyleValue,
    /// Excluded from generated CSS when true.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub hidden: bool,
}

impl Layer {
    /// Create a visible layer wrapping `value`.
    #[must_use]
    pub const fn new(value: StyleValue) -> Self {
        Self {
            value,
            hidden: false,
        }
    }
}

impl From<StyleValue> for Layer {
    fn from(value: StyleValue) -> Self {
        Self::new(value)
    }
}

/// A structured CSS value as edited by the style panel.
///
/// [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
///
/// `Invalid` carries the raw text of a value that failed validation (kept so
/// the text field can re-display it); `GuaranteedInvalid` is the result of
/// clearing a value entirely. Neither is ever written to storage — the
/// update writer rejects them (a routine part of interactive editing, not
/// an error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StyleValue {
    /// A CSS-wide or property keyword, e.g. `auto`, `none`, `currentColor`.
    Keyword {
        /// The keyword text.
        value: String,
    },
    /// A dimension: number plus [`Unit`].
    Unit {
        /// The numeric component.
        value: f64,
        /// The unit suffix.
        unit: Unit,
    },
    /// [CSS Color Level 4 § 4](https://www.w3.org/TR/css-color-4/#color-syntax)
    /// sRGB color with an alpha channel.
    Rgb {
        /// "the red color channel" (0-255)
        r: u8,
        /// "the green color channel" (0-255)
        g: u8,
        /// "the blue color channel" (0-255)
        b: u8,
        /// Alpha, 0.0 (transparent) to 1.0 (opaque).
        alpha: f64,
    },
    /// Space-separated sub-values, e.g. one box-shadow layer
    /// `0px 4px 8px rgb(0 0 0 / 0.2)`.
    Tuple {
        /// The sub-values in order.
        value: Vec<StyleValue>,
    },
    /// Comma-repeatable list, e.g. multiple backgrounds or shadows.
    Layers {
        /// The layers in order; index 0 is the topmost layer.
        value: Vec<Layer>,
    },
    /// Raw CSS text that the editor did not structure (fallback).
    Unparsed {
        /// The raw text, emitted verbatim.
        value: String,
    },
    /// An image reference, serialized as `url(...)`.
    Image {
        /// The asset URL.
        value: String,
    },
    /// A CSS function, e.g. `blur(4px)` or `linear-gradient(...)`.
    Function {
        /// Function name without parentheses.
        name: String,
        /// Comma-separated arguments.
        args: Vec<StyleValue>,
    },
    /// Text that failed validation; never stored.
    Invalid {
        /// The offending raw text.
        value: String,
    },
    /// The result of clearing a value; never stored.
    GuaranteedInvalid,
}

impl StyleValue {
    /// Shorthand for a keyword value.
    pub fn keyword(value: impl Into<String>) -> Self {
        Self::Keyword {
            value: value.into(),
        }
    }

    /// Shorthand for a `px` dimension.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self::Unit {
            value,
            unit: Unit::Px,
        }
    }

    /// Shorthand for a dimension with an explicit unit.
    #[must_use]
    pub const fn unit(value: f64, unit: Unit) -> Self {
        Self::Unit { value, unit }
    }

    /// Shorthand for an opaque sRGB color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb {
            r,
            g,
            b,
            alpha: 1.0,
        }
    }

    /// Wrap plain values into a layers list, one visible layer per value.
    #[must_use]
    pub fn layers(values: Vec<StyleValue>) -> Self {
        Self::Layers {
            value: values.into_iter().map(Layer::new).collect(),
        }
    }

    /// True for values that must never reach storage.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. } | Self::GuaranteedInvalid)
    }

    /// Borrow the layer list if this is a layers value.
    #[must_use]
    pub fn as_layers(&self) -> Option<&[Layer]> {
        match self {
            Self::Layers { value } => Some(value),
            _ => None,
        }
    }

    /// Number of layers; `None` for non-layers values.
    #[must_use]
    pub fn layer_count(&self) -> Option<usize> {
        self.as_layers().map(<[Layer]>::len)
    }
}

impl fmt::Display for StyleValue {
    /// Serialize to CSS text. Hidden layers are skipped; a layers value whose
    /// every layer is hidden serializes to `none`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword { value } | Self::Unparsed { value } => write!(f, "{value}"),
            Self::Unit { value, unit } => match unit {
                Unit::Number => write!(f, "{value}"),
                _ => write!(f, "{value}{unit}"),
            },
            Self::Rgb { r, g, b, alpha } => {
                // [CSS Color 4 § 4.1] modern space-separated syntax
                if (*alpha - 1.0).abs() < f64::EPSILON {
                    write!(f, "rgb({r} {g} {b})")
                } else {
                    write!(f, "rgb({r} {g} {b} / {alpha})")
                }
            }
            Self::Tuple { value } => {
                let parts: Vec<String> = value.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(" "))
            }
            Self::Layers { value } => {
                let parts: Vec<String> = value
                    .iter()
                    .filter(|layer| !layer.hidden)
                    .map(|layer| layer.value.to_string())
                    .collect();
                if parts.is_empty() {
                    write!(f, "none")
                } else {
                    write!(f, "{}", parts.join(", "))
                }
            }
            Self::Image { value } => write!(f, "url({value})"),
            Self::Function { name, args } => {
                let parts: Vec<String> = args.iter().map(ToString::to_string).collect();
                write!(f, "{name}({})", parts.join(", "))
            }
            Self::Invalid { value } => write!(f, "{value}"),
            Self::GuaranteedInvalid => write!(f, "unset"),
        }
    }
}

/// Convert a camelCase property name to its kebab-case CSS form
/// (`backgroundImage` → `background-image`).
///
/// Property names are stored camelCase throughout the engine, matching the
/// editor's data model; kebab-case only appears in generated CSS text.
#[must_use]
pub fn to_kebab_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for ch in property.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
