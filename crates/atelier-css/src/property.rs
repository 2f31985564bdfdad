//! Property registry: static per-property metadata.
//!
//! [CSS Cascading Level 4 § 7.1 Inherited Properties](https://www.w3.org/TR/css-cascade-4/#inherited-property)
//! "Some properties are inherited from an ancestor element to its descendants."
//!
//! [CSS Cascading Level 4 § 7.3 Initial Values](https://www.w3.org/TR/css-cascade-4/#initial-values)
//! "Each property has an initial value, defined in the property's definition."
//!
//! The registry is the leaf dependency of the whole engine: the inheritance
//! resolver consults `inherited`, and the resolved-style assembler falls back
//! to `initial` when no other layer supplies a value. Property names are
//! camelCase (the editor's data-model form), not kebab-case CSS.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::value::{StyleValue, Unit};

/// Static metadata for one CSS property.
#[derive(Debug, Clone)]
pub struct PropertyMeta {
    /// Whether the property propagates from ancestor to descendant by default.
    pub inherited: bool,
    /// The property's initial value per its specification.
    pub initial: StyleValue,
}

/// Population of the registry. Inheritability and initial values follow each
/// property's definition table in the CSS specifications; the set covers the
/// properties the style panel exposes.
fn build_registry() -> HashMap<&'static str, PropertyMeta> {
    let inherited = |initial: StyleValue| PropertyMeta {
        inherited: true,
        initial,
    };
    let reset = |initial: StyleValue| PropertyMeta {
        inherited: false,
        initial,
    };
    let kw = |k: &str| StyleValue::keyword(k);
    let zero = StyleValue::px(0.0);

    HashMap::from([
        // [CSS Color 4 § 3.1] "Inherited: yes", initial: CanvasText
        ("color", inherited(StyleValue::rgb(0, 0, 0))),
        // [CSS Fonts 4] font properties are inherited
        ("fontFamily", inherited(kw("serif"))),
        ("fontSize", inherited(kw("medium"))),
        ("fontStyle", inherited(kw("normal"))),
        ("fontWeight", inherited(kw("normal"))),
        // [CSS Inline 3 § 4.2] "Inherited: yes"
        ("lineHeight", inherited(kw("normal"))),
        // [CSS Text 3] text properties are inherited
        ("letterSpacing", inherited(kw("normal"))),
        ("textAlign", inherited(kw("start"))),
        ("textIndent", inherited(zero.clone())),
        ("textTransform", inherited(kw("none"))),
        ("whiteSpace", inherited(kw("normal"))),
        ("wordSpacing", inherited(kw("normal"))),
        // [CSS Text Decoration 4 § 2] "Inherited: no"
        ("textDecorationLine", reset(kw("none"))),
        ("textShadow", inherited(kw("none"))),
        // [CSS Display 3 § 2] "Inherited: no", initial: inline
        ("display", reset(kw("inline"))),
        ("visibility", inherited(kw("visible"))),
        // [CSS UI 4] cursor is inherited
        ("cursor", inherited(kw("auto"))),
        // [CSS Lists 3]
        ("listStyleType", inherited(kw("disc"))),
        // [CSS Box 4] box properties are not inherited
        ("width", reset(kw("auto"))),
        ("height", reset(kw("auto"))),
        ("minWidth", reset(kw("auto"))),
        ("minHeight", reset(kw("auto"))),
        ("maxWidth", reset(kw("none"))),
        ("maxHeight", reset(kw("none"))),
        ("marginTop", reset(zero.clone())),
        ("marginRight", reset(zero.clone())),
        ("marginBottom", reset(zero.clone())),
        ("marginLeft", reset(zero.clone())),
        ("paddingTop", reset(zero.clone())),
        ("paddingRight", reset(zero.clone())),
        ("paddingBottom", reset(zero.clone())),
        ("paddingLeft", reset(zero.clone())),
        // [CSS Backgrounds 3] background properties are not inherited
        ("backgroundColor", reset(kw("transparent"))),
        ("backgroundImage", reset(kw("none"))),
        (
            "backgroundPositionX",
            reset(StyleValue::unit(0.0, Unit::Percent)),
        ),
        (
            "backgroundPositionY",
            reset(StyleValue::unit(0.0, Unit::Percent)),
        ),
        ("backgroundSize", reset(kw("auto"))),
        ("backgroundRepeat", reset(kw("repeat"))),
        ("backgroundAttachment", reset(kw("scroll"))),
        ("backgroundBlendMode", reset(kw("normal"))),
        // [CSS Backgrounds 3 § 7] borders are not inherited
        ("borderTopWidth", reset(kw("medium"))),
        ("borderTopStyle", reset(kw("none"))),
        ("borderTopColor", reset(kw("currentColor"))),
        ("borderRadius", reset(zero.clone())),
        // [CSS Backgrounds 3 § 9] "Inherited: no"
        ("boxShadow", reset(kw("none"))),
        // [Filter Effects 1 § 5] "Inherited: no"
        ("filter", reset(kw("none"))),
        ("backdropFilter", reset(kw("none"))),
        // [CSS Color 4 § 3.2] "Inherited: no"
        ("opacity", reset(StyleValue::unit(1.0, Unit::Number))),
        // [CSS Transitions 1] transition properties are not inherited
        ("transitionProperty", reset(kw("all"))),
        ("transitionDuration", reset(StyleValue::unit(0.0, Unit::S))),
        ("transitionTimingFunction", reset(kw("ease"))),
        ("transitionDelay", reset(StyleValue::unit(0.0, Unit::S))),
        // [CSS Flexbox 1] flex container/item properties are not inherited
        ("flexDirection", reset(kw("row"))),
        ("flexWrap", reset(kw("nowrap"))),
        ("alignItems", reset(kw("normal"))),
        ("justifyContent", reset(kw("normal"))),
        ("flexGrow", reset(StyleValue::unit(0.0, Unit::Number))),
        ("flexShrink", reset(StyleValue::unit(1.0, Unit::Number))),
        ("gap", reset(kw("normal"))),
        // [CSS Position 3]
        ("position", reset(kw("static"))),
        ("top", reset(kw("auto"))),
        ("right", reset(kw("auto"))),
        ("bottom", reset(kw("auto"))),
        ("left", reset(kw("auto"))),
        ("zIndex", reset(kw("auto"))),
        // [CSS Overflow 3]
        ("overflowX", reset(kw("visible"))),
        ("overflowY", reset(kw("visible"))),
    ])
}

fn registry() -> &'static HashMap<&'static str, PropertyMeta> {
    static REGISTRY: OnceLock<HashMap<&'static str, PropertyMeta>> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

/// Look up the metadata for a property; `None` for unknown properties.
#[must_use]
pub fn property_meta(property: &str) -> Option<&'static PropertyMeta> {
    registry().get(property)
}

/// Whether a property inherits from ancestors. Unknown properties do not.
#[must_use]
pub fn is_inherited(property: &str) -> bool {
    property_meta(property).is_some_and(|meta| meta.inherited)
}

/// The property's initial value, if the property is registered.
#[must_use]
pub fn initial_value(property: &str) -> Option<&'static StyleValue> {
    property_meta(property).map(|meta| &meta.initial)
}

/// All registered property names. The resolver iterates this set when
/// bulk-resolving an instance.
#[must_use]
pub fn registered_properties() -> impl Iterator<Item = &'static str> {
    registry().keys().copied()
}
