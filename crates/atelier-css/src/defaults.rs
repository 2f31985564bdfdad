//! HTML tag default styles and the component → tag map.
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents
//! elements of HTML documents in ways consistent with general user
//! expectations."
//!
//! In the builder, every component renders a concrete HTML tag; the tag's
//! user-agent defaults sit at the very bottom of the value priority in the
//! resolved-style assembler (below presets, above the registry initial
//! value). This is a subset of the suggested UA stylesheet covering the
//! components the builder ships, kept as structured values rather than CSS
//! text since nothing here ever needs parsing.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::value::{StyleValue, Unit};

/// Map a builder component name to the HTML tag it renders.
///
/// Unknown components render a `div`.
#[must_use]
pub fn component_tag(component: &str) -> &'static str {
    match component {
        "Body" => "body",
        "Heading" => "h1",
        "Paragraph" => "p",
        "Text" => "span",
        "Link" => "a",
        "List" => "ul",
        "ListItem" => "li",
        "Image" => "img",
        "Button" => "button",
        "Input" => "input",
        "Bold" => "b",
        "Italic" => "i",
        _ => "div",
    }
}

type TagStyles = HashMap<&'static str, Vec<(&'static str, StyleValue)>>;

/// [§ 15.3 Rendering — Suggested default style sheet](https://html.spec.whatwg.org/multipage/rendering.html#the-css-user-agent-style-sheet-and-presentational-hints)
fn build_tag_defaults() -> TagStyles {
    let kw = |k: &str| StyleValue::keyword(k);
    let em = |v: f64| StyleValue::unit(v, Unit::Em);
    let block = ("display", kw("block"));

    HashMap::from([
        // [§ 15.3.3 Flow content]
        // "body { display: block; margin: 8px; }"
        (
            "body",
            vec![
                block.clone(),
                ("marginTop", StyleValue::px(8.0)),
                ("marginRight", StyleValue::px(8.0)),
                ("marginBottom", StyleValue::px(8.0)),
                ("marginLeft", StyleValue::px(8.0)),
            ],
        ),
        ("div", vec![block.clone()]),
        // "p { display: block; margin-block-start: 1em; margin-block-end: 1em; }"
        (
            "p",
            vec![
                block.clone(),
                ("marginTop", em(1.0)),
                ("marginBottom", em(1.0)),
            ],
        ),
        // [§ 15.3.6 Sections and headings]
        // "h1 { font-weight: bold; font-size: 2.00em; margin-block: 0.67em; }"
        (
            "h1",
            vec![
                block.clone(),
                ("fontSize", em(2.0)),
                ("fontWeight", kw("bold")),
                ("marginTop", em(0.67)),
                ("marginBottom", em(0.67)),
            ],
        ),
        // [§ 15.3.4 Phrasing content]
        // "a:link { color: #0000EE; text-decoration: underline; cursor: pointer; }"
        (
            "a",
            vec![
                ("color", StyleValue::rgb(0, 0, 238)),
                ("textDecorationLine", kw("underline")),
                ("cursor", kw("pointer")),
            ],
        ),
        // "b, strong { font-weight: bolder; }"
        ("b", vec![("fontWeight", kw("bolder"))]),
        // "i, em { font-style: italic; }"
        ("i", vec![("fontStyle", kw("italic"))]),
        // [§ 15.3.7 Lists]
        // "ul { display: block; list-style-type: disc; margin-block: 1em; padding-inline-start: 40px; }"
        (
            "ul",
            vec![
                block.clone(),
                ("listStyleType", kw("disc")),
                ("marginTop", em(1.0)),
                ("marginBottom", em(1.0)),
                ("paddingLeft", StyleValue::px(40.0)),
            ],
        ),
        // "li { display: list-item; }"
        ("li", vec![("display", kw("list-item"))]),
        ("span", vec![]),
        ("img", vec![("display", kw("inline-block"))]),
        // [§ 15.5.4 The button element]
        (
            "button",
            vec![
                ("display", kw("inline-block")),
                ("textAlign", kw("center")),
                ("cursor", kw("default")),
            ],
        ),
        ("input", vec![("display", kw("inline-block"))]),
    ])
}

fn tag_defaults() -> &'static TagStyles {
    static DEFAULTS: OnceLock<TagStyles> = OnceLock::new();
    DEFAULTS.get_or_init(build_tag_defaults)
}

/// The default `(property, value)` pairs for an HTML tag; empty for tags
/// without defaults in the subset.
#[must_use]
pub fn tag_default_styles(tag: &str) -> &'static [(&'static str, StyleValue)] {
    tag_defaults().get(tag).map_or(&[], Vec::as_slice)
}
