//! Resolved style assembly.
//!
//! [CSS Cascading Level 4 § 4](https://www.w3.org/TR/css-cascade-4/#value-stages)
//!
//! One [`StyleValueInfo`] is the panel's entire knowledge about one property
//! on the selected instance: the winning value plus every candidate layer
//! that lost, so the UI can show provenance ("Local", a token name, a
//! breakpoint label) and preview what deleting an override would reveal.
//!
//! The winning value follows a fixed priority; the provenance tag is a
//! separate, simpler classification — a cascaded value can win the value
//! race while the property is still tagged [`StyleOrigin::Remote`].

use atelier_css::StyleValue;
use strum_macros::Display;

use crate::cascade::CascadedValue;
use crate::inheritance::InheritedValue;
use crate::source_chain::SourceValue;

/// Provenance classification driving UI affordances (reset button
/// visibility, colored value indicators).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum StyleOrigin {
    /// Set on the selected source at the selected breakpoint and state
    /// (or previewed ephemerally).
    Local,
    /// Coming from another breakpoint, another source, or an ancestor.
    Remote,
    /// Coming from a component preset.
    Preset,
    /// Browser default (tag default or registry initial value).
    Default,
}

/// The resolved view of one property for the selected instance.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleValueInfo {
    /// The winning value after merging every candidate layer.
    pub value: StyleValue,
    /// Transient preview value staged by an ephemeral write, if any.
    pub ephemeral: Option<StyleValue>,
    /// Declaration at the selected breakpoint/source/state, if any.
    pub local: Option<StyleValue>,
    /// Contribution of sources before the selected one in the chain.
    pub previous_source: Option<SourceValue>,
    /// Contribution of sources after the selected one in the chain.
    pub next_source: Option<SourceValue>,
    /// Contribution of earlier breakpoints.
    pub cascaded: Option<CascadedValue>,
    /// Contribution of ancestor instances.
    pub inherited: Option<InheritedValue>,
    /// Component preset value, if any.
    pub preset: Option<StyleValue>,
    /// For the `color` property only: the effective color that
    /// `currentColor` references resolve to (nearest ancestor-or-self
    /// concrete color). Computed by a separate pass, independent of the
    /// general inheritance of `color` itself.
    pub current_color: Option<StyleValue>,
}

impl StyleValueInfo {
    /// The provenance tag, evaluated over the candidate fields in fixed
    /// order. Independent of which value won the priority race.
    #[must_use]
    pub const fn origin(&self) -> StyleOrigin {
        if self.ephemeral.is_some() || self.local.is_some() {
            StyleOrigin::Local
        } else if self.previous_source.is_some()
            || self.cascaded.is_some()
            || self.inherited.is_some()
        {
            StyleOrigin::Remote
        } else if self.preset.is_some() {
            StyleOrigin::Preset
        } else {
            StyleOrigin::Default
        }
    }
}

/// Candidate layers for one property, strongest first in the struct order.
#[derive(Debug, Default)]
pub struct Candidates {
    /// Ephemeral preview value (wins over everything).
    pub ephemeral: Option<StyleValue>,
    /// Local declaration value.
    pub local: Option<StyleValue>,
    /// Previous-source contribution.
    pub previous_source: Option<SourceValue>,
    /// Next-source contribution (informational; never wins the value race).
    pub next_source: Option<SourceValue>,
    /// Cascaded-breakpoint contribution.
    pub cascaded: Option<CascadedValue>,
    /// Inherited contribution.
    pub inherited: Option<InheritedValue>,
    /// Component preset value.
    pub preset: Option<StyleValue>,
    /// HTML tag default value.
    pub tag_default: Option<StyleValue>,
    /// Registry initial value.
    pub initial: Option<StyleValue>,
}

/// Merge candidate layers into one [`StyleValueInfo`].
///
/// Priority for the winning value, highest first: ephemeral > local >
/// previous source > cascaded > inherited > preset > tag default > initial.
/// Returns `None` when every layer is absent — absence means "this property
/// is unset", which is distinct from any zero value.
#[must_use]
pub fn assemble(candidates: Candidates) -> Option<StyleValueInfo> {
    let Candidates {
        ephemeral,
        local,
        previous_source,
        next_source,
        cascaded,
        inherited,
        preset,
        tag_default,
        initial,
    } = candidates;

    let value = ephemeral
        .clone()
        .or_else(|| local.clone())
        .or_else(|| previous_source.as_ref().map(|s| s.value.clone()))
        .or_else(|| cascaded.as_ref().map(|c| c.value.clone()))
        .or_else(|| inherited.as_ref().map(|i| i.value.clone()))
        .or_else(|| preset.clone())
        .or_else(|| tag_default)
        .or_else(|| initial)?;

    Some(StyleValueInfo {
        value,
        ephemeral,
        local,
        previous_source,
        next_source,
        cascaded,
        inherited,
        preset,
        current_color: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_beats_cascaded_but_cascaded_tags_remote() {
        let info = assemble(Candidates {
            cascaded: Some(CascadedValue {
                breakpoint_id: "base".into(),
                style_source_id: "local".into(),
                value: StyleValue::px(100.0),
            }),
            ..Candidates::default()
        })
        .unwrap();
        assert_eq!(info.value, StyleValue::px(100.0));
        assert_eq!(info.origin(), StyleOrigin::Remote);

        let with_local = assemble(Candidates {
            local: Some(StyleValue::px(50.0)),
            cascaded: Some(CascadedValue {
                breakpoint_id: "base".into(),
                style_source_id: "local".into(),
                value: StyleValue::px(100.0),
            }),
            ..Candidates::default()
        })
        .unwrap();
        assert_eq!(with_local.value, StyleValue::px(50.0));
        assert_eq!(with_local.origin(), StyleOrigin::Local);
    }

    #[test]
    fn test_absent_everywhere_is_none() {
        assert!(assemble(Candidates::default()).is_none());
    }

    #[test]
    fn test_next_source_never_wins_the_value_race() {
        let info = assemble(Candidates {
            next_source: Some(SourceValue {
                style_source_id: "follower".into(),
                value: StyleValue::px(10.0),
            }),
            initial: Some(StyleValue::keyword("auto")),
            ..Candidates::default()
        })
        .unwrap();
        assert_eq!(info.value, StyleValue::keyword("auto"));
        assert_eq!(info.origin(), StyleOrigin::Default);
    }

    #[test]
    fn test_preset_origin() {
        let info = assemble(Candidates {
            preset: Some(StyleValue::keyword("bold")),
            ..Candidates::default()
        })
        .unwrap();
        assert_eq!(info.origin(), StyleOrigin::Preset);
    }
}
