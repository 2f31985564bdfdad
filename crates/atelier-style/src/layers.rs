//! Layered-value utilities.
//!
//! [CSS Backgrounds Level 3 § 2 Layering](https://www.w3.org/TR/css-backgrounds-3/#layering)
//!
//! Comma-repeatable properties (backgrounds, shadows, filters, transitions)
//! are edited per *layer*, and every longhand in a layer group must keep the
//! same layer count through any edit — layer N of `background-size`
//! describes the same background as layer N of `background-image`. All
//! operations here read the resolved value (so edits to a cascaded or preset
//! list materialize it locally), mutate every group member consistently, and
//! publish through a single atomic batch.
//!
//! A group whose *declared* members disagree on layer count is corrupt
//! data; the operations panic rather than silently truncating or padding,
//! since a quiet fix would mask the corruption.

use std::collections::HashMap;

use atelier_css::{Layer, StyleValue, default_layer_value, layer_group};

use crate::engine::{StyleEngine, UpdateOptions};

/// A computed write for one group member; `None` deletes the declaration.
type MemberWrite = (&'static str, Option<Vec<Layer>>);

/// The group's current layer count: the maximum across all members.
///
/// # Panics
/// Panics if `property` is not comma-repeatable, or if two declared members
/// of the group disagree on layer count.
#[must_use]
pub fn layer_count(engine: &StyleEngine, property: &str) -> usize {
    let (_, counts) = group_layers(engine, property);
    declared_count(&counts).unwrap_or(0)
}

/// Set one property's entry at `layer_index`, keeping the group in sync.
///
/// When `new_value` is itself a layers list, the entry at `layer_index` is
/// replaced by the whole list (a bulk insert): the target property receives
/// the new entries verbatim, while every other member keeps its existing
/// entry at `layer_index` as the first inserted entry and pads the rest
/// with its default. A single (non-list) `new_value` replaces only the
/// target property's entry. An empty layers list removes the entry across
/// the whole group instead, and is a no-op when the group declares nothing
/// at `layer_index`.
///
/// # Panics
/// Panics on a non-repeatable property or a desynced group.
pub fn set_layer_property(
    engine: &mut StyleEngine,
    layer_index: usize,
    property: &str,
    new_value: StyleValue,
    options: &UpdateOptions,
) {
    let (group, counts) = group_layers(engine, property);
    let target_count = declared_count(&counts).unwrap_or(0).max(layer_index + 1);

    let inserted: Vec<Layer> = match new_value {
        StyleValue::Layers { value } => value,
        single => vec![Layer::new(single)],
    };
    // An empty replacement list is a removal of the target entry, not an
    // insert of nothing: splicing zero entries into one member while every
    // other member keeps its entry would desync the group.
    if inserted.is_empty() {
        if declared_count(&counts).is_some_and(|current| layer_index < current) {
            delete_layer(engine, property, layer_index, options);
        }
        return;
    }

    let writes: Vec<MemberWrite> = group
        .iter()
        .map(|member| {
            let mut layers = normalized(engine, member, target_count);
            let replacement: Vec<Layer> = if *member == property {
                inserted.clone()
            } else {
                // Index 0 of the insert preserves the member's existing entry
                // so inserting extra layers never clobbers an already-set
                // value.
                let mut padded = vec![layers[layer_index].clone()];
                padded.extend(
                    (1..inserted.len()).map(|_| Layer::new(default_layer_value(member))),
                );
                padded
            };
            let _: Vec<Layer> = layers
                .splice(layer_index..=layer_index, replacement)
                .collect();
            (*member, Some(layers))
        })
        .collect();

    publish_writes(engine, writes, options);
}

/// Prepend one new layer (index 0) across the whole group, using each
/// member's default layer value.
///
/// # Panics
/// Panics on a non-repeatable property or a desynced group.
pub fn add_layer(engine: &mut StyleEngine, property: &str, options: &UpdateOptions) {
    let (group, counts) = group_layers(engine, property);
    let current = declared_count(&counts).unwrap_or(0);

    let writes: Vec<MemberWrite> = group
        .iter()
        .map(|member| {
            let mut layers = normalized(engine, member, current);
            layers.insert(0, Layer::new(default_layer_value(member)));
            (*member, Some(layers))
        })
        .collect();

    publish_writes(engine, writes, options);
}

/// Remove the entry at `index` from every declared member. A member whose
/// layer count drops to zero has its declaration deleted entirely rather
/// than kept as an empty list.
///
/// # Panics
/// Panics on a non-repeatable property, a desynced group, or an
/// out-of-range index.
pub fn delete_layer(
    engine: &mut StyleEngine,
    property: &str,
    index: usize,
    options: &UpdateOptions,
) {
    let (group, counts) = group_layers(engine, property);
    let Some(current) = declared_count(&counts) else {
        return;
    };
    assert!(
        index < current,
        "layer index {index} out of range ({current} layers)"
    );

    let writes: Vec<MemberWrite> = group
        .iter()
        .filter(|member| counts.contains_key(**member))
        .map(|member| {
            let mut layers = normalized(engine, member, current);
            let _ = layers.remove(index);
            let write = if layers.is_empty() { None } else { Some(layers) };
            (*member, write)
        })
        .collect();

    publish_writes(engine, writes, options);
}

/// Move the entry at `from` to position `to` in every declared member,
/// preserving the relative order of all other entries (a move, not an
/// in-place exchange).
///
/// # Panics
/// Panics on a non-repeatable property, a desynced group, or an
/// out-of-range index.
pub fn swap_layers(
    engine: &mut StyleEngine,
    property: &str,
    from: usize,
    to: usize,
    options: &UpdateOptions,
) {
    let (group, counts) = group_layers(engine, property);
    let Some(current) = declared_count(&counts) else {
        return;
    };
    assert!(
        from < current && to < current,
        "layer indices {from}/{to} out of range ({current} layers)"
    );

    let writes: Vec<MemberWrite> = group
        .iter()
        .filter(|member| counts.contains_key(**member))
        .map(|member| {
            let mut layers = normalized(engine, member, current);
            let moved = layers.remove(from);
            layers.insert(to, moved);
            (*member, Some(layers))
        })
        .collect();

    publish_writes(engine, writes, options);
}

/// Toggle the soft-delete flag of the layer at `index` across the group.
/// Hidden layers are excluded from generated CSS but stay in the data model
/// for later re-enabling. The target property's current flag decides the
/// new state for every member, so the group cannot drift apart.
///
/// # Panics
/// Panics on a non-repeatable property, a desynced group, or an
/// out-of-range index.
pub fn hide_layer(engine: &mut StyleEngine, property: &str, index: usize, options: &UpdateOptions) {
    let (group, counts) = group_layers(engine, property);
    let Some(current) = declared_count(&counts) else {
        return;
    };
    assert!(
        index < current,
        "layer index {index} out of range ({current} layers)"
    );

    let hidden = !normalized(engine, property, current)[index].hidden;

    let writes: Vec<MemberWrite> = group
        .iter()
        .filter(|member| counts.contains_key(**member))
        .map(|member| {
            let mut layers = normalized(engine, member, current);
            layers[index].hidden = hidden;
            (*member, Some(layers))
        })
        .collect();

    publish_writes(engine, writes, options);
}

/// Apply the computed member writes as one atomic batch.
fn publish_writes(engine: &mut StyleEngine, writes: Vec<MemberWrite>, options: &UpdateOptions) {
    let mut batch = engine.create_batch();
    for (member, layers) in writes {
        match layers {
            Some(value) => batch.set_property(member, StyleValue::Layers { value }),
            None => batch.delete_property(member),
        }
    }
    batch.publish(options);
}

/// The member's resolved layers padded with its default layer value up to
/// `target_count` — the normalization step every per-layer mutation runs
/// first. Padding entries are never null; they are the documented default.
fn normalized(engine: &StyleEngine, property: &str, target_count: usize) -> Vec<Layer> {
    let mut layers = engine
        .resolve(property)
        .and_then(|info| match info.value {
            StyleValue::Layers { value } => Some(value),
            _ => None,
        })
        .unwrap_or_default();
    while layers.len() < target_count {
        layers.push(Layer::new(default_layer_value(property)));
    }
    layers
}

/// The group for `property` plus the layer counts of its *declared*
/// members (members whose resolved value is a layers list).
///
/// # Panics
/// Panics if the property is not comma-repeatable or if declared members
/// disagree on layer count.
fn group_layers(
    engine: &StyleEngine,
    property: &str,
) -> (&'static [&'static str], HashMap<&'static str, usize>) {
    let group = layer_group(property)
        .unwrap_or_else(|| panic!("property '{property}' is not comma-repeatable"));

    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for member in group {
        if let Some(count) = engine
            .resolve(member)
            .and_then(|info| info.value.layer_count())
        {
            let _ = counts.insert(*member, count);
        }
    }

    if let Some(first) = declared_count(&counts) {
        assert!(
            counts.values().all(|&count| count == first),
            "layer group of '{property}' is desynced: {counts:?}"
        );
    }

    (group, counts)
}

/// The common declared layer count, if any member declares one.
fn declared_count(counts: &HashMap<&'static str, usize>) -> Option<usize> {
    counts.values().copied().max()
}
