//! Breakpoint ordering.
//!
//! [Media Queries Level 4 § 4.2](https://www.w3.org/TR/mediaqueries-4/#width)
//!
//! Breakpoints form a strict total order by activation threshold. Given the
//! selected breakpoint, every breakpoint that sorts strictly before it
//! "cascades into" it: its stateless declarations apply unless a closer
//! breakpoint overrides them, mirroring how overlapping `min-width` media
//! queries layer in a mobile-first stylesheet.

use core::cmp::Ordering;

use crate::model::Breakpoint;

/// Total order over breakpoints, weakest (earliest-activating) first.
///
/// - The base breakpoint (no conditions) sorts before everything.
/// - `min-width` breakpoints sort ascending (mobile-first).
/// - `max-width` breakpoints sort descending (a wider cap is weaker).
/// - Remaining ties break by id, so no two distinct breakpoints ever
///   compare equal — the cascade order must be unambiguous.
#[must_use]
pub fn compare_media(a: &Breakpoint, b: &Breakpoint) -> Ordering {
    let min_key = |bp: &Breakpoint| bp.min_width.unwrap_or(0.0);
    // No max-width cap behaves like an infinite one.
    let max_key = |bp: &Breakpoint| bp.max_width.unwrap_or(f64::INFINITY);

    min_key(a)
        .total_cmp(&min_key(b))
        .then_with(|| max_key(b).total_cmp(&max_key(a)))
        .then_with(|| a.id.cmp(&b.id))
}

/// The ids of breakpoints that cascade into `selected_id`, weakest first.
///
/// Sorts the whole set by [`compare_media`] and takes everything strictly
/// before the selected breakpoint. Unknown `selected_id` yields `[]`.
#[must_use]
pub fn cascaded_breakpoint_ids(breakpoints: &[Breakpoint], selected_id: &str) -> Vec<String> {
    if !breakpoints.iter().any(|bp| bp.id == selected_id) {
        return Vec::new();
    }

    let mut sorted: Vec<&Breakpoint> = breakpoints.iter().collect();
    sorted.sort_by(|a, b| compare_media(a, b));

    sorted
        .iter()
        .take_while(|bp| bp.id != selected_id)
        .map(|bp| bp.id.clone())
        .collect()
}
