//! Collapse and expand as a pure projection change.
//!
//! Toggling only flips a section's runtime state; its child list is never touched, so the next
//! flattening simply leaves the children out (or puts them back, in order, right after the
//! header).

use crate::node::{Node, Section};
use tracing::debug;

/// Flip `section` between collapsed and expanded.
///
/// Returns `false`, leaving the section untouched, if it cannot be collapsed.
pub fn toggle<S: Node, N: Node>(section: &mut Section<S, N>) -> bool {
    if !section.can_be_collapsed {
        debug!(key = section.key(), "toggle ignored: section not collapsible");
        return false;
    }
    let collapsed = !section.is_collapsed();
    section.set_collapsed(collapsed);
    debug!(
        key = section.key(),
        collapsed,
        children = section.nodes.len(),
        "section toggled"
    );
    true
}

/// Carry runtime collapse state from `previous` into `next` for sections whose key persists.
///
/// Sections seen for the first time start in their `collapsed_by_default` state.
pub fn carry_state<S: Node, N: Node>(previous: &[Section<S, N>], next: &mut [Section<S, N>]) {
    for section in next {
        let collapsed = previous
            .iter()
            .find(|old| old.key() == section.key())
            .map_or(section.collapsed_by_default, Section::is_collapsed);
        section.set_collapsed(collapsed);
    }
}

#[cfg(test)]
#[path = "tests/collapse.rs"]
mod tests;
