//! Drag-reorder legality and the tree mutations legal drags perform.
//!
//! A drag proceeds through a small state machine:
//!
//! ```text
//! Idle -> Dragging(anchor) -> Idle
//!          |  ^
//!          |__| each move step, accepted or rejected
//! ```
//!
//! The first step of a gesture fixes the anchor position and, for nodes, the boundary of the
//! section the node started in. When nodes may not cross sections, every later step must target
//! one of that section's child slots. Rejected steps leave both the tree and the state as they
//! were, so the gesture carries on. Only the end of the gesture is reported, and only if the item
//! came to rest somewhere other than its anchor.

use crate::config::Config;
use crate::flatten::{Boundary, Projection, Tree};
use crate::node::{move_item, Entry, Node};
use tracing::{debug, trace};

/// Reported once when a drag ends away from where it started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveCompleted {
    /// Position of the item when the drag began.
    pub from: usize,
    /// Position of the item when the drag ended.
    pub to: usize,
}

/// Lifecycle of a drag gesture.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// An item is being dragged.
    Dragging {
        /// Position of the item when the drag began.
        anchor: usize,
        /// Key of the dragged item, used to find where it ended up.
        key: String,
        /// Region the item started in.
        boundary: Boundary,
    },
}

/// Whether the item at `position` may be picked up at all.
#[must_use]
pub fn can_be_moved<S: Node, N: Node>(
    projection: &Projection<S, N>,
    config: &Config,
    position: usize,
) -> bool {
    match projection.get(position) {
        Some(Entry::Section { .. }) => config.movable_sections,
        Some(Entry::Node { .. }) => config.movable_nodes,
        None => false,
    }
}

/// Drag state plus the rules for each step.
#[derive(Debug, Default)]
pub struct ReorderEngine {
    state: DragState,
}

impl ReorderEngine {
    #[must_use]
    /// Engine in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Current drag state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Try one drag step, mutating `tree` if the step is legal.
    ///
    /// `projection` must be the flattening of `tree` as it stands. Once a gesture is under way,
    /// `from` must hold the item picked up first. Returns whether the step was accepted; the
    /// caller re-flattens after an accepted step.
    pub fn request_move<S: Node, N: Node>(
        &mut self,
        tree: &mut Tree<S, N>,
        projection: &Projection<S, N>,
        config: &Config,
        from: usize,
        to: usize,
    ) -> bool {
        if from == to || to >= projection.len() || !can_be_moved(projection, config, from) {
            trace!(from, to, "move step ignored");
            return false;
        }
        let Some(entry) = projection.get(from) else {
            return false;
        };

        if self.state == DragState::Idle {
            self.state = DragState::Dragging {
                anchor: from,
                key: entry.key().to_owned(),
                boundary: projection.boundary(from),
            };
        }
        let DragState::Dragging { key, boundary, .. } = &self.state else {
            return false;
        };
        if entry.key() != key.as_str() {
            debug!(from, to, dragged = %key, "move rejected: not the dragged item");
            return false;
        }
        let boundary = *boundary;

        let accepted = if let Tree::Nodes(nodes) = tree {
            *nodes = move_item(std::mem::take(nodes), from, to);
            true
        } else if entry.is_section() {
            move_section(tree, projection, from, to)
        } else {
            if !config.nodes_cross_sections {
                if let Boundary::Bounded(range) = boundary {
                    if !range.contains_child_slot(to) {
                        debug!(from, to, ?range, "move rejected: outside section");
                        return false;
                    }
                }
            }
            move_node(tree, projection, from, to)
        };

        if accepted {
            trace!(from, to, "move step accepted");
        } else {
            debug!(from, to, "move rejected: no valid destination");
        }
        accepted
    }

    /// Abandon the gesture without reporting anything.
    ///
    /// Used when the tree is replaced or reshaped under a drag, which leaves the anchor and
    /// boundary meaningless.
    pub fn cancel(&mut self) {
        if let DragState::Dragging { key, .. } = std::mem::take(&mut self.state) {
            debug!(%key, "drag cancelled");
        }
    }

    /// Finish the gesture, reporting where the dragged item came to rest.
    ///
    /// `projection` must reflect every accepted step.
    pub fn end_drag<S: Node, N: Node>(
        &mut self,
        projection: &Projection<S, N>,
    ) -> Option<MoveCompleted> {
        let DragState::Dragging { anchor, key, .. } = std::mem::take(&mut self.state) else {
            return None;
        };
        let to = projection.position_of(&key)?;
        if to == anchor {
            trace!(anchor, "drag ended where it started");
            return None;
        }
        debug!(from = anchor, to, "move completed");
        Some(MoveCompleted { from: anchor, to })
    }
}

/// Move the section whose header sits at `from` to the slot of the section owning `to`.
fn move_section<S: Node, N: Node>(
    tree: &mut Tree<S, N>,
    projection: &Projection<S, N>,
    from: usize,
    to: usize,
) -> bool {
    let Tree::Sections(sections) = tree else {
        return false;
    };
    let (Some(source), Some(destination)) = (projection.section_at(from), projection.section_at(to))
    else {
        return false;
    };
    if source == destination {
        return false;
    }
    *sections = move_item(std::mem::take(sections), source, destination);
    true
}

/// Move the node at `from` so that it lands on `to` in the flattened sequence.
///
/// The node joins whichever section header precedes `to` once the node has been lifted out.
fn move_node<S: Node, N: Node>(
    tree: &mut Tree<S, N>,
    projection: &Projection<S, N>,
    from: usize,
    to: usize,
) -> bool {
    let Tree::Sections(sections) = tree else {
        return false;
    };
    let Some(source) = projection.section_at(from) else {
        return false;
    };
    let Some(source_range) = projection.section_range(source) else {
        return false;
    };

    // Walk back from `to` in the sequence as it looks without the dragged node.
    let lifted = |k: usize| if k < from { k } else { k + 1 };
    let Some((header, destination)) = (0..to)
        .rev()
        .map(lifted)
        .find_map(|k| match projection.get(k) {
            Some(Entry::Section { .. }) => projection.section_at(k).map(|s| (k, s)),
            _ => None,
        })
    else {
        return false;
    };
    if sections[destination].is_collapsed() {
        return false;
    }

    let header_after_lift = if header < from { header } else { header - 1 };
    let child_index = to - header_after_lift - 1;
    let node = sections[source]
        .nodes
        .remove(from - source_range.start - 1);
    let nodes = &mut sections[destination].nodes;
    let index = child_index.min(nodes.len());
    nodes.insert(index, node);
    true
}

#[cfg(test)]
#[path = "tests/reorder.rs"]
mod tests;
