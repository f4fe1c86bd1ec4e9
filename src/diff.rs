//! Keyed list diff producing an identity-stable edit script.
//!
//! Items are matched across the two sequences by key. Operations are emitted in four phases,
//! each applied in order against the result of the previous one:
//!
//! 1. removals of unmatched old items, back to front so earlier positions stay valid;
//! 2. moves of matched items that fall outside the longest run already in relative order;
//! 3. insertions of unmatched new items, front to back at their final positions;
//! 4. updates of matched items whose content changed, at their final positions.
//!
//! Keeping the longest increasing subsequence in place makes the number of moves minimal.

use crate::node::{same_content, Node};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One incremental change to a rendered sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp<T> {
    /// Insert `item` so that it ends up at `position`.
    Insert {
        /// Position after insertion.
        position: usize,
        /// The new item.
        item: T,
    },
    /// Remove the item at `position`.
    Remove {
        /// Position before removal.
        position: usize,
    },
    /// Remove the item at `from`, then reinsert it at `to`.
    Move {
        /// Position before the move.
        from: usize,
        /// Position after the move.
        to: usize,
    },
    /// Replace the item at `position` with a same-identity item whose content changed.
    Update {
        /// Position of the item.
        position: usize,
        /// The new content.
        item: T,
    },
}

/// Ordered operations turning one flattened sequence into another.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EditScript<T> {
    ops: Vec<EditOp<T>>,
}

impl<T> Default for EditScript<T> {
    fn default() -> Self {
        Self { ops: Vec::new() }
    }
}

impl<T: Clone> EditScript<T> {
    #[must_use]
    /// Operations in application order.
    pub fn ops(&self) -> &[EditOp<T>] {
        &self.ops
    }

    #[must_use]
    /// True when applying the script changes nothing.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[must_use]
    /// Count of insert, remove and move operations, i.e. everything but content updates.
    pub fn structural_len(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| !matches!(op, EditOp::Update { .. }))
            .count()
    }

    /// Apply every operation in order to `target`.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not the sequence the script was computed from.
    pub fn apply(&self, target: &mut Vec<T>) {
        for op in &self.ops {
            match op {
                EditOp::Insert { position, item } => target.insert(*position, item.clone()),
                EditOp::Remove { position } => {
                    target.remove(*position);
                }
                EditOp::Move { from, to } => {
                    let item = target.remove(*from);
                    target.insert(*to, item);
                }
                EditOp::Update { position, item } => target[*position] = item.clone(),
            }
        }
    }
}

/// Compute the edit script transforming `old` into `new`.
///
/// Both sequences must be free of duplicate keys.
#[must_use]
pub fn compute_edit_script<T: Node>(old: &[T], new: &[T]) -> EditScript<T> {
    let old_index: HashMap<&str, usize> = old
        .iter()
        .enumerate()
        .map(|(position, item)| (item.key(), position))
        .collect();
    let new_index: HashMap<&str, usize> = new
        .iter()
        .enumerate()
        .map(|(position, item)| (item.key(), position))
        .collect();

    let mut ops = Vec::new();

    for (position, item) in old.iter().enumerate().rev() {
        if !new_index.contains_key(item.key()) {
            ops.push(EditOp::Remove { position });
        }
    }

    // Survivors in their old order, each named by its index in `new`.
    let mut working: Vec<usize> = old
        .iter()
        .filter_map(|item| new_index.get(item.key()).copied())
        .collect();
    let stable: HashSet<usize> = longest_increasing_subsequence(&working)
        .into_iter()
        .map(|i| working[i])
        .collect();
    let matched: Vec<usize> = (0..new.len())
        .filter(|&i| old_index.contains_key(new[i].key()))
        .collect();

    for (rank, &target) in matched.iter().enumerate() {
        if stable.contains(&target) {
            continue;
        }
        let Some(from) = working.iter().position(|&i| i == target) else {
            continue;
        };
        working.remove(from);
        // Right after the item that precedes it in the new order.
        let to = match rank.checked_sub(1) {
            Some(prev) => working
                .iter()
                .position(|&i| i == matched[prev])
                .map_or(0, |p| p + 1),
            None => 0,
        };
        working.insert(to, target);
        if from != to {
            ops.push(EditOp::Move { from, to });
        }
    }

    for (position, item) in new.iter().enumerate() {
        if !old_index.contains_key(item.key()) {
            ops.push(EditOp::Insert {
                position,
                item: item.clone(),
            });
        }
    }

    for (position, item) in new.iter().enumerate() {
        if let Some(&before) = old_index.get(item.key()) {
            if !same_content(&old[before], item) {
                ops.push(EditOp::Update {
                    position,
                    item: item.clone(),
                });
            }
        }
    }

    EditScript { ops }
}

/// Indices into `values` of one longest strictly increasing subsequence.
fn longest_increasing_subsequence(values: &[usize]) -> Vec<usize> {
    // tails[k]: index of the smallest tail of an increasing run of length k + 1
    let mut tails: Vec<usize> = Vec::new();
    let mut predecessor: Vec<Option<usize>> = vec![None; values.len()];

    for (i, &value) in values.iter().enumerate() {
        let slot = tails.partition_point(|&t| values[t] < value);
        if slot > 0 {
            predecessor[i] = Some(tails[slot - 1]);
        }
        if slot == tails.len() {
            tails.push(i);
        } else {
            tails[slot] = i;
        }
    }

    let mut run = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        run.push(i);
        cursor = predecessor[i];
    }
    run.reverse();
    run
}

#[cfg(test)]
#[path = "tests/diff.rs"]
mod tests;
