//! Projection of the logical tree into the flat sequence the view renders.
//!
//! Flattening is a single left-to-right pass: every section contributes its header, followed by
//! its children unless it is collapsed. Alongside the entries we record which section owns each
//! position and the inclusive range the section's body occupies, which is what the reorder
//! constraints are checked against.

use crate::error::{Error, Mode, Result};
use crate::node::{Entry, Node, Section};
use std::collections::HashSet;

/// The logical tree, in one of the two submission modes.
#[derive(Clone, Debug)]
pub enum Tree<S, N> {
    /// Sections owning their child nodes.
    Sections(Vec<Section<S, N>>),
    /// A flat list with no section semantics.
    Nodes(Vec<N>),
}

impl<S: Node, N: Node> Tree<S, N> {
    #[must_use]
    /// Which submission mode this tree belongs to.
    pub fn mode(&self) -> Mode {
        match self {
            Tree::Sections(_) => Mode::Sections,
            Tree::Nodes(_) => Mode::Nodes,
        }
    }

    /// Reject trees in which any key, visible or hidden, occurs twice.
    ///
    /// Section keys share the key space with node keys, so a node named like a section is a
    /// collision too.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] naming the first repeated key.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut check = |key: &str| {
            if seen.insert(key.to_owned()) {
                Ok(())
            } else {
                Err(Error::DuplicateKey {
                    key: key.to_owned(),
                })
            }
        };
        match self {
            Tree::Sections(sections) => {
                for section in sections {
                    check(section.key())?;
                    for node in &section.nodes {
                        check(node.key())?;
                    }
                }
            }
            Tree::Nodes(nodes) => {
                for node in nodes {
                    check(node.key())?;
                }
            }
        }
        Ok(())
    }
}

/// Inclusive span of a section body: its header position to its last visible child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryRange {
    /// Position of the section header.
    pub start: usize,
    /// Position of the last visible child, or the header itself when there is none.
    pub end: usize,
}

impl BoundaryRange {
    #[must_use]
    /// Whether `position` lies anywhere in the range, header included.
    pub fn contains(&self, position: usize) -> bool {
        (self.start..=self.end).contains(&position)
    }

    #[must_use]
    /// Whether `position` is a slot a child may occupy, which excludes the header.
    pub fn contains_child_slot(&self, position: usize) -> bool {
        position > self.start && position <= self.end
    }
}

/// Boundary of the region a position belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Node mode: one region spanning the whole list.
    Unbounded,
    /// The enclosing section's body.
    Bounded(BoundaryRange),
}

/// Flattened sequence plus the boundary map derived from it.
#[derive(Clone, Debug)]
pub struct Projection<S, N> {
    entries: Vec<Entry<S, N>>,
    owners: Vec<Option<usize>>,
    ranges: Vec<BoundaryRange>,
}

impl<S, N> Default for Projection<S, N> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            owners: Vec::new(),
            ranges: Vec::new(),
        }
    }
}

impl<S: Node, N: Node> Projection<S, N> {
    #[must_use]
    /// Entries in display order.
    pub fn entries(&self) -> &[Entry<S, N>] {
        &self.entries
    }

    #[must_use]
    /// Number of flattened positions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// True when nothing is displayed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    /// Entry at `position`, if any.
    pub fn get(&self, position: usize) -> Option<&Entry<S, N>> {
        self.entries.get(position)
    }

    #[must_use]
    /// Index (in the tree's section list) of the section owning `position`.
    pub fn section_at(&self, position: usize) -> Option<usize> {
        self.owners.get(position).copied().flatten()
    }

    #[must_use]
    /// Boundary of the region `position` belongs to.
    pub fn boundary(&self, position: usize) -> Boundary {
        match self.section_at(position) {
            Some(section) => Boundary::Bounded(self.ranges[section]),
            None => Boundary::Unbounded,
        }
    }

    #[must_use]
    /// Body range of the section with the given index.
    pub fn section_range(&self, section: usize) -> Option<BoundaryRange> {
        self.ranges.get(section).copied()
    }

    #[must_use]
    /// Current position of the item carrying `key`.
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key() == key)
    }
}

/// Flatten a tree into its display projection.
#[must_use]
pub fn flatten<S: Node, N: Node>(tree: &Tree<S, N>) -> Projection<S, N> {
    let mut projection = Projection::default();
    match tree {
        Tree::Sections(sections) => {
            for (index, section) in sections.iter().enumerate() {
                let start = projection.entries.len();
                projection.entries.push(Entry::Section {
                    header: section.header.clone(),
                    collapsed: section.is_collapsed(),
                });
                projection.owners.push(Some(index));
                if !section.is_collapsed() {
                    for node in &section.nodes {
                        projection.entries.push(Entry::Node { node: node.clone() });
                        projection.owners.push(Some(index));
                    }
                }
                projection.ranges.push(BoundaryRange {
                    start,
                    end: projection.entries.len() - 1,
                });
            }
        }
        Tree::Nodes(nodes) => {
            projection.entries = nodes
                .iter()
                .map(|node| Entry::Node { node: node.clone() })
                .collect();
            projection.owners = vec![None; nodes.len()];
        }
    }
    projection
}

#[cfg(test)]
#[path = "tests/flatten.rs"]
mod tests;
