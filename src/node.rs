//! Display items and the identity/equality contract every other module relies on.
//!
//! Identity is the stable string key: two items with the same key are the same logical entity,
//! whatever their content. Content equality only matters once two items have been matched by
//! identity, and decides whether the view has to rebind the item.

use serde::Serialize;

/// A display item with a stable key and comparable content.
pub trait Node: Clone + Send + Sync + 'static {
    /// Stable identity, unique within one adapter instance.
    fn key(&self) -> &str;

    /// Whether `other` renders identically to `self`.
    ///
    /// Must be reflexive and symmetric; the engines do not guard against violations.
    fn content_eq(&self, other: &Self) -> bool;
}

/// True iff both items carry the same key.
#[must_use]
pub fn same_identity<T: Node>(a: &T, b: &T) -> bool {
    a.key() == b.key()
}

/// True iff both items have equal content, short-circuiting on the same reference.
#[must_use]
pub fn same_content<T: Node>(a: &T, b: &T) -> bool {
    std::ptr::eq(a, b) || a.content_eq(b)
}

/// A header item that owns an ordered, exclusive list of child nodes.
#[derive(Clone, Debug)]
pub struct Section<S, N> {
    /// The header shown at the top of the section.
    pub header: S,
    /// Children in display order.
    pub nodes: Vec<N>,
    /// Projection state used when the section is first seen.
    pub collapsed_by_default: bool,
    /// Whether [`toggle`](crate::collapse::toggle) has any effect.
    pub can_be_collapsed: bool,
    collapsed: bool,
}

impl<S: Node, N: Node> Section<S, N> {
    #[must_use]
    /// Expanded, non-collapsible section.
    pub fn new(header: S, nodes: Vec<N>) -> Self {
        Self {
            header,
            nodes,
            collapsed_by_default: false,
            can_be_collapsed: false,
            collapsed: false,
        }
    }

    #[must_use]
    /// Allow or forbid collapsing.
    pub fn collapsible(mut self, can_be_collapsed: bool) -> Self {
        self.can_be_collapsed = can_be_collapsed;
        self
    }

    #[must_use]
    /// Start collapsed (or expanded) the first time the section is submitted.
    pub fn collapsed_by_default(mut self, collapsed: bool) -> Self {
        self.collapsed_by_default = collapsed;
        self.collapsed = collapsed;
        self
    }

    #[must_use]
    /// The header's key, which is also the section's key.
    pub fn key(&self) -> &str {
        self.header.key()
    }

    #[must_use]
    /// Current projection state.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub(crate) fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }
}

/// Whether a flattened position holds a section header or a plain node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ItemKind {
    /// A section header.
    Section,
    /// A plain node.
    Node,
}

/// One flattened position, tagged once during flattening.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry<S, N> {
    /// A section header together with its projection state.
    Section {
        /// The header item.
        header: S,
        /// Whether the section's children are hidden.
        collapsed: bool,
    },
    /// A child node, or any item in node mode.
    Node {
        /// The node item.
        node: N,
    },
}

impl<S: Node, N: Node> Entry<S, N> {
    #[must_use]
    /// Section or node.
    pub fn kind(&self) -> ItemKind {
        match self {
            Entry::Section { .. } => ItemKind::Section,
            Entry::Node { .. } => ItemKind::Node,
        }
    }

    #[must_use]
    /// True for section headers.
    pub fn is_section(&self) -> bool {
        matches!(self, Entry::Section { .. })
    }
}

impl<S: Node, N: Node> Node for Entry<S, N> {
    fn key(&self) -> &str {
        match self {
            Entry::Section { header, .. } => header.key(),
            Entry::Node { node } => node.key(),
        }
    }

    fn content_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Entry::Section { header, collapsed },
                Entry::Section {
                    header: other_header,
                    collapsed: other_collapsed,
                },
            ) => collapsed == other_collapsed && same_content(header, other_header),
            (Entry::Node { node }, Entry::Node { node: other_node }) => {
                same_content(node, other_node)
            }
            _ => false,
        }
    }
}

/// Remove the element at `from` and reinsert it at `to`, returning the new vector.
///
/// Both indices must be in bounds; `to` is interpreted after the removal.
///
/// # Panics
///
/// Panics if `from` or `to` is out of bounds.
#[must_use]
pub fn move_item<T>(mut items: Vec<T>, from: usize, to: usize) -> Vec<T> {
    let item = items.remove(from);
    items.insert(to, item);
    items
}

#[cfg(test)]
#[path = "tests/node.rs"]
mod tests;
