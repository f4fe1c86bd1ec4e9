//! The adapter: single source of truth for the logical tree and its projection.
//!
//! All structural change flows through here, either as a full-tree submission or as a gesture.
//! Both are handled synchronously on the owner's thread: the tree is validated or mutated,
//! re-flattened, and the new flattened sequence is handed to the [`Differ`], which computes the
//! edit script in the background. Gesture legality is always judged against the latest
//! projection of the tree, not against whatever the view happens to show.

use crate::collapse;
use crate::config::Config;
use crate::diff::EditScript;
use crate::differ::Differ;
use crate::error::{Error, Mode, Result};
use crate::flatten::{flatten, Boundary, Projection, Tree};
use crate::node::{Entry, ItemKind, Node, Section};
use crate::reorder::{self, MoveCompleted, ReorderEngine};
use crate::swipe::{self, SwipeDirection, SwipeEngine, SwipeOutcome};
use tokio::runtime::Handle;
use tracing::debug;

/// Receiver of edit scripts on the view side.
pub trait ViewLayer<T> {
    /// Apply one delivered script to whatever the view renders.
    fn apply_edit_script(&mut self, script: &EditScript<T>);
}

impl<T: Clone> ViewLayer<T> for Vec<T> {
    fn apply_edit_script(&mut self, script: &EditScript<T>) {
        script.apply(self);
    }
}

/// Sectioned list adapter over header type `S` and node type `N`.
pub struct SectionAdapter<S: Node, N: Node> {
    config: Config,
    tree: Option<Tree<S, N>>,
    projection: Projection<S, N>,
    differ: Differ<Entry<S, N>>,
    reorder: ReorderEngine,
    swipe: SwipeEngine,
}

impl<S: Node, N: Node> SectionAdapter<S, N> {
    #[must_use]
    /// Empty adapter whose diffs run on `handle`.
    pub fn new(config: Config, handle: Handle) -> Self {
        Self {
            config,
            tree: None,
            projection: Projection::default(),
            differ: Differ::new(handle),
            reorder: ReorderEngine::new(),
            swipe: SwipeEngine::new(),
        }
    }

    #[must_use]
    /// Active gesture policy.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Change the gesture policy; takes effect from the next gesture step.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    #[must_use]
    /// Submission mode this adapter is locked into, once anything was submitted.
    pub fn mode(&self) -> Option<Mode> {
        self.tree.as_ref().map(Tree::mode)
    }

    // --- Submission ---

    /// Replace the tree with a new snapshot of sections.
    ///
    /// Sections whose key was already present keep their collapse state; new ones start in their
    /// `collapsed_by_default` state. A drag in progress is abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModeMismatch`] if this adapter serves bare nodes, or
    /// [`Error::DuplicateKey`] if any key occurs twice. The current tree is left as it was.
    pub fn submit_sections(&mut self, mut sections: Vec<Section<S, N>>) -> Result<()> {
        let previous = match &self.tree {
            Some(Tree::Sections(previous)) => previous.as_slice(),
            _ => &[],
        };
        collapse::carry_state(previous, &mut sections);
        self.accept(Tree::Sections(sections))
    }

    /// Replace the tree with a new snapshot of bare nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ModeMismatch`] if this adapter serves sections, or
    /// [`Error::DuplicateKey`] if any key occurs twice. The current tree is left as it was.
    pub fn submit_nodes(&mut self, nodes: Vec<N>) -> Result<()> {
        self.accept(Tree::Nodes(nodes))
    }

    fn accept(&mut self, tree: Tree<S, N>) -> Result<()> {
        if let Some(established) = self.mode() {
            if established != tree.mode() {
                return Err(Error::ModeMismatch {
                    established,
                    attempted: tree.mode(),
                });
            }
        }
        tree.validate()?;
        self.reorder.cancel();
        self.tree = Some(tree);
        self.refresh();
        debug!(len = self.projection.len(), "tree accepted");
        Ok(())
    }

    /// Re-flatten the tree and schedule a diff against what the view shows.
    fn refresh(&mut self) {
        if let Some(tree) = &self.tree {
            self.projection = flatten(tree);
            self.differ.submit(self.projection.entries().to_vec());
        }
    }

    // --- Edit script delivery ---

    /// Wait for the edit script of the newest submission, or `None` if nothing is pending.
    pub async fn next_edit_script(&mut self) -> Option<EditScript<Entry<S, N>>> {
        self.differ.next().await
    }

    /// The edit script of the newest submission, if it has been computed already.
    pub fn try_next_edit_script(&mut self) -> Option<EditScript<Entry<S, N>>> {
        self.differ.try_next()
    }

    /// Hand every ready script to `view`, returning how many were applied.
    pub fn dispatch<V: ViewLayer<Entry<S, N>>>(&mut self, view: &mut V) -> usize {
        let mut applied = 0;
        while let Some(script) = self.differ.try_next() {
            view.apply_edit_script(&script);
            applied += 1;
        }
        applied
    }

    #[must_use]
    /// Whether a submitted snapshot has not reached the view yet.
    pub fn is_pending(&self) -> bool {
        self.differ.is_pending()
    }

    #[must_use]
    /// The sequence last delivered to the view.
    pub fn rendered(&self) -> &[Entry<S, N>] {
        self.differ.delivered()
    }

    // --- Dataset ---

    #[must_use]
    /// Flattened projection of the current tree.
    pub fn entries(&self) -> &[Entry<S, N>] {
        self.projection.entries()
    }

    #[must_use]
    /// Entry at `position` in the current projection.
    pub fn entry(&self, position: usize) -> Option<&Entry<S, N>> {
        self.projection.get(position)
    }

    #[must_use]
    /// Number of flattened positions.
    pub fn len(&self) -> usize {
        self.projection.len()
    }

    #[must_use]
    /// True when nothing is displayed.
    pub fn is_empty(&self) -> bool {
        self.projection.is_empty()
    }

    #[must_use]
    /// Section or node, for choosing how to render `position`.
    pub fn item_kind(&self, position: usize) -> Option<ItemKind> {
        self.projection.get(position).map(Entry::kind)
    }

    #[must_use]
    /// Boundary of the region `position` belongs to.
    pub fn boundary(&self, position: usize) -> Boundary {
        self.projection.boundary(position)
    }

    #[must_use]
    /// Sections of the current tree, in section mode.
    pub fn sections(&self) -> Option<&[Section<S, N>]> {
        match &self.tree {
            Some(Tree::Sections(sections)) => Some(sections),
            _ => None,
        }
    }

    #[must_use]
    /// Nodes of the current tree, in node mode.
    pub fn nodes(&self) -> Option<&[N]> {
        match &self.tree {
            Some(Tree::Nodes(nodes)) => Some(nodes),
            _ => None,
        }
    }

    // --- Drag ---

    #[must_use]
    /// Whether the item at `position` may be dragged.
    pub fn can_be_moved(&self, position: usize) -> bool {
        reorder::can_be_moved(&self.projection, &self.config, position)
    }

    #[must_use]
    /// Whether a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        *self.reorder.state() != reorder::DragState::Idle
    }

    /// One drag step from `from` to `to`; returns whether it was accepted.
    ///
    /// Accepted steps mutate the tree straight away and schedule a diff.
    pub fn request_move(&mut self, from: usize, to: usize) -> bool {
        let Some(tree) = self.tree.as_mut() else {
            return false;
        };
        let accepted = self
            .reorder
            .request_move(tree, &self.projection, &self.config, from, to);
        if accepted {
            self.refresh();
        }
        accepted
    }

    /// End the current drag, reporting the move if the item did not return to its anchor.
    pub fn end_drag(&mut self) -> Option<MoveCompleted> {
        self.reorder.end_drag(&self.projection)
    }

    // --- Swipe ---

    #[must_use]
    /// Whether the item at `position` may be swiped.
    pub fn can_be_swiped(&self, position: usize) -> bool {
        swipe::can_be_swiped(&self.projection, &self.config, position)
    }

    #[must_use]
    /// Whether a completed swipe at `position` returns the item to its place.
    pub fn swipe_back(&self, _position: usize) -> bool {
        self.config.swipe_back
    }

    /// Classify a finished swipe at `position` that travelled from `start` to `end`.
    pub fn request_swipe(
        &mut self,
        position: usize,
        start: f32,
        end: f32,
        threshold: f32,
    ) -> SwipeOutcome {
        if !self.can_be_swiped(position) {
            debug!(position, "swipe rejected");
            return SwipeOutcome::NotAllowed;
        }
        self.swipe.classify(&self.config, start, end, threshold)
    }

    /// Direction the last swiped item should settle in, or `None` to bring it home.
    pub fn settle_direction(&mut self, raw_delta: f32) -> Option<SwipeDirection> {
        self.swipe.settle_direction(&self.config, raw_delta)
    }

    // --- Collapse ---

    /// Toggle the section with `key`; returns whether anything changed.
    ///
    /// A toggle that changes anything abandons a drag in progress.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSection`] if no section carries `key`.
    pub fn toggle_collapse(&mut self, key: &str) -> Result<bool> {
        let section = self.section_mut(key)?;
        if !collapse::toggle(section) {
            return Ok(false);
        }
        self.reorder.cancel();
        self.refresh();
        Ok(true)
    }

    /// Allow or forbid collapsing the section with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSection`] if no section carries `key`.
    pub fn set_collapsible(&mut self, key: &str, can_be_collapsed: bool) -> Result<()> {
        self.section_mut(key)?.can_be_collapsed = can_be_collapsed;
        Ok(())
    }

    fn section_mut(&mut self, key: &str) -> Result<&mut Section<S, N>> {
        let unknown = || Error::UnknownSection {
            key: key.to_owned(),
        };
        match self.tree.as_mut() {
            Some(Tree::Sections(sections)) => sections
                .iter_mut()
                .find(|section| section.key() == key)
                .ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

#[cfg(test)]
#[path = "tests/adapter.rs"]
mod tests;
