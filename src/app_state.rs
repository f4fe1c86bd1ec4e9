//! The interactive state bridging the adapter and the terminal view.
//!
//! The TUI plays the part of a view layer: it never reads the adapter's projection to draw,
//! only the list it rebuilt itself from delivered edit scripts. Gestures go the other way, from
//! key presses to adapter calls, and the consumer side (removing dismissed items) is done by
//! resubmitting the whole tree, as any consumer would.

use crate::adapter::{SectionAdapter, ViewLayer};
use crate::diff::EditScript;
use crate::error::Result;
use crate::flatten::Boundary;
use crate::input::Heading;
use crate::node::{Entry, ItemKind, Node};
use crate::swipe::SwipeOutcome;
use tracing::info;

/// Flattened item type shown by the TUI.
pub type Item = Entry<Heading, Heading>;

#[derive(Clone, PartialEq, Debug)]
/// Tracks the lifecycle of a drag in the list.
///
/// ```text
/// None -> Selected -> Moved -> None (after drop)
///           |                   ^
///           |___________________|
///              (drop, nothing moved)
/// ```
///
/// - `None`: normal navigation, the cursor row is reversed.
/// - `Selected`: `Ctrl+↑/↓` picked the item up but no step has been accepted (orange).
/// - `Moved`: at least one step was accepted (red) and the drop will report a move.
pub enum MoveState {
    /// No drag in progress.
    None,
    /// An item is picked up but has not moved yet.
    Selected,
    /// The picked-up item has moved.
    Moved,
}

/// The view layer's own copy of the list, plus every script it received.
#[derive(Default)]
pub struct SessionView {
    /// Items as currently rendered.
    pub items: Vec<Item>,
    /// Scripts applied so far, oldest first.
    pub history: Vec<EditScript<Item>>,
}

impl ViewLayer<Item> for SessionView {
    fn apply_edit_script(&mut self, script: &EditScript<Item>) {
        script.apply(&mut self.items);
        self.history.push(script.clone());
    }
}

/// Session state: the adapter, the rendered view and the cursor.
pub struct AppState {
    /// Source of truth for the tree and its projection.
    pub adapter: SectionAdapter<Heading, Heading>,
    /// What the terminal currently shows.
    pub view: SessionView,
    /// Highlighted position.
    pub cursor: usize,
    /// Drag lifecycle for visual feedback.
    pub move_state: MoveState,
    /// Key of the item being dragged.
    pub moving_key: Option<String>,
    /// Distance a swipe must exceed to dismiss.
    pub swipe_threshold: f32,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
}

impl AppState {
    #[must_use]
    /// Session over an adapter that already holds its first submission.
    pub fn new(adapter: SectionAdapter<Heading, Heading>, swipe_threshold: f32) -> Self {
        Self {
            adapter,
            view: SessionView::default(),
            cursor: 0,
            move_state: MoveState::None,
            moving_key: None,
            swipe_threshold,
            message: None,
        }
    }

    /// Pull every ready edit script into the view and keep the cursor in range.
    pub fn sync(&mut self) {
        self.adapter.dispatch(&mut self.view);
        let len = self.adapter.len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Move the cursor up one row.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down one row.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.adapter.len() {
            self.cursor += 1;
        }
    }

    #[must_use]
    /// Key of the item under the cursor.
    pub fn current_key(&self) -> Option<String> {
        self.adapter
            .entry(self.cursor)
            .map(|entry| entry.key().to_owned())
    }

    // --- Drag ---

    /// Drag the item under the cursor one row up.
    pub fn drag_up(&mut self) -> bool {
        match self.cursor.checked_sub(1) {
            Some(target) => self.drag_to(target),
            None => false,
        }
    }

    /// Drag the item under the cursor one row down.
    ///
    /// A section header skips over its own body and lands on the next section's header.
    pub fn drag_down(&mut self) -> bool {
        let kind = self.adapter.item_kind(self.cursor);
        let target = match (kind, self.adapter.boundary(self.cursor)) {
            (Some(ItemKind::Section), Boundary::Bounded(range)) => range.end + 1,
            _ => self.cursor + 1,
        };
        self.drag_to(target)
    }

    fn drag_to(&mut self, target: usize) -> bool {
        if self.move_state == MoveState::None {
            if !self.adapter.can_be_moved(self.cursor) {
                self.message = Some("This item cannot be moved".to_string());
                return false;
            }
            self.moving_key = self.current_key();
            self.move_state = MoveState::Selected;
        }
        if !self.adapter.request_move(self.cursor, target) {
            return false;
        }
        self.move_state = MoveState::Moved;
        if let Some(position) = self
            .moving_key
            .as_deref()
            .and_then(|key| self.adapter.entries().iter().position(|e| e.key() == key))
        {
            self.cursor = position;
        }
        true
    }

    /// Drop the dragged item, reporting the move if it ended somewhere new.
    pub fn drop_move(&mut self) {
        if let Some(moved) = self.adapter.end_drag() {
            info!(from = moved.from, to = moved.to, "drag finished");
            self.message = Some(format!("Moved {} → {}", moved.from, moved.to));
        }
        self.move_state = MoveState::None;
        self.moving_key = None;
    }

    // --- Collapse ---

    /// Toggle the section under the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor is on a section the adapter no longer knows.
    pub fn toggle_current(&mut self) -> Result<()> {
        let Some(Entry::Section { header, .. }) = self.adapter.entry(self.cursor) else {
            return Ok(());
        };
        let key = header.key.clone();
        if !self.adapter.toggle_collapse(&key)? {
            self.message = Some(format!("`{key}` cannot be collapsed"));
        }
        Ok(())
    }

    // --- Swipe ---

    /// Swipe the item under the cursor by `distance` (negative toward the left).
    ///
    /// # Errors
    ///
    /// Returns an error if resubmitting the tree without a dismissed item fails.
    pub fn swipe(&mut self, distance: f32) -> Result<()> {
        let position = self.cursor;
        let outcome = self
            .adapter
            .request_swipe(position, 0.0, distance, self.swipe_threshold);
        let settle = self.adapter.settle_direction(distance);
        match outcome {
            SwipeOutcome::NotAllowed => {
                self.message = Some("This item cannot be swiped".to_string());
            }
            SwipeOutcome::Cancelled => {
                self.message = Some("Swipe cancelled".to_string());
            }
            SwipeOutcome::Dismiss { direction, .. } => {
                info!(position, ?direction, "item swiped");
                if settle.is_some() {
                    self.dismiss(position)?;
                    self.message = Some(format!("Dismissed {position} ({direction:?})"));
                } else {
                    self.message = Some(format!("Swiped {position} ({direction:?}) and back"));
                }
            }
        }
        Ok(())
    }

    /// Resubmit the tree without the item at `position`.
    fn dismiss(&mut self, position: usize) -> Result<()> {
        let Some(key) = self.adapter.entry(position).map(|e| e.key().to_owned()) else {
            return Ok(());
        };
        if let Some(sections) = self.adapter.sections() {
            let mut sections = sections.to_vec();
            sections.retain(|section| section.key() != key);
            for section in &mut sections {
                section.nodes.retain(|node| node.key != key);
            }
            self.adapter.submit_sections(sections)
        } else if let Some(nodes) = self.adapter.nodes() {
            let nodes = nodes.iter().filter(|n| n.key != key).cloned().collect();
            self.adapter.submit_nodes(nodes)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
