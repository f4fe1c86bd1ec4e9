//! Swipe legality and classification of finished swipe gestures.
//!
//! A swipe is genuine only if the pointer ends further than the threshold from where it
//! started. Anything shorter, including a swipe that crossed the threshold and was dragged back
//! before release, is a cancelled gesture. Directions are logical (toward the start or end of a
//! line) so that right-to-left layouts behave the same as left-to-right ones.

use crate::config::Config;
use crate::flatten::Projection;
use crate::node::{Entry, Node};
use serde::Serialize;
use tracing::{debug, trace};

/// Logical direction of a swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SwipeDirection {
    /// Toward the start of the line: left in left-to-right layouts.
    TowardStart,
    /// Toward the end of the line: right in left-to-right layouts.
    TowardEnd,
}

/// How a finished swipe gesture was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// The item was swiped away.
    Dismiss {
        /// Logical direction of the swipe.
        direction: SwipeDirection,
        /// Whether the view should return the item to its place after reporting.
        swipe_back: bool,
    },
    /// The gesture did not travel far enough.
    Cancelled,
    /// The item at this position may not be swiped.
    NotAllowed,
}

/// Whether the item at `position` may be swiped.
#[must_use]
pub fn can_be_swiped<S: Node, N: Node>(
    projection: &Projection<S, N>,
    config: &Config,
    position: usize,
) -> bool {
    match projection.get(position) {
        Some(Entry::Section { .. }) => config.swipeable_sections,
        Some(Entry::Node { .. }) => config.swipeable_nodes,
        None => false,
    }
}

/// Classifies swipes and holds the one-shot suppression flag.
#[derive(Debug, Default)]
pub struct SwipeEngine {
    suppress_next: bool,
}

impl SwipeEngine {
    #[must_use]
    /// Engine with no pending suppression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a finished gesture that started at horizontal offset `start` and ended at `end`.
    ///
    /// A cancelled gesture arms the suppression flag, as does a reported swipe when
    /// `config.swipe_back` asks for the item to snap back. Every classification sets the flag
    /// afresh, so it never outlives the gesture that armed it.
    pub fn classify(&mut self, config: &Config, start: f32, end: f32, threshold: f32) -> SwipeOutcome {
        let delta = end - start;
        if delta.abs() <= threshold {
            trace!(delta, threshold, "swipe cancelled");
            self.suppress_next = true;
            return SwipeOutcome::Cancelled;
        }
        let direction = logical_direction(config, delta);
        self.suppress_next = config.swipe_back;
        debug!(?direction, delta, "swipe reported");
        SwipeOutcome::Dismiss {
            direction,
            swipe_back: config.swipe_back,
        }
    }

    /// Where the view should let the swiped item settle, given the raw horizontal travel.
    ///
    /// Returns `None` exactly once after the suppression flag was armed, telling the view to
    /// bring the item home; the flag is cleared by that call.
    pub fn settle_direction(&mut self, config: &Config, raw_delta: f32) -> Option<SwipeDirection> {
        if std::mem::take(&mut self.suppress_next) {
            trace!("settle suppressed");
            return None;
        }
        if raw_delta.abs() < f32::EPSILON {
            return None;
        }
        Some(logical_direction(config, raw_delta))
    }

    #[must_use]
    /// Whether the next settle query will be suppressed.
    pub fn is_suppressing(&self) -> bool {
        self.suppress_next
    }
}

fn logical_direction(config: &Config, delta: f32) -> SwipeDirection {
    let toward_right = delta > 0.0;
    if toward_right == config.right_to_left {
        SwipeDirection::TowardStart
    } else {
        SwipeDirection::TowardEnd
    }
}

#[cfg(test)]
#[path = "tests/swipe.rs"]
mod tests;
