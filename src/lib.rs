//! sectionlist: a sectioned list that stays in sync with its tree.
//!
//! A two-level tree of sections and their child nodes is flattened into the single list a view
//! renders. Every change to the tree, whether a fresh snapshot from the consumer or a drag, swipe
//! or collapse gesture, produces a minimal edit script the view can apply incrementally instead
//! of redrawing everything.
#![allow(clippy::multiple_crate_versions)]

pub mod adapter;
pub mod app_state;
pub mod collapse;
pub mod config;
pub mod diff;
pub mod differ;
pub mod error;
pub mod flatten;
pub mod formats;
pub mod input;
pub mod node;
pub mod reorder;
pub mod swipe;
pub mod ui;

pub use adapter::{SectionAdapter, ViewLayer};
pub use config::Config;
pub use diff::{compute_edit_script, EditOp, EditScript};
pub use error::{Error, Mode, Result};
pub use flatten::{flatten, Boundary, BoundaryRange, Projection, Tree};
pub use node::{same_content, same_identity, Entry, ItemKind, Node, Section};
pub use reorder::MoveCompleted;
pub use swipe::{SwipeDirection, SwipeOutcome};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod support;
