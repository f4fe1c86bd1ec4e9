//! Failures reported synchronously to the caller of the operation that triggered them.
//!
//! Gesture rejections are not errors (they come back as plain `false` or
//! [`SwipeOutcome::NotAllowed`](crate::swipe::SwipeOutcome::NotAllowed)) and superseded diffs are
//! dropped silently, so everything here is a configuration or input problem.

use std::fmt;

/// Which of the two submission modes an adapter instance is locked into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Sections owning child nodes.
    Sections,
    /// A flat list of bare nodes with no section semantics.
    Nodes,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Sections => f.write_str("sections"),
            Mode::Nodes => f.write_str("nodes"),
        }
    }
}

/// Everything that can go wrong in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Two items in one snapshot share a key.
    #[error("duplicate key `{key}` in submitted tree")]
    DuplicateKey {
        /// The colliding key.
        key: String,
    },

    /// A submission used the other mode from the one this adapter already serves.
    #[error("cannot submit {attempted} to an adapter already serving {established}")]
    ModeMismatch {
        /// Mode fixed by the first accepted submission.
        established: Mode,
        /// Mode of the rejected submission.
        attempted: Mode,
    },

    /// No section with this key exists in the current tree.
    #[error("no section with key `{key}`")]
    UnknownSection {
        /// The key that was looked up.
        key: String,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {message}")]
    Config {
        /// Parser diagnostic.
        message: String,
    },

    /// A document could not be turned into a tree.
    #[error("cannot read outline: {message}")]
    Input {
        /// What went wrong while parsing.
        message: String,
    },
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
