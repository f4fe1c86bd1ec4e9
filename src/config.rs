//! Gesture policy, loaded from a developer's preferences or falling back to defaults.
//!
//! Specifically, we try to find a sectionlist.toml, and if present we load settings from there.
//! Every switch defaults to off, so a fresh adapter allows no drag or swipe at all.

use crate::error::{Error, Result};
use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory by [`Config::load`].
pub const CONFIG_FILE: &str = "sectionlist.toml";

#[derive(Facet, Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
/// Adapter-wide switches for drag, swipe and layout direction.
pub struct Config {
    #[facet(default = false)]
    /// Plain nodes may be dragged.
    pub movable_nodes: bool,
    #[facet(default = false)]
    /// Section headers may be dragged, carrying their children along.
    pub movable_sections: bool,
    #[facet(default = false)]
    /// Dragged nodes may leave the section they started in.
    pub nodes_cross_sections: bool,
    #[facet(default = false)]
    /// Plain nodes may be swiped.
    pub swipeable_nodes: bool,
    #[facet(default = false)]
    /// Section headers may be swiped.
    pub swipeable_sections: bool,
    #[facet(default = false)]
    /// A completed swipe snaps the item back instead of leaving it dismissed on screen.
    pub swipe_back: bool,
    #[facet(default = false)]
    /// Logical start is on the right.
    pub right_to_left: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            movable_nodes: false,
            movable_sections: false,
            nodes_cross_sections: false,
            swipeable_nodes: false,
            swipeable_sections: false,
            swipe_back: false,
            right_to_left: false,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from sectionlist.toml if present and valid.
    pub fn load() -> Self {
        Self::from_path(Path::new(CONFIG_FILE)).unwrap_or_default()
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid for this schema.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
