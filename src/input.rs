//! Turning documents into trees the adapter can display.
//!
//! Headings are found with the format's tree-sitter query. Top-level headings become sections
//! and deeper headings become the nodes of the section above them, since the tree is exactly two
//! levels deep. In flat mode every heading is a bare node.

use crate::error::{Error, Result};
use crate::formats::Format;
use crate::node::{Node, Section};
use serde::Serialize;
use std::fs;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor};

/// A heading pulled from a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Stable identity: the title, prefixed by the owning section's title for nodes.
    pub key: String,
    /// Heading text without markup.
    pub title: String,
    /// Heading depth (1 for `#`).
    pub level: usize,
    /// Line the heading sits on (1-indexed).
    pub line: usize,
}

impl Node for Heading {
    fn key(&self) -> &str {
        &self.key
    }

    fn content_eq(&self, other: &Self) -> bool {
        self == other
    }
}

/// Read `path` and extract its headings in document order.
///
/// # Errors
///
/// Returns [`Error::Input`] if the file cannot be read or parsed.
pub fn extract_headings(path: &Path, format: &impl Format) -> Result<Vec<Heading>> {
    let source = fs::read_to_string(path).map_err(|e| Error::Input {
        message: format!("{}: {e}", path.display()),
    })?;
    headings_from_source(&source, format)
}

/// Extract headings from document text in document order.
///
/// # Errors
///
/// Returns [`Error::Input`] if the grammar or query cannot be loaded or parsing fails.
pub fn headings_from_source(source: &str, format: &impl Format) -> Result<Vec<Heading>> {
    let input_error = |message: String| Error::Input { message };
    let language = format.language();

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| input_error(e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| input_error("parser produced no tree".to_string()))?;
    let query =
        Query::new(&language, format.section_query()).map_err(|e| input_error(e.to_string()))?;

    let bytes = source.as_bytes();
    let mut headings = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), bytes);
    while let Some(found) = matches.next() {
        for capture in found.captures {
            let heading = capture.node;
            let Some(level) = format.heading_level(heading) else {
                continue;
            };
            let mut walker = heading.walk();
            let title = heading
                .children(&mut walker)
                .find(|child| child.kind() == "inline")
                .and_then(|inline| inline.utf8_text(bytes).ok())
                .map(str::trim)
                .unwrap_or_default()
                .to_string();
            headings.push(Heading {
                key: title.clone(),
                title,
                level,
                line: heading.start_position().row + 1,
            });
        }
    }
    Ok(headings)
}

/// Group headings into sections: level-1 headings own every deeper heading that follows.
///
/// # Errors
///
/// Returns [`Error::Input`] if a deeper heading comes before the first top-level one.
pub fn outline(headings: Vec<Heading>) -> Result<Vec<Section<Heading, Heading>>> {
    let mut sections: Vec<Section<Heading, Heading>> = Vec::new();
    for mut heading in headings {
        if heading.level == 1 {
            sections.push(Section::new(heading, Vec::new()).collapsible(true));
            continue;
        }
        let Some(section) = sections.last_mut() else {
            return Err(Error::Input {
                message: format!(
                    "heading `{}` on line {} has no top-level heading above it",
                    heading.title, heading.line
                ),
            });
        };
        heading.key = format!("{}/{}", section.header.title, heading.title);
        section.nodes.push(heading);
    }
    Ok(sections)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
