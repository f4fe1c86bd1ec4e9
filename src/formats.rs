//! Format trait and implementations for different outline sources.
//!
//! A format supplies the tree-sitter grammar and the query that picks out headings. Everything
//! after that (levels, titles, grouping into sections) is shared in [`crate::input`].

pub mod markdown;

/// Tree-sitter grammar plus the queries that locate headings in it.
pub trait Format {
    /// Grammar used to parse documents of this format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing each heading node.
    fn section_query(&self) -> &str;
    /// Heading depth for a heading node, from its marker.
    fn heading_level(&self, heading: tree_sitter::Node<'_>) -> Option<usize>;
}
