//! Context types for rule execution.

use std::path::{Path, PathBuf};
use tree_sitter::Node;

use crate::types::Location;

/// Context provided to per-file rules.
///
/// Carries the file's identity and contents so rules can build
/// [`Location`]s and consult inline directives.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Location covering `node`, with 1-indexed line/column and byte span.
    #[must_use]
    pub fn location_of(&self, node: Node<'_>) -> Location {
        let start = node.start_position();
        Location::new(self.relative_path.clone(), start.row + 1, start.column + 1)
            .with_span(node.start_byte(), node.end_byte() - node.start_byte())
    }
}
