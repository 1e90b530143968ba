//! Comment adjacency index.
//!
//! Keeps every comment of a module in document order and maps the start
//! byte of every non-comment token to the comments that sit between it and
//! the previous token. Asking for the comments "before" a node is then a
//! lookup on the node's start byte, since a node always starts at its first
//! token.

use std::collections::HashMap;
use std::ops::Range;
use tree_sitter::{Node, Tree};

/// Node kinds the grammars emit for comments.
const COMMENT_KINDS: &[&str] = &["comment", "html_comment"];

/// A source comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    /// Full comment text, including the `//` or `/* */` delimiters.
    pub text: String,
    /// Byte range of the comment in the source.
    pub span: Range<usize>,
    /// Line the comment starts on (1-indexed).
    pub line: usize,
    /// Line the comment ends on (1-indexed).
    pub end_line: usize,
    /// Whether only whitespace precedes the comment on its first line.
    pub own_line: bool,
}

impl CommentRecord {
    fn from_node(node: Node<'_>, source: &[u8]) -> Self {
        let start = node.start_position();
        let line_start = node.start_byte() - start.column;
        Self {
            text: node.utf8_text(source).unwrap_or_default().to_owned(),
            span: node.byte_range(),
            line: start.row + 1,
            end_line: node.end_position().row + 1,
            own_line: source[line_start..node.start_byte()]
                .iter()
                .all(u8::is_ascii_whitespace),
        }
    }

    /// Whether this is a `#__PURE__` / `@__PURE__` annotation.
    #[must_use]
    pub fn is_pure_annotation(&self) -> bool {
        self.text.contains("#__PURE__") || self.text.contains("@__PURE__")
    }
}

/// All comments of a module, indexed by the token that follows them.
#[derive(Debug, Default)]
pub struct CommentIndex {
    comments: Vec<CommentRecord>,
    by_token_start: HashMap<usize, Range<usize>>,
}

impl CommentIndex {
    /// Builds the index with one pass over the leaves of `tree`.
    #[must_use]
    pub fn build(tree: &Tree, source: &[u8]) -> Self {
        let mut index = Self::default();
        // Comments since the last token, as a range into `comments`.
        let mut pending = 0..0;
        let mut cursor = tree.walk();

        'walk: loop {
            if cursor.goto_first_child() {
                continue;
            }
            index.record_leaf(cursor.node(), source, &mut pending);
            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        index
    }

    fn record_leaf(&mut self, leaf: Node<'_>, source: &[u8], pending: &mut Range<usize>) {
        if COMMENT_KINDS.contains(&leaf.kind()) {
            if pending.is_empty() {
                *pending = self.comments.len()..self.comments.len();
            }
            self.comments.push(CommentRecord::from_node(leaf, source));
            pending.end = self.comments.len();
            return;
        }
        // Zero-width leaves are recovery artifacts (missing tokens).
        if leaf.start_byte() == leaf.end_byte() || pending.is_empty() {
            return;
        }
        self.by_token_start
            .insert(leaf.start_byte(), std::mem::replace(pending, 0..0));
    }

    /// Comments immediately preceding the token starting at `start_byte`.
    #[must_use]
    pub fn before(&self, start_byte: usize) -> &[CommentRecord] {
        self.by_token_start
            .get(&start_byte)
            .map_or(&[], |range| &self.comments[range.clone()])
    }

    /// Every comment, in document order.
    #[must_use]
    pub fn all(&self) -> &[CommentRecord] {
        &self.comments
    }

    /// Total number of comments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Whether the module has no comments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
