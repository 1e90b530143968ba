//! Parsed source modules.
//!
//! [`SourceModule`] owns the source text, its tree-sitter tree, the
//! comment index and the allow directives built from it, and provides the depth-first walk that hands every node
//! to a visitor together with its [`AncestorChain`].

use std::path::Path;
use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

use crate::allowance::{AllowCheck, AllowanceIndex};
use crate::comments::{CommentIndex, CommentRecord};

/// Errors produced while parsing a source module.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language whose grammar failed to load.
        language: SourceLanguage,
        /// Loader error detail.
        message: String,
    },

    /// The parser returned no tree.
    #[error("parser produced no tree")]
    NoTree,

    /// The tree contains syntax errors.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (1-indexed).
        column: usize,
    },
}

/// Source language of a module, selecting the tree-sitter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    /// JavaScript, including JSX.
    JavaScript,
    /// TypeScript.
    TypeScript,
    /// TypeScript with JSX.
    Tsx,
}

impl SourceLanguage {
    /// Every file extension handled, with its leading dot.
    pub const EXTENSIONS: &'static [&'static str] = &[
        ".js", ".mjs", ".cjs", ".jsx", ".ts", ".mts", ".cts", ".tsx",
    ];

    /// Picks the language from a file extension, e.g. `"mjs"` or `".tsx"`.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.') {
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Picks the language from a file path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    fn grammar(self) -> Language {
        match self {
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::JavaScript => write!(f, "javascript"),
            Self::TypeScript => write!(f, "typescript"),
            Self::Tsx => write!(f, "tsx"),
        }
    }
}

/// Nodes from the module root down to, but excluding, the visited node.
#[derive(Debug, Clone, Copy)]
pub struct AncestorChain<'a, 'tree> {
    nodes: &'a [Node<'tree>],
}

impl<'a, 'tree> AncestorChain<'a, 'tree> {
    /// Wraps a root-first slice of ancestors.
    #[must_use]
    pub fn new(nodes: &'a [Node<'tree>]) -> Self {
        Self { nodes }
    }

    /// Iterates from the module root towards the visited node.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a Node<'tree>> {
        let nodes = self.nodes;
        nodes.iter()
    }

    /// The direct parent of the visited node.
    #[must_use]
    pub fn parent(&self) -> Option<Node<'tree>> {
        self.nodes.last().copied()
    }

    /// Number of ancestors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True only for the root node itself.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A parsed JavaScript/TypeScript module.
pub struct SourceModule {
    source: String,
    language: SourceLanguage,
    tree: Tree,
    comments: CommentIndex,
    allowances: AllowanceIndex,
}

impl std::fmt::Debug for SourceModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceModule")
            .field("language", &self.language)
            .field("len", &self.source.len())
            .finish_non_exhaustive()
    }
}

impl SourceModule {
    /// Parses `source`, rejecting trees that contain syntax errors.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Syntax`] with the position of the first error
    /// node, or a grammar/parser failure.
    pub fn parse(source: impl Into<String>, language: SourceLanguage) -> Result<Self, SourceError> {
        let module = Self::parse_lenient(source, language)?;
        if let Some(error) = module.first_error() {
            let pos = error.start_position();
            return Err(SourceError::Syntax {
                line: pos.row + 1,
                column: pos.column + 1,
            });
        }
        Ok(module)
    }

    /// Parses `source` keeping whatever tree error recovery produced.
    ///
    /// # Errors
    ///
    /// Returns an error only if the grammar cannot be loaded or the parser
    /// yields no tree at all.
    pub fn parse_lenient(
        source: impl Into<String>,
        language: SourceLanguage,
    ) -> Result<Self, SourceError> {
        let source = source.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language.grammar())
            .map_err(|e| SourceError::Language {
                language,
                message: e.to_string(),
            })?;
        let tree = parser.parse(&source, None).ok_or(SourceError::NoTree)?;
        let comments = CommentIndex::build(&tree, source.as_bytes());
        let allowances = AllowanceIndex::build(comments.all());
        Ok(Self {
            source,
            language,
            tree,
            comments,
            allowances,
        })
    }

    /// The module's source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The language the module was parsed as.
    #[must_use]
    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// The root `program` node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The comment adjacency index.
    #[must_use]
    pub fn comment_index(&self) -> &CommentIndex {
        &self.comments
    }

    /// The module's allow directives.
    #[must_use]
    pub fn allowances(&self) -> &AllowanceIndex {
        &self.allowances
    }

    /// Whether an allow directive covers `rule_name` on `line` (1-indexed).
    #[must_use]
    pub fn allow_check(&self, line: usize, rule_name: &str) -> AllowCheck {
        self.allowances.check(line, rule_name)
    }

    /// Comments immediately preceding `node` (after the previous token).
    #[must_use]
    pub fn comments_before(&self, node: Node<'_>) -> &[CommentRecord] {
        self.comments.before(node.start_byte())
    }

    /// Source text covered by `node`.
    #[must_use]
    pub fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    /// Visits every node in pre-order with its ancestor chain.
    pub fn walk<'m, F>(&'m self, mut visit: F)
    where
        F: FnMut(Node<'m>, AncestorChain<'_, 'm>),
    {
        let mut cursor = self.tree.walk();
        let mut ancestors: Vec<Node<'m>> = Vec::new();

        loop {
            let node = cursor.node();
            visit(node, AncestorChain::new(&ancestors));

            if cursor.goto_first_child() {
                ancestors.push(node);
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
                ancestors.pop();
            }
        }
    }

    /// Root-first ancestors of `node`, recomputed through parent links.
    #[must_use]
    pub fn ancestors_of<'m>(&'m self, node: Node<'m>) -> Vec<Node<'m>> {
        let mut chain = Vec::new();
        let mut current = node.parent();
        while let Some(parent) = current {
            chain.push(parent);
            current = parent.parent();
        }
        chain.reverse();
        chain
    }

    fn first_error(&self) -> Option<Node<'_>> {
        let root = self.root();
        if !root.has_error() {
            return None;
        }
        let mut found = None;
        self.walk(|node, _| {
            if found.is_none() && (node.is_error() || node.is_missing()) {
                found = Some(node);
            }
        });
        found.or(Some(root))
    }
}
