//! # pure-lint-core
//!
//! Core framework for linting JavaScript and TypeScript modules with
//! `tree-sitter`.
//!
//! This crate provides the foundational traits and types for building
//! module-level lints. It includes:
//!
//! - [`SourceModule`] for parsing a module and walking it with ancestors
//! - [`CommentIndex`] for finding the comments that precede a node
//! - [`Rule`] trait for per-file rules
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//! - [`fix`] for applying suggested replacements
//!
//! ## Example
//!
//! ```ignore
//! use pure_lint_core::{Analyzer, Severity};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for violation in &result.violations {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod allowance;
mod analyzer;
mod comments;
mod config;
mod context;
mod rule;
mod source;
mod types;

pub mod fix;

pub use allowance::{AllowCheck, AllowanceIndex};
pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use comments::{CommentIndex, CommentRecord};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use rule::{Rule, RuleBox};
pub use source::{AncestorChain, SourceError, SourceLanguage, SourceModule};
pub use types::{
    LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
