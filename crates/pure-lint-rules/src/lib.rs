//! # pure-lint-rules
//!
//! Built-in lint rules for pure-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | PM001 | `pure-module` | Forbids side effects at the top level of a module |
//!
//! ## Usage
//!
//! ```ignore
//! use pure_lint_core::Analyzer;
//! use pure_lint_rules::PureModule;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(PureModule::new().pure_functions(&["Object.freeze"]))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod pure_module;
mod registry;

pub use pure_module::{PureModule, PureModuleOptions};
pub use registry::{all_rules, configured_rules, rule_by_name};

/// Re-export core types for convenience.
pub use pure_lint_core::{Rule, Severity, Violation};
