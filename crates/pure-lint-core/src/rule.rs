//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::source::SourceModule;
use crate::types::{Severity, Violation};

/// A per-file lint rule over a parsed JavaScript/TypeScript module.
///
/// Rules receive the parsed [`SourceModule`] and typically drive
/// [`SourceModule::walk`] to inspect nodes together with their ancestors.
///
/// # Example
///
/// ```ignore
/// use pure_lint_core::{FileContext, Rule, SourceModule, Violation};
///
/// pub struct NoDebugger;
///
/// impl Rule for NoDebugger {
///     fn name(&self) -> &'static str { "no-debugger" }
///     fn code(&self) -> &'static str { "PM100" }
///
///     fn check(&self, ctx: &FileContext, module: &SourceModule) -> Vec<Violation> {
///         let mut violations = Vec::new();
///         module.walk(|node, _| {
///             if node.kind() == "debugger_statement" {
///                 violations.push(Violation::new(
///                     self.code(),
///                     self.name(),
///                     self.default_severity(),
///                     ctx.location_of(node),
///                     "debugger statement",
///                 ));
///             }
///         });
///         violations
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "pure-module").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "PM001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single module and returns any violations found.
    fn check(&self, ctx: &FileContext, module: &SourceModule) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
