//! Rule to forbid side effects at the top level of a module.
//!
//! # Rationale
//!
//! Bundlers can only drop an unused import when evaluating the module has no
//! observable effect. Calls, assignments, `throw`, `await` and friends that
//! run on import defeat tree shaking. Where the effect is a call or a `new`,
//! a `/* #__PURE__ */` annotation tells the minifier it may drop the
//! expression when its result is unused.
//!
//! # Detected Patterns
//!
//! - Calls and tagged templates (`f()`, ``tag`x` ``)
//! - `new` expressions (only with `allow_new = false`)
//! - Assignments and `++`/`--`
//! - `delete`, `throw` and top-level `await`
//!
//! Nothing inside a function, method, instance field initializer or (by
//! default) class static block is reported.
//!
//! # Configuration
//!
//! - `pure_functions`: dotted patterns of call targets known to be pure
//! - `allow_call`, `allow_tagged_template`, `allow_new`, `allow_assign`,
//!   `allow_delete`, `allow_throw`, `allow_await`: exempt a whole kind
//! - `allow_in_static_block`: treat static blocks as a nested scope
//!
//! # Suppression
//!
//! - `/* #__PURE__ */` before a call, tagged template or `new`
//! - `// pure-lint: allow(pure-module) reason="..."` comment

mod options;
pub mod pattern;
pub mod purity;
pub mod scope;

pub use options::PureModuleOptions;

use pure_lint_core::{
    ConfigError, FileContext, Location, Replacement, Rule, RuleConfig, Severity, SourceModule,
    Suggestion, Violation,
};
use tracing::debug;

use purity::{Candidate, PurityClassifier};

/// Rule code for pure-module.
pub const CODE: &str = "PM001";

/// Rule name for pure-module.
pub const NAME: &str = "pure-module";

/// Text inserted by the suggested fix.
pub const PURE_ANNOTATION: &str = "/* #__PURE__ */ ";

const MESSAGE: &str = "Toplevel side effect.";
const SUGGESTION: &str = "Insert __PURE__ comment";

/// Forbids top-level side effects.
#[derive(Debug, Clone)]
pub struct PureModule {
    classifier: PurityClassifier,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for PureModule {
    fn default() -> Self {
        Self::new()
    }
}

impl PureModule {
    /// Creates a new rule with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(PureModuleOptions::default())
    }

    /// Creates a rule with the given options.
    #[must_use]
    pub fn with_options(options: PureModuleOptions) -> Self {
        Self {
            classifier: PurityClassifier::new(options),
            severity: Severity::Error,
        }
    }

    /// Creates a rule from its `[rules.pure-module]` section, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOptions`] if an option has the wrong type.
    pub fn from_rule_config(config: Option<&RuleConfig>) -> Result<Self, ConfigError> {
        let options = match config {
            Some(config) => config.options_as::<PureModuleOptions>(NAME)?,
            None => PureModuleOptions::default(),
        };
        Ok(Self::with_options(options))
    }

    /// Adds call target patterns known to be pure.
    #[must_use]
    pub fn pure_functions(self, patterns: &[&str]) -> Self {
        let mut options = self.classifier.options().clone();
        options
            .pure_functions
            .extend(patterns.iter().map(|s| (*s).to_string()));
        Self {
            classifier: PurityClassifier::new(options),
            ..self
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> &PureModuleOptions {
        self.classifier.options()
    }

    fn report(&self, candidate: &Candidate<'_>, location: Location) -> Violation {
        let violation = Violation::new(CODE, NAME, self.severity, location.clone(), MESSAGE);
        if candidate.kind.supports_pure_comment() {
            violation.with_suggestion(Suggestion::with_fix(
                SUGGESTION,
                Replacement::insert_before(&location, PURE_ANNOTATION),
            ))
        } else {
            violation
        }
    }
}

impl Rule for PureModule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Disallow side effects at the top level of the module"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, module: &SourceModule) -> Vec<Violation> {
        let mut violations = Vec::new();

        module.walk(|node, ancestors| {
            let Some(candidate) = Candidate::classify(node) else {
                return;
            };
            if self.classifier.is_exempt(&candidate, module) {
                return;
            }
            if scope::is_shielded(node, ancestors, self.options()) {
                return;
            }

            let location = ctx.location_of(node);

            let allow_check = module.allow_check(location.line, NAME);
            if allow_check.is_allowed() {
                if self.requires_allow_reason() && allow_check.reason().is_none() {
                    violations.push(
                        Violation::new(
                            CODE,
                            NAME,
                            Severity::Warning,
                            location,
                            format!("Allow directive for '{NAME}' is missing required reason"),
                        )
                        .with_suggestion(Suggestion::new(
                            "Add reason=\"...\" to explain why this side effect is necessary",
                        )),
                    );
                }
                return;
            }

            debug!(
                "{}:{}:{}: top-level {}",
                location.file.display(),
                location.line,
                location.column,
                node.kind()
            );
            violations.push(self.report(&candidate, location));
        });

        violations
    }
}
