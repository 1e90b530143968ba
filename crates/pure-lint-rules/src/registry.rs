//! Rule lookup and construction from configuration.

use crate::PureModule;
use pure_lint_core::{Config, ConfigError, RuleBox};

/// Returns every available rule with default options.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![Box::new(PureModule::new())]
}

/// Returns every available rule built from its `[rules.<name>]` section.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOptions`] if a rule's options are malformed.
pub fn configured_rules(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    Ok(vec![Box::new(PureModule::from_rule_config(
        config.rule(crate::pure_module::NAME),
    )?)])
}

/// Looks a rule up by name (`pure-module`) or code (`PM001`).
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOptions`] if the rule's options are malformed.
pub fn rule_by_name(name: &str, config: &Config) -> Result<Option<RuleBox>, ConfigError> {
    let rule: Option<RuleBox> = match name {
        crate::pure_module::NAME | crate::pure_module::CODE => Some(Box::new(
            PureModule::from_rule_config(config.rule(crate::pure_module::NAME))?,
        )),
        _ => None,
    };
    Ok(rule)
}
