//! Options for the `pure-module` rule.

use serde::{Deserialize, Serialize};

/// Options for [`PureModule`](super::PureModule).
///
/// Keys are accepted in snake_case (TOML) and camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PureModuleOptions {
    /// Call targets known to be pure, as dotted patterns (`"Object.freeze"`, `"*.create"`).
    #[serde(alias = "pureFunctions")]
    pub pure_functions: Vec<String>,
    /// Treat every call as pure.
    #[serde(alias = "allowCall")]
    pub allow_call: bool,
    /// Treat every tagged template as pure; falls back to `allow_call`.
    #[serde(alias = "allowTaggedTemplate")]
    pub allow_tagged_template: Option<bool>,
    /// Treat `new` expressions as pure.
    #[serde(alias = "allowNew")]
    pub allow_new: bool,
    /// Allow assignments and `++`/`--`.
    #[serde(alias = "allowAssign")]
    pub allow_assign: bool,
    /// Allow `delete`.
    #[serde(alias = "allowDelete")]
    pub allow_delete: bool,
    /// Allow `throw`.
    #[serde(alias = "allowThrow")]
    pub allow_throw: bool,
    /// Allow top-level `await`.
    #[serde(alias = "allowAwait")]
    pub allow_await: bool,
    /// Treat class static blocks as a non-top-level scope.
    #[serde(alias = "allowInStaticBlock")]
    pub allow_in_static_block: bool,
}

impl Default for PureModuleOptions {
    fn default() -> Self {
        Self {
            pure_functions: Vec::new(),
            allow_call: false,
            allow_tagged_template: None,
            allow_new: true,
            allow_assign: false,
            allow_delete: false,
            allow_throw: false,
            allow_await: false,
            allow_in_static_block: true,
        }
    }
}

impl PureModuleOptions {
    /// Effective tagged template flag.
    #[must_use]
    pub fn tagged_template_allowed(&self) -> bool {
        self.allow_tagged_template.unwrap_or(self.allow_call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = PureModuleOptions::default();
        assert!(options.allow_new);
        assert!(options.allow_in_static_block);
        assert!(!options.allow_call);
        assert!(!options.tagged_template_allowed());
        assert!(options.pure_functions.is_empty());
    }

    #[test]
    fn tagged_template_follows_allow_call_unless_set() {
        let mut options = PureModuleOptions {
            allow_call: true,
            ..PureModuleOptions::default()
        };
        assert!(options.tagged_template_allowed());

        options.allow_tagged_template = Some(false);
        assert!(!options.tagged_template_allowed());
    }

    #[test]
    fn camel_case_json_overlays_defaults() {
        let options: PureModuleOptions = serde_json::from_str(
            r#"{ "pureFunctions": ["x.*"], "allowNew": false, "allowAwait": true }"#,
        )
        .expect("valid options");

        assert_eq!(options.pure_functions, vec!["x.*".to_string()]);
        assert!(!options.allow_new);
        assert!(options.allow_await);
        assert!(options.allow_in_static_block);
    }

    #[test]
    fn snake_case_toml() {
        let options: PureModuleOptions =
            toml::from_str("allow_in_static_block = false\nallow_tagged_template = true\n")
                .expect("valid options");

        assert!(!options.allow_in_static_block);
        assert_eq!(options.allow_tagged_template, Some(true));
        assert!(options.allow_new);
    }
}
