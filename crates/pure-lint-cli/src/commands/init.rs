//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "pure-lint.toml";

const DEFAULT_CONFIG: &str = r#"# pure-lint configuration

# Lowest severity that makes `pure-lint check` exit non-zero
fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
]

# Respect .gitignore files
respect_gitignore = true

[rules.pure-module]
enabled = true
# severity = "warning"  # Override default severity

# Call targets known to be pure ("*" matches any name)
pure_functions = []

# allow_call = false
# allow_tagged_template = false  # defaults to allow_call
# allow_new = true
# allow_assign = false
# allow_delete = false
# allow_throw = false
# allow_await = false
# allow_in_static_block = true
"#;

/// Runs the init command, writing the config into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: pure-lint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pure_lint_core::Config;
    use pure_lint_rules::PureModule;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_loadable() {
        let config = Config::parse(DEFAULT_CONFIG).expect("template parses");
        assert!(config.is_rule_enabled("pure-module"));
        assert_eq!(config.analyzer.exclude.len(), 3);
        let rule = PureModule::from_rule_config(config.rule("pure-module")).expect("options");
        assert!(rule.options().allow_new);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().expect("tempdir");
        run(dir.path(), false).expect("first init");
        assert!(run(dir.path(), false).is_err());

        std::fs::write(dir.path().join(CONFIG_FILE), "# edited").expect("edit");
        run(dir.path(), true).expect("forced init");
        let content = std::fs::read_to_string(dir.path().join(CONFIG_FILE)).expect("read");
        assert_eq!(content, DEFAULT_CONFIG);
    }
}
