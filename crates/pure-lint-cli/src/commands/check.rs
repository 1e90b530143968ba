//! Check command implementation.

use anyhow::{Context, Result};
use pure_lint_core::fix::apply_suggestions;
use pure_lint_core::{Analyzer, AnalyzerError, Config, LintResult, RuleBox, Violation};
use pure_lint_rules::{configured_rules, rule_by_name};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Flags of the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run instead of all rules.
    pub rules: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Rewrite files with the suggested annotations before reporting.
    pub apply_suggestions: bool,
    /// Treat files with syntax errors as a failure instead of skipping them.
    pub fail_on_parse_error: bool,
}

/// Runs the check command.
///
/// Returns `true` when a reported violation reaches the `fail_on` threshold.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let config = source.load()?;
    let fail_on = config.fail_threshold();
    let rules = select_rules(options.rules.as_deref(), &config)?;

    let root = if path.is_file() {
        path.parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    } else {
        path
    };

    let mut builder = Analyzer::builder()
        .root(root)
        .config(config)
        .excludes(options.exclude.iter().cloned())
        .fail_on_parse_error(options.fail_on_parse_error);
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let strict = options.fail_on_parse_error;
    let mut result = lint(&analyzer, path, strict)?;

    if options.apply_suggestions {
        let fixed = write_fixes(analyzer.root(), &result.violations)?;
        if fixed > 0 {
            tracing::info!("Applied suggestions to {fixed} file(s)");
            result = lint(&analyzer, path, strict)?;
        }
    }

    super::output::print(&result, options.format, analyzer.root())?;

    Ok(result.has_violations_at(fail_on))
}

fn select_rules(filter: Option<&str>, config: &Config) -> Result<Vec<RuleBox>> {
    let Some(filter) = filter else {
        return configured_rules(config).context("Invalid rule options");
    };

    let mut rules = Vec::new();
    for name in filter.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match rule_by_name(name, config).context("Invalid rule options")? {
            Some(rule) => rules.push(rule),
            None => tracing::warn!("Unknown rule: {}", name),
        }
    }
    Ok(rules)
}

/// Lints a directory tree, or a single file when `path` is one.
///
/// An unparsable single file is skipped like in a tree walk unless `strict`.
fn lint(analyzer: &Analyzer, path: &Path, strict: bool) -> Result<LintResult> {
    if !path.is_file() {
        return analyzer.analyze().context("Analysis failed");
    }

    let file = match path.file_name() {
        Some(name) => analyzer.root().join(name),
        None => path.to_path_buf(),
    };
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let mut result = LintResult::new();
    match analyzer.analyze_source(&file, &content) {
        Ok(violations) => {
            result.violations = violations;
            result.files_checked = 1;
        }
        Err(AnalyzerError::Parse { path, source }) if !strict => {
            tracing::warn!("Failed to parse {}: {}", path.display(), source);
        }
        Err(e) => return Err(e).context("Analysis failed"),
    }
    result.sort();
    Ok(result)
}

/// Applies suggestions file by file, returning how many files changed.
fn write_fixes(root: &Path, violations: &[Violation]) -> Result<usize> {
    let mut by_file: BTreeMap<PathBuf, Vec<Violation>> = BTreeMap::new();
    for violation in violations.iter().filter(|v| v.replacement().is_some()) {
        by_file
            .entry(root.join(&violation.location.file))
            .or_default()
            .push(violation.clone());
    }

    let mut changed = 0;
    for (file, file_violations) in by_file {
        let content = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let fixed = apply_suggestions(&content, &file_violations);
        if fixed != content {
            std::fs::write(&file, fixed)
                .with_context(|| format!("Failed to write {}", file.display()))?;
            tracing::debug!("Fixed {} site(s) in {}", file_violations.len(), file.display());
            changed += 1;
        }
    }
    Ok(changed)
}
