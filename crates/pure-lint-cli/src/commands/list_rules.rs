//! List rules command implementation.

use pure_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nConfigure rules under [rules.<name>] in pure-lint.toml, e.g.:");
    println!("  [rules.pure-module]");
    println!("  pure_functions = [\"Object.freeze\"]");
    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  pure-lint check --rules pure-module");
}
