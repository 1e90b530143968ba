//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! // pure-lint: allow(pure-module) reason="polyfill must run on import"
//! /* pure-lint: allow(all) */
//! ```

use std::collections::{HashMap, HashSet};

use crate::comments::CommentRecord;

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
struct AllowDirective {
    rules: HashSet<String>,
    reason: Option<String>,
}

impl AllowDirective {
    fn allows(&self, rule_name: &str) -> bool {
        self.rules.contains(rule_name) || self.rules.contains("all")
    }
}

/// Allow directives of one module, keyed by the line they cover.
///
/// A directive covers the line it starts on. An own-line directive also
/// covers the line right after it ends, so it can sit above the code.
#[derive(Debug, Default)]
pub struct AllowanceIndex {
    by_line: HashMap<usize, Vec<AllowDirective>>,
}

impl AllowanceIndex {
    /// Collects the directives among `comments`.
    #[must_use]
    pub fn build(comments: &[CommentRecord]) -> Self {
        let mut index = Self::default();
        for comment in comments {
            let Some(directive) = parse_allow_directive(&comment.text) else {
                continue;
            };
            if comment.own_line {
                index
                    .by_line
                    .entry(comment.end_line + 1)
                    .or_default()
                    .push(directive.clone());
            }
            index.by_line.entry(comment.line).or_default().push(directive);
        }
        index
    }

    /// Checks whether `rule_name` is allowed on `line` (1-indexed).
    ///
    /// A directive naming `rule_name` or `all` allows it.
    #[must_use]
    pub fn check(&self, line: usize, rule_name: &str) -> AllowCheck {
        self.by_line
            .get(&line)
            .and_then(|directives| directives.iter().find(|d| d.allows(rule_name)))
            .map_or(AllowCheck::Denied, |directive| AllowCheck::Allowed {
                reason: directive.reason.clone(),
            })
    }

    /// Number of parsed directives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_line.values().map(Vec::len).sum()
    }

    /// Whether the module has no directives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }
}

/// Parses an allowance directive from a comment's full text.
fn parse_allow_directive(comment: &str) -> Option<AllowDirective> {
    let comment_content = if let Some(line) = comment.strip_prefix("//") {
        line
    } else {
        let block = comment.strip_prefix("/*")?;
        block.strip_suffix("*/").unwrap_or(block)
    };

    let directive = comment_content.trim().strip_prefix("pure-lint:")?.trim();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest.strip_prefix("reason=").and_then(|reason_part| {
        let quoted = reason_part.trim().strip_prefix('"')?;
        let end = quoted.find('"')?;
        Some(quoted[..end].to_string())
    });

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SourceLanguage, SourceModule};

    fn index(src: &str) -> AllowanceIndex {
        let module = SourceModule::parse(src, SourceLanguage::JavaScript).expect("fixture should parse");
        AllowanceIndex::build(module.comment_index().all())
    }

    #[test]
    fn test_parse_allow_directive() {
        let directive = parse_allow_directive("// pure-lint: allow(pure-module)").unwrap();
        assert!(directive.rules.contains("pure-module"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_block_comment_directive_with_reason() {
        let directive =
            parse_allow_directive("/* pure-lint: allow(pure-module) reason=\"registers globals\" */")
                .unwrap();
        assert!(directive.rules.contains("pure-module"));
        assert_eq!(directive.reason.as_deref(), Some("registers globals"));
    }

    #[test]
    fn test_parse_multiple_rules() {
        let directive = parse_allow_directive("// pure-lint: allow(rule1, rule2)").unwrap();
        assert!(directive.rules.contains("rule1"));
        assert!(directive.rules.contains("rule2"));
    }

    #[test]
    fn test_non_directive_comments_are_ignored() {
        assert!(parse_allow_directive("// just a note").is_none());
        assert!(parse_allow_directive("// pure-lint: allow()").is_none());
        assert!(parse_allow_directive("/* see pure-lint: allow(all) */").is_none());
    }

    #[test]
    fn test_check_allow_on_previous_line() {
        let allowances = index("// pure-lint: allow(pure-module) reason=\"polyfill\"\nsetup();\n");
        let result = allowances.check(2, "pure-module");
        assert!(result.is_allowed());
        assert_eq!(result.reason(), Some("polyfill"));
        assert!(!allowances.check(2, "other-rule").is_allowed());
    }

    #[test]
    fn test_check_allow_all_on_same_line() {
        let result = index("setup(); // pure-lint: allow(all)\n").check(1, "pure-module");
        assert!(result.is_allowed());
        assert_eq!(result.reason(), None);
    }

    #[test]
    fn test_check_allow_denied() {
        let allowances = index("setup();\nother();\n");
        assert!(allowances.is_empty());
        assert_eq!(allowances.check(2, "pure-module"), AllowCheck::Denied);
    }

    #[test]
    fn test_comment_marker_inside_string_is_not_a_comment() {
        let allowances =
            index("fetch(\"http://x\"); // pure-lint: allow(pure-module) reason=\"ok\"\n");
        assert_eq!(allowances.len(), 1);
        assert_eq!(allowances.check(1, "pure-module").reason(), Some("ok"));
    }

    #[test]
    fn test_directive_in_string_is_ignored() {
        let allowances = index("log(\"// pure-lint: allow(all)\");\nnext();\n");
        assert!(allowances.is_empty());
    }

    #[test]
    fn test_trailing_directive_does_not_cover_next_line() {
        let allowances = index("a(); // pure-lint: allow(pure-module) reason=\"only a\"\nb();\n");
        assert!(allowances.check(1, "pure-module").is_allowed());
        assert!(!allowances.check(2, "pure-module").is_allowed());
    }

    #[test]
    fn test_multiline_block_directive_covers_line_after_it_ends() {
        let allowances = index("/*\n pure-lint: allow(pure-module)\n*/\nsetup();\n");
        assert!(!allowances.check(2, "pure-module").is_allowed());
        assert!(allowances.check(4, "pure-module").is_allowed());
    }
}
