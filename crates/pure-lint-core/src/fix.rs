//! Applying suggested replacements to source text.

use crate::types::{Replacement, Violation};

/// Applies the automatic replacement of every suggestion in `violations`.
///
/// Identical edits are applied once. When two edits overlap, the one with
/// the lower offset wins and the other is skipped.
#[must_use]
pub fn apply_suggestions(source: &str, violations: &[Violation]) -> String {
    let replacements: Vec<&Replacement> =
        violations.iter().filter_map(Violation::replacement).collect();
    apply_replacements(source, &replacements)
}

/// Applies `replacements` to `source`.
#[must_use]
pub fn apply_replacements(source: &str, replacements: &[&Replacement]) -> String {
    let mut edits: Vec<&Replacement> = replacements
        .iter()
        .copied()
        .filter(|r| r.location.offset + r.location.length <= source.len())
        .collect();
    edits.sort_by_key(|r| (r.location.offset, r.location.length));
    edits.dedup();

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in edits {
        let start = edit.location.offset;
        let end = start + edit.location.length;
        if start < cursor || !source.is_char_boundary(start) || !source.is_char_boundary(end) {
            tracing::debug!("Skipping overlapping edit at byte {start}");
            continue;
        }
        output.push_str(&source[cursor..start]);
        output.push_str(&edit.new_text);
        cursor = end;
    }
    output.push_str(&source[cursor..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity, Suggestion};
    use std::path::PathBuf;

    fn insertion(offset: usize, text: &str) -> Replacement {
        Replacement::new(Location::new(PathBuf::from("a.js"), 1, offset + 1).with_span(offset, 0), text)
    }

    fn violation_with(replacement: Replacement) -> Violation {
        Violation::new(
            "PM001",
            "pure-module",
            Severity::Error,
            replacement.location.clone(),
            "Toplevel side effect.",
        )
        .with_suggestion(Suggestion::with_fix("Insert __PURE__ comment", replacement))
    }

    #[test]
    fn inserts_at_offsets_in_order() {
        let src = "f();\ng();\n";
        let out = apply_suggestions(
            src,
            &[
                violation_with(insertion(5, "/* b */ ")),
                violation_with(insertion(0, "/* a */ ")),
            ],
        );
        assert_eq!(out, "/* a */ f();\n/* b */ g();\n");
    }

    #[test]
    fn identical_edits_apply_once() {
        let src = "f()();";
        let out = apply_suggestions(
            src,
            &[
                violation_with(insertion(0, "/* #__PURE__ */ ")),
                violation_with(insertion(0, "/* #__PURE__ */ ")),
            ],
        );
        assert_eq!(out, "/* #__PURE__ */ f()();");
    }

    #[test]
    fn overlapping_replacement_is_skipped() {
        let src = "abcdef";
        let first = Replacement::new(
            Location::new(PathBuf::from("a.js"), 1, 1).with_span(0, 4),
            "X",
        );
        let second = Replacement::new(
            Location::new(PathBuf::from("a.js"), 1, 3).with_span(2, 2),
            "Y",
        );
        assert_eq!(apply_replacements(src, &[&second, &first]), "Xef");
    }

    #[test]
    fn violations_without_fix_leave_source_untouched() {
        let src = "i++;";
        let plain = Violation::new(
            "PM001",
            "pure-module",
            Severity::Error,
            Location::new(PathBuf::from("a.js"), 1, 1).with_span(0, 3),
            "Toplevel side effect.",
        );
        assert_eq!(apply_suggestions(src, &[plain]), src);
    }
}
