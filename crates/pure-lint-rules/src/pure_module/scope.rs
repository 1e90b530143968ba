//! Whether a node runs when the module is evaluated.

use pure_lint_core::AncestorChain;
use tree_sitter::Node;

use super::options::PureModuleOptions;

/// Node kinds whose bodies only run when invoked.
const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "function_expression",
    "arrow_function",
    "generator_function_declaration",
    "generator_function",
    "method_definition",
];

/// Class field kinds (JavaScript, TypeScript).
const FIELD_KINDS: &[&str] = &["field_definition", "public_field_definition"];

/// Whether an ancestor keeps `node` from running at module top level.
///
/// Functions and methods always shield. Instance field initializers shield,
/// static ones never do. Static blocks shield only with
/// `allow_in_static_block`. The computed key of an object literal method is
/// evaluated with the literal, so only the rest of the method is shielded.
#[must_use]
pub fn is_shielded<'tree>(
    node: Node<'tree>,
    ancestors: AncestorChain<'_, 'tree>,
    options: &PureModuleOptions,
) -> bool {
    // Each ancestor paired with its child on the path down to `node`.
    let below = ancestors.iter().skip(1).copied().chain(std::iter::once(node));
    ancestors.iter().zip(below).any(|(ancestor, child)| {
        let kind = ancestor.kind();
        (FUNCTION_KINDS.contains(&kind) && !is_object_method_key(*ancestor, child))
            || (FIELD_KINDS.contains(&kind) && !is_static_member(*ancestor))
            || (kind == "class_static_block" && options.allow_in_static_block)
    })
}

fn is_object_method_key(ancestor: Node<'_>, child: Node<'_>) -> bool {
    ancestor.kind() == "method_definition"
        && ancestor.parent().is_some_and(|parent| parent.kind() == "object")
        && ancestor.child_by_field_name("name") == Some(child)
}

fn is_static_member(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let is_static = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == "static");
    is_static
}

#[cfg(test)]
mod tests {
    use super::*;
    use pure_lint_core::{SourceLanguage, SourceModule};

    /// Shield verdict for every call in `src`, in pre-order.
    fn shielded_calls(src: &str, language: SourceLanguage, options: &PureModuleOptions) -> Vec<bool> {
        let module = SourceModule::parse(src, language).expect("fixture parses");
        let mut verdicts = Vec::new();
        module.walk(|node, ancestors| {
            if node.kind() == "call_expression" {
                verdicts.push(is_shielded(node, ancestors, options));
            }
        });
        verdicts
    }

    fn js(src: &str) -> Vec<bool> {
        shielded_calls(src, SourceLanguage::JavaScript, &PureModuleOptions::default())
    }

    #[test]
    fn top_level_is_not_shielded() {
        assert_eq!(js("f(); if (x) { g(); }"), vec![false, false]);
    }

    #[test]
    fn functions_shield() {
        assert_eq!(js("function a() { f(); }"), vec![true]);
        assert_eq!(js("const b = function () { f(); };"), vec![true]);
        assert_eq!(js("const c = () => f();"), vec![true]);
        assert_eq!(js("function* d() { f(); }"), vec![true]);
        assert_eq!(js("const e = function* () { f(); };"), vec![true]);
    }

    #[test]
    fn methods_shield() {
        assert_eq!(js("class A { m() { f(); } }"), vec![true]);
        assert_eq!(js("class A { get x() { return f(); } }"), vec![true]);
        assert_eq!(js("const o = { m() { f(); } };"), vec![true]);
    }

    #[test]
    fn object_method_key_is_not_shielded() {
        assert_eq!(js("const o = { [f()]() { g(); } };"), vec![false, true]);
        assert_eq!(js("const o = { get [f()]() { return g(); } };"), vec![false, true]);
        assert_eq!(js("const o = { m(a = f()) {} };"), vec![true]);
    }

    #[test]
    fn class_method_key_is_shielded() {
        assert_eq!(js("class A { [f()]() { g(); } }"), vec![true, true]);
    }

    #[test]
    fn instance_fields_shield_static_fields_do_not() {
        assert_eq!(js("class A { p = f(); }"), vec![true]);
        assert_eq!(js("class A { static p = f(); }"), vec![false]);
    }

    #[test]
    fn static_block_follows_option() {
        let src = "class A { static { f(); } }";
        assert_eq!(js(src), vec![true]);

        let strict = PureModuleOptions {
            allow_in_static_block: false,
            ..PureModuleOptions::default()
        };
        assert_eq!(shielded_calls(src, SourceLanguage::JavaScript, &strict), vec![false]);
    }

    #[test]
    fn class_heritage_is_not_shielded() {
        assert_eq!(js("class A extends mixin(B) {}"), vec![false]);
    }

    #[test]
    fn typescript_fields() {
        let options = PureModuleOptions::default();
        assert_eq!(
            shielded_calls(
                "class A { private p: number = f(); static q = g(); }",
                SourceLanguage::TypeScript,
                &options
            ),
            vec![true, false]
        );
    }
}
