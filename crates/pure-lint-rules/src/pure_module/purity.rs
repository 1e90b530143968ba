//! Candidate side-effect sites and the purity classifier.

use pure_lint_core::{CommentRecord, SourceModule};
use tree_sitter::Node;

use super::options::PureModuleOptions;
use super::pattern::PurePattern;

/// Syntactic kind of a potential side-effect site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind<'tree> {
    /// `await x`
    Await,
    /// `i++`, `--i`
    Update,
    /// `a = b`, `a += b`
    Assignment,
    /// `!x`, `typeof x`, `delete x.y`, ...
    Unary {
        /// Whether the operator is `delete`.
        is_delete: bool,
    },
    /// `throw e`
    Throw,
    /// `new C()`
    New,
    /// ``tag`...` ``
    TaggedTemplate {
        /// The tag expression.
        tag: Node<'tree>,
    },
    /// `f()`
    Call {
        /// The callee expression.
        callee: Node<'tree>,
    },
}

impl CandidateKind<'_> {
    /// Whether a `#__PURE__` annotation can mark this kind pure.
    #[must_use]
    pub fn supports_pure_comment(&self) -> bool {
        matches!(
            self,
            Self::New | Self::TaggedTemplate { .. } | Self::Call { .. }
        )
    }
}

/// A node that may have a side effect when evaluated.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'tree> {
    /// The candidate node.
    pub node: Node<'tree>,
    /// What kind of site it is.
    pub kind: CandidateKind<'tree>,
}

impl<'tree> Candidate<'tree> {
    /// Classifies `node`, returning `None` for every non-candidate kind.
    ///
    /// A dynamic `import(...)` is an import expression, not a call.
    #[must_use]
    pub fn classify(node: Node<'tree>) -> Option<Self> {
        let kind = match node.kind() {
            "await_expression" => CandidateKind::Await,
            "update_expression" => CandidateKind::Update,
            "assignment_expression" | "augmented_assignment_expression" => {
                CandidateKind::Assignment
            }
            "unary_expression" => CandidateKind::Unary {
                is_delete: node
                    .child_by_field_name("operator")
                    .is_some_and(|op| op.kind() == "delete"),
            },
            "throw_statement" => CandidateKind::Throw,
            "new_expression" => CandidateKind::New,
            "call_expression" => {
                let callee = node.child_by_field_name("function")?;
                let arguments = node.child_by_field_name("arguments")?;
                if arguments.kind() == "template_string" {
                    CandidateKind::TaggedTemplate { tag: callee }
                } else if callee.kind() == "import" {
                    return None;
                } else {
                    CandidateKind::Call { callee }
                }
            }
            _ => return None,
        };
        Some(Self { node, kind })
    }
}

/// Decides whether a candidate is exempt from reporting.
#[derive(Debug, Clone)]
pub struct PurityClassifier {
    options: PureModuleOptions,
    patterns: Vec<PurePattern>,
}

impl PurityClassifier {
    /// Compiles the allow-list of `options`.
    #[must_use]
    pub fn new(options: PureModuleOptions) -> Self {
        let patterns = options
            .pure_functions
            .iter()
            .map(|raw| PurePattern::compile(raw))
            .collect();
        Self { options, patterns }
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> &PureModuleOptions {
        &self.options
    }

    /// The compiled allow-list.
    #[must_use]
    pub fn patterns(&self) -> &[PurePattern] {
        &self.patterns
    }

    /// Whether `candidate` is exempt by configuration, annotation or allow-list.
    #[must_use]
    pub fn is_exempt(&self, candidate: &Candidate<'_>, module: &SourceModule) -> bool {
        let options = &self.options;
        match candidate.kind {
            CandidateKind::Await => options.allow_await,
            CandidateKind::Update | CandidateKind::Assignment => options.allow_assign,
            CandidateKind::Unary { is_delete } => options.allow_delete || !is_delete,
            CandidateKind::Throw => options.allow_throw,
            CandidateKind::New => options.allow_new || has_pure_comment(candidate, module),
            CandidateKind::TaggedTemplate { tag } => {
                options.tagged_template_allowed()
                    || has_pure_comment(candidate, module)
                    || self.is_pure_function(tag, module)
            }
            CandidateKind::Call { callee } => {
                options.allow_call
                    || has_pure_comment(candidate, module)
                    || callee.kind() == "super"
                    || self.is_pure_function(callee, module)
            }
        }
    }

    fn is_pure_function(&self, callee: Node<'_>, module: &SourceModule) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.matches(callee, module.source()))
    }
}

fn has_pure_comment(candidate: &Candidate<'_>, module: &SourceModule) -> bool {
    module
        .comments_before(candidate.node)
        .iter()
        .any(CommentRecord::is_pure_annotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pure_lint_core::SourceLanguage;

    fn parse(src: &str) -> SourceModule {
        SourceModule::parse(src, SourceLanguage::JavaScript).expect("fixture parses")
    }

    /// Kind names of every candidate in `src`, in pre-order.
    fn kinds(src: &str) -> Vec<&'static str> {
        let module = parse(src);
        let mut found = Vec::new();
        module.walk(|node, _| {
            if let Some(candidate) = Candidate::classify(node) {
                found.push(match candidate.kind {
                    CandidateKind::Await => "await",
                    CandidateKind::Update => "update",
                    CandidateKind::Assignment => "assign",
                    CandidateKind::Unary { is_delete: true } => "delete",
                    CandidateKind::Unary { is_delete: false } => "unary",
                    CandidateKind::Throw => "throw",
                    CandidateKind::New => "new",
                    CandidateKind::TaggedTemplate { .. } => "tagged",
                    CandidateKind::Call { .. } => "call",
                });
            }
        });
        found
    }

    /// Exemption verdict for every candidate in `src`, in pre-order.
    fn verdicts(src: &str, options: PureModuleOptions) -> Vec<bool> {
        let module = parse(src);
        let classifier = PurityClassifier::new(options);
        let mut found = Vec::new();
        module.walk(|node, _| {
            if let Some(candidate) = Candidate::classify(node) {
                found.push(classifier.is_exempt(&candidate, &module));
            }
        });
        found
    }

    #[test]
    fn classifies_candidate_kinds() {
        assert_eq!(kinds("await p;"), vec!["await"]);
        assert_eq!(kinds("i++; --j;"), vec!["update", "update"]);
        assert_eq!(kinds("a = 1; b += 2;"), vec!["assign", "assign"]);
        assert_eq!(kinds("delete o.p; !x; typeof y;"), vec!["delete", "unary", "unary"]);
        assert_eq!(kinds("throw e;"), vec!["throw"]);
        assert_eq!(kinds("new C;"), vec!["new"]);
        assert_eq!(kinds("tag`x`;"), vec!["tagged"]);
        assert_eq!(kinds("f(g());"), vec!["call", "call"]);
    }

    #[test]
    fn ignores_non_candidates() {
        assert!(kinds("const x = 42; let y; x + y;").is_empty());
        assert!(kinds("import('./mod.js');").is_empty());
        assert!(kinds("`plain ${x}`;").is_empty());
    }

    #[test]
    fn only_pure_comment_kinds_support_annotation() {
        let module = parse("new C; f(); t``; i++;");
        let mut support = Vec::new();
        module.walk(|node, _| {
            if let Some(candidate) = Candidate::classify(node) {
                support.push(candidate.kind.supports_pure_comment());
            }
        });
        assert_eq!(support, vec![true, true, true, false]);
    }

    #[test]
    fn default_options() {
        let defaults = PureModuleOptions::default;
        assert_eq!(verdicts("await p;", defaults()), vec![false]);
        assert_eq!(verdicts("i++; a = 1;", defaults()), vec![false, false]);
        assert_eq!(verdicts("delete o.p; void 0;", defaults()), vec![false, true]);
        assert_eq!(verdicts("throw e;", defaults()), vec![false]);
        assert_eq!(verdicts("new C;", defaults()), vec![true]);
        assert_eq!(verdicts("t``; f();", defaults()), vec![false, false]);
    }

    #[test]
    fn flags_exempt_their_kinds() {
        let options = PureModuleOptions {
            allow_await: true,
            allow_assign: true,
            allow_delete: true,
            allow_throw: true,
            allow_call: true,
            ..PureModuleOptions::default()
        };
        assert!(verdicts(
            "await p; i++; a = 1; delete o.p; throw e; t``; f();",
            options
        )
        .into_iter()
        .all(|exempt| exempt));
    }

    #[test]
    fn tagged_template_flag_overrides_allow_call() {
        let options = PureModuleOptions {
            allow_call: true,
            allow_tagged_template: Some(false),
            ..PureModuleOptions::default()
        };
        assert_eq!(verdicts("t``; f();", options), vec![false, true]);
    }

    #[test]
    fn pure_comment_exempts_new_call_and_tagged_template() {
        let options = PureModuleOptions {
            allow_new: false,
            ..PureModuleOptions::default()
        };
        assert_eq!(
            verdicts(
                "/* #__PURE__ */ new C; /*@__PURE__*/ f(); /* #__PURE__ */ t``;",
                options
            ),
            vec![true, true, true]
        );
        assert_eq!(verdicts("/* pure */ f();", PureModuleOptions::default()), vec![false]);
    }

    #[test]
    fn pure_comment_does_not_exempt_other_kinds() {
        assert_eq!(
            verdicts("/* #__PURE__ */ i++;", PureModuleOptions::default()),
            vec![false]
        );
    }

    #[test]
    fn super_calls_are_exempt() {
        let src = "class A extends B { constructor() { super(); } }";
        assert_eq!(verdicts(src, PureModuleOptions::default()), vec![true]);
    }

    #[test]
    fn allow_list_exempts_calls_and_tags() {
        let options = PureModuleOptions {
            pure_functions: vec!["pure".into(), "css".into()],
            ..PureModuleOptions::default()
        };
        assert_eq!(
            verdicts("pure(); other(); css`a`; html`b`;", options),
            vec![true, false, true, false]
        );
    }

    #[test]
    fn malformed_allow_list_entries_are_inert() {
        let classifier = PurityClassifier::new(PureModuleOptions {
            pure_functions: vec!["x..y".into(), "ok".into()],
            ..PureModuleOptions::default()
        });
        let valid: Vec<bool> = classifier.patterns().iter().map(PurePattern::is_valid).collect();
        assert_eq!(valid, vec![false, true]);
    }
}
