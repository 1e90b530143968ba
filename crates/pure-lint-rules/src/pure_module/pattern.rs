//! Allow-list patterns for call targets known to be pure.
//!
//! A pattern is a dotted path such as `Object.freeze`, `x.*` or
//! `import.meta.pure`. Every segment is either `*` or an identifier made of
//! `[$A-Za-z0-9_]`. Matching walks the callee from its outermost property
//! inwards: `a.b.c` first requires the property `c`, then `b` on the object,
//! and finally an identifier named `a`.
//!
//! A leading `*` accepts any innermost expression, so `*.pure` matches both
//! `a.pure()` and `a.b.pure()`. Any other `*` accepts any property name.
//! Computed access (`x[y]`) never matches a segment.

use tracing::warn;
use tree_sitter::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Any,
    Name(String),
}

impl Segment {
    fn parse(raw: &str) -> Option<Self> {
        if raw == "*" {
            return Some(Self::Any);
        }
        let valid = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c == '$' || c == '_' || c.is_ascii_alphanumeric());
        valid.then(|| Self::Name(raw.to_string()))
    }

    fn accepts(&self, name: &str) -> bool {
        match self {
            Self::Any => !name.is_empty(),
            Self::Name(expected) => expected == name,
        }
    }
}

/// Where a property step moves to after its name check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Descend {
    /// The object of a member expression.
    Object,
    /// The `import` keyword of `import.meta`.
    Meta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PropertyStep {
    segment: Segment,
    descend: Descend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Steps {
    /// Rightmost segment first.
    properties: Vec<PropertyStep>,
    /// Leftmost segment.
    anchor: Segment,
}

/// A compiled allow-list pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurePattern {
    raw: String,
    steps: Option<Steps>,
}

impl PurePattern {
    /// Compiles `raw`. A malformed pattern compiles to a matcher that never
    /// matches, and a warning is logged.
    #[must_use]
    pub fn compile(raw: &str) -> Self {
        let steps = Self::compile_steps(raw);
        if steps.is_none() {
            warn!("Ignoring malformed pure function pattern {raw:?}");
        }
        Self {
            raw: raw.to_string(),
            steps,
        }
    }

    fn compile_steps(raw: &str) -> Option<Steps> {
        let mut segments = raw
            .split('.')
            .map(Segment::parse)
            .collect::<Option<Vec<_>>>()?;

        let through_meta = raw.starts_with("import.");
        let anchor = segments.remove(0);
        let count = segments.len();

        let properties = segments
            .into_iter()
            .rev()
            .enumerate()
            .map(|(i, segment)| PropertyStep {
                segment,
                descend: if through_meta && i + 1 == count {
                    Descend::Meta
                } else {
                    Descend::Object
                },
            })
            .collect();

        Some(Steps { properties, anchor })
    }

    /// The pattern as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern is well-formed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.steps.is_some()
    }

    /// Whether `node` (a callee or template tag) matches this pattern.
    #[must_use]
    pub fn matches(&self, node: Node<'_>, source: &str) -> bool {
        let Some(steps) = &self.steps else {
            return false;
        };
        let source = source.as_bytes();

        let mut current = unwrap_parens(node);
        for step in &steps.properties {
            match property_name(current, source) {
                Some(name) if step.segment.accepts(name) => {}
                _ => return false,
            }
            let next = match step.descend {
                Descend::Object => object_of(current),
                Descend::Meta => meta_of(current),
            };
            let Some(next) = next else {
                return false;
            };
            current = unwrap_parens(next);
        }

        match &steps.anchor {
            Segment::Any => true,
            Segment::Name(expected) => name_of(current, source) == Some(expected.as_str()),
        }
    }
}

impl std::fmt::Display for PurePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn unwrap_parens(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" {
        let mut cursor = node.walk();
        let inner = node
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment");
        match inner {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Name of an identifier-like node.
fn name_of<'s>(node: Node<'_>, source: &'s [u8]) -> Option<&'s str> {
    match node.kind() {
        "identifier" | "property_identifier" => node.utf8_text(source).ok(),
        "private_property_identifier" => node
            .utf8_text(source)
            .ok()
            .map(|text| text.trim_start_matches('#')),
        // Keywords of `import.meta` / `new.target`.
        kind @ ("import" | "new") => Some(kind),
        _ => None,
    }
}

/// Property name of a non-computed member access or a meta property.
fn property_name<'s>(node: Node<'_>, source: &'s [u8]) -> Option<&'s str> {
    match node.kind() {
        "member_expression" => name_of(node.child_by_field_name("property")?, source),
        "meta_property" => {
            let mut cursor = node.walk();
            let last = node.children(&mut cursor).last()?;
            match last.kind() {
                "meta" => Some("meta"),
                "target" => Some("target"),
                _ => None,
            }
        }
        _ => None,
    }
}

fn object_of(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "member_expression" => node.child_by_field_name("object"),
        _ => None,
    }
}

fn meta_of(node: Node<'_>) -> Option<Node<'_>> {
    match node.kind() {
        "meta_property" => {
            let mut cursor = node.walk();
            let first = node.children(&mut cursor).next();
            first
        }
        _ => None,
    }
}
