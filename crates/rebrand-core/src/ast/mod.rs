//! Stylesheet syntax tree consumed by the rebrand pass.
//!
//! The tree is the pre-evaluation shape a host stylesheet compiler hands over:
//! variable references are still symbolic names, and nothing has been
//! resolved to concrete values. Every type is serde-serializable so that a
//! host written in any language can exchange trees as JSON or YAML.
//!
//! ```text
//! Stylesheet (root, never a rewrite scope)
//!  ├─ Rule ─────────── selectors + children
//!  │    ├─ Declaration   name: value [!important]
//!  │    ├─ MixinCall     .mixin(args...)
//!  │    ├─ Rule          (nested)
//!  │    └─ AtRule        @media ... { children }
//!  └─ MixinDefinition ─ body is never rewritten
//! ```

pub mod expression;
mod validate;

pub use expression::{Expression, ListSeparator, Literal};
pub use validate::TreeError;

use serde::{Deserialize, Serialize};

/// Source position carried through from the host compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Root of a parsed stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub children: Vec<Node>,
}

impl Stylesheet {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

/// A child of the root, a rule body, a mixin body, or an at-rule body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Rule(Rule),
    Declaration(Declaration),
    /// Mixin call used as a statement, e.g. `.rounded(@radius);`
    MixinCall(MixinCall),
    MixinDefinition(MixinDefinition),
    AtRule(AtRule),
    Comment(String),
}

impl Node {
    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Node::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        }
    }
}

/// A style rule: `selectors { children }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub children: Vec<Node>,
}

impl Rule {
    pub fn new(selectors: Vec<Selector>, children: Vec<Node>) -> Self {
        Self {
            selectors,
            children,
        }
    }

    /// Nested rules that are direct children of this rule.
    pub fn nested_rules(&self) -> impl Iterator<Item = &Rule> {
        self.children.iter().filter_map(Node::as_rule)
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.children.iter().filter_map(Node::as_declaration)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selector {
    pub elements: Vec<Element>,
    #[serde(default)]
    pub span: Span,
}

impl Selector {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            span: Span::default(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// One compound part of a selector together with the combinator before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub combinator: Combinator,
    pub value: String,
}

impl Element {
    pub fn new(combinator: Combinator, value: impl Into<String>) -> Self {
        Self {
            combinator,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combinator {
    /// No combinator: the element is glued to the previous one (`a.b`).
    #[default]
    None,
    /// Whitespace descendant combinator.
    Descendant,
    Child,
    Adjacent,
    Sibling,
}

impl Combinator {
    pub fn symbol(self) -> &'static str {
        match self {
            Combinator::None => "",
            Combinator::Descendant => " ",
            Combinator::Child => ">",
            Combinator::Adjacent => "+",
            Combinator::Sibling => "~",
        }
    }
}

/// `name: value [!important]`. Variable definitions (`@a: 1px`) are
/// declarations whose name starts with `@`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub value: Expression,
    #[serde(default)]
    pub important: bool,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: Expression) -> Self {
        Self {
            name: name.into(),
            value,
            important: false,
        }
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }
}

/// Mixin invocation, either as a statement or nested in a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixinCall {
    /// Selector path of the called mixin, e.g. `["#ns", ".rounded"]`.
    pub path: Vec<String>,
    #[serde(default)]
    pub args: Vec<MixinArg>,
    #[serde(default)]
    pub important: bool,
}

impl MixinCall {
    pub fn new(path: Vec<String>, args: Vec<MixinArg>) -> Self {
        Self {
            path,
            args,
            important: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixinArg {
    /// Named argument (`@radius: 2px`), if any.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<Expression>,
}

impl MixinArg {
    pub fn positional(value: Expression) -> Self {
        Self {
            name: None,
            value: Some(value),
        }
    }
}

/// Mixin definition: `.rounded(@radius: 2px) { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixinDefinition {
    pub name: String,
    #[serde(default)]
    pub params: Vec<MixinParam>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixinParam {
    pub name: String,
    #[serde(default)]
    pub default: Option<Expression>,
}

/// Block at-rule such as `@media (min-width: 768px) { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtRule {
    pub name: String,
    #[serde(default)]
    pub params: String,
    pub children: Vec<Node>,
}
