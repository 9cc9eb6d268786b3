//! Shorthand constructors for stylesheet trees.

use rebrand_core::ast::{
    AtRule, Combinator, Declaration, Element, Expression, MixinArg, MixinCall, MixinDefinition,
    MixinParam, Node, Rule, Selector, Stylesheet,
};

pub fn sheet(children: Vec<Node>) -> Stylesheet {
    Stylesheet::new(children)
}

/// A rule with one simple selector such as `.card` or `a`.
pub fn rule(selector: &str, children: Vec<Node>) -> Node {
    Node::Rule(Rule::new(vec![simple_selector(selector)], children))
}

pub fn simple_selector(value: &str) -> Selector {
    Selector::new(vec![Element::new(Combinator::None, value)])
}

pub fn decl(name: &str, value: Expression) -> Node {
    Node::Declaration(Declaration::new(name, value))
}

pub fn var(name: &str) -> Expression {
    Expression::variable(name)
}

pub fn kw(word: &str) -> Expression {
    Expression::keyword(word)
}

pub fn px(value: f64) -> Expression {
    Expression::dimension(value, "px")
}

pub fn space(items: Vec<Expression>) -> Expression {
    Expression::space_list(items)
}

pub fn comma(items: Vec<Expression>) -> Expression {
    Expression::comma_list(items)
}

/// `.name(args...);` as a statement, positional arguments only.
pub fn mixin_call(name: &str, args: Vec<Expression>) -> Node {
    Node::MixinCall(MixinCall::new(
        vec![name.to_string()],
        args.into_iter().map(MixinArg::positional).collect(),
    ))
}

pub fn mixin_def(name: &str, params: &[&str], children: Vec<Node>) -> Node {
    Node::MixinDefinition(MixinDefinition {
        name: name.to_string(),
        params: params
            .iter()
            .map(|param| MixinParam {
                name: param.to_string(),
                default: None,
            })
            .collect(),
        children,
    })
}

pub fn at_rule(name: &str, params: &str, children: Vec<Node>) -> Node {
    Node::AtRule(AtRule {
        name: name.to_string(),
        params: params.to_string(),
        children,
    })
}
