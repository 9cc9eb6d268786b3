use super::MixinCall;
use serde::{Deserialize, Serialize};

/// Value expression of a declaration or mixin argument.
///
/// The set of forms is closed: rewriting matches exhaustively, and syntax
/// the host did not structure arrives as [`Expression::Anonymous`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Literal(Literal),
    /// Symbolic variable reference, name includes the leading `@`.
    Variable(String),
    Operation {
        op: String,
        operands: Vec<Expression>,
    },
    Negative(Box<Expression>),
    /// Function call such as `darken(@orange, 10%)`.
    Call {
        name: String,
        args: Vec<Expression>,
    },
    /// Mixin call used as a value.
    MixinCall(MixinCall),
    /// Space or comma separated value list.
    List {
        separator: ListSeparator,
        items: Vec<Expression>,
    },
    Paren(Box<Expression>),
    /// Raw text the host passed through unparsed.
    Anonymous(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListSeparator {
    #[default]
    Space,
    Comma,
}

impl ListSeparator {
    pub fn as_str(self) -> &'static str {
        match self {
            ListSeparator::Space => " ",
            ListSeparator::Comma => ", ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Keyword(String),
    Dimension { value: f64, unit: String },
    Color(String),
    Quoted { value: String, quote: char },
}

impl Expression {
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    pub fn keyword(word: impl Into<String>) -> Self {
        Expression::Literal(Literal::Keyword(word.into()))
    }

    pub fn dimension(value: f64, unit: impl Into<String>) -> Self {
        Expression::Literal(Literal::Dimension {
            value,
            unit: unit.into(),
        })
    }

    pub fn space_list(items: Vec<Expression>) -> Self {
        Expression::List {
            separator: ListSeparator::Space,
            items,
        }
    }

    pub fn comma_list(items: Vec<Expression>) -> Self {
        Expression::List {
            separator: ListSeparator::Comma,
            items,
        }
    }

    pub fn operation(op: impl Into<String>, operands: Vec<Expression>) -> Self {
        Expression::Operation {
            op: op.into(),
            operands,
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call {
            name: name.into(),
            args,
        }
    }

    pub fn negative(inner: Expression) -> Self {
        Expression::Negative(Box::new(inner))
    }

    /// Returns true if any variable reference appears in this expression.
    pub fn references_variables(&self) -> bool {
        match self {
            Expression::Variable(_) => true,
            Expression::Operation { operands: items, .. }
            | Expression::Call { args: items, .. }
            | Expression::List { items, .. } => items.iter().any(Expression::references_variables),
            Expression::Negative(inner) | Expression::Paren(inner) => {
                inner.references_variables()
            }
            Expression::MixinCall(call) => call
                .args
                .iter()
                .filter_map(|arg| arg.value.as_ref())
                .any(Expression::references_variables),
            Expression::Literal(_) | Expression::Anonymous(_) => false,
        }
    }
}
