use super::{Expression, MixinCall, Node, Stylesheet};
use thiserror::Error;

/// Structural defects a host must never hand to the pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("declaration without a name at child {index} of {parent}")]
    EmptyDeclarationName { parent: String, index: usize },

    #[error("variable reference without a name in '{property}'")]
    EmptyVariableName { property: String },

    #[error("mixin call without a target path in {parent}")]
    EmptyMixinPath { parent: String },

    #[error("mixin definition without a name at child {index} of {parent}")]
    EmptyMixinName { parent: String, index: usize },
}

impl Stylesheet {
    /// Checks the structural invariants the pass relies on.
    pub fn validate(&self) -> Result<(), TreeError> {
        validate_children(&self.children, "<root>")
    }
}

fn validate_children(children: &[Node], parent: &str) -> Result<(), TreeError> {
    for (index, child) in children.iter().enumerate() {
        match child {
            Node::Rule(rule) => {
                let label = rule
                    .selectors
                    .first()
                    .map(|selector| {
                        selector
                            .elements
                            .iter()
                            .map(|element| element.value.as_str())
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .unwrap_or_else(|| "<anonymous rule>".to_string());
                validate_children(&rule.children, &label)?;
            }
            Node::Declaration(decl) => {
                if decl.name.is_empty() {
                    return Err(TreeError::EmptyDeclarationName {
                        parent: parent.to_string(),
                        index,
                    });
                }
                validate_expression(&decl.value, &decl.name, parent)?;
            }
            Node::MixinCall(call) => validate_mixin_call(call, parent)?,
            Node::MixinDefinition(def) => {
                if def.name.is_empty() {
                    return Err(TreeError::EmptyMixinName {
                        parent: parent.to_string(),
                        index,
                    });
                }
                validate_children(&def.children, &def.name)?;
            }
            Node::AtRule(at_rule) => validate_children(&at_rule.children, &at_rule.name)?,
            Node::Comment(_) => {}
        }
    }
    Ok(())
}

fn validate_mixin_call(call: &MixinCall, parent: &str) -> Result<(), TreeError> {
    if call.path.is_empty() || call.path.iter().any(String::is_empty) {
        return Err(TreeError::EmptyMixinPath {
            parent: parent.to_string(),
        });
    }
    let property = call.path.join(" ");
    for value in call.args.iter().filter_map(|arg| arg.value.as_ref()) {
        validate_expression(value, &property, parent)?;
    }
    Ok(())
}

fn validate_expression(expr: &Expression, property: &str, parent: &str) -> Result<(), TreeError> {
    match expr {
        Expression::Variable(name) if name.is_empty() => Err(TreeError::EmptyVariableName {
            property: property.to_string(),
        }),
        Expression::Operation { operands: items, .. }
        | Expression::Call { args: items, .. }
        | Expression::List { items, .. } => items
            .iter()
            .try_for_each(|item| validate_expression(item, property, parent)),
        Expression::Negative(inner) | Expression::Paren(inner) => {
            validate_expression(inner, property, parent)
        }
        Expression::MixinCall(call) => validate_mixin_call(call, parent),
        Expression::Variable(_) | Expression::Literal(_) | Expression::Anonymous(_) => Ok(()),
    }
}
