use crate::ast::{Expression, MixinArg, MixinCall};
use crate::registry::VariableRegistry;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// Variables that must be renamed during a restricted rewrite.
pub type RequiredVariables<'r> = FxHashSet<&'r str>;

/// Target classes touched while rewriting one declaration, in encounter
/// order, each with its duplicate-free list of source variable names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchMap<'r> {
    classes: IndexMap<&'r str, Vec<&'r str>>,
}

impl<'r> TouchMap<'r> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, class: &'r str, variable: &'r str) {
        let variables = self.classes.entry(class).or_default();
        if !variables.contains(&variable) {
            variables.push(variable);
        }
    }

    pub fn merge(&mut self, other: TouchMap<'r>) {
        for (class, variables) in other.classes {
            for variable in variables {
                self.record(class, variable);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, class: &str) -> Option<&[&'r str]> {
        self.classes.get(class).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'r str, &[&'r str])> + '_ {
        self.classes
            .iter()
            .map(|(class, variables)| (*class, variables.as_slice()))
    }
}

/// Result of one rewrite pass over a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewritten<'r, T> {
    pub value: T,
    pub touches: TouchMap<'r>,
}

/// Renames registered variable references inside value expressions.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionRewriter<'r> {
    registry: &'r VariableRegistry,
}

impl<'r> ExpressionRewriter<'r> {
    pub fn new(registry: &'r VariableRegistry) -> Self {
        Self { registry }
    }

    /// Rewrites `expr` as the value of `property`.
    ///
    /// With `required` set, only variables in that set are renamed and all
    /// other matches keep their original names.
    pub fn rewrite(
        &self,
        expr: &Expression,
        property: &str,
        required: Option<&RequiredVariables<'r>>,
    ) -> Rewritten<'r, Expression> {
        let mut touches = TouchMap::new();
        let value = self.rewrite_expression(expr, property, required, &mut touches);
        Rewritten { value, touches }
    }

    /// Rewrites the argument expressions of a mixin call statement.
    pub fn rewrite_mixin_call(
        &self,
        call: &MixinCall,
        property: &str,
        required: Option<&RequiredVariables<'r>>,
    ) -> Rewritten<'r, MixinCall> {
        let mut touches = TouchMap::new();
        let value = self.rewrite_call_args(call, property, required, &mut touches);
        Rewritten { value, touches }
    }

    fn rewrite_expression(
        &self,
        expr: &Expression,
        property: &str,
        required: Option<&RequiredVariables<'r>>,
        touches: &mut TouchMap<'r>,
    ) -> Expression {
        match expr {
            Expression::Variable(name) => {
                let registry: &'r VariableRegistry = self.registry;
                let Some(binding) = registry.lookup(name) else {
                    return expr.clone();
                };
                if !binding.applies_to(property) {
                    return expr.clone();
                }
                if let Some(required) = required {
                    if !required.contains(binding.source_name.as_str()) {
                        return expr.clone();
                    }
                }
                touches.record(&binding.target_class, &binding.source_name);
                tracing::trace!(
                    variable = %binding.source_name,
                    renamed = %binding.renamed_name,
                    property,
                    "Renamed variable reference"
                );
                Expression::Variable(binding.renamed_name.clone())
            }
            Expression::Operation { op, operands } => Expression::Operation {
                op: op.clone(),
                operands: self.rewrite_all(operands, property, required, touches),
            },
            Expression::Negative(inner) => Expression::Negative(Box::new(
                self.rewrite_expression(inner, property, required, touches),
            )),
            Expression::Call { name, args } => Expression::Call {
                name: name.clone(),
                args: self.rewrite_all(args, property, required, touches),
            },
            Expression::MixinCall(call) => {
                Expression::MixinCall(self.rewrite_call_args(call, property, required, touches))
            }
            Expression::List { separator, items } => Expression::List {
                separator: *separator,
                items: self.rewrite_all(items, property, required, touches),
            },
            Expression::Paren(inner) => Expression::Paren(Box::new(
                self.rewrite_expression(inner, property, required, touches),
            )),
            Expression::Literal(_) | Expression::Anonymous(_) => expr.clone(),
        }
    }

    fn rewrite_all(
        &self,
        items: &[Expression],
        property: &str,
        required: Option<&RequiredVariables<'r>>,
        touches: &mut TouchMap<'r>,
    ) -> Vec<Expression> {
        items
            .iter()
            .map(|item| self.rewrite_expression(item, property, required, touches))
            .collect()
    }

    fn rewrite_call_args(
        &self,
        call: &MixinCall,
        property: &str,
        required: Option<&RequiredVariables<'r>>,
        touches: &mut TouchMap<'r>,
    ) -> MixinCall {
        let args = call
            .args
            .iter()
            .map(|arg| MixinArg {
                name: arg.name.clone(),
                value: arg
                    .value
                    .as_ref()
                    .map(|value| self.rewrite_expression(value, property, required, touches)),
            })
            .collect();
        MixinCall {
            path: call.path.clone(),
            args,
            important: call.important,
        }
    }
}
