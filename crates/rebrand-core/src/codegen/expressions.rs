use super::{emit_separated, EmitExpression, Emitter};
use crate::ast::{Combinator, Expression, Literal, MixinArg, MixinCall, Selector};

impl EmitExpression for Expression {
    fn emit_expression(&self, emitter: &mut Emitter) {
        match self {
            Expression::Literal(literal) => literal.emit_expression(emitter),
            Expression::Variable(name) => emitter.write(name),
            Expression::Operation { op, operands } => {
                emit_separated(operands, emitter, &format!(" {op} "));
            }
            Expression::Negative(inner) => {
                emitter.write("-");
                inner.emit_expression(emitter);
            }
            Expression::Call { name, args } => {
                emitter.write(name);
                emitter.write("(");
                emit_separated(args, emitter, ", ");
                emitter.write(")");
            }
            Expression::MixinCall(call) => call.emit_expression(emitter),
            Expression::List { separator, items } => {
                emit_separated(items, emitter, separator.as_str());
            }
            Expression::Paren(inner) => {
                emitter.write("(");
                inner.emit_expression(emitter);
                emitter.write(")");
            }
            Expression::Anonymous(raw) => emitter.write(raw),
        }
    }
}

impl EmitExpression for Literal {
    fn emit_expression(&self, emitter: &mut Emitter) {
        match self {
            Literal::Keyword(word) => emitter.write(word),
            Literal::Dimension { value, unit } => emitter.write(&format!("{value}{unit}")),
            Literal::Color(color) => emitter.write(color),
            Literal::Quoted { value, quote } => {
                emitter.write(&format!("{quote}{value}{quote}"));
            }
        }
    }
}

impl EmitExpression for MixinCall {
    fn emit_expression(&self, emitter: &mut Emitter) {
        emitter.write(&self.path.concat());
        emitter.write("(");
        emit_separated(&self.args, emitter, ", ");
        emitter.write(")");
        if self.important {
            emitter.write(" !important");
        }
    }
}

impl EmitExpression for MixinArg {
    fn emit_expression(&self, emitter: &mut Emitter) {
        match (&self.name, &self.value) {
            (Some(name), Some(value)) => {
                emitter.write(name);
                emitter.write(": ");
                value.emit_expression(emitter);
            }
            (Some(name), None) => emitter.write(name),
            (None, Some(value)) => value.emit_expression(emitter),
            (None, None) => {}
        }
    }
}

impl EmitExpression for Selector {
    fn emit_expression(&self, emitter: &mut Emitter) {
        for (i, element) in self.elements.iter().enumerate() {
            match (i, element.combinator) {
                (0, Combinator::None | Combinator::Descendant) | (_, Combinator::None) => {}
                (0, combinator) => {
                    emitter.write(combinator.symbol());
                    emitter.write(" ");
                }
                (_, Combinator::Descendant) => emitter.write(" "),
                (_, combinator) => {
                    emitter.write(" ");
                    emitter.write(combinator.symbol());
                    emitter.write(" ");
                }
            }
            emitter.write(&element.value);
        }
    }
}
