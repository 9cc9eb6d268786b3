use super::{emit_separated, Emit, EmitExpression, Emitter};
use crate::ast::{AtRule, Declaration, MixinCall, MixinDefinition, Node, Rule, Stylesheet};

impl Emit for Stylesheet {
    fn emit(&self, emitter: &mut Emitter) {
        for child in &self.children {
            child.emit(emitter);
        }
    }
}

impl Emit for Node {
    fn emit(&self, emitter: &mut Emitter) {
        match self {
            Node::Rule(rule) => rule.emit(emitter),
            Node::Declaration(decl) => decl.emit(emitter),
            Node::MixinCall(call) => call.emit(emitter),
            Node::MixinDefinition(def) => def.emit(emitter),
            Node::AtRule(at_rule) => at_rule.emit(emitter),
            Node::Comment(text) => emitter.write_indented(&format!("/* {text} */")),
        }
    }
}

fn emit_body(children: &[Node], emitter: &mut Emitter) {
    emitter.writeln(" {");
    emitter.indent();
    for child in children {
        child.emit(emitter);
    }
    emitter.dedent();
    emitter.write_indented("}");
}

impl Emit for Rule {
    fn emit(&self, emitter: &mut Emitter) {
        emitter.write_indent();
        emit_separated(&self.selectors, emitter, ", ");
        emit_body(&self.children, emitter);
    }
}

impl Emit for Declaration {
    fn emit(&self, emitter: &mut Emitter) {
        emitter.write_indent();
        emitter.write(&self.name);
        emitter.write(": ");
        self.value.emit_expression(emitter);
        if self.important {
            emitter.write(" !important");
        }
        emitter.writeln(";");
    }
}

impl Emit for MixinCall {
    fn emit(&self, emitter: &mut Emitter) {
        emitter.write_indent();
        self.emit_expression(emitter);
        emitter.writeln(";");
    }
}

impl Emit for MixinDefinition {
    fn emit(&self, emitter: &mut Emitter) {
        emitter.write_indent();
        emitter.write(&self.name);
        emitter.write("(");
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                emitter.write(", ");
            }
            emitter.write(&param.name);
            if let Some(default) = &param.default {
                emitter.write(": ");
                default.emit_expression(emitter);
            }
        }
        emitter.write(")");
        emit_body(&self.children, emitter);
    }
}

impl Emit for AtRule {
    fn emit(&self, emitter: &mut Emitter) {
        emitter.write_indent();
        emitter.write("@");
        emitter.write(self.name.trim_start_matches('@'));
        if !self.params.is_empty() {
            emitter.write(" ");
            emitter.write(&self.params);
        }
        emit_body(&self.children, emitter);
    }
}
