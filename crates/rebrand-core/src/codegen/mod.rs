//! LESS-like text output for stylesheet trees.
//!
//! The rebrand pass only ever produces trees; printing is for the CLI and for
//! readable test expectations. The output is a faithful rendering of the
//! tree, not a formatter: no reordering, no value normalization.

mod emitter;
mod expressions;
mod statements;

pub use emitter::Emitter;

use crate::ast::Stylesheet;

/// Emits a node as one or more complete lines.
pub trait Emit {
    fn emit(&self, emitter: &mut Emitter);
}

/// Emits an inline fragment (value, selector, argument list).
pub trait EmitExpression {
    fn emit_expression(&self, emitter: &mut Emitter);
}

/// Emit a slice of inline items with `separator` between them.
pub fn emit_separated<T: EmitExpression>(items: &[T], emitter: &mut Emitter, separator: &str) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            emitter.write(separator);
        }
        item.emit_expression(emitter);
    }
}

pub fn to_less(sheet: &Stylesheet) -> String {
    let mut emitter = Emitter::new();
    sheet.emit(&mut emitter);
    emitter.take_output()
}
