use crate::ast::{AtRule, Declaration, MixinCall, MixinDefinition, Node, Rule, Stylesheet};

/// Enter/exit hooks invoked by [`walk`] in depth-first order.
///
/// Every hook has an empty default so a pass only overrides the node kinds
/// it cares about. Exit hooks receive the node mutably and may insert new
/// children; they must not remove or reorder existing ones. Each exit hook
/// returns whether it changed the tree.
pub trait Visitor {
    fn enter_stylesheet(&mut self, _sheet: &Stylesheet) {}

    fn exit_stylesheet(&mut self, _sheet: &mut Stylesheet) -> bool {
        false
    }

    fn enter_rule(&mut self, _rule: &Rule) {}

    fn exit_rule(&mut self, _rule: &mut Rule) -> bool {
        false
    }

    fn visit_declaration(&mut self, _decl: &Declaration) {}

    /// Mixin call used as a statement inside a body.
    fn visit_mixin_call(&mut self, _call: &MixinCall) {}

    fn enter_mixin_definition(&mut self, _def: &MixinDefinition) {}

    fn exit_mixin_definition(&mut self, _def: &mut MixinDefinition) -> bool {
        false
    }

    fn enter_at_rule(&mut self, _at_rule: &AtRule) {}

    fn exit_at_rule(&mut self, _at_rule: &mut AtRule) -> bool {
        false
    }
}

/// Drives `visitor` over the whole stylesheet: enter, recurse, exit.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, sheet: &mut Stylesheet) -> bool {
    visitor.enter_stylesheet(sheet);
    let mut changed = walk_children(visitor, &mut sheet.children);
    changed |= visitor.exit_stylesheet(sheet);
    changed
}

fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, children: &mut [Node]) -> bool {
    let mut changed = false;
    for child in children.iter_mut() {
        changed |= walk_node(visitor, child);
    }
    changed
}

fn walk_node<V: Visitor + ?Sized>(visitor: &mut V, node: &mut Node) -> bool {
    match node {
        Node::Rule(rule) => {
            visitor.enter_rule(rule);
            let mut changed = walk_children(visitor, &mut rule.children);
            changed |= visitor.exit_rule(rule);
            changed
        }
        Node::Declaration(decl) => {
            visitor.visit_declaration(decl);
            false
        }
        Node::MixinCall(call) => {
            visitor.visit_mixin_call(call);
            false
        }
        Node::MixinDefinition(def) => {
            visitor.enter_mixin_definition(def);
            let mut changed = walk_children(visitor, &mut def.children);
            changed |= visitor.exit_mixin_definition(def);
            changed
        }
        Node::AtRule(at_rule) => {
            visitor.enter_at_rule(at_rule);
            let mut changed = walk_children(visitor, &mut at_rule.children);
            changed |= visitor.exit_at_rule(at_rule);
            changed
        }
        Node::Comment(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, Selector};

    #[derive(Default)]
    struct EventLog {
        events: Vec<String>,
    }

    impl Visitor for EventLog {
        fn enter_rule(&mut self, rule: &Rule) {
            self.events.push(format!("enter {}", rule.children.len()));
        }

        fn exit_rule(&mut self, rule: &mut Rule) -> bool {
            self.events.push("exit".to_string());
            rule.children.push(Node::Rule(Rule::default()));
            true
        }

        fn visit_declaration(&mut self, decl: &Declaration) {
            self.events.push(format!("decl {}", decl.name));
        }

        fn enter_mixin_definition(&mut self, def: &MixinDefinition) {
            self.events.push(format!("mixin {}", def.name));
        }
    }

    #[test]
    fn test_depth_first_order_and_no_revisit() {
        let inner = Rule::new(
            vec![Selector::default()],
            vec![Node::Declaration(Declaration::new(
                "color",
                Expression::keyword("red"),
            ))],
        );
        let outer = Rule::new(
            vec![Selector::default()],
            vec![
                Node::Declaration(Declaration::new("width", Expression::keyword("auto"))),
                Node::Rule(inner),
                Node::MixinDefinition(MixinDefinition {
                    name: ".m".to_string(),
                    params: vec![],
                    children: vec![],
                }),
            ],
        );
        let mut sheet = Stylesheet::new(vec![Node::Rule(outer)]);
        let mut log = EventLog::default();

        assert!(walk(&mut log, &mut sheet));
        assert_eq!(
            log.events,
            vec![
                "enter 3",
                "decl width",
                "enter 1",
                "decl color",
                "exit",
                "mixin .m",
                "exit",
            ]
        );
        // Children inserted on exit are not walked again.
        assert_eq!(log.events.iter().filter(|e| *e == "exit").count(), 2);
    }
}
