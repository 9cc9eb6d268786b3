use crate::ast::{Node, Stylesheet};
use bitflags::bitflags;

bitflags! {
    /// Coarse summary of what a stylesheet contains, used to skip passes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SheetFeatures: u8 {
        /// At least one style rule.
        const HAS_RULES = 1 << 0;
        /// A declaration or mixin call argument references a variable.
        const HAS_VARIABLE_REFERENCES = 1 << 1;
        const HAS_MIXIN_DEFINITIONS = 1 << 2;
        const HAS_MIXIN_CALLS = 1 << 3;
        const HAS_AT_RULES = 1 << 4;
    }
}

impl SheetFeatures {
    pub fn scan(sheet: &Stylesheet) -> Self {
        let mut features = SheetFeatures::empty();
        scan_children(&sheet.children, &mut features);
        features
    }
}

fn scan_children(children: &[Node], features: &mut SheetFeatures) {
    for child in children {
        match child {
            Node::Rule(rule) => {
                features.insert(SheetFeatures::HAS_RULES);
                scan_children(&rule.children, features);
            }
            Node::Declaration(decl) => {
                if decl.value.references_variables() {
                    features.insert(SheetFeatures::HAS_VARIABLE_REFERENCES);
                }
            }
            Node::MixinCall(call) => {
                features.insert(SheetFeatures::HAS_MIXIN_CALLS);
                if call
                    .args
                    .iter()
                    .filter_map(|arg| arg.value.as_ref())
                    .any(|value| value.references_variables())
                {
                    features.insert(SheetFeatures::HAS_VARIABLE_REFERENCES);
                }
            }
            Node::MixinDefinition(def) => {
                features.insert(SheetFeatures::HAS_MIXIN_DEFINITIONS);
                scan_children(&def.children, features);
            }
            Node::AtRule(at_rule) => {
                features.insert(SheetFeatures::HAS_AT_RULES);
                scan_children(&at_rule.children, features);
            }
            Node::Comment(_) => {}
        }
    }
}
