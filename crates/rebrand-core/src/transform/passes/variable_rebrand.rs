// =============================================================================
// Variable Rebrand Pass
// =============================================================================
//
// For every rule whose declarations reference registered variables in an
// applicable property, append child rules scoped to the variables' marker
// classes:
//
//     .card { border: @width @orange; }
//
// becomes
//
//     .card {
//       border: @width @orange;
//       .rebranding-sizes & { border: @width-s3 @orange; }
//       .rebranding-colors & { border: @width @orange-s3; }
//       .rebranding-sizes.rebranding-colors & { border: @width-s3 @orange-s3; }
//     }
//
// Original declarations are never touched. Mixin definition bodies are never
// rewritten; their variables resolve per call site.
//
// =============================================================================

use crate::ast::{
    AtRule, Declaration, MixinCall, MixinDefinition, Node, Rule, Span, Stylesheet,
};
use crate::registry::VariableRegistry;
use crate::transform::accumulator::RuleAccumulator;
use crate::transform::combinations::{CombinationLabel, CombinationResolver};
use crate::transform::rewrite::{ExpressionRewriter, RequiredVariables, Rewritten};
use crate::transform::selector::SelectorSynthesizer;
use crate::transform::visitor::{walk, Visitor};
use crate::transform::{SheetFeatures, StylesheetPass, TransformError};
use tracing::{debug, trace};

/// Where the walker currently is, as far as rewriting is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    /// At the root or inside a top-level at-rule: nothing is rewritten.
    Idle,
    /// Inside a rule, or an at-rule body nested somewhere below a rule.
    InsideRule,
    /// Anywhere below a mixin definition, however deeply nested.
    InsideMacroDefinition,
}

/// Counters for one run of the pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebrandStats {
    pub rules_visited: usize,
    /// Declarations and mixin call statements that produced at least one
    /// specialized copy.
    pub items_rewritten: usize,
    pub rules_synthesized: usize,
}

/// Scoped traversal context, one per entered container node.
#[derive(Debug)]
enum Frame {
    Rule(RuleAccumulator),
    MixinDefinition,
    AtRule,
}

pub struct VariableRebrandPass<'r> {
    registry: &'r VariableRegistry,
    frames: Vec<Frame>,
    macro_depth: usize,
    stats: RebrandStats,
}

impl<'r> VariableRebrandPass<'r> {
    pub fn new(registry: &'r VariableRegistry) -> Self {
        Self {
            registry,
            frames: Vec::new(),
            macro_depth: 0,
            stats: RebrandStats::default(),
        }
    }

    /// Statistics of the most recent run.
    pub fn stats(&self) -> RebrandStats {
        self.stats
    }

    pub fn state(&self) -> WalkState {
        if self.macro_depth > 0 {
            return WalkState::InsideMacroDefinition;
        }
        match self.frames.last() {
            Some(Frame::Rule(_)) => WalkState::InsideRule,
            _ => WalkState::Idle,
        }
    }

    /// Applies the pass to `sheet` directly, without a [`Transformer`].
    ///
    /// [`Transformer`]: crate::transform::Transformer
    pub fn apply(&mut self, sheet: &mut Stylesheet) -> bool {
        self.frames.clear();
        self.macro_depth = 0;
        self.stats = RebrandStats::default();

        let changed = walk(self, sheet);

        debug_assert!(self.frames.is_empty(), "unbalanced traversal frames");
        debug!(
            rules_visited = self.stats.rules_visited,
            items_rewritten = self.stats.items_rewritten,
            rules_synthesized = self.stats.rules_synthesized,
            "Variable rebrand finished"
        );
        changed
    }

    fn pending_mut(&mut self) -> Option<&mut RuleAccumulator> {
        match self.frames.last_mut() {
            Some(Frame::Rule(pending)) => Some(pending),
            _ => None,
        }
    }

    /// Turns the unrestricted rewrite into one value per combination label.
    ///
    /// A single touched class reuses the unrestricted result; several classes
    /// are rewritten again once per label with only that label's variables.
    fn specialize<T>(
        first: Rewritten<'r, T>,
        mut rewrite_for: impl FnMut(&RequiredVariables<'r>) -> T,
    ) -> Vec<(CombinationLabel<'r>, T)> {
        let mut labels = CombinationResolver::resolve(&first.touches);
        if labels.len() == 1 {
            if let Some(label) = labels.pop() {
                return vec![(label, first.value)];
            }
        }
        labels
            .into_iter()
            .map(|label| {
                let value = rewrite_for(&label.required_variables());
                (label, value)
            })
            .collect()
    }

    /// Inserts one `.label &` rule per pending label into `children`.
    fn splice(
        &mut self,
        children: &mut Vec<Node>,
        mut pending: RuleAccumulator,
        span: Span,
    ) -> bool {
        if pending.is_empty() {
            return false;
        }
        let mut position = insertion_index(children);
        for group in pending.flush() {
            debug!(
                label = %group.label,
                items = group.items.len(),
                "Synthesized rebrand rule"
            );
            let selector = SelectorSynthesizer::build(&group.label, span);
            children.insert(position, Node::Rule(Rule::new(vec![selector], group.items)));
            position += 1;
            self.stats.rules_synthesized += 1;
        }
        true
    }

    fn accumulate(&mut self, specialized: Vec<(CombinationLabel<'r>, Node)>) {
        if specialized.is_empty() {
            return;
        }
        self.stats.items_rewritten += 1;
        if let Some(pending) = self.pending_mut() {
            for (label, item) in specialized {
                trace!(label = %label.name(), "Queued specialized item");
                pending.add(&label, item);
            }
        }
    }
}

/// Property name used to check applicability of a mixin call statement:
/// the last path element without its `.` or `#` prefix.
///
/// This is a rule of its own. It does not look at the property of the
/// preceding declaration, so a call's applicability never depends on what
/// came before it in the rule.
fn mixin_property(call: &MixinCall) -> &str {
    call.path
        .last()
        .map(|segment| segment.trim_start_matches(&['.', '#'][..]))
        .unwrap_or_default()
}

/// Synthesized rules go before the first nested rule that has a selector,
/// or at the end when there is none.
fn insertion_index(children: &[Node]) -> usize {
    children
        .iter()
        .position(|child| matches!(child, Node::Rule(rule) if !rule.selectors.is_empty()))
        .unwrap_or(children.len())
}

impl<'r> Visitor for VariableRebrandPass<'r> {
    fn enter_rule(&mut self, _rule: &Rule) {
        self.stats.rules_visited += 1;
        self.frames.push(Frame::Rule(RuleAccumulator::new()));
    }

    fn exit_rule(&mut self, rule: &mut Rule) -> bool {
        let Some(Frame::Rule(pending)) = self.frames.pop() else {
            return false;
        };
        let span = rule
            .selectors
            .first()
            .map(|selector| selector.span)
            .unwrap_or_default();
        self.splice(&mut rule.children, pending, span)
    }

    fn visit_declaration(&mut self, decl: &Declaration) {
        if self.state() != WalkState::InsideRule {
            return;
        }
        let rewriter = ExpressionRewriter::new(self.registry);
        let first = rewriter.rewrite(&decl.value, &decl.name, None);
        if first.touches.is_empty() {
            return;
        }

        let specialized = Self::specialize(first, |required| {
            rewriter
                .rewrite(&decl.value, &decl.name, Some(required))
                .value
        })
        .into_iter()
        .map(|(label, value)| {
            let node = Node::Declaration(Declaration {
                name: decl.name.clone(),
                value,
                important: decl.important,
            });
            (label, node)
        })
        .collect();
        self.accumulate(specialized);
    }

    fn visit_mixin_call(&mut self, call: &MixinCall) {
        if self.state() != WalkState::InsideRule {
            return;
        }
        let property = mixin_property(call);
        let rewriter = ExpressionRewriter::new(self.registry);
        let first = rewriter.rewrite_mixin_call(call, property, None);
        if first.touches.is_empty() {
            return;
        }

        let specialized = Self::specialize(first, |required| {
            rewriter
                .rewrite_mixin_call(call, property, Some(required))
                .value
        })
        .into_iter()
        .map(|(label, value)| (label, Node::MixinCall(value)))
        .collect();
        self.accumulate(specialized);
    }

    fn enter_mixin_definition(&mut self, _def: &MixinDefinition) {
        self.macro_depth += 1;
        self.frames.push(Frame::MixinDefinition);
    }

    fn exit_mixin_definition(&mut self, _def: &mut MixinDefinition) -> bool {
        if let Some(Frame::MixinDefinition) = self.frames.pop() {
            self.macro_depth -= 1;
        }
        false
    }

    fn enter_at_rule(&mut self, _at_rule: &AtRule) {
        let nested_in_rule = self
            .frames
            .iter()
            .any(|frame| matches!(frame, Frame::Rule(_)));
        if nested_in_rule {
            self.frames.push(Frame::Rule(RuleAccumulator::new()));
        } else {
            self.frames.push(Frame::AtRule);
        }
    }

    fn exit_at_rule(&mut self, at_rule: &mut AtRule) -> bool {
        match self.frames.pop() {
            Some(Frame::Rule(pending)) => self.splice(&mut at_rule.children, pending, Span::default()),
            _ => false,
        }
    }
}

impl<'r> StylesheetPass for VariableRebrandPass<'r> {
    fn name(&self) -> &'static str {
        "variable-rebrand"
    }

    fn required_features(&self) -> SheetFeatures {
        SheetFeatures::HAS_RULES | SheetFeatures::HAS_VARIABLE_REFERENCES
    }

    fn run(&mut self, sheet: &mut Stylesheet) -> Result<bool, TransformError> {
        Ok(self.apply(sheet))
    }
}
