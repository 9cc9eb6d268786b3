use super::combinations::CombinationLabel;
use crate::ast::Node;
use indexmap::IndexMap;

/// Items collected for one combination label of the enclosing rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRules {
    /// Label spelling used for the selector (first spelling seen wins).
    pub label: String,
    pub items: Vec<Node>,
}

/// Synthesized declarations and mixin calls of the current rule, grouped by
/// combination label in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleAccumulator {
    pending: IndexMap<String, PendingRules>,
}

impl RuleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &CombinationLabel<'_>, item: Node) {
        self.pending
            .entry(label.key())
            .or_insert_with(|| PendingRules {
                label: label.name(),
                items: Vec::new(),
            })
            .items
            .push(item);
    }

    /// Hands out everything collected so far and leaves the accumulator empty.
    pub fn flush(&mut self) -> Vec<PendingRules> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
