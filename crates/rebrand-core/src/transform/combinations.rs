//! Which subsets of touched target classes get their own declaration.
//!
//! For a declaration touching classes `a`, `b`, `c` the resolver yields
//!
//! ```text
//! a      b      c          singles
//! a.b    a.c    b.c        unordered pairs, encounter order
//! a.b.c                    every touched class
//! ```
//!
//! Only singles, pairs and the full set are produced. With four or more
//! touched classes the intermediate subsets (triples of four, ...) are
//! intentionally absent; consumers depend on this exact output shape.

use super::rewrite::{RequiredVariables, TouchMap};

/// One subset of target classes plus the variables renamed together for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationLabel<'r> {
    classes: Vec<&'r str>,
    variables: Vec<&'r str>,
}

impl<'r> CombinationLabel<'r> {
    pub fn new(classes: Vec<&'r str>, variables: Vec<&'r str>) -> Self {
        Self { classes, variables }
    }

    /// Classes joined with `.` in encounter order, e.g.
    /// `rebranding-sizes.rebranding-colors`.
    pub fn name(&self) -> String {
        self.classes
            .iter()
            .map(|class| class.trim_start_matches('.'))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Order-independent identity: labels over the same class set share it.
    pub fn key(&self) -> String {
        let mut classes: Vec<&str> = self
            .classes
            .iter()
            .map(|class| class.trim_start_matches('.'))
            .collect();
        classes.sort_unstable();
        classes.dedup();
        classes.join(".")
    }

    pub fn classes(&self) -> &[&'r str] {
        &self.classes
    }

    pub fn variables(&self) -> &[&'r str] {
        &self.variables
    }

    pub fn required_variables(&self) -> RequiredVariables<'r> {
        self.variables.iter().copied().collect()
    }
}

pub struct CombinationResolver;

impl CombinationResolver {
    /// Expands a touch map into the ordered list of labels to specialize.
    pub fn resolve<'r>(touches: &TouchMap<'r>) -> Vec<CombinationLabel<'r>> {
        let entries: Vec<(&'r str, &[&'r str])> = touches.iter().collect();
        match entries.len() {
            0 => Vec::new(),
            1 => {
                let (class, variables) = entries[0];
                vec![CombinationLabel::new(vec![class], variables.to_vec())]
            }
            _ => Self::expand(&entries),
        }
    }

    fn expand<'r>(entries: &[(&'r str, &[&'r str])]) -> Vec<CombinationLabel<'r>> {
        let mut labels: Vec<CombinationLabel<'r>> = entries
            .iter()
            .map(|(class, variables)| CombinationLabel::new(vec![*class], variables.to_vec()))
            .collect();

        for (i, (first, first_vars)) in entries.iter().enumerate() {
            for (second, second_vars) in &entries[i + 1..] {
                let variables = first_vars.iter().chain(second_vars.iter()).copied();
                labels.push(CombinationLabel::new(
                    vec![*first, *second],
                    variables.collect(),
                ));
            }
        }

        // With exactly two classes the full set is the single pair.
        if entries.len() > 2 {
            let classes = entries.iter().map(|(class, _)| *class).collect();
            let variables = entries
                .iter()
                .flat_map(|(_, variables)| variables.iter().copied())
                .collect();
            labels.push(CombinationLabel::new(classes, variables));
        }

        labels
    }
}
