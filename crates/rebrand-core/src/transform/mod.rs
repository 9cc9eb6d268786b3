//! Pass infrastructure and the variable rebrand transform.
//!
//! ```text
//! Transformer
//!  ├─ Stylesheet::validate          (structural check, hard error)
//!  ├─ SheetFeatures::scan            (skip passes with nothing to do)
//!  └─ StylesheetPass::run
//!       └─ VariableRebrandPass       (Visitor, driven by `walk`)
//!            ├─ ExpressionRewriter   (rewrite.rs)
//!            ├─ CombinationResolver  (combinations.rs)
//!            ├─ RuleAccumulator      (accumulator.rs)
//!            └─ SelectorSynthesizer  (selector.rs)
//! ```

pub mod accumulator;
pub mod combinations;
mod features;
pub mod passes;
pub mod rewrite;
pub mod selector;
pub mod visitor;

pub use accumulator::{PendingRules, RuleAccumulator};
pub use combinations::{CombinationLabel, CombinationResolver};
pub use features::SheetFeatures;
pub use passes::{RebrandStats, VariableRebrandPass, WalkState};
pub use rewrite::{ExpressionRewriter, RequiredVariables, Rewritten, TouchMap};
pub use selector::SelectorSynthesizer;
pub use visitor::{walk, Visitor};

use crate::ast::{Stylesheet, TreeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("invalid stylesheet tree: {0}")]
    InvalidTree(#[from] TreeError),
}

/// A whole-stylesheet transformation.
pub trait StylesheetPass {
    fn name(&self) -> &'static str;

    /// Features the stylesheet must have for this pass to do anything.
    fn required_features(&self) -> SheetFeatures {
        SheetFeatures::empty()
    }

    /// Returns whether the tree changed.
    fn run(&mut self, sheet: &mut Stylesheet) -> Result<bool, TransformError>;
}

impl<P: StylesheetPass + ?Sized> StylesheetPass for &mut P {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn required_features(&self) -> SheetFeatures {
        (**self).required_features()
    }

    fn run(&mut self, sheet: &mut Stylesheet) -> Result<bool, TransformError> {
        (**self).run(sheet)
    }
}

/// Runs registered passes in order over a validated stylesheet.
#[derive(Default)]
pub struct Transformer<'p> {
    passes: Vec<Box<dyn StylesheetPass + 'p>>,
}

impl<'p> Transformer<'p> {
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    pub fn with_pass(mut self, pass: impl StylesheetPass + 'p) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn run(&mut self, sheet: &mut Stylesheet) -> Result<bool, TransformError> {
        sheet.validate()?;
        let features = SheetFeatures::scan(sheet);

        let mut changed = false;
        for pass in &mut self.passes {
            let required = pass.required_features();
            if !features.contains(required) {
                tracing::debug!(
                    pass = pass.name(),
                    missing = ?(required - features),
                    "Skipping pass"
                );
                continue;
            }
            let pass_changed = pass.run(sheet)?;
            tracing::debug!(pass = pass.name(), changed = pass_changed, "Pass finished");
            changed |= pass_changed;
        }
        Ok(changed)
    }
}
