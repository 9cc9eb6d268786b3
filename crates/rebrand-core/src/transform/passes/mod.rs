mod variable_rebrand;
pub use variable_rebrand::{RebrandStats, VariableRebrandPass, WalkState};
