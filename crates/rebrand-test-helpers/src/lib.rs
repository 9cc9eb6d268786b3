//! Test utilities and fixtures for rebrand
//!
//! Builders keep stylesheet trees in tests short enough to read next to the
//! LESS they represent; fixtures provide the reference registry.

pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::{reference_registry, REFERENCE_REGISTRY_YAML};

use rebrand_core::ast::Stylesheet;
use rebrand_core::codegen::to_less;
use rebrand_core::{RebrandStats, VariableRegistry};

/// Run the rebrand pass over `sheet` and return the emitted LESS text.
///
/// # Panics
/// Panics if the tree fails validation.
pub fn rebrand_to_less(mut sheet: Stylesheet, registry: &VariableRegistry) -> String {
    rebrand_core::rebrand(&mut sheet, registry).expect("stylesheet should be valid");
    to_less(&sheet)
}

/// Run the rebrand pass and return the mutated tree with its statistics.
pub fn rebrand_tree(
    mut sheet: Stylesheet,
    registry: &VariableRegistry,
) -> (Stylesheet, RebrandStats) {
    let stats = rebrand_core::rebrand(&mut sheet, registry).expect("stylesheet should be valid");
    (sheet, stats)
}
