//! Pre-evaluation stylesheet pass that adds rebranded variable rules.
//!
//! Given a registry of "migratable" variables, every rule whose declarations
//! use one of them in an applicable property gains child rules of the form
//! `.target-class & { prop: renamed-variable }`. Documents that opt into the
//! marker class pick up the new variable without touching the original rule.

pub mod ast;
pub mod codegen;
pub mod config;
pub mod registry;
pub mod transform;

pub use ast::{Node, Rule, Stylesheet, TreeError};
pub use config::{ConfigError, RegistryConfig};
pub use registry::{RegistryError, VariableBinding, VariableRegistry};
pub use transform::{RebrandStats, TransformError, Transformer, VariableRebrandPass};

/// Validates `sheet` and runs the rebrand pass over it.
pub fn rebrand(
    sheet: &mut Stylesheet,
    registry: &VariableRegistry,
) -> Result<RebrandStats, TransformError> {
    let mut pass = VariableRebrandPass::new(registry);
    Transformer::new().with_pass(&mut pass).run(sheet)?;
    Ok(pass.stats())
}
