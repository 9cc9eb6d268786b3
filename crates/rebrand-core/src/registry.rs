//! Lookup table of migratable variables.

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use thiserror::Error;

/// One migratable variable: which marker class activates it, what it is
/// renamed to, and which properties it may be rewritten in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableBinding {
    pub source_name: String,
    pub target_class: String,
    pub renamed_name: String,
    pub applicable_properties: FxHashSet<String>,
}

impl VariableBinding {
    pub fn new<I, S>(
        source_name: impl Into<String>,
        target_class: impl Into<String>,
        renamed_name: impl Into<String>,
        applicable_properties: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_name: source_name.into(),
            target_class: target_class.into(),
            renamed_name: renamed_name.into(),
            applicable_properties: applicable_properties.into_iter().map(Into::into).collect(),
        }
    }

    /// Case-sensitive applicability check.
    pub fn applies_to(&self, property: &str) -> bool {
        self.applicable_properties.contains(property)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("variable binding has an empty name")]
    EmptyName,

    #[error("variable '{0}' has no target class")]
    EmptyTargetClass(String),

    #[error("variable '{0}' has no applicable properties")]
    NoApplicableProperties(String),

    #[error("variable '{0}' is registered twice")]
    DuplicateVariable(String),

    #[error("variable '{0}' is renamed to itself")]
    RenamesToItself(String),

    /// A renamed name that is also a registry key would be rewritten again
    /// on a second run.
    #[error("renamed name '{renamed}' of '{source_name}' collides with registered variable")]
    RenameCollision {
        source_name: String,
        renamed: String,
    },
}

/// Read-only table of [`VariableBinding`]s keyed by source variable name.
///
/// Registration order is preserved; lookups are O(1).
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    bindings: IndexMap<String, VariableBinding, FxBuildHasher>,
    renamed: FxHashSet<String>,
}

impl VariableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from bindings, rejecting the first invalid one.
    pub fn from_bindings(
        bindings: impl IntoIterator<Item = VariableBinding>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for binding in bindings {
            registry.insert(binding)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, binding: VariableBinding) -> Result<(), RegistryError> {
        if binding.source_name.is_empty() || binding.renamed_name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if binding.target_class.trim_start_matches('.').is_empty() {
            return Err(RegistryError::EmptyTargetClass(binding.source_name));
        }
        if binding.applicable_properties.is_empty() {
            return Err(RegistryError::NoApplicableProperties(binding.source_name));
        }
        if binding.source_name == binding.renamed_name {
            return Err(RegistryError::RenamesToItself(binding.source_name));
        }
        if self.bindings.contains_key(&binding.source_name) {
            return Err(RegistryError::DuplicateVariable(binding.source_name));
        }
        if self.bindings.contains_key(&binding.renamed_name) {
            return Err(RegistryError::RenameCollision {
                source_name: binding.source_name,
                renamed: binding.renamed_name,
            });
        }
        if self.renamed.contains(&binding.source_name) {
            let owner = self
                .bindings
                .values()
                .find(|existing| existing.renamed_name == binding.source_name)
                .map(|existing| existing.source_name.clone())
                .unwrap_or_default();
            return Err(RegistryError::RenameCollision {
                source_name: owner,
                renamed: binding.source_name,
            });
        }

        self.renamed.insert(binding.renamed_name.clone());
        self.bindings.insert(binding.source_name.clone(), binding);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&VariableBinding> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &VariableBinding> {
        self.bindings.values()
    }

    /// Distinct target classes in registration order.
    pub fn target_classes(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.bindings
            .values()
            .map(|binding| binding.target_class.as_str())
            .filter(|class| seen.insert(*class))
            .collect()
    }
}
