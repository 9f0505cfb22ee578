//! The set of enabled modules, ordered so that dependencies come first.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::contracts::Module;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("module `{0}` is registered more than once")]
    DuplicateModule(String),

    #[error("module `{module}` depends on unknown module `{dependency}`")]
    MissingDependency { module: String, dependency: String },

    #[error("module `{module}` depends on disabled module `{dependency}`")]
    DisabledDependency { module: String, dependency: String },

    #[error("dependency cycle between modules: {}", modules.join(", "))]
    DependencyCycle { modules: Vec<String> },
}

/// Enabled modules in initialization order.
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.names())
            .finish()
    }
}

impl ModuleRegistry {
    /// Select the enabled modules out of `available` and order them by their
    /// declared dependencies. Among modules whose dependencies are satisfied,
    /// the order of `available` is kept.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateModule`] if two modules share a name
    /// - [`RegistryError::MissingDependency`] if a dependency is not available at all
    /// - [`RegistryError::DisabledDependency`] if a dependency is available but disabled
    /// - [`RegistryError::DependencyCycle`] if the dependency graph has a cycle
    pub fn build<F>(available: Vec<Arc<dyn Module>>, is_enabled: F) -> Result<Self, RegistryError>
    where
        F: Fn(&dyn Module) -> bool,
    {
        let mut known = HashSet::new();
        for module in &available {
            if !known.insert(module.name()) {
                return Err(RegistryError::DuplicateModule(module.name().to_owned()));
            }
        }

        let enabled: Vec<Arc<dyn Module>> = available
            .into_iter()
            .filter(|m| is_enabled(m.as_ref()))
            .collect();
        let index: HashMap<&'static str, usize> = enabled
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name(), i))
            .collect();

        let mut in_degree = vec![0_usize; enabled.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); enabled.len()];
        for (i, module) in enabled.iter().enumerate() {
            for dep in module.deps() {
                let Some(&dep_idx) = index.get(dep) else {
                    let module = module.name().to_owned();
                    let dependency = (*dep).to_owned();
                    return Err(if known.contains(dep) {
                        RegistryError::DisabledDependency { module, dependency }
                    } else {
                        RegistryError::MissingDependency { module, dependency }
                    });
                };
                in_degree[i] += 1;
                dependents[dep_idx].push(i);
            }
        }

        let mut ready: BTreeSet<usize> = (0..enabled.len())
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut order = Vec::with_capacity(enabled.len());
        while let Some(i) = ready.pop_first() {
            order.push(i);
            for &dependent in &dependents[i] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if order.len() < enabled.len() {
            let mut modules: Vec<String> = enabled
                .iter()
                .enumerate()
                .filter(|(i, _)| in_degree[*i] > 0)
                .map(|(_, m)| m.name().to_owned())
                .collect();
            modules.sort();
            return Err(RegistryError::DependencyCycle { modules });
        }

        Ok(Self {
            modules: order.into_iter().map(|i| Arc::clone(&enabled[i])).collect(),
        })
    }

    /// Modules in initialization order.
    #[must_use]
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|m| m.name()).collect()
    }
}
