use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

use auth_sdk::{AuthError, AuthProvider, AuthProviderRegistry};
use parking_lot::RwLock;
use tracing::info;

/// In-memory provider table, written during plugin init and read per request.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<BTreeMap<String, Arc<dyn AuthProvider>>>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthProviderRegistry for ProviderRegistry {
    fn register_provider(
        &self,
        provider_id: &str,
        provider: Arc<dyn AuthProvider>,
    ) -> Result<(), AuthError> {
        match self.providers.write().entry(provider_id.to_owned()) {
            Entry::Occupied(_) => Err(AuthError::ProviderConflict(provider_id.to_owned())),
            Entry::Vacant(slot) => {
                slot.insert(provider);
                info!(provider_id, "Registered auth provider");
                Ok(())
            }
        }
    }

    fn get(&self, provider_id: &str) -> Result<Arc<dyn AuthProvider>, AuthError> {
        self.providers
            .read()
            .get(provider_id)
            .cloned()
            .ok_or_else(|| AuthError::ProviderNotFound(provider_id.to_owned()))
    }

    fn provider_ids(&self) -> Vec<String> {
        self.providers.read().keys().cloned().collect()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    struct NoopProvider;

    impl AuthProvider for NoopProvider {}

    #[test]
    fn register_and_get() {
        let registry = ProviderRegistry::new();
        registry
            .register_provider("github", Arc::new(NoopProvider))
            .unwrap();
        assert!(registry.get("github").is_ok());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let registry = ProviderRegistry::new();
        registry
            .register_provider("github", Arc::new(NoopProvider))
            .unwrap();

        let err = registry
            .register_provider("github", Arc::new(NoopProvider))
            .unwrap_err();
        assert!(matches!(err, AuthError::ProviderConflict(id) if id == "github"));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let err = ProviderRegistry::new().get("gitlab").err().unwrap();
        assert!(matches!(err, AuthError::ProviderNotFound(id) if id == "gitlab"));
    }

    #[test]
    fn ids_are_sorted() {
        let registry = ProviderRegistry::new();
        for id in ["guest", "github", "atlassian"] {
            registry.register_provider(id, Arc::new(NoopProvider)).unwrap();
        }
        assert_eq!(registry.provider_ids(), vec!["atlassian", "github", "guest"]);
    }
}
