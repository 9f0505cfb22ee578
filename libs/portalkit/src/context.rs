use std::sync::Arc;

use figment::Figment;
use figment::providers::Serialized;
use serde::de::DeserializeOwned;

use crate::client_hub::ClientHub;
use crate::config::{ConfigError, ConfigProvider};

/// Everything a module sees of the host during `init()` and route registration.
#[derive(Clone)]
pub struct ModuleCtx {
    module_name: Arc<str>,
    config_provider: Arc<dyn ConfigProvider>,
    client_hub: Arc<ClientHub>,
}

impl ModuleCtx {
    #[must_use]
    pub fn new(
        module_name: &str,
        config_provider: Arc<dyn ConfigProvider>,
        client_hub: Arc<ClientHub>,
    ) -> Self {
        Self {
            module_name: Arc::from(module_name),
            config_provider,
            client_hub,
        }
    }

    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    #[must_use]
    pub fn client_hub(&self) -> Arc<ClientHub> {
        Arc::clone(&self.client_hub)
    }

    /// Deserialize this module's `config` section.
    ///
    /// A missing section deserializes from an empty object, so config types
    /// marked `#[serde(default)]` get their defaults. Strings such as `"true"`
    /// or `"3600"` from environment overrides are accepted for bool and number
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidModuleConfig`] when the section does not
    /// match `T`.
    pub fn config<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        let raw = self
            .config_provider
            .get_module_config(&self.module_name)
            .cloned()
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        Figment::from(Serialized::defaults(raw))
            .extract_lossy()
            .map_err(|source| ConfigError::InvalidModuleConfig {
                module: self.module_name.to_string(),
                source: Box::new(source),
            })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    struct StaticConfig(serde_json::Value);

    impl ConfigProvider for StaticConfig {
        fn get_module_config(&self, module: &str) -> Option<&serde_json::Value> {
            self.0.get(module)
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(default, deny_unknown_fields)]
    struct SampleConfig {
        name: String,
        retries: u32,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self {
                name: "sample".to_owned(),
                retries: 3,
            }
        }
    }

    fn ctx(config: serde_json::Value) -> ModuleCtx {
        ModuleCtx::new("sample", Arc::new(StaticConfig(config)), Arc::new(ClientHub::new()))
    }

    #[test]
    fn missing_section_yields_defaults() {
        let cfg: SampleConfig = ctx(json!({})).config().unwrap();
        assert_eq!(cfg, SampleConfig::default());
    }

    #[test]
    fn section_overrides_defaults() {
        let cfg: SampleConfig = ctx(json!({"sample": {"retries": 7}})).config().unwrap();
        assert_eq!(cfg.retries, 7);
        assert_eq!(cfg.name, "sample");
    }

    #[test]
    fn invalid_section_names_module() {
        let err = ctx(json!({"sample": {"bogus": true}}))
            .config::<SampleConfig>()
            .unwrap_err();
        match err {
            ConfigError::InvalidModuleConfig { module, .. } => assert_eq!(module, "sample"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn string_values_are_interpreted_for_typed_fields() {
        #[derive(Debug, Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Typed {
            secret: String,
            enabled: bool,
            timeout_secs: u64,
        }

        let cfg: Typed = ctx(json!({"sample": {
            "secret": "0012",
            "enabled": "true",
            "timeout_secs": "30"
        }}))
        .config()
        .unwrap();

        assert_eq!(cfg.secret, "0012");
        assert!(cfg.enabled);
        assert_eq!(cfg.timeout_secs, 30);
    }
}
