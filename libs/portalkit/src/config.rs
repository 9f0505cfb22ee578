//! Application configuration.
//!
//! Layering (later wins): built-in defaults, the YAML file passed on the
//! command line, then `PORTAL__`-prefixed environment variables with `__` as
//! the nesting separator:
//!
//! ```text
//! PORTAL__SERVER__BIND_ADDR=0.0.0.0:7007
//! PORTAL__MODULES__GITHUB_AUTH__CONFIG__CLIENT_SECRET=...
//! ```
//!
//! Environment keys are lowercased by the loader, so module names are
//! normalized from `github_auth` to `github-auth` after extraction.
//!
//! Environment values are kept as strings: `PORTAL__..._SIGNING_SECRET=0012`
//! stays `"0012"`. Booleans and numbers are interpreted leniently at
//! extraction time (`"true"`, `"on"`, `"3600"`), both here and in
//! [`crate::ModuleCtx::config`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "PORTAL__";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration for module `{module}`: {source}")]
    InvalidModuleConfig {
        module: String,
        #[source]
        source: Box<figment::Error>,
    },
}

/// Source of per-module configuration sections.
pub trait ConfigProvider: Send + Sync {
    /// Raw `config` section of the given module, if present.
    fn get_module_config(&self, module: &str) -> Option<&serde_json::Value>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub modules: BTreeMap<String, ModuleConfig>,
}

impl AppConfig {
    /// Whether `module` should be loaded. Modules without a config section
    /// fall back to `default_enabled`.
    #[must_use]
    pub fn is_module_enabled(&self, module: &str, default_enabled: bool) -> bool {
        self.modules
            .get(module)
            .map_or(default_enabled, |m| m.enabled.unwrap_or(default_enabled))
    }

    fn normalize_module_names(&mut self) {
        let modules = std::mem::take(&mut self.modules);
        for (name, section) in modules {
            let name = name.replace('_', "-");
            match self.modules.get_mut(&name) {
                Some(existing) => existing.merge(section),
                None => {
                    self.modules.insert(name, section);
                }
            }
        }
    }
}

impl ConfigProvider for AppConfig {
    fn get_module_config(&self, module: &str) -> Option<&serde_json::Value> {
        self.modules
            .get(module)
            .map(|m| &m.config)
            .filter(|v| !v.is_null())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:7007".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives used when `RUST_LOG` is not set.
    pub directives: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            directives: "info".to_owned(),
        }
    }
}

/// Per-module section: `modules.<name>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModuleConfig {
    /// Explicit on/off switch. `None` means the module's own default applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Module-specific settings, deserialized by the module itself.
    pub config: serde_json::Value,
}

impl ModuleConfig {
    fn merge(&mut self, other: ModuleConfig) {
        if other.enabled.is_some() {
            self.enabled = other.enabled;
        }
        merge_json(&mut self.config, other.config);
    }
}

fn merge_json(base: &mut serde_json::Value, overlay: serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge_json(base.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (_, serde_json::Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}

/// Load configuration from an optional YAML file plus environment overrides.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if `path` does not exist and
/// [`ConfigError::Load`] if any layer fails to parse.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        figment = figment.merge(Yaml::file(path));
    }
    extract(merge_env(figment))
}

/// Merge `PORTAL__` variables as raw strings, one provider per variable.
fn merge_env(figment: Figment) -> Figment {
    Env::prefixed(ENV_PREFIX)
        .split("__")
        .iter()
        .fold(figment, |figment, (key, value)| {
            figment.merge(Serialized::default(key.as_str(), value))
        })
}

/// Load configuration from a YAML string (no environment layer).
///
/// # Errors
///
/// Returns [`ConfigError::Load`] if the YAML does not match [`AppConfig`].
pub fn load_config_from_str(yaml: &str) -> Result<AppConfig, ConfigError> {
    extract(Figment::from(Serialized::defaults(AppConfig::default())).merge(Yaml::string(yaml)))
}

fn extract(figment: Figment) -> Result<AppConfig, ConfigError> {
    let mut cfg: AppConfig = figment.extract_lossy().map_err(Box::new)?;
    cfg.normalize_module_names();
    Ok(cfg)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_file() {
        let cfg = load_config_from_str("").unwrap();
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:7007");
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert!(cfg.modules.is_empty());
    }

    #[test]
    fn module_sections_are_exposed_through_provider() {
        let cfg = load_config_from_str(
            r#"
modules:
  auth:
    config:
      issuer: "http://localhost:7007/api/auth"
  guest-auth:
    enabled: true
"#,
        )
        .unwrap();

        let auth = cfg.get_module_config("auth").unwrap();
        assert_eq!(auth["issuer"], "http://localhost:7007/api/auth");
        assert!(cfg.get_module_config("guest-auth").is_none());
        assert!(cfg.is_module_enabled("guest-auth", false));
    }

    #[test]
    fn enabled_flag_falls_back_to_module_default() {
        let cfg = load_config_from_str(
            r"
modules:
  permission:
    enabled: false
",
        )
        .unwrap();

        assert!(!cfg.is_module_enabled("permission", true));
        assert!(cfg.is_module_enabled("auth", true));
        assert!(!cfg.is_module_enabled("guest-auth", false));
    }

    #[test]
    fn underscore_module_names_merge_into_dashed_sections() {
        let cfg = load_config_from_str(
            r"
modules:
  github-auth:
    config:
      client_id: abc
  github_auth:
    config:
      client_secret: xyz
",
        )
        .unwrap();

        assert_eq!(cfg.modules.len(), 1);
        let section = cfg.get_module_config("github-auth").unwrap();
        assert_eq!(section["client_id"], "abc");
        assert_eq!(section["client_secret"], "xyz");
    }

    #[test]
    fn unknown_top_level_keys_are_rejected() {
        let err = load_config_from_str("unexpected: 1").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_config(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn loads_yaml_file() {
        figment::Jail::expect_with(|_jail| {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "server:\n  bind_addr: \"0.0.0.0:9000\"").unwrap();

            let cfg = load_config(Some(file.path())).unwrap();
            assert_eq!(cfg.server.bind_addr, "0.0.0.0:9000");
            Ok(())
        });
    }

    const DEV_YAML: &str = r#"
server:
  bind_addr: "127.0.0.1:7007"
modules:
  auth:
    config:
      issuer: "http://localhost:7007/api/auth"
  github-auth:
    enabled: false
  guest-auth:
    enabled: true
"#;

    #[test]
    fn env_overrides_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("portal.yaml", DEV_YAML)?;
            jail.set_env("PORTAL__SERVER__BIND_ADDR", "0.0.0.0:8080");
            jail.set_env(
                "PORTAL__MODULES__AUTH__CONFIG__ISSUER",
                "https://portal.example.com/api/auth",
            );
            jail.set_env("PORTAL__LOGGING__FORMAT", "json");

            let cfg = load_config(Some(Path::new("portal.yaml"))).unwrap();
            assert_eq!(cfg.server.bind_addr, "0.0.0.0:8080");
            assert_eq!(cfg.logging.format, LogFormat::Json);
            assert_eq!(
                cfg.get_module_config("auth").unwrap()["issuer"],
                "https://portal.example.com/api/auth"
            );
            assert!(cfg.is_module_enabled("guest-auth", false));
            Ok(())
        });
    }

    #[test]
    fn env_reenables_dashed_module_disabled_in_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("dev.yaml", DEV_YAML)?;
            assert!(
                !load_config(Some(Path::new("dev.yaml")))
                    .unwrap()
                    .is_module_enabled("github-auth", true)
            );

            jail.set_env("PORTAL__MODULES__GITHUB_AUTH__ENABLED", "true");
            jail.set_env("PORTAL__MODULES__GITHUB_AUTH__CONFIG__CLIENT_ID", "abc");

            let cfg = load_config(Some(Path::new("dev.yaml"))).unwrap();
            assert!(cfg.is_module_enabled("github-auth", false));
            assert!(!cfg.modules.contains_key("github_auth"));
            assert_eq!(cfg.get_module_config("github-auth").unwrap()["client_id"], "abc");
            Ok(())
        });
    }

    #[test]
    fn numeric_looking_env_values_stay_strings() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PORTAL__MODULES__AUTH__CONFIG__SIGNING_SECRET", "123456789012");
            jail.set_env("PORTAL__MODULES__GITHUB_AUTH__CONFIG__CLIENT_SECRET", "0012");

            let cfg = load_config(None).unwrap();
            assert_eq!(
                cfg.get_module_config("auth").unwrap()["signing_secret"],
                "123456789012"
            );
            assert_eq!(
                cfg.get_module_config("github-auth").unwrap()["client_secret"],
                "0012"
            );
            Ok(())
        });
    }
}
