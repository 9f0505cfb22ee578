//! Catalog-style entity references: `kind:namespace/name`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_NAMESPACE: &str = "default";
pub const USER_KIND: &str = "user";

/// Reference to a catalog entity.
///
/// The kind is stored lowercased, so `User` and `user` name the same kind.
/// Namespace and name are kept verbatim; callers that need case-insensitive
/// identities (see the GitHub sign-in resolver) fold them before building the ref.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    kind: String,
    namespace: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityRefParseError {
    #[error("entity ref `{0}` has no kind, expected `kind:[namespace/]name`")]
    MissingKind(String),
    #[error("entity ref `{0}` has an empty component")]
    EmptyComponent(String),
}

impl EntityRef {
    #[must_use]
    pub fn new(kind: &str, namespace: &str, name: &str) -> Self {
        Self {
            kind: kind.to_lowercase(),
            namespace: namespace.to_owned(),
            name: name.to_owned(),
        }
    }

    /// `user:default/<name>`
    #[must_use]
    pub fn user(name: &str) -> Self {
        Self::new(USER_KIND, DEFAULT_NAMESPACE, name)
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.kind, self.namespace, self.name)
    }
}

impl FromStr for EntityRef {
    type Err = EntityRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| EntityRefParseError::MissingKind(s.to_owned()))?;
        let (namespace, name) = rest.split_once('/').unwrap_or((DEFAULT_NAMESPACE, rest));

        if kind.is_empty() || namespace.is_empty() || name.is_empty() {
            return Err(EntityRefParseError::EmptyComponent(s.to_owned()));
        }

        Ok(Self::new(kind, namespace, name))
    }
}

impl Serialize for EntityRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
