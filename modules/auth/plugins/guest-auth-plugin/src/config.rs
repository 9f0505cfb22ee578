//! Configuration for the guest auth plugin.

use auth_sdk::EntityRef;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuestAuthConfig {
    /// Identity every guest session is issued for.
    pub user_entity_ref: EntityRef,
}

impl Default for GuestAuthConfig {
    fn default() -> Self {
        Self {
            user_entity_ref: EntityRef::new("user", "development", "guest"),
        }
    }
}
