//! Typed client registry shared by all modules.
//!
//! Modules register the capabilities they provide during `init()` and fetch
//! the capabilities they consume by trait type:
//!
//! ```ignore
//! let api: Arc<dyn TokenIssuer> = Arc::new(service);
//! ctx.client_hub().register::<dyn TokenIssuer>(api);
//!
//! let issuer = ctx.client_hub().get::<dyn TokenIssuer>()?;
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum ClientHubError {
    #[error("client `{type_name}` is not registered")]
    NotFound { type_name: &'static str },
}

/// Process-wide registry of `Arc<T>` clients keyed by type.
///
/// Written during module init, read on every request afterwards.
#[derive(Default)]
pub struct ClientHub {
    clients: RwLock<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl ClientHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the client for `T`.
    pub fn register<T>(&self, client: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        tracing::debug!(client = std::any::type_name::<T>(), "registering client");
        self.clients.write().insert(TypeId::of::<T>(), Box::new(client));
    }

    /// Fetch the client for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientHubError::NotFound`] if nothing was registered for `T`.
    pub fn get<T>(&self) -> Result<Arc<T>, ClientHubError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.clients
            .read()
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<Arc<T>>())
            .cloned()
            .ok_or_else(|| ClientHubError::NotFound {
                type_name: std::any::type_name::<T>(),
            })
    }
}
