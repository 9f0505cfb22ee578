//! Every module compiled into the server. The runtime keeps the ones enabled
//! in configuration and orders them by their declared dependencies.

use std::sync::Arc;

use portalkit::Module;

pub fn all() -> Vec<Arc<dyn Module>> {
    let mut modules: Vec<Arc<dyn Module>> = vec![
        Arc::new(auth::AuthModule::default()),
        Arc::new(permission::PermissionModule::default()),
        Arc::new(github_auth_plugin::GithubAuthPlugin),
    ];

    #[cfg(feature = "guest-auth")]
    modules.push(Arc::new(guest_auth_plugin::GuestAuthPlugin));

    modules
}
