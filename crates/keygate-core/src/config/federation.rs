//! Federated identity configuration.

use serde::{Deserialize, Serialize};

/// Federated login (external identity provider) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederationConfig {
    /// When true, a federated login whose email matches an existing account
    /// signs into that account directly. When false, the login is refused
    /// until the account has been linked to the provider explicitly. Keep
    /// this off unless the provider guarantees verified email ownership.
    #[serde(default = "default_true")]
    pub auto_link_accounts: bool,
    /// Frontend base URL used for the post-login redirect.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
}

impl Default for FederationConfig {
    fn default() -> Self {
        Self {
            auto_link_accounts: true,
            frontend_url: default_frontend_url(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}
