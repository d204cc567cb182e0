//! Verified federated identity profile.

use serde::{Deserialize, Serialize};

/// A profile handed over by an external identity provider after the
/// authorization-code exchange has already been completed and verified
/// upstream. This crate never talks to the provider itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederatedProfile {
    /// Stable provider-side user identifier.
    pub provider_id: String,
    /// Primary email, if the provider shared one.
    pub email: Option<String>,
    /// Display name, if the provider shared one.
    pub display_name: Option<String>,
}
