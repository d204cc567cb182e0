//! Session flows: login, federated login, refresh, register.

pub mod manager;

pub use manager::{AuthOutcome, SessionManager};
