//! # keygate-api
//!
//! HTTP API layer for Keygate built on Axum.
//!
//! Provides the session endpoints, refresh-cookie handling, extractors,
//! DTOs, and error mapping. The boundary owns two transport contracts: the
//! refresh token travels only in an HttpOnly strict-same-site cookie, and
//! every unauthorized response clears that cookie.

pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
