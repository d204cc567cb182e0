//! HTTP middleware.

pub mod unauthorized;
