//! Scheduled job handlers.

pub mod reclaim;
