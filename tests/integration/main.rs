//! Integration tests for the Keygate HTTP API.
//!
//! These run against a live PostgreSQL instance (`KEYGATE_TEST_DATABASE_URL`,
//! defaulting to a local `keygate_test` database) and are ignored by default.

mod auth_test;
mod helpers;
mod reclaim_test;
