//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory ports are plain structs rather than mockall mocks so tests can
//! seed them and inspect what was stored afterwards. The notifier port, which
//! only needs call expectations, uses the generated `MockPartnershipNotifier`.
//!
//! `test_server` wires every in-memory port into the real router for E2E tests
//! with axum-test.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
