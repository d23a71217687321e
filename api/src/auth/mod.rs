//! Authentication
//!
//! Password hashing, signed tokens and the bearer middleware guarding protected routes.

pub mod bearer;
pub mod password;
pub mod token;

pub use bearer::auth_middleware;
