//! SeaORM entities
//!
//! Table mappings used by the PostgreSQL adapters.

pub mod users;
