//! PostgreSQL adapters
//!
//! Connection setup, schema bootstrap and repository implementations using SeaORM.

pub mod user_repo;

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr};

pub use user_repo::PostgresUserRepository;

const USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    name TEXT,
    role TEXT NOT NULL DEFAULT 'user',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Open the connection pool and verify the server answers
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    db.ping().await?;
    Ok(db)
}

/// Create the tables this service owns when they are missing
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(USERS_TABLE).await?;
    Ok(())
}
