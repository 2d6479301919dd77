//! PostgreSQL persistence.
//!
//! - [`PgLinkRepository`] - Link storage, lookups and click accounting
//! - [`connect_pool`] - Pool construction from [`crate::config::Config`]
//! - [`MIGRATOR`] - Embedded schema migrations

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;

use crate::config::Config;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Migrations embedded from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Opens the shared connection pool.
///
/// Checkouts wait at most `DB_ACQUIRE_TIMEOUT` seconds, so an exhausted pool
/// fails the request instead of hanging it.
///
/// # Errors
///
/// Returns an error if the initial connection cannot be established.
pub async fn connect_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
}

/// Applies pending migrations.
///
/// Applied versions are recorded by sqlx, so running this again is a no-op.
///
/// # Errors
///
/// Returns an error if a migration fails or the recorded history diverges.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
