//! Session store migration.
//!
//! The storefront keeps each shopper's cart slot in a `tower-sessions`
//! session. With a database configured, sessions live in `PostgreSQL` and
//! the `tower_sessions.session` table has to exist before the storefront
//! starts.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string
//! - `DATABASE_URL` - Fallback when the above is unset

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use tower_sessions_sqlx_store::PostgresStore;

/// Migration failures.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: STOREFRONT_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create the session schema and table.
///
/// # Errors
///
/// Returns an error if no database URL is available or the migration fails.
pub async fn sessions(database_url: Option<String>) -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = resolve_database_url(database_url, |key| std::env::var(key).ok())
        .ok_or(MigrationError::MissingDatabaseUrl)?;

    tracing::info!("Connecting to session database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running session store migration...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Session store migration complete!");
    Ok(())
}

/// Pick the database URL: explicit flag first, then the environment.
fn resolve_database_url(
    flag: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    let present = |url: &String| !url.is_empty();

    flag.filter(present)
        .or_else(|| lookup("STOREFRONT_DATABASE_URL").filter(present))
        .or_else(|| lookup("DATABASE_URL").filter(present))
        .map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(flag: Option<&str>, vars: &[(&str, &str)]) -> Option<String> {
        resolve_database_url(flag.map(str::to_string), |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        })
        .map(|url| url.expose_secret().to_string())
    }

    #[test]
    fn test_flag_wins() {
        assert_eq!(
            resolve(Some("postgres://flag"), &[("DATABASE_URL", "postgres://env")]),
            Some("postgres://flag".to_string())
        );
    }

    #[test]
    fn test_storefront_url_before_generic() {
        assert_eq!(
            resolve(
                None,
                &[
                    ("DATABASE_URL", "postgres://generic"),
                    ("STOREFRONT_DATABASE_URL", "postgres://storefront"),
                ]
            ),
            Some("postgres://storefront".to_string())
        );
    }

    #[test]
    fn test_empty_sources_fall_through() {
        assert_eq!(
            resolve(
                Some(""),
                &[
                    ("STOREFRONT_DATABASE_URL", ""),
                    ("DATABASE_URL", "postgres://generic"),
                ]
            ),
            Some("postgres://generic".to_string())
        );
        assert_eq!(resolve(Some(""), &[("DATABASE_URL", "")]), None);
    }

    #[test]
    fn test_missing_url() {
        assert_eq!(resolve(None, &[]), None);
    }
}
