//! Dashboard auth token management
//!
//! The private dashboard API is gated by a shared token stored in the
//! settings table. The token is generated on first startup. A value of 0
//! disables the check entirely (useful for local single-user deployments
//! and tests); per-user access control lives in an external user store and
//! is out of scope here.

use crate::Result;
use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;

/// Settings key holding the dashboard token
pub const SHARED_SECRET_KEY: &str = "api_shared_secret";

/// Load the shared token from the settings table, generating and storing a
/// new one if none exists yet.
pub async fn load_shared_secret(db: &SqlitePool) -> Result<i64> {
    let result: Option<(String,)> =
        sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(SHARED_SECRET_KEY)
            .fetch_optional(db)
            .await?;

    match result {
        Some((value,)) => value
            .parse::<i64>()
            .map_err(|e| crate::Error::Config(format!("Invalid shared secret value: {}", e))),
        None => initialize_shared_secret(db).await,
    }
}

/// Generate a random non-zero token and persist it
async fn initialize_shared_secret(db: &SqlitePool) -> Result<i64> {
    let mut rng = rand::thread_rng();
    let mut secret: i64 = 0;
    while secret == 0 {
        secret = rng.gen();
    }

    sqlx::query("INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)")
        .bind(SHARED_SECRET_KEY)
        .bind(secret.to_string())
        .execute(db)
        .await?;

    info!("Initialized dashboard shared secret");
    Ok(secret)
}
