//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `events` - Per-module tracking event storage (the event log)

use std::sync::Arc;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tempfile::TempPath;
use tracing::info;

use crate::error::{Error, Result};

mod events;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

const POOL_SIZE: u32 = 4;

/// Passphrase variable read by [`Database::new`]
pub const DB_KEY_ENV: &str = "ACRE_DB_KEY";

/// Turn a passphrase into a hex SQLCipher key with Argon2
///
/// The salt is fixed per application, not per file, so a farm log can be
/// copied to another machine and opened with the same passphrase.
fn derive_key(passphrase: &str) -> Result<String> {
    use argon2::{password_hash::SaltString, Argon2, PasswordHasher};

    // Part of the on-disk format: every existing encrypted log depends on it
    const APP_SALT: &[u8; 16] = b"acre-salt-v1-fix";

    let salt = SaltString::encode_b64(APP_SALT)
        .map_err(|e| Error::Encryption(format!("Bad application salt: {}", e)))?;

    let hash = Argon2::default()
        .hash_password(passphrase.as_bytes(), &salt)
        .map_err(|e| Error::Encryption(format!("Key derivation failed: {}", e)))?;

    let output = hash
        .hash
        .ok_or_else(|| Error::Encryption("Argon2 produced no output".to_string()))?;
    Ok(hex::encode(output.as_bytes()))
}

/// Handle to the event store
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    db_path: String,
    encrypted: bool,
    /// Backing file of a throwaway store, removed once the last clone drops
    _scratch: Option<Arc<TempPath>>,
}

impl Database {
    /// Open (or create) an encrypted event store at `path`
    ///
    /// The passphrase comes from `ACRE_DB_KEY` and this fails when it is unset.
    /// Use [`Database::new_unencrypted`] for a plain file.
    pub fn new(path: &str) -> Result<Self> {
        let key = std::env::var(DB_KEY_ENV).map_err(|_| {
            Error::Encryption(format!(
                "{} is not set. Export a passphrase or pass --no-encrypt.",
                DB_KEY_ENV
            ))
        })?;
        Self::new_with_key(path, Some(&key))
    }

    /// Open (or create) a plain SQLite event store at `path`
    pub fn new_unencrypted(path: &str) -> Result<Self> {
        Self::new_with_key(path, None)
    }

    /// Open the store with an explicit passphrase, or none for a plain file
    pub fn new_with_key(path: &str, passphrase: Option<&str>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let builder = Pool::builder().max_size(POOL_SIZE);

        let pool = match passphrase {
            Some(pass) => {
                let key_pragma = format!("PRAGMA key = 'x\"{}\"';", derive_key(pass)?);
                // SQLCipher needs the key before any other statement on a connection
                builder.build(manager.with_init(move |conn| conn.execute_batch(&key_pragma)))?
            }
            None => builder.build(manager)?,
        };

        let db = Self {
            pool,
            db_path: path.to_string(),
            encrypted: passphrase.is_some(),
            _scratch: None,
        };
        db.run_migrations()?;

        Ok(db)
    }

    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Unencrypted store in a scratch file that is deleted on drop
    ///
    /// Backed by a file because pooled `:memory:` connections would each see
    /// a separate empty database.
    pub fn in_memory() -> Result<Self> {
        let scratch = tempfile::Builder::new()
            .prefix("acre_")
            .suffix(".db")
            .tempfile()?
            .into_temp_path();

        let mut db = Self::new_unencrypted(&scratch.to_string_lossy())?;
        db._scratch = Some(Arc::new(scratch));
        Ok(db)
    }

    /// Check if the database is encrypted
    pub fn is_encrypted(&self) -> Result<bool> {
        let conn = self.conn()?;
        // SQLCipher reports a cipher_version when it is linked in
        let result: rusqlite::Result<String> =
            conn.query_row("PRAGMA cipher_version;", [], |row| row.get(0));
        Ok(result.is_ok() && self.encrypted)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block writers
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;

            -- Tracking events, one row per logged occurrence
            CREATE TABLE IF NOT EXISTS tracking_events (
                module TEXT NOT NULL,
                id TEXT NOT NULL,
                title TEXT NOT NULL,
                date DATE NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT 'present',  -- past, present, future
                event_type TEXT,                           -- NULL for untyped entries
                progress INTEGER,                          -- 0-100, learning/goal only
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (module, id)
            );

            CREATE INDEX IF NOT EXISTS idx_tracking_events_module_date ON tracking_events(module, date);
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
