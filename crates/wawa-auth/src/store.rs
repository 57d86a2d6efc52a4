//! SQLite-backed user accounts

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, params};

use crate::error::AuthError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    email    TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role     TEXT NOT NULL DEFAULT 'user'
);
";

/// A stored account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub role: String,
    /// bcrypt hash
    pub password_hash: String,
}

/// User accounts in a single SQLite database
///
/// Blocking database and hashing work runs on the blocking thread pool.
#[derive(Clone)]
pub struct UserStore {
    conn: Arc<Mutex<Connection>>,
    hash_cost: u32,
}

impl UserStore {
    /// Open (or create) the database at `path` and apply the schema
    pub fn open(path: &Path) -> Result<Self, AuthError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| AuthError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "user store opened");
        Self::initialize(conn)
    }

    /// Throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self, AuthError> {
        Self::initialize(Connection::open_in_memory()?)
    }

    /// Create the `users` table when missing
    fn initialize(conn: Connection) -> Result<Self, AuthError> {
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            hash_cost: bcrypt::DEFAULT_COST,
        })
    }

    /// Override the bcrypt cost for newly created users
    #[must_use]
    pub const fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Look up a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let email = email.to_owned();
        self.with_connection(move |conn| find_by_email(conn, &email)).await
    }

    /// Insert a user, hashing the password
    pub async fn create_user(&self, email: &str, password: &str, role: &str) -> Result<User, AuthError> {
        let (email, password, role) = (email.to_owned(), password.to_owned(), role.to_owned());
        let cost = self.hash_cost;
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let password_hash = bcrypt::hash(&password, cost)?;
            let conn = conn.lock().map_err(|_| AuthError::Poisoned)?;

            match conn.execute(
                "INSERT INTO users (email, password, role) VALUES (?1, ?2, ?3)",
                params![email, password_hash, role],
            ) {
                Ok(_) => {}
                Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == rusqlite::ErrorCode::ConstraintViolation => {
                    return Err(AuthError::DuplicateUser(email));
                }
                Err(e) => return Err(e.into()),
            }

            Ok(User {
                id: conn.last_insert_rowid(),
                email,
                role,
                password_hash,
            })
        })
        .await?
    }

    /// Check an email/password pair, returning the user when it matches
    ///
    /// Unknown emails and wrong passwords both yield `None`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, AuthError> {
        let (email, password) = (email.to_owned(), password.to_owned());
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let user = {
                let conn = conn.lock().map_err(|_| AuthError::Poisoned)?;
                find_by_email(&conn, &email)?
            };

            let Some(user) = user else {
                return Ok(None);
            };

            match bcrypt::verify(&password, &user.password_hash) {
                Ok(true) => Ok(Some(user)),
                Ok(false) => Ok(None),
                Err(e) => {
                    tracing::warn!(email = %user.email, error = %e, "stored password hash is unreadable");
                    Ok(None)
                }
            }
        })
        .await?
    }

    async fn with_connection<T, F>(&self, f: F) -> Result<T, AuthError>
    where
        F: FnOnce(&Connection) -> Result<T, AuthError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| AuthError::Poisoned)?;
            f(&conn)
        })
        .await?
    }
}

fn find_by_email(conn: &Connection, email: &str) -> Result<Option<User>, AuthError> {
    let user = conn
        .query_row(
            "SELECT id, email, password, role FROM users WHERE email = ?1",
            params![email],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password_hash: row.get(2)?,
                    role: row.get(3)?,
                })
            },
        )
        .optional()?;

    Ok(user)
}
