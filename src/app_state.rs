//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use rusqlite::Connection;
use time::Duration;

use crate::{
    Config, Error, PasswordHash,
    auth::{DEFAULT_TOKEN_DURATION, TokenKeys},
    db::initialize,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The keys for signing and verifying access tokens.
    pub token_keys: TokenKeys,

    /// The duration for which access tokens are valid.
    pub token_duration: Duration,

    /// The prefix for absolute links in responses, e.g. "http://localhost:3000".
    pub base_url: String,

    /// The bcrypt cost used when hashing new passwords.
    pub password_cost: u32,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `base_url` must not end with a slash.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection, secret: &str, base_url: &str) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            token_keys: TokenKeys::from_secret(secret),
            token_duration: DEFAULT_TOKEN_DURATION,
            base_url: base_url.to_owned(),
            password_cost: PasswordHash::DEFAULT_COST,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }

    /// Create the state from a loaded [Config].
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or initialized.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let connection = Connection::open(&config.database_path)?;

        Self::new(connection, &config.secret, &config.base_url)
    }
}

/// The state needed by the resource handlers.
#[derive(Debug, Clone)]
pub struct ResourceState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The prefix for absolute links in responses.
    pub base_url: String,
    /// The bcrypt cost used when hashing new passwords.
    pub password_cost: u32,
}

impl FromRef<AppState> for ResourceState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            base_url: state.base_url.clone(),
            password_cost: state.password_cost,
        }
    }
}

impl ResourceState {
    /// Acquire the database connection.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock is poisoned.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}
