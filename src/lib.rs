//! Wallets is a bookkeeping API for personal finances.
//!
//! Users own wallets, wallets are split into parent categories, parent
//! categories into categories, and transactions are recorded against
//! categories. This library provides a JSON REST API over a SQLite database,
//! secured with signed access tokens.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod auth;
mod category;
mod config;
mod database_id;
mod db;
mod endpoints;
mod fake_data;
mod logging;
mod money;
mod ownership;
mod parent_category;
mod password;
mod routing;
mod transaction;
mod user;
mod validation;
mod wallet;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use config::{Config, Profile};
pub use db::initialize as initialize_db;
pub use fake_data::{FakeDataCounts, populate_fake_data};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use user::{NewUser, User, UserForm, UserID, create_user, get_user_by_username};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request did not carry an access token.
    #[error("Token is missing!")]
    MissingToken,

    /// The access token could not be decoded, has a bad signature or has
    /// expired.
    #[error("Token is invalid!")]
    InvalidToken,

    /// The access token was valid, but the user it refers to no longer exists.
    #[error("Token does not belong to a registered user!")]
    UnknownUser,

    /// The username and password combination given at log-in is wrong.
    ///
    /// Used for both an unknown username and a wrong password so that clients
    /// cannot discover which usernames are registered.
    #[error("Could not verify credentials!")]
    InvalidCredentials,

    /// The authenticated user does not have authority over the resource.
    ///
    /// The string explains which action was refused.
    #[error("{0}")]
    Forbidden(&'static str),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A field in the request body is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The username is already taken by another user.
    #[error("the username is already taken")]
    DuplicateUsername,

    /// The email address is already used by another user.
    #[error("the email address is already in use")]
    DuplicateEmail,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An access token could not be signed.
    #[error("could not create token: {0}")]
    TokenCreation(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.username") =>
            {
                Error::DuplicateUsername
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl Error {
    /// The HTTP status code that the error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingToken
            | Error::InvalidToken
            | Error::UnknownUser
            | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::DuplicateUsername | Error::DuplicateEmail => StatusCode::CONFLICT,
            Error::HashingError(_)
            | Error::TokenCreation(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            // Auth failures only carry a message.
            Error::MissingToken
            | Error::InvalidToken
            | Error::UnknownUser
            | Error::InvalidCredentials => {
                (status, Json(json!({ "message": self.to_string() }))).into_response()
            }
            Error::HashingError(_)
            | Error::TokenCreation(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => {
                // The details are not intended to be shown to the client.
                tracing::error!("An unexpected error occurred: {}", self);
                (
                    status,
                    Json(json!({
                        "message": "An unexpected error occurred, check the server logs for more details.",
                        "code": status.as_u16(),
                    })),
                )
                    .into_response()
            }
            error => (
                status,
                Json(json!({
                    "message": error.to_string(),
                    "code": status.as_u16(),
                })),
            )
                .into_response(),
        }
    }
}
