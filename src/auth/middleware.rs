//! Authentication middleware that validates the access token and resolves the user.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use time::Duration;

use crate::{
    AppState, Error,
    auth::{TokenKeys, token::decode_token},
    user::{UserID, get_user_by_id},
};

/// The header that carries the access token.
pub const TOKEN_HEADER: &str = "x-access-token";

/// The state needed for the auth middleware and log-in.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The keys for signing and verifying access tokens.
    pub token_keys: TokenKeys,
    /// The duration for which access tokens are valid.
    pub token_duration: Duration,
    /// The database connection, used to resolve the user behind a token.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            token_keys: state.token_keys.clone(),
            token_duration: state.token_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Middleware function that checks for a valid access token.
///
/// The user ID is placed into the request and the request executed normally
/// if the token is valid and refers to a registered user, otherwise a 401
/// response is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(State(state): State<AuthState>, mut request: Request, next: Next) -> Response {
    let user_id = match authenticate(request.headers(), &state) {
        Ok(user_id) => user_id,
        Err(error) => return error.into_response(),
    };

    request.extensions_mut().insert(user_id);

    next.run(request).await
}

/// Resolve the user identified by the access token in `headers`.
fn authenticate(headers: &HeaderMap, state: &AuthState) -> Result<UserID, Error> {
    let token = headers
        .get(TOKEN_HEADER)
        .ok_or(Error::MissingToken)?
        .to_str()
        .map_err(|_| Error::InvalidToken)?;

    let claims = decode_token(token, &state.token_keys)?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    match get_user_by_id(claims.user_id, &connection) {
        Ok(user) => Ok(user.id),
        Err(Error::NotFound) => {
            tracing::warn!("valid token for missing user {}", claims.user_id);
            Err(Error::UnknownUser)
        }
        Err(error) => Err(error),
    }
}
