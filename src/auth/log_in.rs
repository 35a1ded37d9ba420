//! The log-in route which exchanges basic auth credentials for an access token.

use axum::{Json, extract::State};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::{AuthState, create_token},
    user::get_user_by_username,
};

/// The response body for a successful log-in.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    /// The signed access token to send in the `x-access-token` header.
    pub token: String,
}

/// Handler for log-in requests.
///
/// The username and password are read from the `Authorization: Basic` header.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if the header is missing, the user does
/// not exist or the password is wrong. The three cases are indistinguishable
/// to the client.
pub async fn post_log_in(
    State(state): State<AuthState>,
    authorization: Option<TypedHeader<Authorization<Basic>>>,
) -> Result<Json<TokenResponse>, Error> {
    let Some(TypedHeader(Authorization(credentials))) = authorization else {
        return Err(Error::InvalidCredentials);
    };

    let user = {
        let connection = state.db_connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        match get_user_by_username(credentials.username(), &connection) {
            Ok(user) => user,
            Err(Error::NotFound) => {
                tracing::info!("log-in attempt for unknown user {}", credentials.username());
                return Err(Error::InvalidCredentials);
            }
            Err(error) => return Err(error),
        }
    };

    let is_password_valid = user
        .password_hash
        .verify(credentials.password())
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !is_password_valid {
        tracing::info!("wrong password for user {}", user.id);
        return Err(Error::InvalidCredentials);
    }

    let token = create_token(user.id, state.token_duration, &state.token_keys)?;

    Ok(Json(TokenResponse { token }))
}
