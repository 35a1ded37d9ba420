//! Defines the endpoints for reading users.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    app_state::ResourceState,
    user::{UserID, UserJson, get_all_users, get_user_by_id},
};

/// The response body listing every user.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    /// Every registered user.
    pub users: Vec<UserJson>,
}

/// A route handler that lists every user.
pub async fn get_users_endpoint(
    State(state): State<ResourceState>,
) -> Result<Json<UserList>, Error> {
    let connection = state.connection()?;

    let users = get_all_users(&connection)?
        .iter()
        .map(|user| user.to_json(&state.base_url, &connection))
        .collect::<Result<_, _>>()?;

    Ok(Json(UserList { users }))
}

/// A route handler for fetching a single user.
pub async fn get_user_endpoint(
    State(state): State<ResourceState>,
    WithRejection(Path(user_id), _): WithRejection<Path<i64>, Error>,
) -> Result<Json<UserJson>, Error> {
    let connection = state.connection()?;

    let user = get_user_by_id(UserID::new(user_id), &connection)?;

    Ok(Json(user.to_json(&state.base_url, &connection)?))
}
