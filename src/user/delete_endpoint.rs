//! Defines the endpoint for deleting a user and everything they own.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{
    Error,
    app_state::ResourceState,
    ownership::Owned,
    transaction::delete_transactions_by_maker,
    user::{UserID, get_user_by_id},
    wallet::{delete_wallet, select_wallet_ids_by_owner},
};

/// A route handler for deleting a user, only the user themself may do this.
pub async fn delete_user_endpoint(
    State(state): State<ResourceState>,
    Extension(current_user): Extension<UserID>,
    WithRejection(Path(user_id), _): WithRejection<Path<i64>, Error>,
) -> Result<Json<Value>, Error> {
    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let user = get_user_by_id(UserID::new(user_id), &transaction)?;
    user.authorize(current_user, &transaction, "You can't delete other users!")?;

    delete_user(user.id, &transaction)?;

    transaction.commit()?;
    tracing::info!("deleted user {}", user.id);

    Ok(Json(json!({ "message": "User deleted.", "code": 200 })))
}

/// Delete the user with `user_id`.
///
/// The user's wallets are deleted first, along with everything in them, then
/// any transactions the user made in other users' wallets. Run this inside a
/// transaction so a failure part way does not leave the user half deleted.
///
/// # Errors
///
/// Returns [Error::NotFound] if there is no such user.
pub fn delete_user(user_id: UserID, connection: &Connection) -> Result<(), Error> {
    for wallet_id in select_wallet_ids_by_owner(user_id, connection)? {
        delete_wallet(wallet_id, connection)?;
    }

    delete_transactions_by_maker(user_id, connection)?;

    let rows_affected =
        connection.execute("DELETE FROM user WHERE id = ?1", [user_id.as_i64()])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}
