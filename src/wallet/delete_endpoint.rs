//! Defines the endpoint for deleting a wallet.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use crate::{
    Error,
    app_state::ResourceState,
    database_id::WalletId,
    ownership::Owned,
    user::UserID,
    wallet::{delete_wallet, get_wallet_by_id},
};

/// A route handler for deleting a wallet and everything in it, only its owner may do this.
pub async fn delete_wallet_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Path(wallet_id), _): WithRejection<Path<WalletId>, Error>,
) -> Result<Json<Value>, Error> {
    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let wallet = get_wallet_by_id(wallet_id, &transaction)?;
    wallet.authorize(user_id, &transaction, "You can't delete a wallet you don't own!")?;

    delete_wallet(wallet.id, &transaction)?;

    transaction.commit()?;
    tracing::info!("user {user_id} deleted wallet {wallet_id}");

    Ok(Json(json!({ "message": "Wallet deleted.", "code": 200 })))
}

#[cfg(test)]
mod tests {
    use axum::{Extension, Json, extract::State};
    use serde_json::json;

    use crate::{
        Error,
        test_utils::{
            must_create_category, must_create_parent_category, must_create_resource_state,
            must_create_test_user, must_create_transaction, must_create_wallet, with_path,
        },
        wallet::get_wallet_by_id,
    };

    use super::delete_wallet_endpoint;

    fn count_rows(table: &str, connection: &rusqlite::Connection) -> i64 {
        connection
            .query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |row| {
                row.get(0)
            })
            .unwrap()
    }

    #[tokio::test]
    async fn deleting_wallet_removes_all_descendants() {
        let state = must_create_resource_state();
        let (alice, wallet) = {
            let connection = state.db_connection.lock().unwrap();
            let alice = must_create_test_user("alice", &connection);
            let wallet = must_create_wallet(alice.id, &connection);
            let parent_category = must_create_parent_category(wallet.id, &connection);
            let category = must_create_category(parent_category.id, &connection);
            must_create_transaction(category.id, alice.id, &connection);
            (alice, wallet)
        };

        let Json(body) =
            delete_wallet_endpoint(State(state.clone()), Extension(alice.id), with_path(wallet.id))
                .await
                .unwrap();

        assert_eq!(body, json!({ "message": "Wallet deleted.", "code": 200 }));

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_wallet_by_id(wallet.id, &connection), Err(Error::NotFound));
        assert_eq!(count_rows("parent_category", &connection), 0);
        assert_eq!(count_rows("category", &connection), 0);
        assert_eq!(count_rows("transaction", &connection), 0);
    }

    #[tokio::test]
    async fn other_user_cannot_delete_wallet() {
        let state = must_create_resource_state();
        let (bob, wallet) = {
            let connection = state.db_connection.lock().unwrap();
            let alice = must_create_test_user("alice", &connection);
            let bob = must_create_test_user("bob", &connection);
            (bob, must_create_wallet(alice.id, &connection))
        };

        let result =
            delete_wallet_endpoint(State(state.clone()), Extension(bob.id), with_path(wallet.id)).await;

        assert!(matches!(result, Err(Error::Forbidden(_))));
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_wallet_by_id(wallet.id, &connection), Ok(wallet));
    }

    #[tokio::test]
    async fn deleting_missing_wallet_is_not_found() {
        let state = must_create_resource_state();
        let alice = must_create_test_user("alice", &state.db_connection.lock().unwrap());

        let result = delete_wallet_endpoint(State(state), Extension(alice.id), with_path(42)).await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
