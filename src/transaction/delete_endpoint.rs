//! Defines the endpoint for deleting a transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use crate::{
    Error,
    app_state::ResourceState,
    database_id::TransactionId,
    ownership::Owned,
    transaction::{delete_transaction, get_transaction_by_id},
    user::UserID,
};

/// A route handler for deleting a transaction, only its maker may do this.
pub async fn delete_transaction_endpoint(
    State(state): State<ResourceState>,
    Extension(user_id): Extension<UserID>,
    WithRejection(Path(transaction_id), _): WithRejection<Path<TransactionId>, Error>,
) -> Result<Json<Value>, Error> {
    let mut connection = state.connection()?;
    let transaction = connection.transaction()?;

    let record = get_transaction_by_id(transaction_id, &transaction)?;
    record.authorize(
        user_id,
        &transaction,
        "You can't delete a transaction you didn't make!",
    )?;

    delete_transaction(record.id, &transaction)?;

    transaction.commit()?;
    tracing::info!("user {user_id} deleted transaction {transaction_id}");

    Ok(Json(json!({ "message": "Transaction deleted.", "code": 200 })))
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
        transaction::get_transaction_by_id,
    };

    use super::delete_transaction_endpoint;

    #[tokio::test]
    async fn maker_can_delete_transaction() {
        let state = must_create_resource_state();
        let (bob, transaction) = {
            let connection = state.db_connection.lock().unwrap();
            let alice = must_create_test_user("alice", &connection);
            let bob = must_create_test_user("bob", &connection);
            let wallet = must_create_wallet(alice.id, &connection);
            let parent_category = must_create_parent_category(wallet.id, &connection);
            let category = must_create_category(parent_category.id, &connection);
            let transaction = must_create_transaction(category.id, bob.id, &connection);
            (bob, transaction)
        };

        let Json(body) =
            delete_transaction_endpoint(State(state.clone()), Extension(bob.id), with_path(transaction.id))
                .await
                .unwrap();

        assert_eq!(body, json!({ "message": "Transaction deleted.", "code": 200 }));
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_transaction_by_id(transaction.id, &connection),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn other_user_cannot_delete_transaction() {
        let state = must_create_resource_state();
        let (bob, transaction) = {
            let connection = state.db_connection.lock().unwrap();
            let alice = must_create_test_user("alice", &connection);
            let bob = must_create_test_user("bob", &connection);
            let wallet = must_create_wallet(alice.id, &connection);
            let parent_category = must_create_parent_category(wallet.id, &connection);
            let category = must_create_category(parent_category.id, &connection);
            (bob, must_create_transaction(category.id, alice.id, &connection))
        };

        let result =
            delete_transaction_endpoint(State(state.clone()), Extension(bob.id), with_path(transaction.id))
                .await;

        assert!(matches!(result, Err(Error::Forbidden(_))));
        let connection = state.db_connection.lock().unwrap();
        assert!(get_transaction_by_id(transaction.id, &connection).is_ok());
    }
}
