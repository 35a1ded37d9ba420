//! Defines the endpoints for reading transactions.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    app_state::ResourceState,
    database_id::TransactionId,
    transaction::{TransactionJson, get_all_transactions, get_transaction_by_id},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionList {
    pub transactions: Vec<TransactionJson>,
}

pub async fn get_transactions_endpoint(
    State(state): State<ResourceState>,
) -> Result<Json<TransactionList>, Error> {
    let connection = state.connection()?;

    let transactions = get_all_transactions(&connection)?
        .iter()
        .map(|transaction| transaction.to_json(&state.base_url))
        .collect();

    Ok(Json(TransactionList { transactions }))
}

pub async fn get_transaction_endpoint(
    State(state): State<ResourceState>,
    WithRejection(Path(transaction_id), _): WithRejection<Path<TransactionId>, Error>,
) -> Result<Json<TransactionJson>, Error> {
    let connection = state.connection()?;

    let transaction = get_transaction_by_id(transaction_id, &connection)?;

    Ok(Json(transaction.to_json(&state.base_url)))
}

#[cfg(test)]
mod tests {
    use axum::{Json, extract::State};

    use crate::{
        Error,
        test_utils::{
            TEST_BASE_URL, must_create_category, must_create_parent_category,
            must_create_resource_state, must_create_test_user, must_create_transaction,
            must_create_wallet, with_path,
        },
    };

    use super::{get_transaction_endpoint, get_transactions_endpoint};

    #[tokio::test]
    async fn transaction_links_to_category_and_maker() {
        let state = must_create_resource_state();
        let (alice, category, transaction) = {
            let connection = state.db_connection.lock().unwrap();
            let alice = must_create_test_user("alice", &connection);
            let wallet = must_create_wallet(alice.id, &connection);
            let parent_category = must_create_parent_category(wallet.id, &connection);
            let category = must_create_category(parent_category.id, &connection);
            let transaction = must_create_transaction(category.id, alice.id, &connection);
            (alice, category, transaction)
        };

        let Json(json) = get_transaction_endpoint(State(state.clone()), with_path(transaction.id))
            .await
            .unwrap();

        assert_eq!(
            json.category,
            format!("{TEST_BASE_URL}/api/v1.0/categories/{}", category.id)
        );
        assert_eq!(json.maker, format!("{TEST_BASE_URL}/api/v1.0/users/{}", alice.id));

        let Json(list) = get_transactions_endpoint(State(state)).await.unwrap();
        assert_eq!(list.transactions, vec![json]);
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let state = must_create_resource_state();

        let result = get_transaction_endpoint(State(state), with_path(42)).await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
