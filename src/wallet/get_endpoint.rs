//! Defines the endpoints for reading wallets.

use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    app_state::ResourceState,
    database_id::WalletId,
    wallet::{WalletJson, get_all_wallets, get_wallet_by_id},
};

/// The response body listing every wallet.
#[derive(Debug, Serialize, Deserialize)]
pub struct WalletList {
    pub wallets: Vec<WalletJson>,
}

/// A route handler that lists every wallet.
pub async fn get_wallets_endpoint(
    State(state): State<ResourceState>,
) -> Result<Json<WalletList>, Error> {
    let connection = state.connection()?;

    let wallets = get_all_wallets(&connection)?
        .iter()
        .map(|wallet| wallet.to_json(&state.base_url, &connection))
        .collect::<Result<_, _>>()?;

    Ok(Json(WalletList { wallets }))
}

/// A route handler for fetching a single wallet.
pub async fn get_wallet_endpoint(
    State(state): State<ResourceState>,
    WithRejection(Path(wallet_id), _): WithRejection<Path<WalletId>, Error>,
) -> Result<Json<WalletJson>, Error> {
    let connection = state.connection()?;

    let wallet = get_wallet_by_id(wallet_id, &connection)?;

    Ok(Json(wallet.to_json(&state.base_url, &connection)?))
}

#[cfg(test)]
mod tests {
    use axum::{Json, extract::State};

    use crate::{
        Error,
        test_utils::{
            TEST_BASE_URL, must_create_parent_category, must_create_resource_state,
            must_create_test_user, must_create_wallet, with_path,
        },
    };

    use super::{get_wallet_endpoint, get_wallets_endpoint};

    #[tokio::test]
    async fn wallet_links_to_parent_categories() {
        let state = must_create_resource_state();
        let (wallet, parent_category) = {
            let connection = state.db_connection.lock().unwrap();
            let alice = must_create_test_user("alice", &connection);
            let wallet = must_create_wallet(alice.id, &connection);
            let parent_category = must_create_parent_category(wallet.id, &connection);
            (wallet, parent_category)
        };

        let Json(json) = get_wallet_endpoint(State(state), with_path(wallet.id))
            .await
            .unwrap();

        assert_eq!(json.url, format!("{TEST_BASE_URL}/api/v1.0/wallets/{}", wallet.id));
        assert_eq!(
            json.parent_categories,
            vec![format!(
                "{TEST_BASE_URL}/api/v1.0/parent-categories/{}",
                parent_category.id
            )]
        );
    }

    #[tokio::test]
    async fn lists_wallets_of_every_user() {
        let state = must_create_resource_state();
        {
            let connection = state.db_connection.lock().unwrap();
            let alice = must_create_test_user("alice", &connection);
            let bob = must_create_test_user("bob", &connection);
            must_create_wallet(alice.id, &connection);
            must_create_wallet(bob.id, &connection);
        }

        let Json(list) = get_wallets_endpoint(State(state)).await.unwrap();

        assert_eq!(list.wallets.len(), 2);
    }

    #[tokio::test]
    async fn missing_wallet_is_not_found() {
        let state = must_create_resource_state();

        let result = get_wallet_endpoint(State(state), with_path(42)).await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
