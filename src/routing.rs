//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    app_state::ResourceState,
    auth::{auth_guard, post_log_in},
    category::{
        create_category_endpoint, delete_category_endpoint, edit_category_endpoint,
        get_categories_endpoint, get_category_endpoint,
    },
    endpoints::{self, collection_url},
    parent_category::{
        create_parent_category_endpoint, delete_parent_category_endpoint,
        edit_parent_category_endpoint, get_parent_categories_endpoint,
        get_parent_category_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_transaction_endpoint, get_transactions_endpoint,
    },
    user::{
        create_user_endpoint, delete_user_endpoint, edit_user_endpoint, get_user_endpoint,
        get_users_endpoint,
    },
    wallet::{
        create_wallet_endpoint, delete_wallet_endpoint, edit_wallet_endpoint,
        get_wallet_endpoint, get_wallets_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every route except log-in requires an access token.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(endpoints::API_ROOT, get(get_api_index))
        .route(
            endpoints::USERS,
            get(get_users_endpoint).post(create_user_endpoint),
        )
        .route(
            endpoints::USER,
            get(get_user_endpoint)
                .put(edit_user_endpoint)
                .delete(delete_user_endpoint),
        )
        .route(
            endpoints::WALLETS,
            get(get_wallets_endpoint).post(create_wallet_endpoint),
        )
        .route(
            endpoints::WALLET,
            get(get_wallet_endpoint)
                .put(edit_wallet_endpoint)
                .delete(delete_wallet_endpoint),
        )
        .route(
            endpoints::PARENT_CATEGORIES,
            get(get_parent_categories_endpoint).post(create_parent_category_endpoint),
        )
        .route(
            endpoints::PARENT_CATEGORY,
            get(get_parent_category_endpoint)
                .put(edit_parent_category_endpoint)
                .delete(delete_parent_category_endpoint),
        )
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(edit_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(edit_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    Router::new()
        .route(endpoints::LOG_IN, post(post_log_in))
        .merge(protected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Links to every collection in the API.
async fn get_api_index(State(state): State<ResourceState>) -> Json<Value> {
    let base_url = &state.base_url;

    Json(json!({
        "users": collection_url(base_url, endpoints::USERS),
        "wallets": collection_url(base_url, endpoints::WALLETS),
        "parent_categories": collection_url(base_url, endpoints::PARENT_CATEGORIES),
        "categories": collection_url(base_url, endpoints::CATEGORIES),
        "transactions": collection_url(base_url, endpoints::TRANSACTIONS),
    }))
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
