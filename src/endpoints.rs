//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/users/{user_id}', use [format_endpoint].
//! Responses link to resources with absolute URLs built by [resource_url].

/// The index of the API which links to every collection.
pub const API_ROOT: &str = "/api/v1.0/";
/// The route for exchanging basic auth credentials for an access token.
pub const LOG_IN: &str = "/api/v1.0/login";
/// The collection of users.
pub const USERS: &str = "/api/v1.0/users";
/// A single user.
pub const USER: &str = "/api/v1.0/users/{user_id}";
/// The collection of wallets.
pub const WALLETS: &str = "/api/v1.0/wallets";
/// A single wallet.
pub const WALLET: &str = "/api/v1.0/wallets/{wallet_id}";
/// The collection of parent categories.
pub const PARENT_CATEGORIES: &str = "/api/v1.0/parent-categories";
/// A single parent category.
pub const PARENT_CATEGORY: &str = "/api/v1.0/parent-categories/{parent_category_id}";
/// The collection of categories.
pub const CATEGORIES: &str = "/api/v1.0/categories";
/// A single category.
pub const CATEGORY: &str = "/api/v1.0/categories/{category_id}";
/// The collection of transactions.
pub const TRANSACTIONS: &str = "/api/v1.0/transactions";
/// A single transaction.
pub const TRANSACTION: &str = "/api/v1.0/transactions/{transaction_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

/// The absolute URL of the resource at `endpoint_path` with `id`, e.g.
/// "http://localhost:3000/api/v1.0/wallets/1".
///
/// `base_url` must not end with a slash.
pub fn resource_url(base_url: &str, endpoint_path: &str, id: i64) -> String {
    format!("{base_url}{}", format_endpoint(endpoint_path, id))
}

/// The absolute URL of `endpoint_path`, for endpoints without a parameter.
pub fn collection_url(base_url: &str, endpoint_path: &str) -> String {
    format!("{base_url}{endpoint_path}")
}
